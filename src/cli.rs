//! Command-line boundary for the library catalog.
//!
//! The binary parses global flags, then hands an explicitly constructed
//! [`Catalog`] to the interactive shell. Catalog state lives for the session
//! and is discarded at exit.

use std::path::PathBuf;

mod render;
mod shell;
mod terminal;

use biblio::{Catalog, Config};
use clap::ArgAction;

/// Global command-line options.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML file with display settings
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Runs the interactive shell until the user quits.
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };

        let mut catalog = Catalog::new();
        shell::run(&mut catalog, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
