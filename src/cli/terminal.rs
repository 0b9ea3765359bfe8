//! Terminal capability detection and output styling.

use owo_colors::{colors::css, OwoColorize};

/// Whether colored output should be enabled on stdout.
pub fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detected terminal width, or `None` when not running in a terminal.
pub fn width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Whether the terminal is too narrow for full-width tables (< 72 columns).
pub fn is_narrow() -> bool {
    width().is_some_and(|w| w < 72)
}

/// Extension trait for styling shell output.
///
/// Every method degrades to the plain string when stdout is not a
/// color-capable terminal.
pub trait Style {
    /// Style as a success message (green).
    fn success(&self) -> String;
    /// Style as a warning (yellow) — rejected requests, unknown ids.
    fn warning(&self) -> String;
    /// De-emphasize (dim) — separators and hints.
    fn dim(&self) -> String;
    /// Emphasize (bold) — table headers.
    fn strong(&self) -> String;
}

impl Style for str {
    fn success(&self) -> String {
        if color_enabled() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if color_enabled() {
            self.fg::<css::Gold>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if color_enabled() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }

    fn strong(&self) -> String {
        if color_enabled() {
            self.bold().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Style for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }

    fn strong(&self) -> String {
        self.as_str().strong()
    }
}
