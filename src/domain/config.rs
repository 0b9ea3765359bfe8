use std::path::Path;

use serde::Deserialize;

/// Display configuration for the catalog tool.
///
/// Loaded from an optional TOML file; every field has a default so a missing
/// file (or an empty one) behaves identically to no configuration at all.
/// The catalog's contents are never persisted — only presentation settings
/// live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// The number of digits used when displaying identifiers.
    ///
    /// Identifiers are padded to this width with leading zeros, e.g. '007'
    /// (3 digits) or '0007' (4 digits). Wider identifiers are not truncated.
    #[serde(default = "default_digits")]
    digits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            digits: default_digits(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the number of digits for padding identifiers.
    #[must_use]
    pub const fn digits(&self) -> usize {
        self.digits
    }
}

const fn default_digits() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"digits = 4\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.digits(), 4);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"digits = \"three\"\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str("").unwrap();
        assert_eq!(actual, expected);
    }
}
