// src/config/mod.rs
//! Run configuration.
//!
//! Layers, lowest precedence first: built-in defaults, `healthcheck.toml` in
//! the working directory, CI action inputs (`INPUT_*`), command-line flags.
//! The last layer is applied by the CLI.

pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, HealthcheckToml};
use crate::error::Result;
use std::path::{Path, PathBuf};

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the working directory, then loads `healthcheck.toml` and the
    /// action inputs visible through `lookup`.
    ///
    /// # Errors
    /// Returns error if `healthcheck.toml` is present but invalid.
    pub fn load<F>(cwd_override: Option<&Path>, lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        config.cwd = cwd_override
            .map(Path::to_path_buf)
            .or_else(|| io::action_working_directory(lookup))
            .unwrap_or_else(|| PathBuf::from("."));
        io::load_toml_config(&mut config)?;
        io::apply_action_inputs(&mut config, lookup);
        Ok(config)
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if `healthcheck.toml` is present but invalid.
    pub fn from_env(cwd_override: Option<&Path>) -> Result<Self> {
        Self::load(cwd_override, &|key: &str| std::env::var(key).ok())
    }

    /// # Errors
    /// Returns error if `content` is not a valid config document.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        io::parse_toml(self, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::new();
        assert_eq!(c.include, ["**/*.jsx", "**/*.tsx"]);
        assert_eq!(c.exclude.len(), 8);
        assert!(c.policy.fail_on_error);
        assert!(c.annotations);
        assert!(!c.show_successes);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let mut c = Config::new();
        c.parse_toml("include = [\"app/**/*.tsx\"]\nfail_on_error = false\nfail_threshold = 20\n")
            .unwrap();
        assert_eq!(c.include, ["app/**/*.tsx"]);
        assert!(!c.policy.fail_on_error);
        assert!((c.policy.fail_threshold - 20.0).abs() < f64::EPSILON);
    }
}
