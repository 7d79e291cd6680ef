//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or `config.toml` in the platform config dir)
//! 3. Environment variables prefixed with `DUPMERGE_`
//! 4. Command-line flags (applied by [`Config::apply_cli`])
//!
//! A missing config file is fine; a malformed one is an error.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::actions::DEFAULT_MAX_LINE_LENGTH;
use crate::cli::Cli;
use crate::duplicates::DEFAULT_PREFIX_SEPARATOR;
use crate::scanner::HashAlgorithm;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DUPMERGE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content hash algorithm.
    pub algorithm: HashAlgorithm,
    /// Longest line (in bytes) the line deduplicator accepts.
    pub max_line_length: usize,
    /// Sort the directory listing by file name.
    pub sort_entries: bool,
    /// Remove stale `<name>.tmp` files before scanning.
    pub clean_temp_files: bool,
    /// Move removed files to the system trash instead of unlinking them.
    pub use_trash: bool,
    /// Character ending the file name prefix used for grouping.
    pub prefix_separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            sort_entries: true,
            clean_temp_files: false,
            use_trash: false,
            prefix_separator: DEFAULT_PREFIX_SEPARATOR,
        }
    }
}

impl Config {
    /// Build the layered figment: defaults, then the config file (if any),
    /// then the environment.
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = config_file.map(Path::to_path_buf).or_else(Self::default_path) {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration from file and environment.
    ///
    /// # Errors
    ///
    /// Returns a figment error if the file or an environment variable holds
    /// a value of the wrong type.
    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(config_file).extract()
    }

    /// Apply command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(algorithm) = cli.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(max) = cli.max_line_length {
            self.max_line_length = usize::try_from(max).unwrap_or(usize::MAX);
        }
        if cli.unsorted {
            self.sort_entries = false;
        }
        if cli.clean_temp {
            self.clean_temp_files = true;
        }
        if cli.trash {
            self.use_trash = true;
        }
        if let Some(separator) = cli.separator {
            self.prefix_separator = separator;
        }
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a value can't be represented in TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Default platform-specific config file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupmerge", "dupmerge")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
