//! Host configuration for the REPL binary.
//!
//! Loaded from `<config_dir>/nebsh/config.toml`; a missing file yields the
//! defaults, so a bare install works with zero setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{Privilege, User};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Settings for the shell host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Name of the initial user.
    #[serde(default = "default_user")]
    pub user: String,
    /// Privilege of the initial user (User, Admin, Root).
    #[serde(default = "default_privilege")]
    pub privilege: String,
    /// Print the greeting banner on startup.
    #[serde(default = "default_show_motd")]
    pub show_motd: bool,
}

fn default_user() -> String {
    String::from("root")
}

fn default_privilege() -> String {
    String::from("Admin")
}

fn default_show_motd() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            user: default_user(),
            privilege: default_privilege(),
            show_motd: default_show_motd(),
        }
    }
}

impl ShellConfig {
    /// Returns the path to the configuration file, via `dirs::config_dir()`.
    /// Falls back to the current directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("nebsh").join("config.toml")
    }

    /// Loads configuration from the default config file. A missing file
    /// yields `ShellConfig::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(ShellConfig::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_owned(),
            source: e,
        })?;

        let config: ShellConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_owned(),
            source: e,
        })?;

        Ok(config)
    }

    /// The initial user described by this configuration.
    pub fn initial_user(&self) -> Result<User, ConfigError> {
        let privilege =
            Privilege::parse(&self.privilege).ok_or_else(|| ConfigError::ValidationError {
                message: format!(
                    "unknown privilege '{}' (expected User, Admin, or Root)",
                    self.privilege
                ),
            })?;
        Ok(User::new(self.user.clone(), privilege))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_produce_an_admin_root_user() {
        let config = ShellConfig::default();
        let user = config.initial_user().unwrap();
        assert_eq!(user.name, "root");
        assert_eq!(user.privilege, Privilege::Admin);
        assert!(config.show_motd);
    }

    #[test]
    fn loads_partial_config_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user = \"alice\"").unwrap();
        let config = ShellConfig::load_from(file.path()).unwrap();
        assert_eq!(config.user, "alice");
        assert_eq!(config.privilege, "Admin");
    }

    #[test]
    fn rejects_unknown_privilege() {
        let config = ShellConfig {
            privilege: "Wizard".into(),
            ..ShellConfig::default()
        };
        assert!(matches!(
            config.initial_user(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user = [not toml").unwrap();
        assert!(matches!(
            ShellConfig::load_from(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
