//! Configuration management.
//!
//! Handles:
//! - The default roster file
//! - Default group parameters used when `generate` flags are omitted

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crewgroup_allocator::MIN_GROUP_SIZE;

use crate::error::CliError;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Keys accepted by `crew config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "roster_path",
    "group_count",
    "min_group_size",
    "require_writer",
    "require_dp",
];

/// Get the config directory path.
///
/// `CREW_CONFIG_DIR` overrides the platform location.
fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CREW_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("com", "crewgroup", "crew")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// Path of the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Roster file used when `--roster` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roster_path: Option<PathBuf>,

    /// Default number of groups.
    #[serde(default = "default_group_count")]
    pub group_count: usize,

    /// Default minimum group size.
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,

    /// Require one WRITER per group by default.
    #[serde(default = "default_true")]
    pub require_writer: bool,

    /// Require one DP per group by default.
    #[serde(default = "default_true")]
    pub require_dp: bool,
}

fn default_group_count() -> usize {
    2
}

fn default_min_group_size() -> usize {
    MIN_GROUP_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_path: None,
            group_count: default_group_count(),
            min_group_size: default_min_group_size(),
            require_writer: true,
            require_dp: true,
        }
    }
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load config from a specific file, or return default if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save config to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
        }

        Ok(())
    }

    /// Set a single key from its text value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        let value = value.trim();
        match key {
            "roster_path" => {
                self.roster_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "group_count" => {
                let count = parse_count(key, value)?;
                if count < 1 {
                    return Err(CliError::invalid_config(key, "must be at least 1"));
                }
                self.group_count = count;
            }
            "min_group_size" => {
                let size = parse_count(key, value)?;
                if size < MIN_GROUP_SIZE {
                    return Err(CliError::invalid_config(key, "must be at least 2"));
                }
                self.min_group_size = size;
            }
            "require_writer" => self.require_writer = parse_flag(key, value)?,
            "require_dp" => self.require_dp = parse_flag(key, value)?,
            _ => {
                return Err(CliError::invalid_config(
                    key,
                    format!("unknown key (expected one of: {})", CONFIG_KEYS.join(", ")),
                ))
            }
        }
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, CliError> {
    value
        .parse()
        .map_err(|_| CliError::invalid_config(key, format!("'{}' is not a whole number", value)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, CliError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enabled" => Ok(true),
        "0" | "false" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(CliError::invalid_config(
            key,
            format!("'{}' is not a boolean", value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.group_count, 2);
        assert_eq!(config.min_group_size, 2);
        assert!(config.require_writer);
        assert!(config.require_dp);
        assert!(config.roster_path.is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"group_count": 4}"#).unwrap();
        assert_eq!(config.group_count, 4);
        assert_eq!(config.min_group_size, 2);
        assert!(config.require_dp);
    }

    #[test]
    fn test_set_keys() {
        let mut config = Config::default();
        config.set("group_count", "5").unwrap();
        config.set("min_group_size", " 3 ").unwrap();
        config.set("require_writer", "off").unwrap();
        config.set("require_dp", "Enabled").unwrap();
        config.set("roster_path", "crew.csv").unwrap();

        assert_eq!(config.group_count, 5);
        assert_eq!(config.min_group_size, 3);
        assert!(!config.require_writer);
        assert!(config.require_dp);
        assert_eq!(config.roster_path, Some(PathBuf::from("crew.csv")));

        config.set("roster_path", "").unwrap();
        assert!(config.roster_path.is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("group_count", "0").is_err());
        assert!(config.set("group_count", "two").is_err());
        assert!(config.set("min_group_size", "1").is_err());
        assert!(config.set("require_dp", "maybe").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join(CONFIG_FILE);

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.set("group_count", "3").unwrap();
        config.set("roster_path", "/tmp/crew.csv").unwrap();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
