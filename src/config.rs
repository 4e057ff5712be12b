use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted contact and history lists (and the
    /// log file).
    pub data_dir: String,
    /// Directory that CSV and JSON exports are written into.
    pub export_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self {
            data_dir: format!("{}/.market-tui", home),
            export_dir: home,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".market-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config file, falling back to defaults when it is absent
    /// or unreadable. There is nothing mandatory to configure.
    pub fn load() -> Config {
        let config_path = match Self::config_path() {
            Some(p) if p.exists() => p,
            _ => return Config::default(),
        };

        fs::read_to_string(&config_path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }
}
