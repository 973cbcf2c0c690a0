use crate::error::{BinderyError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FIRST_LINE_INDENT: i32 = 720;
const DEFAULT_HEADING_SIZE: usize = 32;

/// Configuration for bindery, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BinderyConfig {
    /// First-line indent of exported paragraphs, in twips
    pub first_line_indent: i32,

    /// Size of chapter headings in combined exports, in half-points
    pub heading_size: usize,

    /// Default trailing window for statistics; 0 keeps every day
    pub stats_window_days: u32,

    /// Include closed books when listing the root
    pub show_closed_books: bool,
}

impl Default for BinderyConfig {
    fn default() -> Self {
        Self {
            first_line_indent: DEFAULT_FIRST_LINE_INDENT,
            heading_size: DEFAULT_HEADING_SIZE,
            stats_window_days: 0,
            show_closed_books: false,
        }
    }
}

impl BinderyConfig {
    /// Load config from the given directory.
    ///
    /// Settings are advisory: a missing or unreadable file yields defaults.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Self {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(&config_path)
            .map_err(BinderyError::Io)
            .and_then(|content| serde_json::from_str(&content).map_err(BinderyError::from));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "ignoring unreadable settings at {}: {}",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BinderyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BinderyError::Serialization)?;
        let tmp = config_dir.join(format!(".config-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(BinderyError::Io)?;
        fs::rename(&tmp, &config_path).map_err(BinderyError::Io)?;
        Ok(())
    }

    /// Applies a `key = value` pair as typed by a user.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |_| BinderyError::Validation(format!("Invalid value for {}: {}", key, value));
        match key {
            "first-line-indent" => self.first_line_indent = value.parse().map_err(invalid)?,
            "heading-size" => self.heading_size = value.parse().map_err(invalid)?,
            "stats-window-days" => self.stats_window_days = value.parse().map_err(invalid)?,
            "show-closed-books" => {
                self.show_closed_books = value.parse().map_err(|_| {
                    BinderyError::Validation(format!("Invalid value for {}: {}", key, value))
                })?
            }
            other => {
                return Err(BinderyError::Validation(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("first-line-indent", self.first_line_indent.to_string()),
            ("heading-size", self.heading_size.to_string()),
            ("stats-window-days", self.stats_window_days.to_string()),
            ("show-closed-books", self.show_closed_books.to_string()),
        ]
    }
}
