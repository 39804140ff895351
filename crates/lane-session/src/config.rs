//! # Display Configuration
//!
//! Configuration for the display session shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LANE_NONE_SALESPERSON_LABEL=Unassigned                             │
//! │     LANE_CURRENCY_SYMBOL=€                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/lane-pos/display.toml (Linux)                            │
//! │     ~/Library/Application Support/com.lane.pos/display.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "None", "$"                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # display.toml
//! [display]
//! none_salesperson_label = "Unassigned"
//! currency_symbol = "$"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use lane_core::DEFAULT_NONE_SALESPERSON_LABEL;

/// Name of the config file inside the platform config directory.
const CONFIG_FILE_NAME: &str = "display.toml";

// =============================================================================
// Config Error
// =============================================================================

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but is not valid TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Display Config
// =============================================================================

/// Settings the display shell consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DisplayConfig {
    /// Localized label for the "no salesperson" banner sentinel.
    pub none_salesperson_label: String,

    /// Currency symbol used by the preview binary's footer output.
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            none_salesperson_label: DEFAULT_NONE_SALESPERSON_LABEL.to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// On-disk file shape: settings live under a `[display]` section.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    display: DisplayConfigSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
struct DisplayConfigSection {
    none_salesperson_label: Option<String>,
    currency_symbol: Option<String>,
}

impl DisplayConfig {
    /// Loads configuration with the standard priority:
    /// defaults, then the platform config file if present, then env vars.
    pub fn load() -> ConfigResult<Self> {
        let mut config = DisplayConfig::default();

        if let Some(path) = Self::default_path() {
            if path.exists() {
                info!(path = %path.display(), "Loading display config file");
                config = Self::from_file(&path)?;
            } else {
                debug!(path = %path.display(), "No display config file, using defaults");
            }
        } else {
            warn!("No platform config directory available, using defaults");
        }

        Ok(config.with_env_overrides())
    }

    /// Loads configuration from a specific TOML file, over defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses configuration from TOML text, over defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let defaults = DisplayConfig::default();

        Ok(DisplayConfig {
            none_salesperson_label: file
                .display
                .none_salesperson_label
                .unwrap_or(defaults.none_salesperson_label),
            currency_symbol: file
                .display
                .currency_symbol
                .unwrap_or(defaults.currency_symbol),
        })
    }

    /// Applies `LANE_*` environment variable overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(label) = std::env::var("LANE_NONE_SALESPERSON_LABEL") {
            if !label.trim().is_empty() {
                debug!(label = %label, "Overriding none-salesperson label from env");
                self.none_salesperson_label = label;
            }
        }
        if let Ok(symbol) = std::env::var("LANE_CURRENCY_SYMBOL") {
            if !symbol.trim().is_empty() {
                self.currency_symbol = symbol;
            }
        }
        self
    }

    /// The platform config file path, when a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "lane", "lane-pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
