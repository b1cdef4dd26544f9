//! Bootstrap configuration loading and database path resolution
//!
//! Resolution priority for every bootstrap value:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "LODGE_CONFIG";

/// Environment variable naming the SQLite database file
pub const DATABASE_ENV_VAR: &str = "LODGE_DATABASE";

/// Default HTTP port for the import service
pub const DEFAULT_PORT: u16 = 5740;

/// Bootstrap configuration loaded from TOML
///
/// Every field is optional in the file; missing fields fall back to the
/// compiled defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Import pipeline configuration
    #[serde(default)]
    pub import: ImportConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Import pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Number of warning lines listed in an import summary before the
    /// `... and N more` suffix
    #[serde(default = "default_max_listed_warnings")]
    pub max_listed_warnings: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_listed_warnings() -> usize {
    5
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            bind_address: default_bind_address(),
            port: default_port(),
            logging: LoggingConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_listed_warnings: default_max_listed_warnings(),
        }
    }
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Load bootstrap configuration
///
/// An explicitly named file (CLI or `LODGE_CONFIG`) must exist and parse.
/// The default per-user file is optional: when it is absent the compiled
/// defaults are used and a warning is logged.
pub fn load_config(cli_path: Option<&Path>) -> Result<TomlConfig> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_path {
        info!("Loading config from {}", path.display());
        return TomlConfig::from_file(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(path);
        info!("Loading config from {} ({})", path.display(), CONFIG_ENV_VAR);
        return TomlConfig::from_file(&path);
    }

    // Priority 3: Default config file location
    match default_config_file() {
        Some(path) if path.exists() => {
            info!("Loading config from {}", path.display());
            TomlConfig::from_file(&path)
        }
        _ => {
            // Priority 4: Compiled defaults
            warn!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Resolve the SQLite database path
pub fn resolve_database_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(path) = &config.database_path {
        return path.clone();
    }

    default_data_folder().join("lodge.db")
}

/// Per-user config file: `<config_dir>/lodge/config.toml`
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lodge").join("config.toml"))
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/lodge (or /var/lib/lodge for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("lodge"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/lodge"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("lodge"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/lodge"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("lodge"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\lodge"))
    } else {
        PathBuf::from("./lodge_data")
    }
}
