//! Configuration loading and root folder resolution
//!
//! Settings come from a TOML file; every key is optional. The root folder
//! (where prediction marks are persisted) resolves in priority order:
//! 1. Command-line argument
//! 2. `KEIBA_ROOT_FOLDER` environment variable
//! 3. `root_folder` in the TOML file
//! 4. OS-dependent default

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::predictions::DEFAULT_STORAGE_KEY;
use crate::{Error, Result};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "KEIBA_ROOT_FOLDER";

/// Environment variable overriding the config file location
pub const CONFIG_FILE_ENV: &str = "KEIBA_CONFIG";

/// Default HTTP port for keiba-web
pub const DEFAULT_PORT: u16 = 5740;

/// Settings file contents
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Folder holding persisted prediction marks
    pub root_folder: Option<PathBuf>,

    /// HTTP bind address
    pub bind: String,

    /// HTTP server port
    pub port: u16,

    pub provider: ProviderConfig,

    pub predictions: PredictionsConfig,

    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            bind: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            provider: ProviderConfig::default(),
            predictions: PredictionsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Which race data provider to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Built-in fixtures
    #[default]
    Mock,
    /// Remote JSON API at `base_url`
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,

    /// Base URL for the HTTP provider, e.g. "https://example.com/api"
    pub base_url: Option<String>,

    /// Request timeout for the HTTP provider
    pub timeout_secs: u64,

    /// Artificial delay for the mock provider
    pub mock_latency_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Mock,
            base_url: None,
            timeout_secs: 10,
            mock_latency_ms: 0,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictionsConfig {
    /// Storage key (file stem) of the predictions document
    pub key: String,
}

impl Default for PredictionsConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults
    ///
    /// `explicit` (from the command line) wins over `KEIBA_CONFIG`, which
    /// wins over the platform config directory. A missing or invalid file
    /// logs a warning and yields defaults; startup never fails on config.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let Some(path) = config_file_path(explicit) else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.provider.kind == ProviderKind::Http && self.provider.base_url.is_none() {
            return Err(Error::Config(
                "provider.base_url is required when provider.kind = \"http\"".to_string(),
            ));
        }
        if self.predictions.key.trim().is_empty() {
            return Err(Error::Config("predictions.key must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Locate the config file, if one exists
fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    let user_config = dirs::config_dir().map(|d| d.join("keiba").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/keiba/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolve the root folder from CLI arg, environment, TOML, then OS default
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/keiba
        dirs::data_local_dir()
            .map(|d| d.join("keiba"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/keiba"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/keiba
        dirs::data_dir()
            .map(|d| d.join("keiba"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/keiba"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\keiba
        dirs::data_local_dir()
            .map(|d| d.join("keiba"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\keiba"))
    } else {
        PathBuf::from("./keiba_data")
    }
}
