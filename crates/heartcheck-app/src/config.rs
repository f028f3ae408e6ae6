//! Application configuration

use heartcheck_classifiers::DEFAULT_MODEL_PATH;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Classifier artifact location
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// HTTP listener
    #[serde(default)]
    pub listen: ListenConfig,

    /// Heading of the form page
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Browser window title of the form page
    #[serde(default = "default_window_title")]
    pub window_title: String,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model_path: Option<PathBuf>,
    pub address: Option<String>,
    pub port: Option<u16>,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: impl AsRef<Path>, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            Self::default()
        };

        if let Some(model_path) = &overrides.model_path {
            config.model_path = model_path.clone();
        }
        if let Some(address) = &overrides.address {
            config.listen.address = address.clone();
        }
        if let Some(port) = overrides.port {
            config.listen.port = port;
        }

        Ok(config)
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.listen.address, self.listen.port).parse()?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            listen: ListenConfig::default(),
            page_title: default_page_title(),
            window_title: default_window_title(),
        }
    }
}

/// Listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_page_title() -> String {
    "Heart Disease Risk - Interactive Demo".to_string()
}

fn default_window_title() -> String {
    "Heart Disease Risk App".to_string()
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}
