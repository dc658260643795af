use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub network: NetworkConfig,
    pub refresh: RefreshConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    pub interval_secs: u64,
    /// Drop report responses that arrive after a newer one was shown.
    pub request_fencing: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            request_fencing: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Skyline Cockpit".to_string(),
            width: 1100.0,
            height: 720.0,
        }
    }
}

impl AppConfig {
    /// Load defaults, `./config.toml`, the user config file and
    /// `COCKPIT__*` environment variables, in increasing priority.
    pub fn load() -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skyline-cockpit");

        let builder = Self::defaults()?
            // 1. Local config file (optional, lowest priority)
            .add_source(File::from(PathBuf::from("config.toml")).required(false))
            // 2. User config directory (optional, overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false))
            // 3. Environment variables (COCKPIT__SERVER__BASE_URL=...)
            .add_source(Environment::with_prefix("COCKPIT").separator("__"));

        let s = builder.build().context("Failed to build configuration")?;
        Ok(s.try_deserialize()?)
    }

    /// Load defaults overlaid with one required config file, then the
    /// environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let builder = Self::defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .add_source(Environment::with_prefix("COCKPIT").separator("__"));

        let s = builder
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        Ok(s.try_deserialize()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let server = ServerConfig::default();
        let network = NetworkConfig::default();
        let refresh = RefreshConfig::default();
        let window = WindowConfig::default();

        Ok(Config::builder()
            // Server
            .set_default("server.base_url", server.base_url)?
            // Network
            .set_default("network.request_timeout_secs", network.request_timeout_secs as i64)?
            .set_default("network.connect_timeout_secs", network.connect_timeout_secs as i64)?
            // Refresh
            .set_default("refresh.interval_secs", refresh.interval_secs as i64)?
            .set_default("refresh.request_fencing", refresh.request_fencing)?
            // Window
            .set_default("window.title", window.title)?
            .set_default("window.width", window.width as f64)?
            .set_default("window.height", window.height as f64)?)
    }
}
