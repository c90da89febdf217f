//! Configuration for the OIDC login demo
//!
//! Sources, later ones winning:
//! - Configuration file (`config.toml`, or the path in `OIDC_DEMO_CONFIG_FILE`)
//! - Environment variables with the `OIDC_DEMO` prefix, `__` between levels
//!   (e.g. `OIDC_DEMO__SERVER__PORT`, `OIDC_DEMO__OIDC__SCOPE`)
//! - The identity provider variables `PINGONE_AUTH_BASE_URL`,
//!   `PINGONE_ENVIRONMENT_ID`, `PINGONE_CLIENT_ID`, `PINGONE_CLIENT_SECRET`
//!   and `PINGONE_APP_BASE_URL`, plus `HOST`, `PORT` and `RUST_LOG`

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File};
use ras_identity_oidc::OidcClientConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// Main configuration struct for the demo server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,

    /// Client registration and authorization server coordinates
    pub oidc: OidcClientConfig,

    pub logging: LoggingConfig,

    /// Layers that contributed to this configuration, in application order.
    /// Logged once the tracing subscriber is installed.
    #[serde(skip)]
    pub sources: Vec<String>,
}

/// Server network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to (default: 0.0.0.0)
    pub host: IpAddr,

    /// Port to bind to (default: 3000)
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,

    /// Whether to include the target module
    pub target: bool,
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            target: true,
        }
    }
}

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

impl AppConfig {
    /// Load configuration from the environment and an optional config file
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("OIDC_DEMO_CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load configuration using `config_path` as the file layer
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();
        let mut sources = Vec::new();

        if config_path.exists() {
            builder = builder.add_source(File::from(config_path));
            sources.push(format!("file {}", config_path.display()));
        }

        builder = builder.add_source(Environment::with_prefix("OIDC_DEMO").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let mut settings: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.sources = sources;
        settings.apply_env_overrides()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Apply the identity provider and legacy variables
    fn apply_env_overrides(&mut self) -> Result<()> {
        let oidc_vars: [(&str, &mut String); 5] = [
            ("PINGONE_AUTH_BASE_URL", &mut self.oidc.auth_base_url),
            ("PINGONE_ENVIRONMENT_ID", &mut self.oidc.environment_id),
            ("PINGONE_CLIENT_ID", &mut self.oidc.client_id),
            ("PINGONE_CLIENT_SECRET", &mut self.oidc.client_secret),
            ("PINGONE_APP_BASE_URL", &mut self.oidc.app_base_url),
        ];
        for (name, slot) in oidc_vars {
            if let Ok(value) = std::env::var(name) {
                *slot = value;
                self.sources.push(format!("env {}", name));
            }
        }

        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host.parse().context("Invalid HOST value")?;
            self.sources.push("env HOST".to_string());
        }

        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().context("Invalid PORT value")?;
            self.sources.push("env PORT".to_string());
        }

        if let Ok(log_level) = std::env::var("RUST_LOG") {
            self.logging.level = log_level;
            self.sources.push("env RUST_LOG".to_string());
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        self.oidc
            .validate()
            .context("Invalid OIDC client configuration")?;

        if self.oidc.redirect_path == "/" {
            anyhow::bail!("OIDC redirect path cannot be '/', it is taken by the login page");
        }

        let level = self.logging.level.to_lowercase();
        if !is_filter_directive(&level) && !VALID_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {:?}",
                self.logging.level,
                VALID_LEVELS
            );
        }

        let format = self.logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&format.as_str()) {
            anyhow::bail!(
                "Invalid log format '{}'. Must be one of: {:?}",
                self.logging.format,
                VALID_FORMATS
            );
        }

        Ok(())
    }

    /// Get the socket address for the server
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.server.host, self.server.port))
    }

    /// Get the log filter string for tracing
    pub fn log_filter(&self) -> String {
        if is_filter_directive(&self.logging.level) {
            self.logging.level.clone()
        } else {
            format!(
                "oidc_login={},ras_identity_oidc={},tower_http={},{}",
                self.logging.level, self.logging.level, self.logging.level, self.logging.level
            )
        }
    }
}

fn is_filter_directive(level: &str) -> bool {
    level.contains('=') || level.contains(',')
}
