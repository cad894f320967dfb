//! Settings for the lookup page.
//!
//! Sources, later ones winning:
//! 1. built-in defaults (the lookup page's fixed values),
//! 2. an optional file named by `ORDER_LOOKUP_CONFIG` (format from its extension),
//! 3. environment variables prefixed `ORDER_LOOKUP_`, e.g. `ORDER_LOOKUP_ENDPOINT`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Names the optional settings file.
pub const CONFIG_PATH_ENV: &str = "ORDER_LOOKUP_CONFIG";
/// Prefix of per-setting environment overrides.
pub const ENV_PREFIX: &str = "ORDER_LOOKUP";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/orders";
pub const DEFAULT_USER_AGENT: &str = "any-name";
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Config error: {0}")]
    Load(#[from] ConfigError),
    #[error("Invalid header value {0}")]
    InvalidHeader(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LookupConfig {
    pub endpoint: String,
    pub user_agent: String,
    /// Sent as `Transfer-Encoding` when set and non-blank. The HTTP client
    /// appends `chunked` and never encodes the body itself, so only `chunked`
    /// is safe here. Unset by default.
    pub transfer_encoding: Option<String>,
    /// No timeout when unset: a hung request waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub form_id: String,
    pub field_name: String,
    pub display_id: String,
    pub channel_buffer: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transfer_encoding: None,
            request_timeout_secs: None,
            form_id: crate::document::FORM_ID.to_string(),
            field_name: crate::document::ORDER_FIELD.to_string(),
            display_id: crate::document::DISPLAY_ID.to_string(),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

impl LookupConfig {
    /// Loads defaults, the optional file and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        let path = env::var(CONFIG_PATH_ENV).ok();
        match &path {
            Some(path) => info!(path = %path, "Loading config file"),
            None => info!("{} not set, using defaults and environment", CONFIG_PATH_ENV),
        }
        Self::from_builder(Self::defaults()?, path.as_deref(), Some(Self::environment()))
    }

    /// Loads defaults plus an explicit file, ignoring the environment.
    pub fn from_file(path: &str) -> Result<Self, SettingsError> {
        Self::from_builder(Self::defaults()?, Some(path), None)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let d = Self::default();
        Config::builder()
            .set_default("endpoint", d.endpoint)?
            .set_default("user_agent", d.user_agent)?
            .set_default("form_id", d.form_id)?
            .set_default("field_name", d.field_name)?
            .set_default("display_id", d.display_id)?
            .set_default("channel_buffer", d.channel_buffer as u64)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).try_parsing(true)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&str>,
        environment: Option<Environment>,
    ) -> Result<Self, SettingsError> {
        let mut builder = builder;
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        if let Some(environment) = environment {
            builder = builder.add_source(environment);
        }
        let mut config: Self = builder.build()?.try_deserialize()?;
        if config.transfer_encoding.as_deref().is_some_and(|v| v.trim().is_empty()) {
            config.transfer_encoding = None;
        }
        Ok(config)
    }
}
