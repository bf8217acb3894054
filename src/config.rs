//! Application configuration loaded from environment variables.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use strum::{Display, EnumString};

use crate::api::origin::AllowedOrigins;
use crate::api::handlers::FirebaseConfig;
use crate::error::{AppError, Result};

/// Allowlist used when `ALLOWED_ORIGINS` is unset or blank.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Default)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human readable, coloured output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listen port. Blank means unset.
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,

    /// Comma-separated list of origins allowed to read responses cross-origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    /// Expose Prometheus metrics on `/metrics`.
    #[serde(default)]
    pub metrics_enabled: bool,

    // === Realtime Database Credentials ===
    /// Web API key.
    #[serde(default)]
    pub firebase_api_key: String,

    /// Auth domain.
    #[serde(default)]
    pub firebase_auth_domain: String,

    /// Realtime database URL.
    #[serde(default)]
    pub firebase_database_url: String,

    /// Project id.
    #[serde(default)]
    pub firebase_project_id: String,

    /// Storage bucket.
    #[serde(default)]
    pub firebase_storage_bucket: String,

    /// Messaging sender id.
    #[serde(default)]
    pub firebase_messaging_sender_id: String,

    /// App id.
    #[serde(default)]
    pub firebase_app_id: String,

    // === Logging ===
    /// Log filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log format: `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_port() -> u16 {
    8080
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default_port());
    }
    raw.parse().map_err(serde::de::Error::custom)
}

fn default_allowed_origins() -> String {
    DEFAULT_ALLOWED_ORIGINS.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Build configuration from an explicit set of variables.
    ///
    /// Keys use the same upper-case names as the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into()));
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::InvalidConfig("PORT must be non-zero".to_string()));
        }

        if self.allowed_origins().iter().any(|o| o == "*") {
            return Err(AppError::InvalidConfig(
                "ALLOWED_ORIGINS must list exact origins; `*` cannot be used with credentials"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed origin allowlist. A blank value falls back to the default.
    pub fn allowed_origins(&self) -> AllowedOrigins {
        if self.allowed_origins.trim().is_empty() {
            AllowedOrigins::parse(DEFAULT_ALLOWED_ORIGINS)
        } else {
            AllowedOrigins::parse(&self.allowed_origins)
        }
    }

    /// Credential block relayed to the browser client.
    pub fn firebase(&self) -> FirebaseConfig {
        FirebaseConfig {
            api_key: self.firebase_api_key.clone(),
            auth_domain: self.firebase_auth_domain.clone(),
            database_url: self.firebase_database_url.clone(),
            project_id: self.firebase_project_id.clone(),
            storage_bucket: self.firebase_storage_bucket.clone(),
            messaging_sender_id: self.firebase_messaging_sender_id.clone(),
            app_id: self.firebase_app_id.clone(),
        }
    }

    /// Effective log format; unknown values fall back to pretty.
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_str(self.log_format.trim()).unwrap_or_default()
    }
}
