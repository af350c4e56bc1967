use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub auth: AuthConfig,
    pub engine: EngineConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Token validation service
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub url: String,
    pub timeout_secs: u64,
}

/// Streaming recognition engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub connect_timeout_secs: u64,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl AuthConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl EngineConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Config {
    /// Load configuration from an optional file at `path`, overlaid with
    /// `DICTATION_BRIDGE__*` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "dictation-bridge")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8080)?
            .set_default("auth.url", "http://127.0.0.1:8000/api/v1/me/token")?
            .set_default("auth.timeout_secs", 5)?
            .set_default(
                "engine.url",
                "ws://127.0.0.1:9000/v1/speech:streamingRecognize",
            )?
            .set_default("engine.connect_timeout_secs", 10)?
            .set_default("engine.model", "latest_short")?
            .set_default("log.level", "info")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("DICTATION_BRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path))?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}
