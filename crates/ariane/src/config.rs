//! Environment-based server configuration.

use std::env;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the WebSocket listener binds to (`ARIANE_WS_ADDR`).
    pub ws_addr: String,

    /// Address the HTTP ingestion listener binds to (`ARIANE_HTTP_ADDR`).
    pub http_addr: String,

    /// Origin allowed by CORS on the ingestion endpoints
    /// (`ARIANE_CLIENT_URL`).
    pub client_url: String,

    /// Shared secret required by the ingestion endpoints, if set
    /// (`ARIANE_INGEST_SECRET`). Unset means no check.
    pub ingest_secret: Option<String>,
}

impl Config {
    /// Reads configuration from the environment, falling back to the
    /// defaults of [`Config::default`] for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ws_addr: env::var("ARIANE_WS_ADDR")
                .unwrap_or(defaults.ws_addr),
            http_addr: env::var("ARIANE_HTTP_ADDR")
                .unwrap_or(defaults.http_addr),
            client_url: env::var("ARIANE_CLIENT_URL")
                .unwrap_or(defaults.client_url),
            ingest_secret: env::var("ARIANE_INGEST_SECRET").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ws_addr: "0.0.0.0:3001".to_string(),
            http_addr: "0.0.0.0:3002".to_string(),
            client_url: "http://localhost:5173".to_string(),
            ingest_secret: None,
        }
    }
}
