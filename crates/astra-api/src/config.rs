//! Server configuration read from the environment.

use astra_core::defaults;
use axum::http::HeaderValue;

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request body ceiling in bytes.
    pub max_body_bytes: usize,
    /// Per-user history cap; 0 disables eviction.
    pub history_max_entries: usize,
    /// Explicit CORS origin list. `None` mirrors any origin.
    pub cors_allowed_origins: Option<Vec<HeaderValue>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            max_body_bytes: defaults::MAX_BODY_BYTES,
            history_max_entries: defaults::HISTORY_MAX_ENTRIES,
            cors_allowed_origins: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`, `PORT`: bind address (default `0.0.0.0:8000`)
    /// - `MAX_BODY_BYTES`: request body limit (default 25 MiB)
    /// - `HISTORY_MAX_ENTRIES`: per-user history cap (default 1000, 0 = unbounded)
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origin list (default: any origin)
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| defaults::SERVER_HOST.to_string()),
            port: env_parse("PORT", defaults::SERVER_PORT),
            max_body_bytes: env_parse("MAX_BODY_BYTES", defaults::MAX_BODY_BYTES),
            history_max_entries: env_parse("HISTORY_MAX_ENTRIES", defaults::HISTORY_MAX_ENTRIES),
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|raw| parse_allowed_origins(&raw))
                .filter(|origins| !origins.is_empty()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a comma-separated CORS origin list, skipping blanks and invalid values.
///
/// # Examples
/// ```bash
/// CORS_ALLOWED_ORIGINS=https://astra.example.com,http://localhost:3000
/// ```
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
