use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 300;

/// Process-wide settings, read once at startup and handed to the handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` is allowed at startup; relay requests fail until it is set.
    pub upstream_url: Option<String>,
    pub port: u16,
    pub connect_timeout: Duration,
    /// Upper bound on one relayed exchange, body included.
    pub relay_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let upstream_url = lookup("CLOUDFLARE_WORKER_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let secs = |key: &str, default: u64| {
            lookup(key)
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .unwrap_or(default)
        };

        Self {
            upstream_url,
            port,
            connect_timeout: Duration::from_secs(secs(
                "RELAY_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            relay_timeout: Duration::from_secs(secs("RELAY_TIMEOUT_SECS", DEFAULT_RELAY_TIMEOUT_SECS)),
        }
    }
}
