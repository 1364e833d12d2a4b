use std::time::Duration;

use showlog_client::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for a locally running store.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the series store (default: `http://localhost:3001`).
    pub store_url: String,
    /// HTTP request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `STORE_URL`            | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                    |
    pub fn from_env() -> Self {
        let store_url = std::env::var("STORE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            store_url,
            request_timeout_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
