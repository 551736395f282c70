//! API client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the storefront API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the commerce API (no trailing slash required).
    pub base_url: String,
    /// Locale sent as `Accept-Language` on every request.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ApiConfig {
    /// Create a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            locale: default_locale(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
