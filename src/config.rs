use std::env;

/// Address the backend listens on in local development.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend base URL.
pub const API_BASE_URL_ENV: &str = "COMMUNITY_FLOW_API_URL";

/// Connection settings for the Community Flow backend.
///
/// The base URL is resolved once and injected into the API client at
/// construction; nothing reads process-wide state after startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Resolves the base URL with precedence: explicit override, then the
    /// `COMMUNITY_FLOW_API_URL` environment variable, then the local default.
    pub fn resolve(override_url: Option<String>) -> Self {
        let base_url = override_url
            .or_else(|| env::var(API_BASE_URL_ENV).ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}
