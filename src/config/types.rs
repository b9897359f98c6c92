use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub query: QueryDefaults,
}

/// Where and how to reach the events API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host (e.g., "https://sentry.io").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix for organization scoped endpoints.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Organization slug used as the second URL segment.
    #[serde(default)]
    pub organization: String,
    /// Inline bearer token. Takes precedence over `auth_env_var`.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Environment variable holding the bearer token.
    #[serde(default = "default_auth_env_var")]
    pub auth_env_var: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Defaults applied to every query unless overridden by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDefaults {
    /// Endpoint segment after the organization (e.g., "events").
    #[serde(default = "default_route")]
    pub route: String,
    /// Page size sent as `per_page`.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Referrer tag attached to every request.
    #[serde(default)]
    pub referrer: Option<String>,
}

fn default_base_url() -> String {
    "https://sentry.io".to_string()
}

fn default_base_path() -> String {
    "/api/0/organizations".to_string()
}

fn default_auth_env_var() -> String {
    "SENTRY_AUTH_TOKEN".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_route() -> String {
    "events".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_path: default_base_path(),
            organization: String::new(),
            auth_token: None,
            auth_env_var: default_auth_env_var(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            route: default_route(),
            limit: None,
            referrer: None,
        }
    }
}
