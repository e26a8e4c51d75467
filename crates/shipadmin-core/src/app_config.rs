use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Immutable application configuration, built once at process start and
/// passed by reference into the components that need it.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// WordPress origin, e.g. `https://shop.example.com` (no trailing slash).
    pub wp_origin: String,
    /// Basic-auth username for the WordPress REST API. Server-side only.
    pub wp_user: Option<String>,
    /// Application password paired with `wp_user`. Server-side only.
    pub wp_app_pass: Option<String>,
    pub wp_timeout_secs: u64,
    /// Route list requests through the `shipping/v1/search` plugin endpoint.
    pub wp_search_enabled: bool,
    pub default_per_page: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("wp_origin", &self.wp_origin)
            .field("wp_user", &self.wp_user)
            .field(
                "wp_app_pass",
                &self.wp_app_pass.as_ref().map(|_| "[redacted]"),
            )
            .field("wp_timeout_secs", &self.wp_timeout_secs)
            .field("wp_search_enabled", &self.wp_search_enabled)
            .field("default_per_page", &self.default_per_page)
            .finish()
    }
}
