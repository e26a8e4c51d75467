use thiserror::Error;

/// Errors returned by the WordPress REST client.
#[derive(Debug, Error)]
pub enum WpError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured origin could not be parsed into a base URL.
    #[error("invalid WordPress origin '{0}'")]
    BaseUrl(String),

    /// WordPress answered with a non-2xx status. The body is kept verbatim
    /// so the proxy can relay it unchanged.
    #[error("WordPress returned status {status}")]
    Upstream { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
