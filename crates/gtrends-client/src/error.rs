use thiserror::Error;

/// Boxed cause carried by transport-level failures from any [`HttpSend`](crate::HttpSend)
/// implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by the Google Trends client.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// An explore request carried no comparison items.
    #[error("invalid request param: at least one comparison item is required")]
    EmptyRequest,

    /// A request descriptor could not be serialized into the `req` parameter.
    #[error("invalid request param: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// `GTRENDS_*` environment configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] gtrends_core::ConfigError),

    /// The outgoing request could not be assembled (bad URL or header value).
    #[error("failed to create request: {0}")]
    CreateRequest(String),

    /// Network, DNS, or TLS failure from the underlying sender.
    #[error("failed to perform request: {0}")]
    Transport(#[source] BoxError),

    /// The request exceeded its deadline before a response arrived.
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    /// The final response status was not 200. A 429 has already been resent
    /// once by the time this is raised.
    #[error("failed to perform http request: code = {status}, status = {reason}")]
    RequestFailed { status: u16, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("failed to parse json for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No line of a batch-execute response matched the trending-terms shape.
    #[error("no valid JSON found in response")]
    NoValidJson,

    /// The widget passed to a detail fetch is of the wrong kind.
    #[error("invalid widget type: expected {expected}, got widget id '{id}'")]
    InvalidWidgetType { expected: &'static str, id: String },
}

impl TrendsError {
    /// Returns `true` when upstream still answered 429 after the one resend.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RequestFailed { status: 429, .. })
    }
}

impl From<reqwest::Error> for TrendsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(Box::new(err))
        } else if err.is_builder() {
            Self::CreateRequest(err.to_string())
        } else {
            Self::Transport(Box::new(err))
        }
    }
}
