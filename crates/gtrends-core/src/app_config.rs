pub const DEFAULT_API_BASE_URL: &str = "https://trends.google.com/trends/api";
pub const DEFAULT_BATCH_EXECUTE_URL: &str =
    "https://trends.google.com/_/TrendsUi/data/batchexecute";

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Settings for a Google Trends client.
///
/// `Default` yields the production endpoints, English results, a browser-like
/// user agent and no request timeout, so callers that only need the public
/// service can skip env loading entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsConfig {
    /// Base for the JSON widget API (`/explore`, `/widgetdata/*`, pickers, autocomplete).
    pub api_base_url: String,
    /// Full URL of the batch-execute endpoint used for daily trending searches.
    pub batch_execute_url: String,
    /// Host language sent as `hl` when an operation has no per-call language.
    pub language: String,
    pub user_agent: String,
    /// Per-request timeout. `None` leaves deadlines entirely to the caller.
    pub request_timeout_secs: Option<u64>,
    pub debug: bool,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            batch_execute_url: DEFAULT_BATCH_EXECUTE_URL.to_string(),
            language: "EN".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: None,
            debug: false,
        }
    }
}
