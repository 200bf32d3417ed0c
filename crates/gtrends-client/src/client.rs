//! Client for the Google Trends web endpoints.
//!
//! Owns the pluggable sender, the default query parameters, the session cookie
//! captured from rate-limited responses, and the reference-tree cache. Endpoint
//! operations live in `explore.rs` and `daily.rs`; request sending and the
//! cookie retry live in `transport.rs`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use gtrends_core::TrendsConfig;
use reqwest::Url;

use crate::cache::ReferenceTreeCache;
use crate::error::TrendsError;
use crate::params;
use crate::transport::{HttpSend, ReqwestSender};

/// Client for the Google Trends web endpoints.
///
/// Use [`TrendsClient::new`] for the public service,
/// [`TrendsClient::from_config`] for env-driven settings, or
/// [`TrendsClient::with_sender`] to substitute the HTTP layer (mocks,
/// instrumented clients, custom transports).
pub struct TrendsClient {
    pub(crate) sender: Box<dyn HttpSend>,
    pub(crate) api_base_url: String,
    pub(crate) batch_execute_url: String,
    pub(crate) language: String,
    pub(crate) user_agent: String,
    pub(crate) cache: ReferenceTreeCache,
    cookie: RwLock<Option<String>>,
    debug: AtomicBool,
}

impl TrendsClient {
    /// Creates a client for the production endpoints with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::CreateRequest`] or [`TrendsError::Transport`] if
    /// the underlying `reqwest::Client` cannot be constructed.
    pub fn new() -> Result<Self, TrendsError> {
        Self::from_config(&TrendsConfig::default())
    }

    /// Creates a client from `GTRENDS_*` environment variables, loading a
    /// `.env` file first.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Config`] if a variable cannot be parsed, or any
    /// error of [`TrendsClient::from_config`].
    pub fn from_env() -> Result<Self, TrendsError> {
        let config = gtrends_core::load_config()?;
        Self::from_config(&config)
    }

    /// Creates a client backed by `reqwest` using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::CreateRequest`] or [`TrendsError::Transport`] if
    /// the underlying `reqwest::Client` cannot be constructed.
    pub fn from_config(config: &TrendsConfig) -> Result<Self, TrendsError> {
        let sender = ReqwestSender::new(config.request_timeout_secs.map(Duration::from_secs))?;
        Ok(Self::with_sender(config, sender))
    }

    /// Creates a client that sends every request through `sender`.
    pub fn with_sender(config: &TrendsConfig, sender: impl HttpSend + 'static) -> Self {
        Self {
            sender: Box::new(sender),
            api_base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            batch_execute_url: config.batch_execute_url.clone(),
            language: config.language.clone(),
            user_agent: config.user_agent.clone(),
            cache: ReferenceTreeCache::new(),
            cookie: RwLock::new(None),
            debug: AtomicBool::new(config.debug),
        }
    }

    /// Toggles logging of request URLs, payloads, and raw responses.
    pub fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Session cookie captured from the last rate-limited response, if any.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.cookie
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_session_cookie(&self, cookie: String) {
        *self.cookie.write().unwrap_or_else(PoisonError::into_inner) = Some(cookie);
    }

    /// Drops the cached category and location trees.
    pub fn clear_reference_cache(&self) {
        self.cache.clear();
    }

    /// A fresh copy of the default query parameters, with `hl` set to the
    /// configured language.
    #[must_use]
    pub fn default_params(&self) -> Vec<(&'static str, String)> {
        params::default_params(&self.language)
    }

    /// Joins `path` onto the API base URL and appends `params`, percent-encoding
    /// every value.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::CreateRequest`] if the result is not a valid URL.
    pub(crate) fn api_url(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Url, TrendsError> {
        let raw = format!("{}{path}", self.api_base_url);
        let url = Url::parse(&raw)
            .map_err(|e| TrendsError::CreateRequest(format!("invalid URL '{raw}': {e}")))?;
        Ok(with_query(url, params))
    }

    /// API URL for `autocomplete/<term>`; `term` is escaped as a path segment.
    pub(crate) fn autocomplete_url(
        &self,
        term: &str,
        params: &[(&str, String)],
    ) -> Result<Url, TrendsError> {
        let mut url = Url::parse(&self.api_base_url).map_err(|e| {
            TrendsError::CreateRequest(format!("invalid URL '{}': {e}", self.api_base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                TrendsError::CreateRequest(format!(
                    "base URL '{}' cannot carry a path",
                    self.api_base_url
                ))
            })?
            .pop_if_empty()
            .push("autocomplete")
            .push(term);
        Ok(with_query(url, params))
    }

    pub(crate) fn batch_url(&self, params: &[(&str, String)]) -> Result<Url, TrendsError> {
        let url = Url::parse(&self.batch_execute_url).map_err(|e| {
            TrendsError::CreateRequest(format!("invalid URL '{}': {e}", self.batch_execute_url))
        })?;
        Ok(with_query(url, params))
    }
}

impl std::fmt::Debug for TrendsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendsClient")
            .field("api_base_url", &self.api_base_url)
            .field("batch_execute_url", &self.batch_execute_url)
            .field("language", &self.language)
            .field("has_session_cookie", &self.session_cookie().is_some())
            .field("debug", &self.debug())
            .finish_non_exhaustive()
    }
}

fn with_query(mut url: Url, params: &[(&str, String)]) -> Url {
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    url
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
