//! Request sending with the one-shot rate-limit cookie retry.
//!
//! [`HttpSend`] is the seam between the client and the network: the client
//! builds an [`OutgoingRequest`], the sender returns the fully read
//! [`RawResponse`]. Upstream throttles anonymous traffic with 429 and hands
//! out a session cookie in `Set-Cookie`; the client replays that cookie on
//! every later request and resends the throttled request exactly once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE, USER_AGENT,
};
use reqwest::{Method, StatusCode, Url};

use crate::client::TrendsClient;
use crate::error::TrendsError;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// A request ready to hand to an [`HttpSend`] implementation.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A response with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends one request and returns the response.
///
/// Implementations report network failures as [`TrendsError::Transport`] and
/// deadline expiry as [`TrendsError::Timeout`]. Non-2xx statuses are not
/// errors at this layer.
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TrendsError>;
}

#[async_trait]
impl<T: HttpSend + ?Sized> HttpSend for Arc<T> {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TrendsError> {
        (**self).send(request).await
    }
}

/// [`HttpSend`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    /// Builds a sender with a 10 s connect timeout and an optional overall
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest::Client` cannot be constructed.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TrendsError> {
        let mut builder = reqwest::Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an already configured client.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestSender {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TrendsError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl TrendsClient {
    /// Sends a GET expecting JSON and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// See [`TrendsClient::execute`].
    pub(crate) async fn get(&self, url: Url) -> Result<Vec<u8>, TrendsError> {
        let mut headers = self.base_headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON));
        self.execute(OutgoingRequest {
            method: Method::GET,
            url,
            headers,
            body: None,
        })
        .await
    }

    /// Sends a form-encoded POST and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// See [`TrendsClient::execute`].
    pub(crate) async fn post(&self, url: Url, payload: String) -> Result<Vec<u8>, TrendsError> {
        let mut headers = self.base_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_FORM));
        self.execute(OutgoingRequest {
            method: Method::POST,
            url,
            headers,
            body: Some(payload),
        })
        .await
    }

    fn base_headers(&self) -> Result<HeaderMap, TrendsError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&self.user_agent)?);
        if let Some(cookie) = self.session_cookie() {
            headers.insert(COOKIE, header_value(&cookie)?);
        }
        Ok(headers)
    }

    /// Sends `request`, resending it once on 429. A session cookie issued with
    /// the 429 is stored and attached to the resend.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::Transport`] / [`TrendsError::Timeout`] from the sender,
    ///   never retried.
    /// - [`TrendsError::RequestFailed`] if the final status is not 200.
    /// - [`TrendsError::CreateRequest`] if a header value is invalid.
    async fn execute(&self, mut request: OutgoingRequest) -> Result<Vec<u8>, TrendsError> {
        if self.debug() {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                payload = request.body.as_deref().unwrap_or_default(),
                "google trends request"
            );
        }

        let mut response = self.sender.send(&request).await?;

        if response.status == StatusCode::TOO_MANY_REQUESTS {
            let cookie = session_cookie_from(&response.headers);
            tracing::warn!(
                url = %request.url,
                has_cookie = cookie.is_some(),
                "google trends rate limited, retrying once"
            );
            if let Some(cookie) = cookie {
                request.headers.insert(COOKIE, header_value(&cookie)?);
                self.set_session_cookie(cookie);
            }
            response = self.sender.send(&request).await?;
        }

        if self.debug() {
            tracing::debug!(
                status = response.status.as_u16(),
                body = %String::from_utf8_lossy(&response.body),
                "google trends response"
            );
        }

        if response.status != StatusCode::OK {
            return Err(TrendsError::RequestFailed {
                status: response.status.as_u16(),
                reason: response
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown")
                    .to_owned(),
            });
        }

        Ok(response.body)
    }
}

/// First `;`-delimited segment of the `Set-Cookie` header, if non-empty.
pub(crate) fn session_cookie_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
}

fn header_value(value: &str) -> Result<HeaderValue, TrendsError> {
    HeaderValue::from_str(value)
        .map_err(|e| TrendsError::CreateRequest(format!("invalid header value: {e}")))
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
