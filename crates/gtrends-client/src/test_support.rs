//! Scripted [`HttpSend`] used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gtrends_core::TrendsConfig;
use reqwest::header::{HeaderValue, SET_COOKIE};
use reqwest::StatusCode;

use crate::client::TrendsClient;
use crate::error::TrendsError;
use crate::transport::{HttpSend, OutgoingRequest, RawResponse};

/// Replays queued responses in order and records every request it sees.
/// Once the queue is empty each call fails with a transport error.
#[derive(Default)]
pub(crate) struct ScriptedSender {
    responses: Mutex<VecDeque<Result<RawResponse, TrendsError>>>,
    seen: Mutex<Vec<OutgoingRequest>>,
}

impl ScriptedSender {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.push(Ok(RawResponse::new(status, body)))
    }

    pub(crate) fn respond_with_cookie(&self, status: u16, set_cookie: &str) -> &Self {
        let mut response = RawResponse::new(StatusCode::from_u16(status).unwrap(), "");
        response
            .headers
            .insert(SET_COOKIE, HeaderValue::from_str(set_cookie).unwrap());
        self.push(Ok(response))
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.push(Err(TrendsError::Transport(message.to_owned().into())))
    }

    fn push(&self, response: Result<RawResponse, TrendsError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn request(&self, index: usize) -> OutgoingRequest {
        self.seen.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl HttpSend for ScriptedSender {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TrendsError> {
        self.seen.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TrendsError::Transport("no scripted response left".into())))
    }
}

pub(crate) fn test_config() -> TrendsConfig {
    TrendsConfig {
        api_base_url: "https://trends.example.test/trends/api".to_owned(),
        batch_execute_url: "https://trends.example.test/_/TrendsUi/data/batchexecute".to_owned(),
        user_agent: "gtrends-test/0.1".to_owned(),
        ..TrendsConfig::default()
    }
}

pub(crate) fn scripted_client() -> (TrendsClient, Arc<ScriptedSender>) {
    let sender = ScriptedSender::new();
    let client = TrendsClient::with_sender(&test_config(), Arc::clone(&sender));
    (client, sender)
}
