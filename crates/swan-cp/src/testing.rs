use crate::transport::{CpTransport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub form: Vec<(String, String)>,
}

/// Scripted in-memory transport. Outcomes are queued per method and consumed
/// in order; every call is recorded, scripted or not.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportState>>,
}

#[derive(Debug, Default)]
struct MockTransportState {
    get_outcomes: VecDeque<Result<TransportResponse, TransportError>>,
    post_outcomes: VecDeque<Result<TransportResponse, TransportError>>,
    requests: Vec<RecordedRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_get(&self, outcome: Result<TransportResponse, TransportError>) -> &Self {
        self.lock().get_outcomes.push_back(outcome);
        self
    }

    pub fn push_post(&self, outcome: Result<TransportResponse, TransportError>) -> &Self {
        self.lock().post_outcomes.push_back(outcome);
        self
    }

    pub fn get_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push_get(Ok(TransportResponse::json_body(status, &body)))
    }

    pub fn post_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push_post(Ok(TransportResponse::json_body(status, &body)))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockTransportState> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(
        &self,
        method: HttpMethod,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            method,
            url: url.to_string(),
            form: fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        });
        let queue = match method {
            HttpMethod::Get => &mut state.get_outcomes,
            HttpMethod::Post => &mut state.post_outcomes,
        };
        queue.pop_front().unwrap_or_else(|| {
            Err(TransportError::Other(format!(
                "mock transport has no scripted outcome for {method:?} {url}"
            )))
        })
    }
}

#[async_trait]
impl CpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.record(HttpMethod::Get, url, &[])
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError> {
        self.record(HttpMethod::Post, url, fields)
    }
}
