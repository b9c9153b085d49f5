use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("http error{}: {message}", status_suffix(.status))]
    Http { status: Option<u16>, message: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("transport failure: {0}")]
    Other(String),
}

/// Raw response as handed back by a transport. Status is not checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fails with [`TransportError::Http`] for 4xx and 5xx statuses.
    pub fn error_for_status(&self) -> Result<(), TransportError> {
        if (400..600).contains(&self.status) {
            return Err(TransportError::Http {
                status: Some(self.status),
                message: body_excerpt(&self.body),
            });
        }
        Ok(())
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body)
            .map_err(|err| TransportError::Request(format!("json decode failed: {err}")))
    }
}

#[async_trait]
pub trait CpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;

    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T> CpTransport for std::sync::Arc<T>
where
    T: CpTransport + ?Sized,
{
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        (**self).get(url).await
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError> {
        (**self).post_form(url, fields).await
    }
}

const BODY_EXCERPT_LIMIT: usize = 512;

fn body_excerpt(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty body>".to_string();
    }
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}

pub(crate) fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(status) => format!(" (status {status})"),
        None => String::new(),
    }
}
