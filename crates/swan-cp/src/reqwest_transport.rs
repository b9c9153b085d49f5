use crate::config::SwanConfig;
use crate::errors::SwanError;
use crate::transport::{CpTransport, TransportError, TransportResponse};
use async_trait::async_trait;

/// [`CpTransport`] over a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::from_client(reqwest::Client::new())
    }
}

impl ReqwestTransport {
    pub fn new(config: &SwanConfig) -> Result<Self, SwanError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SwanError::InvalidConfig(format!("http client build failed: {err}")))?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<TransportResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl CpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read(response).await
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read(response).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connect failed"
    } else if err.is_builder() {
        "invalid request"
    } else if err.is_body() || err.is_decode() {
        "read body failed"
    } else {
        "http request failed"
    };
    TransportError::Request(format!("{kind}: {err}"))
}
