//! Computing Provider client.
//!
//! The two list calls classify failures differently:
//! `get_all_cp_machines` folds both HTTP and request failures into
//! [`SwanError::Http`] / [`SwanError::Request`], while
//! `get_computing_providers_list` only folds HTTP failures and lets every other
//! transport error through untouched. `get_cp_detail` classifies nothing.

use crate::config::SwanConfig;
use crate::errors::SwanError;
use crate::reqwest_transport::ReqwestTransport;
use crate::transport::{CpTransport, TransportError};
use serde_json::{Map, Value};

/// One hardware or provider entry, passed through as the service returned it.
pub type Record = Map<String, Value>;

#[derive(Clone, Debug)]
pub struct CpClient<T> {
    config: SwanConfig,
    transport: T,
}

impl CpClient<ReqwestTransport> {
    pub fn from_config(config: SwanConfig) -> Result<Self, SwanError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(config, transport))
    }

    pub fn from_env() -> Result<Self, SwanError> {
        Self::from_config(SwanConfig::from_env()?)
    }
}

impl<T> CpClient<T> {
    pub fn new(config: SwanConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SwanConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> CpClient<T>
where
    T: CpTransport,
{
    /// Full hardware inventory, in the order found under `data.hardware`.
    pub async fn get_all_cp_machines(&self) -> Result<Vec<Record>, SwanError> {
        let url = self.config.machines_url();
        tracing::debug!(%url, "fetching computing provider machines");

        let payload = self
            .fetch_checked_json(&url)
            .await
            .map_err(|error| classify_all(error, &url))?;

        match payload.get("data").and_then(|data| data.get("hardware")) {
            Some(hardware) => records_from(hardware, "data.hardware"),
            None => Ok(Vec::new()),
        }
    }

    /// Providers serving `region`. `None` and `""` are rejected before any
    /// request is made.
    pub async fn get_computing_providers_list<'a>(
        &self,
        region: impl Into<Option<&'a str>>,
    ) -> Result<Vec<Record>, SwanError> {
        let region = match region.into() {
            Some(region) if !region.is_empty() => region,
            _ => {
                return Err(SwanError::InvalidInput(
                    "region must be a non-empty string".to_string(),
                ));
            }
        };

        let url = self.config.providers_url();
        tracing::debug!(%url, region, "fetching computing providers");

        let payload = self
            .post_checked_json(&url, &[("region", region)])
            .await
            .map_err(|error| classify_http_only(error, &url))?;

        match payload.get("data") {
            Some(data) => records_from(data, "data"),
            None => Ok(Vec::new()),
        }
    }

    /// Raw detail body for one provider with the status it was served with.
    /// Error statuses are returned, not raised.
    pub async fn get_cp_detail(&self, cp_id: &str) -> Result<(Value, u16), SwanError> {
        let url = self.config.detail_url(cp_id);
        tracing::debug!(%url, cp_id, "fetching computing provider detail");

        let response = self.transport.get(&url).await?;
        let body = response.json::<Value>()?;
        Ok((body, response.status))
    }

    async fn fetch_checked_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self.transport.get(url).await?;
        response.error_for_status()?;
        response.json()
    }

    async fn post_checked_json(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<Value, TransportError> {
        let response = self.transport.post_form(url, fields).await?;
        response.error_for_status()?;
        response.json()
    }
}

fn classify_all(error: TransportError, url: &str) -> SwanError {
    match error {
        TransportError::Http { status, message } => {
            tracing::warn!(url, ?status, "computing provider request returned http error");
            SwanError::Http { status, message }
        }
        TransportError::Request(message) => {
            tracing::warn!(url, %message, "computing provider request failed");
            SwanError::Request(message)
        }
        other => SwanError::Transport(other),
    }
}

fn classify_http_only(error: TransportError, url: &str) -> SwanError {
    match error {
        TransportError::Http { status, message } => {
            tracing::warn!(url, ?status, "computing provider request returned http error");
            SwanError::Http { status, message }
        }
        other => SwanError::Transport(other),
    }
}

fn records_from(value: &Value, field: &str) -> Result<Vec<Record>, SwanError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            return Err(SwanError::UnexpectedPayload(format!(
                "{field} must be an array, got {}",
                json_kind(other)
            )));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record.clone()),
            other => Err(SwanError::UnexpectedPayload(format!(
                "{field}[{index}] must be an object, got {}",
                json_kind(other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
