use crate::config::{LookupConfig, SettingsError};
use crate::model::OrderLookupRequest;
use crate::widget::LookupError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, TRANSFER_ENCODING, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Sends one order lookup and returns the decoded response body.
///
/// The widget only talks to this trait, so tests can swap the network for a
/// [`MockTransport`](crate::clients::MockTransport).
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn lookup(&self, request: &OrderLookupRequest) -> Result<Value, LookupError>;
}

/// [`OrderTransport`] over HTTP: `POST {endpoint}` with a JSON body.
#[derive(Clone)]
pub struct HttpOrderClient {
    http: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl HttpOrderClient {
    /// Builds a client with explicit headers. No timeout unless one is given.
    pub fn new(endpoint: impl Into<String>, headers: HeaderMap, timeout: Option<Duration>) -> Result<Self, SettingsError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SettingsError::Client(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            headers,
        })
    }

    pub fn from_config(config: &LookupConfig) -> Result<Self, SettingsError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, header_value(USER_AGENT, &config.user_agent)?);
        if let Some(encoding) = config.transfer_encoding.as_deref().filter(|v| !v.trim().is_empty()) {
            headers.insert(TRANSFER_ENCODING, header_value(TRANSFER_ENCODING, encoding)?);
        }
        Self::new(&config.endpoint, headers, config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn header_value(name: HeaderName, value: &str) -> Result<HeaderValue, SettingsError> {
    HeaderValue::from_str(value).map_err(|e| SettingsError::InvalidHeader(format!("{}: {}", name.as_str(), e)))
}

#[async_trait]
impl OrderTransport for HttpOrderClient {
    #[instrument(skip(self, request), fields(order_uid = %request.order_uid, endpoint = %self.endpoint))]
    async fn lookup(&self, request: &OrderLookupRequest) -> Result<Value, LookupError> {
        info!("Sending lookup request");
        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Lookup failed");
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Response received");
        Ok(serde_json::from_str(&body)?)
    }
}
