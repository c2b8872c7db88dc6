//! HTTP connector abstraction.
//!
//! The orderbook client talks HTTP through this two-operation capability so
//! the production `reqwest` implementation can be swapped for a test double
//! without touching the client.

use crate::{Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Minimal HTTP capability: an authenticated GET and an authenticated POST,
/// both JSON in / JSON out.
#[async_trait::async_trait]
pub trait HttpConnector: Send + Sync {
    /// GET a URL with the given headers.
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> Result<Value>;

    /// POST a JSON body to a URL with the given headers.
    async fn send(&self, url: &str, body: Value, headers: &[(String, String)]) -> Result<Value>;
}

/// Production connector backed by `reqwest`.
pub struct ReqwestConnector {
    client: reqwest::Client,
}

impl ReqwestConnector {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for ReqwestConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HttpConnector for ReqwestConnector {
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> Result<Value> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::from_service_response(status.as_u16(), &text));
        }

        Ok(parse_body(text))
    }

    async fn send(&self, url: &str, body: Value, headers: &[(String, String)]) -> Result<Value> {
        let mut request = self.client.post(url).json(&body);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::from_service_response(status.as_u16(), &text));
        }

        Ok(parse_body(text))
    }
}

/// Some endpoints answer 2xx with an empty or non-JSON body; keep whatever
/// came back instead of failing the call.
fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
