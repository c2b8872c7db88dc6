//! Orderbook service client.
//!
//! Thin wrapper over an [`HttpConnector`] that knows the service's
//! versioned base path and bearer authentication. Submission performs
//! exactly one POST per call; duplicate detection is the service's job, so
//! resubmitting the same signed order is never suppressed locally.

use crate::api::connector::HttpConnector;
use crate::signing::SignedOrder;
use crate::{Error, Result};
use alloy_primitives::Address;
use serde_json::{json, Value};
use tracing::debug;

/// Client for one chain's orderbook.
pub struct OrderbookClient<H> {
    connector: H,
    auth_key: String,
    chain_id: u64,
    base_url: String,
}

impl<H: HttpConnector> OrderbookClient<H> {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.1inch.dev";

    pub fn new(connector: H, auth_key: impl Into<String>, chain_id: u64) -> Self {
        Self {
            connector,
            auth_key: auth_key.into(),
            chain_id,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different service host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Versioned endpoint URL: `<base>/orderbook/v4.0/<chainId>/<path>`.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/orderbook/v4.0/{}/{}",
            self.base_url, self.chain_id, path
        )
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.auth_key),
        )]
    }

    /// Submit a signed order. Returns the service's acknowledgement payload.
    pub async fn submit_order(&self, signed: &SignedOrder) -> Result<Value> {
        let mut body = json!({
            "order": signed.order,
            "signature": signed.signature,
        });
        if let Some(extension) = &signed.extension {
            body["extension"] = Value::String(extension.clone());
        }

        let url = self.url("");
        debug!(url = %url, order_hash = %signed.order_hash, "Submitting order");

        self.connector.send(&url, body, &self.auth_headers()).await
    }

    /// Fetch the active orders created by a maker address.
    pub async fn orders_by_maker(&self, maker: Address) -> Result<Value> {
        let url = self.url(&format!("address/{}", maker));
        self.connector.fetch(&url, &self.auth_headers()).await
    }

    /// Ask the service whether it serves this chain at all. Any service-side
    /// rejection of the base path counts as unsupported; transport failures
    /// still surface as errors.
    pub async fn supports_network(&self) -> Result<bool> {
        match self.connector.fetch(&self.url(""), &self.auth_headers()).await {
            Ok(_) => Ok(true),
            Err(Error::Api { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::OrderPayload;
    use alloy_primitives::B256;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorded {
        fetches: Vec<(String, Vec<(String, String)>)>,
        sends: Vec<(String, Value)>,
    }

    /// Connector double that records every call and replays a canned result.
    #[derive(Clone)]
    struct StubConnector {
        recorded: Arc<Mutex<Recorded>>,
        fetch_result: Arc<dyn Fn() -> Result<Value> + Send + Sync>,
        send_result: Arc<dyn Fn() -> Result<Value> + Send + Sync>,
    }

    impl StubConnector {
        fn ok() -> Self {
            Self {
                recorded: Arc::new(Mutex::new(Recorded::default())),
                fetch_result: Arc::new(|| Ok(json!([]))),
                send_result: Arc::new(|| Ok(json!({"success": true}))),
            }
        }

        fn failing_fetch(status: u16, body: &'static str) -> Self {
            let mut stub = Self::ok();
            stub.fetch_result = Arc::new(move || Err(Error::from_service_response(status, body)));
            stub
        }
    }

    #[async_trait::async_trait]
    impl HttpConnector for StubConnector {
        async fn fetch(&self, url: &str, headers: &[(String, String)]) -> Result<Value> {
            self.recorded
                .lock()
                .unwrap()
                .fetches
                .push((url.to_string(), headers.to_vec()));
            (self.fetch_result)()
        }

        async fn send(&self, url: &str, body: Value, _headers: &[(String, String)]) -> Result<Value> {
            self.recorded
                .lock()
                .unwrap()
                .sends
                .push((url.to_string(), body));
            (self.send_result)()
        }
    }

    fn dummy_signed_order() -> SignedOrder {
        SignedOrder {
            order: OrderPayload {
                salt: "42".to_string(),
                maker: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
                receiver: "0x0000000000000000000000000000000000000000".to_string(),
                maker_asset: "0xfff9976782d46cc05630d1f6ebab18b2324d6b14".to_string(),
                taker_asset: "0x1c7d4b196cb0c7b01d743fbc6116a902379c7238".to_string(),
                making_amount: "100000000000000".to_string(),
                taking_amount: "100000".to_string(),
                maker_traits: "0".to_string(),
            },
            signature: "0xabcd".to_string(),
            extension: None,
            order_hash: B256::ZERO,
        }
    }

    #[tokio::test]
    async fn test_submit_posts_to_versioned_path() {
        let stub = StubConnector::ok();
        let client = OrderbookClient::new(stub.clone(), "key", 11155111);

        client.submit_order(&dummy_signed_order()).await.unwrap();

        let recorded = stub.recorded.lock().unwrap();
        let (url, body) = &recorded.sends[0];
        assert_eq!(url, "https://api.1inch.dev/orderbook/v4.0/11155111/");
        assert_eq!(body["signature"], "0xabcd");
        assert_eq!(body["order"]["makingAmount"], "100000000000000");
        assert!(body.get("extension").is_none());
    }

    #[tokio::test]
    async fn test_submit_includes_extension_when_present() {
        let stub = StubConnector::ok();
        let client = OrderbookClient::new(stub.clone(), "key", 137);

        let mut signed = dummy_signed_order();
        signed.extension = Some("0x".to_string());
        client.submit_order(&signed).await.unwrap();

        let recorded = stub.recorded.lock().unwrap();
        assert_eq!(recorded.sends[0].1["extension"], "0x");
    }

    #[tokio::test]
    async fn test_bearer_auth_header() {
        let stub = StubConnector::ok();
        let client = OrderbookClient::new(stub.clone(), "secret-token", 137);

        client.orders_by_maker(Address::ZERO).await.unwrap();

        let recorded = stub.recorded.lock().unwrap();
        let headers = &recorded.fetches[0].1;
        assert!(headers
            .iter()
            .any(|(k, v)| k == "Authorization" && v == "Bearer secret-token"));
    }

    #[tokio::test]
    async fn test_orders_by_maker_url() {
        let stub = StubConnector::ok();
        let client = OrderbookClient::new(stub.clone(), "key", 137);

        client.orders_by_maker(Address::ZERO).await.unwrap();

        let recorded = stub.recorded.lock().unwrap();
        assert_eq!(
            recorded.fetches[0].0,
            "https://api.1inch.dev/orderbook/v4.0/137/address/0x0000000000000000000000000000000000000000"
        );
    }

    #[tokio::test]
    async fn test_supports_network_true_on_ok() {
        let client = OrderbookClient::new(StubConnector::ok(), "key", 1);
        assert!(client.supports_network().await.unwrap());
    }

    #[tokio::test]
    async fn test_supports_network_false_on_404() {
        let client =
            OrderbookClient::new(StubConnector::failing_fetch(404, "Not Found"), "key", 5);
        assert!(!client.supports_network().await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let stub = StubConnector::ok();
        let client =
            OrderbookClient::new(stub.clone(), "key", 137).with_base_url("http://localhost:8080");

        client.submit_order(&dummy_signed_order()).await.unwrap();

        let recorded = stub.recorded.lock().unwrap();
        assert_eq!(recorded.sends[0].0, "http://localhost:8080/orderbook/v4.0/137/");
    }
}
