//! Error types for the limit order toolkit.

use serde::Deserialize;
use thiserror::Error;

/// Machine-checkable classification of orderbook service errors.
///
/// Derived from the HTTP status code and the structured error body the
/// service returns, never from scanning free-form message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The maker has not granted the settlement contract enough allowance
    /// (or holds too little balance) for the order to be fillable.
    InsufficientAllowance,
    /// The orderbook service does not serve this chain id (HTTP 404).
    UnsupportedNetwork,
    /// Any other service-side rejection.
    Generic,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("RPC error: {message}")]
    Rpc { message: String },

    #[error("Orderbook API error: {message}")]
    Api {
        kind: ApiErrorKind,
        status: Option<u16>,
        message: String,
    },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Order error: {message}")]
    Order { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error codes the orderbook service uses for allowance/balance rejections.
/// Matched exactly (case-insensitive), not by substring.
const ALLOWANCE_ERROR_CODES: &[&str] = &[
    "NotEnoughBalanceOrAllowance",
    "NotEnoughAllowance",
    "NotEnoughBalance",
];

/// Structured error body returned by the orderbook service on non-2xx.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default, rename = "statusCode")]
    _status_code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl Error {
    /// Build an `Error::Api` from a non-2xx service response, classifying it
    /// by status code and the parsed error body.
    pub fn from_service_response(status: u16, body: &str) -> Self {
        let kind = if status == 404 {
            ApiErrorKind::UnsupportedNetwork
        } else {
            match serde_json::from_str::<ServiceErrorBody>(body) {
                Ok(parsed) => {
                    let code = parsed.description.as_deref().or(parsed.message.as_deref());
                    if code.is_some_and(|c| {
                        ALLOWANCE_ERROR_CODES
                            .iter()
                            .any(|known| known.eq_ignore_ascii_case(c))
                    }) {
                        ApiErrorKind::InsufficientAllowance
                    } else {
                        ApiErrorKind::Generic
                    }
                }
                Err(_) => ApiErrorKind::Generic,
            }
        };

        Error::Api {
            kind,
            status: Some(status),
            message: format!("HTTP {}: {}", status, body),
        }
    }

    /// The classification of an `Api` error, if this is one.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Error::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
