use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use alloy::transports::TransportError;
use serde::Serialize;
use thiserror::Error;

use crate::agent::ParseError;

/// Errors returned by node detection and node adapters
///
/// Every variant carries the underlying cause unchanged. Nothing in this crate
/// retries, so callers decide whether a failure is worth another attempt.
#[derive(Error, Debug)]
pub enum NodeError {
    /// Transport failure or an error object returned by the node
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),

    /// Request parameters could not be serialized
    #[error("failed to encode {method} params: {source}")]
    Encode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The node answered with something other than the expected shape
    #[error("failed to decode {method} response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Introspection results could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The node does not expose the APIs the adapter depends on
    #[error("incompatible node: {0}")]
    Incompatible(String),
}

/// Service-specific error types
///
/// Errors surfaced by the HTTP layer. Each variant maps to a status code and
/// a machine-readable error code.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The node behind the service failed to answer
    #[error("Node RPC error: {0}")]
    NodeUnavailable(String),

    /// The caller sent a request we cannot serve
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<NodeError> for ServiceError {
    fn from(err: NodeError) -> Self {
        ServiceError::NodeUnavailable(err.to_string())
    }
}

/// Structured error response for the API
#[derive(Serialize)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,

    /// Machine-readable error code
    error_code: String,

    /// Optional detailed error information
    details: Option<String>,
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        let (error_code, details) = match self {
            ServiceError::NodeUnavailable(details) => ("NODE_UNAVAILABLE", Some(details.clone())),
            ServiceError::InvalidRequest(details) => ("INVALID_REQUEST", Some(details.clone())),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ServiceError::NodeUnavailable(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}
