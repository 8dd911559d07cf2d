use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The remote service an upstream failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamService {
    Catalog,
    Model,
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamService::Catalog => write!(f, "catalog"),
            UpstreamService::Model => write!(f, "model"),
        }
    }
}

/// Custom error types for the application.
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to {service} service failed: {source}")]
    Request {
        service: UpstreamService,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to deserialize {service} service response: {source}")]
    Deserialization {
        service: UpstreamService,
        #[source]
        source: reqwest::Error,
    },
    /// The remote service answered with a non-success status. The status and
    /// payload are kept so they can be forwarded to the caller verbatim.
    #[error("{service} service returned status {status}")]
    Upstream {
        service: UpstreamService,
        status: u16,
        body: Value,
    },
    #[error("{0}")]
    MissingConfiguration(String),
    #[error("{0}")]
    Validation(String),
}

impl ReelError {
    /// Builds an upstream error from a raw response body, keeping it as JSON
    /// when possible and as a JSON string otherwise.
    pub fn upstream(service: UpstreamService, status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str(raw_body)
            .unwrap_or_else(|_| Value::String(raw_body.to_string()));
        ReelError::Upstream {
            service,
            status,
            body,
        }
    }
}
