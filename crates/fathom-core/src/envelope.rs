//! The logical wire contract toward the remote endpoint.
//!
//! These shapes are what travels between the client and whatever transport
//! carries them; they are deliberately abstracted from any concrete search
//! engine's protocol. All durable state lives behind the endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DocumentRef, FathomError};

/// Host + port pair identifying the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    host: String,
    port: u16,
}

impl Address {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Address {
    type Err = FathomError;

    /// Parse a `"host:port"` pair. A malformed address is a connection
    /// failure: there is no session it could ever identify.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| FathomError::Connection(format!("malformed address '{s}': expected host:port")))?;
        if host.is_empty() {
            return Err(FathomError::Connection(format!(
                "malformed address '{s}': empty host"
            )));
        }
        let port: u16 = port.parse().map_err(|_| {
            FathomError::Connection(format!("malformed address '{s}': invalid port '{port}'"))
        })?;
        Ok(Self::new(host, port))
    }
}

/// The four operations of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Index,
    Get,
    Update,
    Delete,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Index => "index",
            OperationKind::Get => "get",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared format of a pre-serialized payload handed to the request builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    Json,
}

/// What the client sends to the endpoint for one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub kind: OperationKind,
    pub reference: DocumentRef,
    /// Normalized document body; present for index and update only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Format the payload was declared in, when it arrived pre-serialized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<PayloadFormat>,
}

/// Status marker on a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMarker {
    Created,
    Updated,
    Deleted,
    Found,
    NotFound,
    Error,
}

/// What the endpoint answers with: an opaque success/failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub marker: StatusMarker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Acknowledge a write with its resulting version.
    pub fn acknowledged(marker: StatusMarker, version: u64) -> Self {
        Self {
            marker,
            version: Some(version),
            payload: None,
            error: None,
        }
    }

    /// A successful get carrying the document body.
    pub fn found(version: u64, payload: Value) -> Self {
        Self {
            marker: StatusMarker::Found,
            version: Some(version),
            payload: Some(payload),
            error: None,
        }
    }

    /// The addressed document does not exist.
    pub fn not_found() -> Self {
        Self {
            marker: StatusMarker::NotFound,
            version: None,
            payload: None,
            error: None,
        }
    }

    /// Explicit failure envelope with an endpoint-provided message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            marker: StatusMarker::Error,
            version: None,
            payload: None,
            error: Some(message.into()),
        }
    }
}
