//! Core types for the Fathom document-index client.
//!
//! This crate holds everything shared between the client and any endpoint
//! implementation: the [`DocumentRef`] / [`OperationResult`] data model, the
//! wire envelopes ([`RequestEnvelope`], [`ResponseEnvelope`]), and the
//! [`FathomError`] taxonomy.

mod document;
mod envelope;
mod error;

pub use document::{DocumentRef, OpStatus, OperationResult};
pub use envelope::{
    Address, OperationKind, PayloadFormat, RequestEnvelope, ResponseEnvelope, StatusMarker,
};
pub use error::{FathomError, Result};

/// Current UTC time as an RFC 3339 string, the timestamp shape document
/// fields carry on the wire.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}
