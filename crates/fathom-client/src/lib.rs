//! Document-index client for Fathom.
//!
//! This crate provides [`IndexClient`], a thin client core over a remote
//! document-index endpoint: connection lifecycle, request construction and
//! validation, response normalization, and error classification for the four
//! document operations (index, get, update, delete). Everything durable
//! lives behind the endpoint; the client owns no local state beyond the
//! session.
//!
//! # Quick start
//!
//! ```rust
//! use fathom_client::{DocumentFields, IndexClient, MemoryEndpoint};
//! use fathom_core::{Address, DocumentRef};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = IndexClient::new(MemoryEndpoint::new());
//! client.open(Address::new("127.0.0.1", 9300)).await?;
//!
//! let reference = DocumentRef::new("msg", "tweet", "1");
//! let fields = DocumentFields::new()
//!     .field("username", "A")
//!     .field("msg", "hello");
//! let result = client.index_document(&reference, fields).await?;
//! println!("{} -> {:?}", reference, result.status);
//!
//! client.close();
//! # Ok(())
//! # }
//! ```

mod client;
mod connection;
mod memory;
mod request;
mod response;
mod transport;

pub use client::IndexClient;
pub use connection::Connection;
pub use memory::MemoryEndpoint;
pub use request::{DocumentFields, DocumentSource};
pub use transport::{Endpoint, HttpEndpoint, HttpEndpointConfig};

// Re-export core types for convenience.
pub use fathom_core::{
    Address, DocumentRef, FathomError, OpStatus, OperationResult, PayloadFormat,
};
