use fathom_core::{Address, DocumentRef, FathomError, OperationKind, OperationResult};
use tracing::debug;

use crate::connection::Connection;
use crate::request::{self, DocumentSource};
use crate::response;
use crate::transport::Endpoint;

/// The client facade: exactly four document operations over one
/// caller-controlled connection.
///
/// Each operation is builder → endpoint round trip → normalizer, with the
/// error taxonomy applied to any failure at any stage. No operation
/// implicitly opens or closes the connection; the caller drives the
/// lifecycle through [`open`](IndexClient::open) and
/// [`close`](IndexClient::close).
///
/// A client value is one logical connection and is not safe to share across
/// concurrent callers; use one client per caller, or serialize operations
/// externally.
pub struct IndexClient<E: Endpoint> {
    endpoint: E,
    connection: Connection,
}

impl<E: Endpoint> IndexClient<E> {
    /// A client in the `Closed` state over the given endpoint transport.
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint,
            connection: Connection::closed(),
        }
    }

    /// Establish the session to `address`, health-checking the endpoint.
    /// Idempotent for the same address.
    pub async fn open(&mut self, address: Address) -> Result<(), FathomError> {
        self.connection.open(address, &self.endpoint).await
    }

    /// Release the session. Safe to call when already closed.
    pub fn close(&mut self) {
        self.connection.close();
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }

    /// Health-check the endpoint behind the open session.
    pub async fn health_check(&self) -> Result<(), FathomError> {
        let address = self.connection.require_open()?;
        self.endpoint.ping(address).await
    }

    /// Index (create or fully replace) the document at `reference`.
    ///
    /// Accepts any of the three payload shapes via `Into<DocumentSource>`:
    /// a [`DocumentFields`](crate::DocumentFields) builder, a key/value map,
    /// or a pre-serialized payload with a declared format.
    pub async fn index_document(
        &self,
        reference: &DocumentRef,
        source: impl Into<DocumentSource>,
    ) -> Result<OperationResult, FathomError> {
        let address = self.connection.require_open()?;
        let request =
            request::build_document_request(OperationKind::Index, reference, source.into())?;
        let envelope = self.endpoint.call(address, &request).await?;
        let result = response::normalize(OperationKind::Index, reference, envelope)?;
        debug!(reference = %reference, status = ?result.status, version = ?result.version, "index");
        Ok(result)
    }

    /// Fetch the document at `reference`.
    ///
    /// Absence is not a failure: a missing document yields a result with
    /// `NotFound` status and no payload.
    pub async fn get_document(
        &self,
        reference: &DocumentRef,
    ) -> Result<OperationResult, FathomError> {
        let address = self.connection.require_open()?;
        let request = request::build_reference_request(OperationKind::Get, reference)?;
        let envelope = self.endpoint.call(address, &request).await?;
        let result = response::normalize(OperationKind::Get, reference, envelope)?;
        debug!(reference = %reference, status = ?result.status, version = ?result.version, "get");
        Ok(result)
    }

    /// Merge `source` into the document at `reference`, leaving unmentioned
    /// fields unchanged.
    pub async fn update_document(
        &self,
        reference: &DocumentRef,
        source: impl Into<DocumentSource>,
    ) -> Result<OperationResult, FathomError> {
        let address = self.connection.require_open()?;
        let request =
            request::build_document_request(OperationKind::Update, reference, source.into())?;
        let envelope = self.endpoint.call(address, &request).await?;
        let result = response::normalize(OperationKind::Update, reference, envelope)?;
        debug!(reference = %reference, status = ?result.status, version = ?result.version, "update");
        Ok(result)
    }

    /// Delete the document at `reference`. Deleting an absent document
    /// yields a `NotFound` result, not an error.
    pub async fn delete_document(
        &self,
        reference: &DocumentRef,
    ) -> Result<OperationResult, FathomError> {
        let address = self.connection.require_open()?;
        let request = request::build_reference_request(OperationKind::Delete, reference)?;
        let envelope = self.endpoint.call(address, &request).await?;
        let result = response::normalize(OperationKind::Delete, reference, envelope)?;
        debug!(reference = %reference, status = ?result.status, version = ?result.version, "delete");
        Ok(result)
    }
}
