use std::time::Duration;

use async_trait::async_trait;
use fathom_core::{Address, DocumentRef, FathomError, OperationKind, RequestEnvelope, ResponseEnvelope};

/// A transport capable of carrying one request envelope to the endpoint and
/// returning the raw response envelope.
///
/// [`HttpEndpoint`] is the wire implementation;
/// [`MemoryEndpoint`](crate::MemoryEndpoint) is the in-process one used in
/// tests and demos. Implementations return `Err` only for transport-level
/// failures; an explicit endpoint failure travels back as an envelope with
/// the error marker and is classified by the response normalizer.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Health-check the endpoint behind `address`.
    async fn ping(&self, address: &Address) -> Result<(), FathomError>;

    /// Single blocking round trip for one operation.
    async fn call(
        &self,
        address: &Address,
        request: &RequestEnvelope,
    ) -> Result<ResponseEnvelope, FathomError>;
}

/// Configuration for [`HttpEndpoint`].
#[derive(Debug, Clone)]
pub struct HttpEndpointConfig {
    /// Timeout for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Timeout for the whole request/response exchange.
    pub request_timeout: Duration,
}

impl HttpEndpointConfig {
    pub fn new() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for HttpEndpointConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP implementation of the [`Endpoint`] wire contract.
///
/// Maps the request envelope onto one verb per operation kind against
/// `/{index}/{category}/{id}` and expects a [`ResponseEnvelope`] JSON body
/// back. The `reqwest` client is built once and reused across requests.
pub struct HttpEndpoint {
    client: reqwest::Client,
}

impl HttpEndpoint {
    pub fn new(config: HttpEndpointConfig) -> Result<Self, FathomError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FathomError::Connection(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn document_url(address: &Address, reference: &DocumentRef) -> String {
        format!(
            "http://{address}/{}/{}/{}",
            reference.index(),
            reference.category(),
            reference.id()
        )
    }
}

#[async_trait]
impl Endpoint for HttpEndpoint {
    async fn ping(&self, address: &Address) -> Result<(), FathomError> {
        let url = format!("http://{address}/");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FathomError::Connection(format!("endpoint {address} unreachable: {e}")))?;
        if !response.status().is_success() {
            return Err(FathomError::Connection(format!(
                "endpoint {address} unhealthy: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn call(
        &self,
        address: &Address,
        request: &RequestEnvelope,
    ) -> Result<ResponseEnvelope, FathomError> {
        let url = Self::document_url(address, &request.reference);
        let builder = match request.kind {
            OperationKind::Index => self.client.put(&url).json(request),
            OperationKind::Get => self.client.get(&url),
            OperationKind::Update => self.client.patch(&url).json(request),
            OperationKind::Delete => self.client.delete(&url),
        };

        let response = builder.send().await.map_err(classify_transport)?;
        response
            .json::<ResponseEnvelope>()
            .await
            .map_err(|e| FathomError::Remote(format!("malformed response from {address}: {e}")))
    }
}

/// Split transport failures across the taxonomy: losing the session is a
/// connection failure, everything else (timeout, dropped response, decode)
/// wraps as a remote failure with the original message preserved.
fn classify_transport(error: reqwest::Error) -> FathomError {
    if error.is_connect() {
        FathomError::Connection(error.to_string())
    } else {
        FathomError::Remote(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_url_targets_the_slot() {
        let address = Address::new("127.0.0.1", 9300);
        let reference = DocumentRef::new("msg", "tweet", "1");
        assert_eq!(
            HttpEndpoint::document_url(&address, &reference),
            "http://127.0.0.1:9300/msg/tweet/1"
        );
    }
}
