//! Connection lifecycle: one logical session to one remote endpoint address.

use fathom_core::{Address, FathomError};
use tracing::debug;

use crate::transport::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    Closed,
    Open,
}

/// Caller-owned handle for the single logical session to a remote index
/// endpoint.
///
/// State machine: `Closed --open--> Open --close--> Closed`. No operation
/// other than `open` is valid from `Closed`; all four document operations
/// require `Open` and fail with [`FathomError::NotConnected`] otherwise.
///
/// The session is released on every exit path: `close` is explicit and
/// idempotent, and dropping a still-open connection closes it.
#[derive(Debug)]
pub struct Connection {
    state: ConnectionState,
    address: Option<Address>,
}

impl Connection {
    /// A connection in the `Closed` state, bound to nothing.
    pub fn closed() -> Self {
        Self {
            state: ConnectionState::Closed,
            address: None,
        }
    }

    /// Establish the logical session to `address`, health-checking the
    /// endpoint first.
    ///
    /// Idempotent when already open to the same address: the existing
    /// session is kept and no second health check runs. Opening toward a
    /// *different* address while open is refused; close first.
    pub async fn open<E: Endpoint + ?Sized>(
        &mut self,
        address: Address,
        endpoint: &E,
    ) -> Result<(), FathomError> {
        if let Some(current) = &self.address {
            if *current == address {
                debug!(%address, "connection already open");
                return Ok(());
            }
            return Err(FathomError::Connection(format!(
                "already open to {current}; close before opening {address}"
            )));
        }

        endpoint.ping(&address).await?;
        debug!(%address, "connection opened");
        self.address = Some(address);
        self.state = ConnectionState::Open;
        Ok(())
    }

    /// Release the session. Safe to call on an already-closed connection.
    pub fn close(&mut self) {
        if let Some(address) = self.address.take() {
            debug!(%address, "connection closed");
        }
        self.state = ConnectionState::Closed;
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Address of the open session, or [`FathomError::NotConnected`] from
    /// `Closed`.
    pub(crate) fn require_open(&self) -> Result<&Address, FathomError> {
        match (self.state, &self.address) {
            (ConnectionState::Open, Some(address)) => Ok(address),
            _ => Err(FathomError::NotConnected),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.is_open() {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEndpoint;

    #[test]
    fn starts_closed() {
        let conn = Connection::closed();
        assert!(!conn.is_open());
        assert!(matches!(
            conn.require_open(),
            Err(FathomError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn open_then_close() {
        let endpoint = MemoryEndpoint::new();
        let mut conn = Connection::closed();
        conn.open(Address::new("127.0.0.1", 9300), &endpoint)
            .await
            .unwrap();
        assert!(conn.is_open());
        assert_eq!(conn.require_open().unwrap().port(), 9300);

        conn.close();
        assert!(!conn.is_open());
        // Idempotent: closing again is a no-op.
        conn.close();
        assert!(!conn.is_open());
    }

    #[tokio::test]
    async fn reopen_same_address_is_idempotent() {
        let endpoint = MemoryEndpoint::new();
        let mut conn = Connection::closed();
        let address = Address::new("127.0.0.1", 9300);
        conn.open(address.clone(), &endpoint).await.unwrap();
        conn.open(address, &endpoint).await.unwrap();
        assert!(conn.is_open());
    }

    #[tokio::test]
    async fn open_to_different_address_is_refused() {
        let endpoint = MemoryEndpoint::new();
        let mut conn = Connection::closed();
        conn.open(Address::new("127.0.0.1", 9300), &endpoint)
            .await
            .unwrap();

        let err = conn
            .open(Address::new("10.0.0.1", 9300), &endpoint)
            .await
            .unwrap_err();
        assert!(matches!(err, FathomError::Connection(_)));
        // The original session is untouched.
        assert_eq!(conn.require_open().unwrap().host(), "127.0.0.1");
    }
}
