//! In-process endpoint for development and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fathom_core::{
    Address, DocumentRef, FathomError, OperationKind, RequestEnvelope, ResponseEnvelope,
    StatusMarker,
};
use serde_json::{Map, Value};

use crate::transport::Endpoint;

/// In-process implementation of the [`Endpoint`] wire contract against a
/// local map, the dev/test counterpart of
/// [`HttpEndpoint`](crate::HttpEndpoint).
///
/// Honors the version contract: versions per reference start at 1, every
/// acknowledged write advances them, and a re-create after delete continues
/// from the high-water mark instead of reusing lower numbers. Cloning is
/// cheap and clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryEndpoint {
    slots: Arc<Mutex<HashMap<SlotKey, Slot>>>,
}

type SlotKey = (String, String, String);

#[derive(Debug, Default)]
struct Slot {
    /// Live body; `None` once deleted.
    payload: Option<Map<String, Value>>,
    /// High-water version mark; survives deletion.
    version: u64,
}

impl MemoryEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(reference: &DocumentRef) -> SlotKey {
        (
            reference.index().to_string(),
            reference.category().to_string(),
            reference.id().to_string(),
        )
    }
}

/// The normalized document body of a write request, if it carried one.
fn body_of(request: &RequestEnvelope) -> Option<Map<String, Value>> {
    match &request.payload {
        Some(Value::Object(map)) => Some(map.clone()),
        _ => None,
    }
}

#[async_trait]
impl Endpoint for MemoryEndpoint {
    async fn ping(&self, _address: &Address) -> Result<(), FathomError> {
        Ok(())
    }

    async fn call(
        &self,
        _address: &Address,
        request: &RequestEnvelope,
    ) -> Result<ResponseEnvelope, FathomError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| FathomError::Remote(format!("lock error: {e}")))?;
        let key = Self::key(&request.reference);

        let envelope = match request.kind {
            OperationKind::Index => match body_of(request) {
                Some(body) => {
                    let slot = slots.entry(key).or_default();
                    let marker = if slot.payload.is_some() {
                        StatusMarker::Updated
                    } else {
                        StatusMarker::Created
                    };
                    slot.version += 1;
                    slot.payload = Some(body);
                    ResponseEnvelope::acknowledged(marker, slot.version)
                }
                None => ResponseEnvelope::failure(format!(
                    "index {}: request carried no document body",
                    request.reference
                )),
            },

            OperationKind::Get => match slots.get(&key) {
                Some(Slot {
                    payload: Some(body),
                    version,
                }) => ResponseEnvelope::found(*version, Value::Object(body.clone())),
                _ => ResponseEnvelope::not_found(),
            },

            OperationKind::Update => match body_of(request) {
                Some(partial) => match slots.get_mut(&key) {
                    Some(Slot {
                        payload: Some(body),
                        version,
                    }) => {
                        for (name, value) in partial {
                            body.insert(name, value);
                        }
                        *version += 1;
                        ResponseEnvelope::acknowledged(StatusMarker::Updated, *version)
                    }
                    _ => ResponseEnvelope::failure(format!(
                        "document missing: {}",
                        request.reference
                    )),
                },
                None => ResponseEnvelope::failure(format!(
                    "update {}: request carried no document body",
                    request.reference
                )),
            },

            OperationKind::Delete => match slots.get_mut(&key) {
                Some(slot) if slot.payload.is_some() => {
                    slot.payload = None;
                    slot.version += 1;
                    ResponseEnvelope::acknowledged(StatusMarker::Deleted, slot.version)
                }
                _ => ResponseEnvelope::not_found(),
            },
        };

        Ok(envelope)
    }
}
