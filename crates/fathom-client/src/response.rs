//! Response normalization: raw endpoint envelopes into the uniform
//! [`OperationResult`].

use fathom_core::{
    DocumentRef, FathomError, OpStatus, OperationKind, OperationResult, ResponseEnvelope,
    StatusMarker,
};

/// Map a raw endpoint envelope into an [`OperationResult`], classifying
/// failures into the error taxonomy.
///
/// Absence is a success outcome: `not_found` on get or delete becomes a
/// `NotFound` result, never an error. Explicit failure envelopes and
/// malformed responses surface as [`FathomError::Remote`] with the endpoint's
/// message preserved.
pub(crate) fn normalize(
    kind: OperationKind,
    reference: &DocumentRef,
    envelope: ResponseEnvelope,
) -> Result<OperationResult, FathomError> {
    match envelope.marker {
        StatusMarker::Error => {
            let message = envelope
                .error
                .unwrap_or_else(|| format!("{kind} {reference}: unspecified endpoint failure"));
            Err(FathomError::Remote(message))
        }

        StatusMarker::NotFound => match kind {
            OperationKind::Get | OperationKind::Delete => Ok(OperationResult {
                reference: reference.clone(),
                status: OpStatus::NotFound,
                version: None,
                payload: None,
            }),
            // A write is either acknowledged or fails explicitly.
            OperationKind::Index | OperationKind::Update => Err(FathomError::Remote(format!(
                "{kind} {reference}: endpoint answered not_found for a write"
            ))),
        },

        StatusMarker::Found => {
            let version = require_version(kind, reference, &envelope)?;
            let payload = envelope.payload.ok_or_else(|| {
                FathomError::Remote(format!(
                    "{kind} {reference}: found response carried no payload"
                ))
            })?;
            Ok(OperationResult {
                reference: reference.clone(),
                status: OpStatus::Found,
                version: Some(version),
                payload: Some(payload),
            })
        }

        StatusMarker::Created | StatusMarker::Updated | StatusMarker::Deleted => {
            let status = match envelope.marker {
                StatusMarker::Created => OpStatus::Created,
                StatusMarker::Updated => OpStatus::Updated,
                _ => OpStatus::Deleted,
            };
            let version = require_version(kind, reference, &envelope)?;
            Ok(OperationResult {
                reference: reference.clone(),
                status,
                version: Some(version),
                payload: None,
            })
        }
    }
}

/// An acknowledgement without a version is a malformed response.
fn require_version(
    kind: OperationKind,
    reference: &DocumentRef,
    envelope: &ResponseEnvelope,
) -> Result<u64, FathomError> {
    envelope.version.ok_or_else(|| {
        FathomError::Remote(format!("{kind} {reference}: response missing version"))
    })
}
