//! Request construction: three accepted input shapes, one validated
//! internal request.
//!
//! Callers arrive with whatever they already have — domain objects built
//! field by field, a generic map, or raw JSON from an upstream system. All
//! three normalize into the same internal payload before any I/O, so
//! validation is isolated from transport and the endpoint can never observe
//! which shape produced a write.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fathom_core::{
    DocumentRef, FathomError, OperationKind, PayloadFormat, RequestEnvelope,
};
use serde_json::{Map, Value};

/// Ordered field-list builder: the structured input shape.
///
/// # Example
///
/// ```rust
/// use fathom_client::DocumentFields;
///
/// let fields = DocumentFields::new()
///     .field("username", "A")
///     .field("msg", "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentFields {
    fields: Vec<(String, Value)>,
}

impl DocumentFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a timestamp field, serialized as RFC 3339.
    pub fn field_timestamp(self, name: impl Into<String>, when: DateTime<Utc>) -> Self {
        self.field(name, when.to_rfc3339())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One of the three accepted payload shapes for index and update.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Structured field list built with [`DocumentFields`].
    Fields(DocumentFields),
    /// Arbitrary key/value mapping.
    Map(Map<String, Value>),
    /// Pre-serialized payload plus its declared format.
    Raw { body: String, format: PayloadFormat },
}

impl DocumentSource {
    /// A pre-serialized JSON payload.
    pub fn raw_json(body: impl Into<String>) -> Self {
        DocumentSource::Raw {
            body: body.into(),
            format: PayloadFormat::Json,
        }
    }
}

impl From<DocumentFields> for DocumentSource {
    fn from(fields: DocumentFields) -> Self {
        DocumentSource::Fields(fields)
    }
}

impl From<Map<String, Value>> for DocumentSource {
    fn from(map: Map<String, Value>) -> Self {
        DocumentSource::Map(map)
    }
}

impl From<HashMap<String, Value>> for DocumentSource {
    fn from(map: HashMap<String, Value>) -> Self {
        DocumentSource::Map(map.into_iter().collect())
    }
}

/// Validate `reference` and produce the envelope for a payload-free
/// operation (get, delete). Pure transformation; no I/O.
pub(crate) fn build_reference_request(
    kind: OperationKind,
    reference: &DocumentRef,
) -> Result<RequestEnvelope, FathomError> {
    validate_reference(reference)?;
    Ok(RequestEnvelope {
        kind,
        reference: reference.clone(),
        payload: None,
        format: None,
    })
}

/// Validate and normalize one of the three input shapes into the envelope
/// for a payload-carrying operation (index, update). Pure transformation;
/// no I/O.
pub(crate) fn build_document_request(
    kind: OperationKind,
    reference: &DocumentRef,
    source: DocumentSource,
) -> Result<RequestEnvelope, FathomError> {
    validate_reference(reference)?;

    let (payload, format) = match source {
        DocumentSource::Fields(fields) => (fields_to_map(fields)?, None),
        DocumentSource::Map(map) => (map, None),
        DocumentSource::Raw { body, format } => (parse_raw(&body, format)?, Some(format)),
    };
    if payload.is_empty() {
        return Err(FathomError::Validation(format!(
            "{kind} payload must not be empty"
        )));
    }

    Ok(RequestEnvelope {
        kind,
        reference: reference.clone(),
        payload: Some(Value::Object(payload)),
        format,
    })
}

/// First missing or invalid reference field wins: index, then category,
/// then id.
fn validate_reference(reference: &DocumentRef) -> Result<(), FathomError> {
    if reference.index().is_empty() {
        return Err(FathomError::Validation("index name is empty".into()));
    }
    if reference.category().is_empty() {
        return Err(FathomError::Validation("category name is empty".into()));
    }
    if reference.id().is_empty() {
        return Err(FathomError::Validation("document id is empty".into()));
    }
    Ok(())
}

fn fields_to_map(fields: DocumentFields) -> Result<Map<String, Value>, FathomError> {
    let mut map = Map::new();
    for (name, value) in fields.fields {
        if map.contains_key(&name) {
            return Err(FathomError::Validation(format!(
                "duplicate field '{name}' in payload"
            )));
        }
        map.insert(name, value);
    }
    Ok(map)
}

fn parse_raw(body: &str, format: PayloadFormat) -> Result<Map<String, Value>, FathomError> {
    match format {
        PayloadFormat::Json => {
            let value: Value = serde_json::from_str(body)
                .map_err(|e| FathomError::Validation(format!("payload is not valid JSON: {e}")))?;
            match value {
                Value::Object(map) => Ok(map),
                _ => Err(FathomError::Validation(
                    "payload must be a JSON object".into(),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference() -> DocumentRef {
        DocumentRef::new("msg", "tweet", "1")
    }

    #[test]
    fn all_three_shapes_normalize_to_the_same_payload() {
        let fields = DocumentFields::new().field("username", "A").field("msg", "hello");

        let mut map = Map::new();
        map.insert("username".into(), json!("A"));
        map.insert("msg".into(), json!("hello"));

        let raw = DocumentSource::raw_json(r#"{"username":"A","msg":"hello"}"#);

        let from_fields =
            build_document_request(OperationKind::Index, &reference(), fields.into()).unwrap();
        let from_map =
            build_document_request(OperationKind::Index, &reference(), map.into()).unwrap();
        let from_raw = build_document_request(OperationKind::Index, &reference(), raw).unwrap();

        assert_eq!(from_fields.payload, from_map.payload);
        assert_eq!(from_map.payload, from_raw.payload);
        // Only the raw shape declares a format.
        assert_eq!(from_fields.format, None);
        assert_eq!(from_raw.format, Some(PayloadFormat::Json));
    }

    #[test]
    fn first_invalid_reference_field_wins() {
        let source = || DocumentSource::from(DocumentFields::new().field("msg", "hello"));

        let err = build_document_request(
            OperationKind::Index,
            &DocumentRef::new("", "", ""),
            source(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("index name is empty"));

        let err = build_document_request(
            OperationKind::Index,
            &DocumentRef::new("msg", "", ""),
            source(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("category name is empty"));

        let err = build_document_request(
            OperationKind::Index,
            &DocumentRef::new("msg", "tweet", ""),
            source(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("document id is empty"));
    }

    #[test]
    fn empty_payload_is_rejected_for_writes() {
        let err = build_document_request(
            OperationKind::Index,
            &reference(),
            DocumentFields::new().into(),
        )
        .unwrap_err();
        assert!(matches!(err, FathomError::Validation(_)));

        let err =
            build_document_request(OperationKind::Update, &reference(), Map::new().into())
                .unwrap_err();
        assert!(err.to_string().contains("update payload must not be empty"));
    }

    #[test]
    fn reference_only_operations_need_no_payload() {
        let request = build_reference_request(OperationKind::Get, &reference()).unwrap();
        assert_eq!(request.payload, None);

        let request = build_reference_request(OperationKind::Delete, &reference()).unwrap();
        assert_eq!(request.kind, OperationKind::Delete);
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let fields = DocumentFields::new().field("msg", "a").field("msg", "b");
        let err = build_document_request(OperationKind::Index, &reference(), fields.into())
            .unwrap_err();
        assert!(err.to_string().contains("duplicate field 'msg'"));
    }

    #[test]
    fn malformed_raw_payload_is_a_validation_error() {
        let err = build_document_request(
            OperationKind::Index,
            &reference(),
            DocumentSource::raw_json("{not json"),
        )
        .unwrap_err();
        assert!(matches!(err, FathomError::Validation(_)));

        let err = build_document_request(
            OperationKind::Index,
            &reference(),
            DocumentSource::raw_json(r#"["an", "array"]"#),
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn timestamp_fields_serialize_as_rfc3339() {
        let when = DateTime::parse_from_rfc3339("2018-01-30T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let fields = DocumentFields::new()
            .field("username", "A")
            .field_timestamp("sendDate", when);
        let request =
            build_document_request(OperationKind::Index, &reference(), fields.into()).unwrap();
        let payload = request.payload.unwrap();
        assert_eq!(payload["sendDate"], json!("2018-01-30T00:00:00+00:00"));
    }
}
