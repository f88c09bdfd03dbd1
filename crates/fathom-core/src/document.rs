use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The triple identifying a document's storage slot: index name, category
/// name, document id.
///
/// All three parts must be non-empty strings; the request builder rejects
/// anything else before any I/O happens. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    index: String,
    category: String,
    id: String,
}

impl DocumentRef {
    pub fn new(
        index: impl Into<String>,
        category: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            category: category.into(),
            id: id.into(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.index, self.category, self.id)
    }
}

/// Outcome of a completed document operation.
///
/// Failures never appear here; they surface as
/// [`FathomError`](crate::FathomError) values instead. A get on an absent
/// document is `NotFound`, which is a success outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpStatus {
    Created,
    Updated,
    Deleted,
    Found,
    NotFound,
}

/// Uniform result of the four document operations.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    /// The slot the operation addressed.
    pub reference: DocumentRef,
    pub status: OpStatus,
    /// Version after the operation. Monotonically increasing per reference,
    /// starting at 1 on first creation; absent when the document was not
    /// found.
    pub version: Option<u64>,
    /// Document body; present only for a successful get.
    pub payload: Option<Value>,
}
