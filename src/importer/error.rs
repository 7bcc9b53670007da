use thiserror::Error;

use crate::bulkparse::ParseError;
use crate::models::{EntityKind, LookupKeys};

/// Why a seed row produced no objects
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("{kind} already exists: {keys}")]
    AlreadyExists { kind: EntityKind, keys: LookupKeys },

    #[error("{kind} does not exist: {keys}")]
    DoesNotExist { kind: EntityKind, keys: LookupKeys },

    #[error("{kind} returned multiple: {keys}")]
    MultipleObjectsReturned { kind: EntityKind, keys: LookupKeys },

    /// Inventory handed back a surrogate-keyed row without an id
    #[error("{kind} in inventory has no id: {keys}")]
    Unsaved { kind: EntityKind, keys: LookupKeys },

    #[error("column {column} is not valid UTF-8")]
    Decode { column: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ImportError {
    /// Entity the error is about, if it is a lookup failure
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            ImportError::AlreadyExists { kind, .. }
            | ImportError::DoesNotExist { kind, .. }
            | ImportError::MultipleObjectsReturned { kind, .. }
            | ImportError::Unsaved { kind, .. } => Some(*kind),
            ImportError::Decode { .. } | ImportError::Parse(_) => None,
        }
    }
}
