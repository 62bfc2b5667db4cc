//! Serializable result shape for UI collaborators.
//!
//! ```json
//! {"ok": true, "value": {...}}
//! {"ok": false, "kind": "ValidationError", "message": "Team name cannot be empty", "field": "teamName"}
//! ```

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::StoreError;

/// Stable tag of a failure, independent of its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    NotFound,
    DuplicateUser,
    InvalidCredentials,
    MaxMembersReached,
    MinMembersRequired,
    StorageUnavailable,
    CorruptData,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl From<&StoreError> for Failure {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::Validation(reason) => Self {
                kind: ErrorKind::ValidationError,
                message: reason.to_string(),
                field: Some(reason.field()),
            },
            other => Self {
                kind: other.kind(),
                message: other.to_string(),
                field: None,
            },
        }
    }
}

/// Either a value or a [`Failure`], tagged by `ok` when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    Err(Failure),
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Err(failure) => Some(failure),
            Self::Ok(_) => None,
        }
    }
}

impl<T> From<Result<T, StoreError>> for Outcome<T> {
    fn from(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(Failure::from(&err)),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Ok(value) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Self::Err(failure) => {
                let len = if failure.field.is_some() { 4 } else { 3 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("kind", &failure.kind)?;
                map.serialize_entry("message", &failure.message)?;
                if let Some(field) = failure.field {
                    map.serialize_entry("field", field)?;
                }
                map.end()
            }
        }
    }
}
