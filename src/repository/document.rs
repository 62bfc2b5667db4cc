use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{set_if_some, Entity, Patch};
use crate::storage::StorageKey;
use crate::validators::ValidationError;

/// Metadata of an uploaded file. The content itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub upload_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub name: Option<String>,
}

impl Patch<Document> for DocumentPatch {
    fn apply(self, target: &mut Document) {
        set_if_some(&mut target.name, self.name);
    }
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::FileNameEmpty);
    }
    Ok(())
}

impl Entity for Document {
    const KEY: StorageKey = StorageKey::Documents;
    type Draft = NewDocument;
    type Patch = DocumentPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewDocument) -> Result<Self, ValidationError> {
        check_name(&draft.name)?;

        Ok(Self {
            id,
            name: draft.name,
            size: draft.size,
            mime_type: draft.mime_type,
            upload_date: Utc::now(),
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)
    }
}
