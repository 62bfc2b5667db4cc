use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{set_if_some, Entity, Patch};
use crate::storage::StorageKey;
use crate::validators::{validate_teammate, ValidationError};

/// A member of the leader's organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teammate {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub role: String,
    pub added_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTeammate {
    pub name: String,
    pub user_id: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub role: String,
}

impl From<&Teammate> for NewTeammate {
    fn from(teammate: &Teammate) -> Self {
        Self {
            name: teammate.name.clone(),
            user_id: teammate.user_id.clone(),
            phone: teammate.phone.clone(),
            email: teammate.email.clone(),
            organization: teammate.organization.clone(),
            role: teammate.role.clone(),
        }
    }
}

#[cfg(any(test, feature = "mocks"))]
impl NewTeammate {
    pub fn mock(user_id: &str) -> Self {
        Self {
            name: "Bob Builder".to_owned(),
            user_id: user_id.to_owned(),
            phone: "5552223333".to_owned(),
            email: format!("{user_id}@example.com"),
            organization: "Springfield High".to_owned(),
            role: "Mentor".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeammatePatch {
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
}

impl Patch<Teammate> for TeammatePatch {
    fn apply(self, target: &mut Teammate) {
        set_if_some(&mut target.name, self.name);
        set_if_some(&mut target.user_id, self.user_id);
        set_if_some(&mut target.phone, self.phone);
        set_if_some(&mut target.email, self.email);
        set_if_some(&mut target.organization, self.organization);
        set_if_some(&mut target.role, self.role);
    }
}

impl Entity for Teammate {
    const KEY: StorageKey = StorageKey::Teammates;
    type Draft = NewTeammate;
    type Patch = TeammatePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewTeammate) -> Result<Self, ValidationError> {
        validate_teammate(&draft)?;

        Ok(Self {
            id,
            name: draft.name,
            user_id: draft.user_id,
            phone: draft.phone,
            email: draft.email,
            organization: draft.organization,
            role: draft.role,
            added_date: Utc::now(),
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_teammate(&NewTeammate::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_stamps_added_date() {
        let before = Utc::now();
        let teammate = Teammate::from_draft("7".to_owned(), NewTeammate::mock("bob22")).unwrap();

        assert!(teammate.added_date >= before);
        assert_eq!(teammate.user_id, "bob22");
    }

    #[test]
    fn test_patch_revalidates() {
        let mut teammate = Teammate::from_draft("7".to_owned(), NewTeammate::mock("bob22")).unwrap();
        TeammatePatch {
            email: Some("broken".to_owned()),
            ..Default::default()
        }
        .apply(&mut teammate);

        assert_eq!(
            teammate.validate().unwrap_err(),
            ValidationError::EmailInvalidFormat
        );
    }

    #[test]
    fn test_wire_format() {
        let teammate = Teammate::from_draft("7".to_owned(), NewTeammate::mock("bob22")).unwrap();
        let json = serde_json::to_value(&teammate).unwrap();

        assert_eq!(json["userId"], "bob22");
        assert!(json["addedDate"].is_string());
    }
}
