//! Field validation for everything the store accepts.
//!
//! Each validator stops at the first rule that fails and reports it as a
//! [`ValidationError`]. Callers rely on that order for deterministic errors.

pub mod email;
pub mod profile;
pub mod project;
pub mod registration;
pub mod team;
pub mod teammate;

pub use email::validate_email;
pub use profile::{validate_profile, Profile};
pub use project::validate_project_details;
pub use registration::validate_registration;
pub use team::{validate_roster, validate_student, validate_team_name, MAX_MEMBERS, MIN_MEMBERS};
pub use teammate::validate_teammate;

use serde::{Deserialize, Serialize};

/// One of the four required fields of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentField {
    FullName,
    Class,
    Place,
    School,
}

impl StudentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Class => "class",
            Self::Place => "place",
            Self::School => "school",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    TeamNameEmpty,
    MemberFieldEmpty { index: usize, field: StudentField },
    MemberCountOutOfRange { count: usize },
    MemberIndexOutOfRange { index: usize, len: usize },
    NameEmpty,
    UserIdTooShort,
    PasswordTooShort,
    PhoneTooShort,
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    OrganizationEmpty,
    RoleEmpty,
    ProjectTeamNameTooShort,
    ProblemStatementTooShort,
    ProjectInfoTooShort,
    BudgetEmpty,
    FileNameEmpty,
}

impl ValidationError {
    /// Name of the offending field, as it appears in the stored JSON.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TeamNameEmpty | Self::ProjectTeamNameTooShort => "teamName",
            Self::MemberFieldEmpty { field, .. } => field.as_str(),
            Self::MemberCountOutOfRange { .. } | Self::MemberIndexOutOfRange { .. } => "members",
            Self::NameEmpty | Self::FileNameEmpty => "name",
            Self::UserIdTooShort => "userId",
            Self::PasswordTooShort => "password",
            Self::PhoneTooShort => "phone",
            Self::EmailEmpty | Self::EmailTooLong | Self::EmailInvalidFormat => "email",
            Self::OrganizationEmpty => "organization",
            Self::RoleEmpty => "role",
            Self::ProblemStatementTooShort => "problemStatement",
            Self::ProjectInfoTooShort => "projectInfo",
            Self::BudgetEmpty => "budget",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamNameEmpty => write!(f, "Team name cannot be empty"),
            Self::MemberFieldEmpty { index, field } => {
                write!(f, "Member {index} has an empty {}", field.as_str())
            }
            Self::MemberCountOutOfRange { count } => write!(
                f,
                "A team needs {MIN_MEMBERS} to {MAX_MEMBERS} members, got {count}"
            ),
            Self::MemberIndexOutOfRange { index, len } => {
                write!(f, "Member index {index} is out of range for {len} members")
            }
            Self::NameEmpty => write!(f, "Name cannot be empty"),
            Self::UserIdTooShort => write!(
                f,
                "User ID must be at least {} characters",
                registration::MIN_USER_ID_LENGTH
            ),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters",
                registration::MIN_PASSWORD_LENGTH
            ),
            Self::PhoneTooShort => write!(
                f,
                "Phone number must be at least {} digits",
                registration::MIN_PHONE_LENGTH
            ),
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::OrganizationEmpty => write!(f, "Organization cannot be empty"),
            Self::RoleEmpty => write!(f, "Role cannot be empty"),
            Self::ProjectTeamNameTooShort => write!(
                f,
                "Team name must be at least {} characters",
                project::MIN_TEAM_NAME_LENGTH
            ),
            Self::ProblemStatementTooShort => write!(
                f,
                "Problem statement must be at least {} characters",
                project::MIN_DESCRIPTION_LENGTH
            ),
            Self::ProjectInfoTooShort => write!(
                f,
                "Project information must be at least {} characters",
                project::MIN_DESCRIPTION_LENGTH
            ),
            Self::BudgetEmpty => write!(f, "Budget cannot be empty"),
            Self::FileNameEmpty => write!(f, "File name cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// True when `value` has content other than whitespace.
pub(crate) fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when `value` has at least `min` characters.
pub(crate) fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(ValidationError::TeamNameEmpty.field(), "teamName");
        assert_eq!(
            ValidationError::MemberFieldEmpty {
                index: 1,
                field: StudentField::School
            }
            .field(),
            "school"
        );
        assert_eq!(ValidationError::MemberCountOutOfRange { count: 5 }.field(), "members");
        assert_eq!(ValidationError::EmailInvalidFormat.field(), "email");
    }

    #[test]
    fn test_display_member_count() {
        assert_eq!(
            ValidationError::MemberCountOutOfRange { count: 1 }.to_string(),
            "A team needs 2 to 4 members, got 1"
        );
    }

    #[test]
    fn test_is_filled() {
        assert!(is_filled("a"));
        assert!(!is_filled(""));
        assert!(!is_filled(" \t\n"));
    }

    #[test]
    fn test_has_min_chars_counts_characters() {
        assert!(has_min_chars("名前名", 3));
        assert!(!has_min_chars("ab", 3));
    }
}
