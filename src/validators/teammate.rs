use super::profile::{validate_profile, Profile};
use super::ValidationError;
use crate::repository::NewTeammate;

/// Teammates follow the same field rules as registering leaders, minus the
/// password.
pub fn validate_teammate(teammate: &NewTeammate) -> Result<(), ValidationError> {
    validate_profile(&Profile {
        name: &teammate.name,
        user_id: &teammate.user_id,
        phone: &teammate.phone,
        email: &teammate.email,
        organization: &teammate.organization,
        role: &teammate.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_teammate() {
        assert!(validate_teammate(&NewTeammate::mock("bob22")).is_ok());
    }

    #[test]
    fn test_short_phone() {
        let mut teammate = NewTeammate::mock("bob22");
        teammate.phone = "12345".to_owned();
        assert_eq!(
            validate_teammate(&teammate).unwrap_err(),
            ValidationError::PhoneTooShort
        );
    }

    #[test]
    fn test_blank_organization() {
        let mut teammate = NewTeammate::mock("bob22");
        teammate.organization = String::new();
        assert_eq!(
            validate_teammate(&teammate).unwrap_err(),
            ValidationError::OrganizationEmpty
        );
    }
}
