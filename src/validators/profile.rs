use super::registration::{MIN_PHONE_LENGTH, MIN_USER_ID_LENGTH};
use super::{has_min_chars, is_filled, validate_email, ValidationError};

/// Contact fields shared by stored leaders and teammates.
#[derive(Debug, Clone, Copy)]
pub struct Profile<'a> {
    pub name: &'a str,
    pub user_id: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub organization: &'a str,
    pub role: &'a str,
}

/// Checks a profile in form order: name, user id, phone, email,
/// organization, role.
pub fn validate_profile(profile: &Profile<'_>) -> Result<(), ValidationError> {
    if !is_filled(profile.name) {
        return Err(ValidationError::NameEmpty);
    }
    if !has_min_chars(profile.user_id, MIN_USER_ID_LENGTH) {
        return Err(ValidationError::UserIdTooShort);
    }
    if !has_min_chars(profile.phone, MIN_PHONE_LENGTH) {
        return Err(ValidationError::PhoneTooShort);
    }
    validate_email(profile.email)?;
    if !is_filled(profile.organization) {
        return Err(ValidationError::OrganizationEmpty);
    }
    if !is_filled(profile.role) {
        return Err(ValidationError::RoleEmpty);
    }
    Ok(())
}
