use super::{has_min_chars, is_filled, validate_email, ValidationError};
use crate::session::Registration;

pub const MIN_USER_ID_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_PHONE_LENGTH: usize = 10;

/// Checks a registration in form order: name, user id, password, phone,
/// email, organization, role.
pub fn validate_registration(registration: &Registration) -> Result<(), ValidationError> {
    if !is_filled(&registration.name) {
        return Err(ValidationError::NameEmpty);
    }
    if !has_min_chars(&registration.user_id, MIN_USER_ID_LENGTH) {
        return Err(ValidationError::UserIdTooShort);
    }
    if !has_min_chars(registration.password.expose_secret(), MIN_PASSWORD_LENGTH) {
        return Err(ValidationError::PasswordTooShort);
    }
    if !has_min_chars(&registration.phone, MIN_PHONE_LENGTH) {
        return Err(ValidationError::PhoneTooShort);
    }
    validate_email(&registration.email)?;
    if !is_filled(&registration.organization) {
        return Err(ValidationError::OrganizationEmpty);
    }
    if !is_filled(&registration.role) {
        return Err(ValidationError::RoleEmpty);
    }
    Ok(())
}
