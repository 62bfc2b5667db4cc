use super::{has_min_chars, is_filled, ValidationError};
use crate::repository::ProjectDetailsInput;

pub const MIN_TEAM_NAME_LENGTH: usize = 2;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

pub fn validate_project_details(input: &ProjectDetailsInput) -> Result<(), ValidationError> {
    if !has_min_chars(&input.team_name, MIN_TEAM_NAME_LENGTH) {
        return Err(ValidationError::ProjectTeamNameTooShort);
    }
    if !has_min_chars(&input.problem_statement, MIN_DESCRIPTION_LENGTH) {
        return Err(ValidationError::ProblemStatementTooShort);
    }
    if !has_min_chars(&input.project_info, MIN_DESCRIPTION_LENGTH) {
        return Err(ValidationError::ProjectInfoTooShort);
    }
    if !is_filled(&input.budget) {
        return Err(ValidationError::BudgetEmpty);
    }
    Ok(())
}
