use super::{is_filled, StudentField, ValidationError};

/// Fewest members a team may have.
pub const MIN_MEMBERS: usize = 2;
/// Most members a team may have.
pub const MAX_MEMBERS: usize = 4;

/// Read access to the four required fields of a team member.
pub trait MemberFields {
    fn field(&self, field: StudentField) -> &str;
}

const FIELD_ORDER: [StudentField; 4] = [
    StudentField::FullName,
    StudentField::Class,
    StudentField::Place,
    StudentField::School,
];

pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    if !is_filled(name) {
        return Err(ValidationError::TeamNameEmpty);
    }
    Ok(())
}

/// Checks that every field of the member at `index` has content.
pub fn validate_student<M: MemberFields + ?Sized>(
    index: usize,
    member: &M,
) -> Result<(), ValidationError> {
    for field in FIELD_ORDER {
        if !is_filled(member.field(field)) {
            return Err(ValidationError::MemberFieldEmpty { index, field });
        }
    }
    Ok(())
}

/// Validates a whole team.
///
/// Rules run in a fixed order and the first failure is returned:
/// 1. the team name is non-empty after trimming
/// 2. every member's fields are non-empty after trimming, in roster order
/// 3. the member count is within `MIN_MEMBERS..=MAX_MEMBERS`
pub fn validate_roster<M: MemberFields>(name: &str, members: &[M]) -> Result<(), ValidationError> {
    validate_team_name(name)?;

    for (index, member) in members.iter().enumerate() {
        validate_student(index, member)?;
    }

    if !(MIN_MEMBERS..=MAX_MEMBERS).contains(&members.len()) {
        return Err(ValidationError::MemberCountOutOfRange {
            count: members.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Member([&'static str; 4]);

    impl MemberFields for Member {
        fn field(&self, field: StudentField) -> &str {
            match field {
                StudentField::FullName => self.0[0],
                StudentField::Class => self.0[1],
                StudentField::Place => self.0[2],
                StudentField::School => self.0[3],
            }
        }
    }

    fn full() -> Member {
        Member(["Ada", "10th", "Pune", "City School"])
    }

    #[test]
    fn test_valid_rosters() {
        assert!(validate_roster("Rockets", &[full(), full()]).is_ok());
        assert!(validate_roster("Rockets", &[full(), full(), full(), full()]).is_ok());
    }

    #[test]
    fn test_name_checked_first() {
        let err = validate_roster("  ", &[Member(["", "", "", ""])]).unwrap_err();
        assert_eq!(err, ValidationError::TeamNameEmpty);
    }

    #[test]
    fn test_fields_checked_before_count() {
        let err = validate_roster("Rockets", &[Member(["Ada", "10th", " ", "City"])]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MemberFieldEmpty {
                index: 0,
                field: StudentField::Place
            }
        );
    }

    #[test]
    fn test_first_empty_field_wins() {
        let err = validate_roster(
            "Rockets",
            &[full(), Member(["Bo", "", "Pune", ""]), Member(["", "", "", ""])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MemberFieldEmpty {
                index: 1,
                field: StudentField::Class
            }
        );
    }

    #[test]
    fn test_count_out_of_range() {
        assert_eq!(
            validate_roster::<Member>("Rockets", &[]).unwrap_err(),
            ValidationError::MemberCountOutOfRange { count: 0 }
        );
        assert_eq!(
            validate_roster("Rockets", &[full()]).unwrap_err(),
            ValidationError::MemberCountOutOfRange { count: 1 }
        );
        assert_eq!(
            validate_roster("Rockets", &[full(), full(), full(), full(), full()]).unwrap_err(),
            ValidationError::MemberCountOutOfRange { count: 5 }
        );
    }
}
