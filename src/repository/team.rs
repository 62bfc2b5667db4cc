use serde::{Deserialize, Serialize};

use super::{set_if_some, Entity, Patch};
use crate::id::member_id;
use crate::storage::StorageKey;
use crate::validators::team::MemberFields;
use crate::validators::{validate_roster, StudentField, ValidationError};

/// A team member as stored inside its [`Team`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub full_name: String,
    pub class: String,
    pub place: String,
    pub school: String,
}

/// A team member as entered, before it has an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub full_name: String,
    pub class: String,
    pub place: String,
    pub school: String,
}

impl StudentInput {
    pub fn new(
        full_name: impl Into<String>,
        class: impl Into<String>,
        place: impl Into<String>,
        school: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            class: class.into(),
            place: place.into(),
            school: school.into(),
        }
    }

    /// Trims every field and attaches `id`.
    pub(crate) fn into_student(self, id: String) -> Student {
        Student {
            id,
            full_name: self.full_name.trim().to_owned(),
            class: self.class.trim().to_owned(),
            place: self.place.trim().to_owned(),
            school: self.school.trim().to_owned(),
        }
    }
}

impl From<&Student> for StudentInput {
    fn from(student: &Student) -> Self {
        Self {
            full_name: student.full_name.clone(),
            class: student.class.clone(),
            place: student.place.clone(),
            school: student.school.clone(),
        }
    }
}

impl MemberFields for StudentInput {
    fn field(&self, field: StudentField) -> &str {
        match field {
            StudentField::FullName => &self.full_name,
            StudentField::Class => &self.class,
            StudentField::Place => &self.place,
            StudentField::School => &self.school,
        }
    }
}

impl MemberFields for Student {
    fn field(&self, field: StudentField) -> &str {
        match field {
            StudentField::FullName => &self.full_name,
            StudentField::Class => &self.class,
            StudentField::Place => &self.place,
            StudentField::School => &self.school,
        }
    }
}

/// A named roster of 2 to 4 students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub team_name: String,
    pub members: Vec<Student>,
}

impl Team {
    /// Replaces name and roster. Members get fresh ids derived from the team id.
    pub(crate) fn replace_roster(&mut self, team_name: &str, members: Vec<StudentInput>) {
        self.team_name = team_name.trim().to_owned();
        self.members = members
            .into_iter()
            .enumerate()
            .map(|(index, member)| member.into_student(member_id(&self.id, index)))
            .collect();
    }

    /// First `{id}-{n}`, counting up from the roster length, not held by a
    /// current member.
    pub(crate) fn next_member_id(&self) -> String {
        let mut index = self.members.len();
        loop {
            let candidate = member_id(&self.id, index);
            if self.members.iter().all(|m| m.id != candidate) {
                return candidate;
            }
            index += 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub team_name: String,
    pub members: Vec<StudentInput>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub team_name: Option<String>,
    pub members: Option<Vec<Student>>,
}

impl Patch<Team> for TeamPatch {
    fn apply(self, target: &mut Team) {
        set_if_some(&mut target.team_name, self.team_name);
        set_if_some(&mut target.members, self.members);
    }
}

impl Entity for Team {
    const KEY: StorageKey = StorageKey::Teams;
    type Draft = NewTeam;
    type Patch = TeamPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewTeam) -> Result<Self, ValidationError> {
        validate_roster(&draft.team_name, &draft.members)?;

        let mut team = Team {
            id,
            team_name: String::new(),
            members: Vec::new(),
        };
        team.replace_roster(&draft.team_name, draft.members);
        Ok(team)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_roster(&self.team_name, &self.members)
    }
}
