use chrono::Utc;

use crate::events::{dispatch, StoreEvent};
use crate::repository::{Collection, NewTeam, StudentInput, Team};
use crate::storage::StorageKey;
use crate::validators::{validate_roster, validate_student, ValidationError, MAX_MEMBERS, MIN_MEMBERS};
use crate::StoreError;

/// Operations on the `teams` collection.
///
/// Every successful operation has persisted the whole collection before it
/// returns. A failed operation leaves both the cache and the backing store as
/// they were.
#[derive(Clone)]
pub struct TeamRoster {
    teams: Collection<Team>,
}

impl TeamRoster {
    pub fn new(teams: Collection<Team>) -> Self {
        Self { teams }
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, StoreError> {
        self.teams.list().await
    }

    pub async fn get_team(&self, id: &str) -> Result<Option<Team>, StoreError> {
        self.teams.find_by_id(id).await
    }

    /// Creates a team.
    ///
    /// Rules are checked in order: name, then each member's fields, then the
    /// member count. The first failure is returned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_team", skip_all, err)
    )]
    pub async fn create_team(
        &self,
        team_name: &str,
        members: Vec<StudentInput>,
    ) -> Result<Team, StoreError> {
        let team = self
            .teams
            .add(NewTeam {
                team_name: team_name.to_owned(),
                members,
            })
            .await?;

        log::info!(
            target: "roster_store",
            "msg=\"team created\", team_id=\"{}\", members={}",
            team.id,
            team.members.len()
        );

        Ok(team)
    }

    /// Replaces the name and the whole roster of a team.
    ///
    /// # Errors
    ///
    /// `NotFound` is reported before any validation error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_team", skip_all, err)
    )]
    pub async fn update_team(
        &self,
        id: &str,
        team_name: &str,
        members: Vec<StudentInput>,
    ) -> Result<Team, StoreError> {
        let team = self.teams.mutate(|teams, _| {
            let team = find_mut(teams, id)?;
            validate_roster(team_name, &members)?;
            team.replace_roster(team_name, members);
            Ok(team.clone())
        })?;

        dispatch(StoreEvent::RecordUpdated {
            key: StorageKey::Teams,
            id: team.id.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "roster_store",
            "msg=\"team updated\", team_id=\"{}\", members={}",
            team.id,
            team.members.len()
        );

        Ok(team)
    }

    /// Appends a member.
    ///
    /// Takes the member's four fields up front; a team never stores a blank
    /// member to fill in later.
    ///
    /// # Errors
    ///
    /// - `NotFound` - no team has `team_id`
    /// - `MaxMembersReached` - the team is full; checked before the member's fields
    /// - `Validation(MemberFieldEmpty)` - a field of `member` is blank
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "add_member", skip_all, err)
    )]
    pub async fn add_member(&self, team_id: &str, member: StudentInput) -> Result<Team, StoreError> {
        let (team, member_id) = self.teams.mutate(|teams, _| {
            let team = find_mut(teams, team_id)?;
            if team.members.len() >= MAX_MEMBERS {
                return Err(StoreError::MaxMembersReached);
            }
            validate_student(team.members.len(), &member)?;

            let member_id = team.next_member_id();
            team.members.push(member.into_student(member_id.clone()));
            Ok((team.clone(), member_id))
        })?;

        dispatch(StoreEvent::TeamMemberAdded {
            team_id: team.id.clone(),
            member_id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "roster_store",
            "msg=\"member added\", team_id=\"{}\", members={}",
            team.id,
            team.members.len()
        );

        Ok(team)
    }

    /// Removes the member at `index`.
    ///
    /// # Errors
    ///
    /// - `NotFound` - no team has `team_id`
    /// - `MinMembersRequired` - the team is at its minimum; checked before the index
    /// - `Validation(MemberIndexOutOfRange)` - no member at `index`
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_member", skip_all, err)
    )]
    pub async fn remove_member(&self, team_id: &str, index: usize) -> Result<Team, StoreError> {
        let (team, removed) = self.teams.mutate(|teams, _| {
            let team = find_mut(teams, team_id)?;
            let len = team.members.len();
            if len <= MIN_MEMBERS {
                return Err(StoreError::MinMembersRequired);
            }
            if index >= len {
                return Err(ValidationError::MemberIndexOutOfRange { index, len }.into());
            }

            let removed = team.members.remove(index);
            Ok((team.clone(), removed))
        })?;

        dispatch(StoreEvent::TeamMemberRemoved {
            team_id: team.id.clone(),
            member_id: removed.id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "roster_store",
            "msg=\"member removed\", team_id=\"{}\", members={}",
            team.id,
            team.members.len()
        );

        Ok(team)
    }

    /// Deletes a team with its members. Returns whether it existed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_team", skip_all, err)
    )]
    pub async fn delete_team(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.teams.remove(id).await?;

        if removed {
            log::info!(
                target: "roster_store",
                "msg=\"team deleted\", team_id=\"{id}\""
            );
        }

        Ok(removed)
    }
}

fn find_mut<'a>(teams: &'a mut [Team], id: &str) -> Result<&'a mut Team, StoreError> {
    teams
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StoreError::NotFound)
}
