//! Team procedures - management, enrollment, and history.

use crate::{
    auth::{self, Session},
    core::{
        order::OrderDetails,
        stats::{self, TeamStats},
        team::{self, NewTeam},
    },
    entities::team as team_entity,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Input for [`create_team`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTeamInput {
    /// Display name
    pub name: String,
    /// Globally unique login name
    pub username: String,
    /// Opaque password hash issued by the auth tier
    pub password_hash: String,
    /// Event to enroll the team into, if any
    pub event_id: Option<i64>,
}

/// Input for [`add_to_event`]: create a team directly enrolled in an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddTeamToEventInput {
    /// Target event
    pub event_id: i64,
    /// Display name
    pub name: String,
    /// Globally unique login name
    pub username: String,
    /// Opaque password hash issued by the auth tier
    pub password_hash: String,
}

/// Input for [`bulk_add_to_event`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkAddToEventInput {
    /// Target event
    pub event_id: i64,
    /// Teams to create, all-or-nothing
    pub teams: Vec<NewTeam>,
}

/// Input for [`update_team`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTeamInput {
    /// Team to update
    pub id: i64,
    /// New display name
    pub name: Option<String>,
    /// New username (uniqueness re-checked)
    pub username: Option<String>,
    /// New password hash
    pub password_hash: Option<String>,
}

/// Lists all teams alphabetically (public).
pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<team_entity::Model>> {
    team::get_all_teams(db).await
}

/// Finds a team by id (public).
pub async fn get_team_by_id(
    db: &DatabaseConnection,
    team_id: i64,
) -> Result<Option<team_entity::Model>> {
    team::get_team_by_id(db, team_id).await
}

/// Creates a team (protected, admin).
pub async fn create_team(
    db: &DatabaseConnection,
    session: &Session,
    input: CreateTeamInput,
) -> Result<team_entity::Model> {
    auth::require_admin(session)?;
    team::create_team(
        db,
        input.name,
        input.username,
        input.password_hash,
        input.event_id,
    )
    .await
}

/// Creates a team directly enrolled in an event (protected, admin).
pub async fn add_to_event(
    db: &DatabaseConnection,
    session: &Session,
    input: AddTeamToEventInput,
) -> Result<team_entity::Model> {
    auth::require_admin(session)?;
    team::create_team(
        db,
        input.name,
        input.username,
        input.password_hash,
        Some(input.event_id),
    )
    .await
}

/// Enrolls an existing team into an event (protected, admin).
pub async fn assign_to_event(
    db: &DatabaseConnection,
    session: &Session,
    team_id: i64,
    event_id: i64,
) -> Result<team_entity::Model> {
    auth::require_admin(session)?;
    team::assign_to_event(db, team_id, event_id).await
}

/// Creates a batch of teams in one event, all-or-nothing (protected, admin).
pub async fn bulk_add_to_event(
    db: &DatabaseConnection,
    session: &Session,
    input: BulkAddToEventInput,
) -> Result<Vec<team_entity::Model>> {
    auth::require_admin(session)?;
    team::bulk_add_to_event(db, input.event_id, input.teams).await
}

/// Updates a team's account fields (protected, admin).
pub async fn update_team(
    db: &DatabaseConnection,
    session: &Session,
    input: UpdateTeamInput,
) -> Result<team_entity::Model> {
    auth::require_admin(session)?;
    team::update_team(db, input.id, input.name, input.username, input.password_hash).await
}

/// Disassociates a team from its event, keeping its history
/// (protected, admin).
pub async fn delete_team(
    db: &DatabaseConnection,
    session: &Session,
    team_id: i64,
) -> Result<team_entity::Model> {
    auth::require_admin(session)?;
    team::remove_team(db, team_id).await
}

/// Retrieves a team's order history, newest first (public).
pub async fn get_team_order_history(
    db: &DatabaseConnection,
    team_id: i64,
) -> Result<Vec<OrderDetails>> {
    team::get_team_order_history(db, team_id).await
}

/// Team participation counters (public).
pub async fn get_team_stats(db: &DatabaseConnection) -> Result<TeamStats> {
    stats::team_stats(db).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_team_mutations_require_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let event_model = create_test_event(&db, "Gated Event").await?;
        let admin = Session::admin(1);

        let input = AddTeamToEventInput {
            event_id: event_model.id,
            name: "Gated Team".to_string(),
            username: "gated".to_string(),
            password_hash: "hash".to_string(),
        };

        let team_session = Session::team(1, None);
        let result = add_to_event(&db, &team_session, input.clone()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::PermissionDenied { message: _ }
        ));

        let created = add_to_event(&db, &admin, input).await?;
        assert_eq!(created.event_id, Some(event_model.id));

        let removed = delete_team(&db, &admin, created.id).await?;
        assert_eq!(removed.event_id, None);

        // Public reads need no session
        assert_eq!(get_all(&db).await?.len(), 1);
        assert_eq!(get_team_order_history(&db, created.id).await?.len(), 0);
        assert_eq!(get_team_stats(&db).await?.total_teams, 1);

        Ok(())
    }
}
