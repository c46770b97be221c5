//! Team business logic - Enrollment and account management.
//!
//! Teams authenticate separately from admins and belong to at most one event
//! at a time; an unassigned team exists but cannot order. Usernames are
//! globally unique, checked at creation, update, and bulk-insert time.
//! Removing a team disassociates it from its event rather than deleting the
//! row, so its order history stays reachable.

use crate::{
    core::order::{self, OrderDetails},
    entities::{Event, Team, team},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Input row for [`bulk_add_to_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    /// Display name
    pub name: String,
    /// Globally unique login name
    pub username: String,
    /// Opaque password hash issued by the auth tier
    pub password_hash: String,
}

/// Retrieves all teams, ordered alphabetically by name.
pub async fn get_all_teams(db: &DatabaseConnection) -> Result<Vec<team::Model>> {
    Team::find()
        .order_by_asc(team::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a team by its unique ID.
pub async fn get_team_by_id(db: &DatabaseConnection, team_id: i64) -> Result<Option<team::Model>> {
    Team::find_by_id(team_id).one(db).await.map_err(Into::into)
}

/// Creates a new team, optionally enrolled in an event.
pub async fn create_team(
    db: &DatabaseConnection,
    name: String,
    username: String,
    password_hash: String,
    event_id: Option<i64>,
) -> Result<team::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Team name cannot be empty".to_string(),
        });
    }
    if username.trim().is_empty() {
        return Err(Error::Config {
            message: "Team username cannot be empty".to_string(),
        });
    }

    if let Some(event_id) = event_id {
        Event::find_by_id(event_id)
            .one(db)
            .await?
            .ok_or(Error::EventNotFound { id: event_id })?;
    }

    let username = username.trim().to_string();
    let existing = Team::find()
        .filter(team::Column::Username.eq(&username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateUsername {
            usernames: username,
        });
    }

    let team = team::ActiveModel {
        name: Set(name.trim().to_string()),
        username: Set(username),
        password_hash: Set(password_hash),
        event_id: Set(event_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    team.insert(db).await.map_err(Into::into)
}

/// Creates a batch of teams enrolled in one event, all-or-nothing.
///
/// Every username - within the batch and against the store - is checked
/// before anything is inserted; a duplicate fails the whole batch and the
/// error lists every offending username.
pub async fn bulk_add_to_event(
    db: &DatabaseConnection,
    event_id: i64,
    new_teams: Vec<NewTeam>,
) -> Result<Vec<team::Model>> {
    Event::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;

    for new_team in &new_teams {
        if new_team.name.trim().is_empty() || new_team.username.trim().is_empty() {
            return Err(Error::Config {
                message: "Team name and username cannot be empty".to_string(),
            });
        }
    }

    let mut duplicates = Vec::new();
    let mut seen = HashSet::new();
    for new_team in &new_teams {
        if !seen.insert(new_team.username.as_str()) {
            duplicates.push(new_team.username.clone());
        }
    }

    let usernames: Vec<String> = new_teams
        .iter()
        .map(|new_team| new_team.username.clone())
        .collect();
    let existing = Team::find()
        .filter(team::Column::Username.is_in(usernames))
        .all(db)
        .await?;
    duplicates.extend(existing.into_iter().map(|taken| taken.username));

    if !duplicates.is_empty() {
        duplicates.sort();
        duplicates.dedup();
        return Err(Error::DuplicateUsername {
            usernames: duplicates.join(", "),
        });
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now();
    let mut created = Vec::with_capacity(new_teams.len());
    for new_team in new_teams {
        let team = team::ActiveModel {
            name: Set(new_team.name.trim().to_string()),
            username: Set(new_team.username.trim().to_string()),
            password_hash: Set(new_team.password_hash),
            event_id: Set(Some(event_id)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        created.push(team);
    }
    txn.commit().await?;
    info!(event_id, count = created.len(), "teams bulk-enrolled");

    Ok(created)
}

/// Updates a team's name, username, and/or password hash.
pub async fn update_team(
    db: &DatabaseConnection,
    team_id: i64,
    name: Option<String>,
    username: Option<String>,
    password_hash: Option<String>,
) -> Result<team::Model> {
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })?;

    if let Some(new_username) = &username {
        let new_username = new_username.trim();
        if new_username.is_empty() {
            return Err(Error::Config {
                message: "Team username cannot be empty".to_string(),
            });
        }
        if new_username != team.username {
            let taken = Team::find()
                .filter(team::Column::Username.eq(new_username))
                .one(db)
                .await?;
            if taken.is_some() {
                return Err(Error::DuplicateUsername {
                    usernames: new_username.to_string(),
                });
            }
        }
    }

    let mut active: team::ActiveModel = team.into();
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::Config {
                message: "Team name cannot be empty".to_string(),
            });
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(username) = username {
        active.username = Set(username.trim().to_string());
    }
    if let Some(password_hash) = password_hash {
        active.password_hash = Set(password_hash);
    }

    active.update(db).await.map_err(Into::into)
}

/// Enrolls an existing team into an event, replacing any prior assignment.
pub async fn assign_to_event(
    db: &DatabaseConnection,
    team_id: i64,
    event_id: i64,
) -> Result<team::Model> {
    Event::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })?;

    let mut active: team::ActiveModel = team.into();
    active.event_id = Set(Some(event_id));
    active.update(db).await.map_err(Into::into)
}

/// Disassociates a team from its event. The team row and its order history
/// are kept; the team just can no longer order until reassigned.
pub async fn remove_team(db: &DatabaseConnection, team_id: i64) -> Result<team::Model> {
    let team = Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })?;

    let mut active: team::ActiveModel = team.into();
    active.event_id = Set(None);
    active.update(db).await.map_err(Into::into)
}

/// Retrieves a team's order history, newest first.
pub async fn get_team_order_history(
    db: &DatabaseConnection,
    team_id: i64,
) -> Result<Vec<OrderDetails>> {
    order::get_team_orders(db, team_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn new_team(name: &str, username: &str) -> NewTeam {
        NewTeam {
            name: name.to_string(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_team_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_team(&db, String::new(), "u".to_string(), "h".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result =
            create_team(&db, "Team".to_string(), "  ".to_string(), "h".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_team(
            &db,
            "Team".to_string(),
            "user".to_string(),
            "h".to_string(),
            Some(9999),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::EventNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        create_team(
            &db,
            "First".to_string(),
            "shared-name".to_string(),
            "h".to_string(),
            None,
        )
        .await?;

        let result = create_team(
            &db,
            "Second".to_string(),
            "shared-name".to_string(),
            "h".to_string(),
            None,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateUsername { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_add_to_event() -> Result<()> {
        let db = setup_test_db().await?;
        let event_model = create_test_event(&db, "Bulk Event").await?;

        let created = bulk_add_to_event(
            &db,
            event_model.id,
            vec![new_team("Alpha", "alpha"), new_team("Beta", "beta")],
        )
        .await?;
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|team| team.event_id == Some(event_model.id)));

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_add_is_all_or_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let event_model = create_test_event(&db, "Bulk Event").await?;
        create_team(
            &db,
            "Taken".to_string(),
            "taken".to_string(),
            "h".to_string(),
            None,
        )
        .await?;

        // One username collides with the store
        let result = bulk_add_to_event(
            &db,
            event_model.id,
            vec![new_team("Fresh", "fresh"), new_team("Clash", "taken")],
        )
        .await;
        match result.unwrap_err() {
            Error::DuplicateUsername { usernames } => assert!(usernames.contains("taken")),
            other => panic!("expected DuplicateUsername, got {other:?}"),
        }

        // Nothing from the batch was inserted
        assert_eq!(get_all_teams(&db).await?.len(), 1);

        // Duplicates within the batch itself are caught too
        let result = bulk_add_to_event(
            &db,
            event_model.id,
            vec![new_team("Twin A", "twin"), new_team("Twin B", "twin")],
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateUsername { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_team_username_uniqueness() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_team(
            &db,
            "First".to_string(),
            "first".to_string(),
            "h".to_string(),
            None,
        )
        .await?;
        create_team(
            &db,
            "Second".to_string(),
            "second".to_string(),
            "h".to_string(),
            None,
        )
        .await?;

        let result = update_team(&db, first.id, None, Some("second".to_string()), None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateUsername { .. }
        ));

        // Re-asserting its own username is fine
        let unchanged = update_team(&db, first.id, None, Some("first".to_string()), None).await?;
        assert_eq!(unchanged.username, "first");

        let renamed = update_team(
            &db,
            first.id,
            Some("Renamed".to_string()),
            None,
            Some("new-hash".to_string()),
        )
        .await?;
        assert_eq!(renamed.name, "Renamed");
        assert_eq!(renamed.password_hash, "new-hash");

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_and_remove() -> Result<()> {
        let db = setup_test_db().await?;
        let event_model = create_test_event(&db, "Home Event").await?;
        let team_model = create_test_team(&db, "Wanderers", None).await?;

        let assigned = assign_to_event(&db, team_model.id, event_model.id).await?;
        assert_eq!(assigned.event_id, Some(event_model.id));

        // Removal disassociates but keeps the row
        let removed = remove_team(&db, team_model.id).await?;
        assert_eq!(removed.event_id, None);
        assert!(get_team_by_id(&db, team_model.id).await?.is_some());

        let result = assign_to_event(&db, team_model.id, 9999).await;
        assert!(matches!(result.unwrap_err(), Error::EventNotFound { .. }));

        Ok(())
    }
}
