//! Team credential business logic.
//!
//! Admins issue login credentials to teams (email/password handed out at
//! check-in). The values are opaque to this crate; the auth tier consumes
//! them.

use crate::{
    entities::{Team, TeamCredential, team_credential},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Retrieves a team's issued credentials, newest first.
pub async fn get_credentials_for_team(
    db: &DatabaseConnection,
    team_id: i64,
) -> Result<Vec<team_credential::Model>> {
    TeamCredential::find()
        .filter(team_credential::Column::TeamId.eq(team_id))
        .order_by_desc(team_credential::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Issues a credential to a team.
pub async fn create_credential(
    db: &DatabaseConnection,
    team_id: i64,
    email: Option<String>,
    password: Option<String>,
) -> Result<team_credential::Model> {
    Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })?;

    let credential = team_credential::ActiveModel {
        team_id: Set(team_id),
        email: Set(email),
        password: Set(password),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    credential.insert(db).await.map_err(Into::into)
}

/// Replaces a credential's email and password.
pub async fn update_credential(
    db: &DatabaseConnection,
    credential_id: i64,
    email: Option<String>,
    password: Option<String>,
) -> Result<team_credential::Model> {
    let credential = TeamCredential::find_by_id(credential_id)
        .one(db)
        .await?
        .ok_or(Error::CredentialNotFound { id: credential_id })?;

    let mut active: team_credential::ActiveModel = credential.into();
    active.email = Set(email);
    active.password = Set(password);
    active.update(db).await.map_err(Into::into)
}

/// Revokes a credential.
pub async fn delete_credential(db: &DatabaseConnection, credential_id: i64) -> Result<()> {
    let credential = TeamCredential::find_by_id(credential_id)
        .one(db)
        .await?
        .ok_or(Error::CredentialNotFound { id: credential_id })?;

    credential.delete(db).await?;
    Ok(())
}
