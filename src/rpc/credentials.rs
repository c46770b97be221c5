//! Team credential procedures.

use crate::{
    auth::{self, Session},
    core::credential,
    entities::team_credential,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Input for [`create`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCredentialInput {
    /// Team to issue the credential to
    pub team_id: i64,
    /// Issued email, if any
    pub email: Option<String>,
    /// Issued password, if any
    pub password: Option<String>,
}

/// Input for [`update`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCredentialInput {
    /// Credential to update
    pub id: i64,
    /// Replacement email
    pub email: Option<String>,
    /// Replacement password
    pub password: Option<String>,
}

/// Lists a team's issued credentials, newest first (public).
pub async fn get_by_team_id(
    db: &DatabaseConnection,
    team_id: i64,
) -> Result<Vec<team_credential::Model>> {
    credential::get_credentials_for_team(db, team_id).await
}

/// Issues a credential to a team (protected, admin).
pub async fn create(
    db: &DatabaseConnection,
    session: &Session,
    input: CreateCredentialInput,
) -> Result<team_credential::Model> {
    auth::require_admin(session)?;
    credential::create_credential(db, input.team_id, input.email, input.password).await
}

/// Replaces a credential's fields (protected, admin).
pub async fn update(
    db: &DatabaseConnection,
    session: &Session,
    input: UpdateCredentialInput,
) -> Result<team_credential::Model> {
    auth::require_admin(session)?;
    credential::update_credential(db, input.id, input.email, input.password).await
}

/// Revokes a credential (protected, admin).
pub async fn delete(db: &DatabaseConnection, session: &Session, credential_id: i64) -> Result<()> {
    auth::require_admin(session)?;
    credential::delete_credential(db, credential_id).await
}
