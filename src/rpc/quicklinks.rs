//! Quick link procedures.

use crate::{
    auth::{self, Session},
    core::quicklink,
    entities::quick_link,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Input for [`add`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddQuickLinkInput {
    /// Short title shown on the dashboard
    pub title: String,
    /// One-line description
    pub description: String,
    /// Target URL
    pub url: String,
}

/// Lists the links currently shown to teams (public).
pub async fn get_active(db: &DatabaseConnection) -> Result<Vec<quick_link::Model>> {
    quicklink::get_active_links(db).await
}

/// Lists every link for the admin dashboard (protected, admin).
pub async fn get_all(db: &DatabaseConnection, session: &Session) -> Result<Vec<quick_link::Model>> {
    auth::require_admin(session)?;
    quicklink::get_all_links(db).await
}

/// Adds a new link (protected, admin).
pub async fn add(
    db: &DatabaseConnection,
    session: &Session,
    input: AddQuickLinkInput,
) -> Result<quick_link::Model> {
    auth::require_admin(session)?;
    quicklink::add_link(db, input.title, input.description, input.url).await
}

/// Shows or hides a link (protected, admin).
pub async fn toggle_active(
    db: &DatabaseConnection,
    session: &Session,
    link_id: i64,
    active: bool,
) -> Result<quick_link::Model> {
    auth::require_admin(session)?;
    quicklink::set_link_active(db, link_id, active).await
}

/// Deletes a link (protected, admin).
pub async fn delete(db: &DatabaseConnection, session: &Session, link_id: i64) -> Result<()> {
    auth::require_admin(session)?;
    quicklink::delete_link(db, link_id).await
}
