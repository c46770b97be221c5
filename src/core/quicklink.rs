//! Quick link business logic - Admin-curated dashboard links.

use crate::{
    entities::{QuickLink, quick_link},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Retrieves the links currently shown to teams, newest first.
pub async fn get_active_links(db: &DatabaseConnection) -> Result<Vec<quick_link::Model>> {
    QuickLink::find()
        .filter(quick_link::Column::Active.eq(true))
        .order_by_desc(quick_link::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all links for the admin dashboard, newest first.
pub async fn get_all_links(db: &DatabaseConnection) -> Result<Vec<quick_link::Model>> {
    QuickLink::find()
        .order_by_desc(quick_link::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a new link, active immediately.
pub async fn add_link(
    db: &DatabaseConnection,
    title: String,
    description: String,
    url: String,
) -> Result<quick_link::Model> {
    if title.trim().is_empty() || description.trim().is_empty() || url.trim().is_empty() {
        return Err(Error::Config {
            message: "Quick link title, description, and URL cannot be empty".to_string(),
        });
    }

    let link = quick_link::ActiveModel {
        title: Set(title.trim().to_string()),
        description: Set(description.trim().to_string()),
        url: Set(url.trim().to_string()),
        active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    link.insert(db).await.map_err(Into::into)
}

/// Shows or hides a link.
pub async fn set_link_active(
    db: &DatabaseConnection,
    link_id: i64,
    active: bool,
) -> Result<quick_link::Model> {
    let link = QuickLink::find_by_id(link_id)
        .one(db)
        .await?
        .ok_or(Error::QuickLinkNotFound { id: link_id })?;

    let mut model: quick_link::ActiveModel = link.into();
    model.active = Set(active);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a link.
pub async fn delete_link(db: &DatabaseConnection, link_id: i64) -> Result<()> {
    let link = QuickLink::find_by_id(link_id)
        .one(db)
        .await?
        .ok_or(Error::QuickLinkNotFound { id: link_id })?;

    link.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_quick_link_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;

        let link = add_link(
            &db,
            "Venue Map".to_string(),
            "Where to pick up food".to_string(),
            "https://example.com/map".to_string(),
        )
        .await?;
        assert!(link.active);

        // Hidden links drop out of the active list but stay in the full list
        set_link_active(&db, link.id, false).await?;
        assert_eq!(get_active_links(&db).await?.len(), 0);
        assert_eq!(get_all_links(&db).await?.len(), 1);

        set_link_active(&db, link.id, true).await?;
        assert_eq!(get_active_links(&db).await?.len(), 1);

        delete_link(&db, link.id).await?;
        assert_eq!(get_all_links(&db).await?.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_link_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_link(&db, String::new(), "desc".to_string(), "url".to_string()).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = set_link_active(&db, 9999, true).await;
        assert!(matches!(result.unwrap_err(), Error::QuickLinkNotFound { .. }));

        Ok(())
    }
}
