//! Role-scoped sessions and procedure gating.
//!
//! Session issuance (credential checks, token callbacks) lives in the
//! external auth tier; this module only defines the session shape that tier
//! hands to RPC procedures, and the guards the protected tier gates with.
//! A team session carries the event the team was assigned to when the
//! session was issued - that snapshot can go stale if an admin reassigns
//! the team mid-session, which is why the order engine re-checks membership
//! against the store.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Authorization role carried by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access
    Admin,
    /// A logged-in team
    Team,
}

/// An authenticated caller, as issued by the external auth tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Admin user id or team id, depending on `role`
    pub subject_id: i64,
    /// Authorization role
    pub role: Role,
    /// For team sessions, the event the team was assigned to at issue time
    pub event_id: Option<i64>,
}

impl Session {
    /// Builds an admin session for the given user id.
    #[must_use]
    pub const fn admin(user_id: i64) -> Self {
        Self {
            subject_id: user_id,
            role: Role::Admin,
            event_id: None,
        }
    }

    /// Builds a team session for the given team id and its assigned event.
    #[must_use]
    pub const fn team(team_id: i64, event_id: Option<i64>) -> Self {
        Self {
            subject_id: team_id,
            role: Role::Team,
            event_id,
        }
    }
}

/// Requires the caller to hold an admin session.
pub fn require_admin(session: &Session) -> Result<()> {
    if session.role == Role::Admin {
        Ok(())
    } else {
        Err(Error::PermissionDenied {
            message: "admin role required".to_string(),
        })
    }
}

/// Requires the caller to hold a team session.
pub fn require_team(session: &Session) -> Result<()> {
    if session.role == Role::Team {
        Ok(())
    } else {
        Err(Error::PermissionDenied {
            message: "team role required".to_string(),
        })
    }
}

/// Requires a team session acting on its own team id.
///
/// Protected team procedures pin the requested team to the session so a
/// stale or tampered client cannot act for another team.
pub fn require_team_self(session: &Session, team_id: i64) -> Result<()> {
    require_team(session)?;
    if session.subject_id == team_id {
        Ok(())
    } else {
        Err(Error::PermissionDenied {
            message: "session does not match the requested team".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_admin_guard() {
        let admin = Session::admin(1);
        let team = Session::team(2, Some(1));

        assert!(require_admin(&admin).is_ok());
        assert!(matches!(
            require_admin(&team).unwrap_err(),
            Error::PermissionDenied { message: _ }
        ));
    }

    #[test]
    fn test_team_guard() {
        let admin = Session::admin(1);
        let team = Session::team(2, Some(1));

        assert!(require_team(&team).is_ok());
        assert!(require_team(&admin).is_err());
    }

    #[test]
    fn test_team_self_guard() {
        let team = Session::team(2, Some(1));

        assert!(require_team_self(&team, 2).is_ok());
        assert!(require_team_self(&team, 3).is_err());
    }
}
