//! Session-related types.
//!
//! The session holds one thing: the visitor's ID. Everything that changes as
//! they browse lives in [`crate::services::VisitorStore`] under that ID, so
//! overlapping requests never overwrite each other's work.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;

/// Session keys.
pub mod keys {
    /// Key for the visitor's stable ID.
    pub const VISITOR_ID: &str = "visitor_id";
}

/// The current visitor, identified by a stable ID.
///
/// The ID is created on first contact and stored in the session. It is only
/// written once, so concurrent requests never race on the session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visitor {
    pub id: Uuid,
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let id = match session.get::<Uuid>(keys::VISITOR_ID).await? {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                session.insert(keys::VISITOR_ID, id).await?;
                tracing::debug!(visitor_id = %id, "New visitor");
                id
            }
        };

        Ok(Self { id })
    }
}
