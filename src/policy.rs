//!
//! # Authorization Policy
//!
//! One place that answers "may this actor perform this action on this
//! resource?" so individual handlers never grow their own role checks.
//! Handlers load the acting user's row, build an [`Actor`], and call
//! [`authorize`]; a denial surfaces as HTTP 403.

use crate::error::AppError;
use crate::models::profile::Role;
use sqlx::PgPool;

/// The user attempting an action, as stored in the database.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i32,
    pub role: Role,
}

/// Privileged actions the policy knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DeleteCommunity,
    RemoveMember,
}

/// The resource an action targets.
#[derive(Debug, Clone, Copy)]
pub enum Resource {
    /// A community and the profile id of its creator, if one is recorded.
    Community { created_by: Option<i32> },
}

/// Loads the acting user's id and role. A missing profile is a 404: the
/// request named a user that does not exist.
pub async fn load_actor(pool: &PgPool, user_id: i32) -> Result<Actor, AppError> {
    let row = sqlx::query_as::<_, (i32, Role)>("SELECT id, role FROM profile WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some((id, role)) => Ok(Actor { id, role }),
        None => Err(AppError::NotFound("Profile not found".into())),
    }
}

/// Returns `Ok(())` when `actor` may perform `action` on `resource`,
/// otherwise `AppError::Forbidden`.
///
/// Current rules: community administration (delete, remove member) is allowed
/// for the community's creator and for admin-role profiles, nobody else.
pub fn authorize(actor: &Actor, action: Action, resource: &Resource) -> Result<(), AppError> {
    let Resource::Community { created_by } = resource;

    if actor.role == Role::Admin || *created_by == Some(actor.id) {
        return Ok(());
    }

    let denial = match action {
        Action::DeleteCommunity => "Only the community creator or an admin can delete a community",
        Action::RemoveMember => "Only the community creator or an admin can remove members",
    };
    Err(AppError::Forbidden(denial.into()))
}
