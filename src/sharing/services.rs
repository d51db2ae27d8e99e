use sqlx::PgPool;
use uuid::Uuid;

use super::{
    dto::{GrantShareRequest, Share},
    repo,
    repo_types::ShareRow,
};
use crate::{
    auth::{
        repo_types::User,
        services::{is_valid_email, normalize_email},
        AuthUser,
    },
    error::{AppError, AppResult},
    trips,
};

const SELF_SHARE_MSG: &str = "You cannot share a trip with yourself";

fn to_share(row: ShareRow) -> AppResult<Share> {
    Ok(Share {
        trip_id: row.trip_id,
        user_id: row.user_id,
        name: row.name,
        email: row.email,
        role: row.role.parse()?,
        created_at: row.created_at,
    })
}

/// Normalized grantee email; rejects the caller's own address.
pub fn validate_grant(me: &AuthUser, req: &GrantShareRequest) -> AppResult<String> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        return Err(AppError::validation("email", "Invalid email address"));
    }
    if email == normalize_email(&me.0.email) {
        return Err(AppError::validation("email", SELF_SHARE_MSG));
    }
    Ok(email)
}

/// Foreign and missing trips are both 404.
pub async fn list(db: &PgPool, trip_id: Uuid, owner_id: Uuid) -> AppResult<Vec<Share>> {
    let rows = repo::list(db, trip_id, owner_id).await?;
    if rows.is_empty() && !trips::repo::is_owned(db, trip_id, owner_id).await? {
        return Err(AppError::NotFound("Trip"));
    }
    rows.into_iter().map(to_share).collect()
}

pub async fn grant(db: &PgPool, trip_id: Uuid, me: &AuthUser, req: GrantShareRequest) -> AppResult<Share> {
    let email = validate_grant(me, &req)?;
    if let Some(row) = repo::grant(db, trip_id, me.id(), &email, req.role).await? {
        return to_share(row);
    }
    if !trips::repo::is_owned(db, trip_id, me.id()).await? {
        return Err(AppError::NotFound("Trip"));
    }
    match User::find_by_email(db, &email).await? {
        None => Err(AppError::NotFound("User")),
        Some(u) if u.id == me.id() => Err(AppError::validation("email", SELF_SHARE_MSG)),
        // trip removed between the grant and the probe
        Some(_) => Err(AppError::NotFound("Trip")),
    }
}

pub async fn revoke(db: &PgPool, trip_id: Uuid, owner_id: Uuid, user_id: Uuid) -> AppResult<()> {
    if repo::revoke(db, trip_id, owner_id, user_id).await? {
        return Ok(());
    }
    if trips::repo::is_owned(db, trip_id, owner_id).await? {
        Err(AppError::NotFound("Share"))
    } else {
        Err(AppError::NotFound("Trip"))
    }
}
