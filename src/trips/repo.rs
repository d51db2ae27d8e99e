use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::access::{CAN_READ, CAN_WRITE};
use super::repo_types::{NewTrip, Trip, TripAccessRow, TripPatch, TRIP_COLUMNS};

pub async fn list_owned(db: &PgPool, owner_id: Uuid) -> anyhow::Result<Vec<Trip>> {
    let rows = sqlx::query_as::<_, Trip>(&format!(
        r#"
        SELECT {TRIP_COLUMNS}
          FROM trips t
         WHERE t.user_id = $1
         ORDER BY t.created_at DESC
        "#
    ))
    .bind(owner_id)
    .fetch_all(db)
    .await
    .context("list trips by owner")?;
    Ok(rows)
}

/// Trips other users have shared with `user_id`, with the granted role.
pub async fn list_shared_with(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<TripAccessRow>> {
    let rows = sqlx::query_as::<_, TripAccessRow>(&format!(
        r#"
        SELECT {TRIP_COLUMNS}, s.role AS share_role
          FROM trips t
          JOIN shared_trips s ON s.trip_id = t.id
         WHERE s.user_id = $1
         ORDER BY t.created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list trips shared with user")?;
    Ok(rows)
}

/// The trip if `requester` may read it; `None` both when it is missing and
/// when it is hidden.
pub async fn get_readable(
    db: &PgPool,
    trip_id: Uuid,
    requester: Option<Uuid>,
) -> anyhow::Result<Option<TripAccessRow>> {
    let row = sqlx::query_as::<_, TripAccessRow>(&format!(
        r#"
        SELECT {TRIP_COLUMNS}, sh.role AS share_role
          FROM trips t
          LEFT JOIN shared_trips sh ON sh.trip_id = t.id AND sh.user_id = $2
         WHERE t.id = $1 AND {CAN_READ}
        "#
    ))
    .bind(trip_id)
    .bind(requester)
    .fetch_optional(db)
    .await
    .context("get readable trip")?;
    Ok(row)
}

pub async fn create(db: &PgPool, owner_id: Uuid, new: &NewTrip) -> anyhow::Result<Trip> {
    let trip = sqlx::query_as::<_, Trip>(&format!(
        r#"
        INSERT INTO trips AS t (user_id, title, description, start_date, end_date, is_public)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {TRIP_COLUMNS}
        "#
    ))
    .bind(owner_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(new.is_public)
    .fetch_one(db)
    .await
    .context("create trip")?;
    Ok(trip)
}

/// Owner-only; `None` when the trip is missing or belongs to someone else.
pub async fn update_owned(
    db: &PgPool,
    trip_id: Uuid,
    owner_id: Uuid,
    patch: &TripPatch,
) -> anyhow::Result<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(&format!(
        r#"
        UPDATE trips AS t
           SET title       = COALESCE($3, t.title),
               description = COALESCE($4, t.description),
               start_date  = COALESCE($5, t.start_date),
               end_date    = COALESCE($6, t.end_date),
               is_public   = COALESCE($7, t.is_public)
         WHERE t.id = $1 AND t.user_id = $2
        RETURNING {TRIP_COLUMNS}
        "#
    ))
    .bind(trip_id)
    .bind(owner_id)
    .bind(&patch.title)
    .bind(&patch.description)
    .bind(patch.start_date)
    .bind(patch.end_date)
    .bind(patch.is_public)
    .fetch_optional(db)
    .await
    .context("update trip")?;
    Ok(trip)
}

/// Owner-only. Children go with it through ON DELETE CASCADE.
pub async fn delete_owned(db: &PgPool, trip_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM trips WHERE id = $1 AND user_id = $2")
        .bind(trip_id)
        .bind(owner_id)
        .execute(db)
        .await
        .context("delete trip")?;
    Ok(res.rows_affected() > 0)
}

/// Existence probe used only to choose between 403 and 404 after an
/// authorized statement matched nothing.
pub async fn exists(db: &PgPool, trip_id: Uuid) -> anyhow::Result<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM trips WHERE id = $1)")
        .bind(trip_id)
        .fetch_one(db)
        .await
        .context("probe trip")?;
    Ok(found)
}

/// `None` when the trip is missing, otherwise whether `me` may write it.
pub async fn write_access(db: &PgPool, trip_id: Uuid, me: Uuid) -> anyhow::Result<Option<bool>> {
    let access: Option<bool> =
        sqlx::query_scalar(&format!("SELECT {CAN_WRITE} FROM trips t WHERE t.id = $1"))
            .bind(trip_id)
            .bind(me)
            .fetch_optional(db)
            .await
            .context("probe trip write access")?;
    Ok(access)
}

pub async fn is_owned(db: &PgPool, trip_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
    let owned: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM trips WHERE id = $1 AND user_id = $2)",
    )
    .bind(trip_id)
    .bind(owner_id)
    .fetch_one(db)
    .await
    .context("probe trip ownership")?;
    Ok(owned)
}
