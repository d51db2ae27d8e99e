use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{
    Activity, NewTripActivity, TripActivity, ACTIVITY_COLUMNS, SEED_CATALOG,
    TRIP_ACTIVITY_COLUMNS,
};
use crate::{
    trips::access::{CAN_READ, CAN_WRITE},
    validation::ORDER_INDEX_MAX,
};

pub async fn list_catalog(db: &PgPool) -> anyhow::Result<Vec<Activity>> {
    let rows = sqlx::query_as::<_, Activity>(&format!(
        "SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY name"
    ))
    .fetch_all(db)
    .await
    .context("list activity catalog")?;
    Ok(rows)
}

/// Case-insensitive substring match on the name. `POSITION` keeps `%` and
/// `_` in the query literal.
pub async fn search_catalog(db: &PgPool, q: &str) -> anyhow::Result<Vec<Activity>> {
    let rows = sqlx::query_as::<_, Activity>(&format!(
        r#"
        SELECT {ACTIVITY_COLUMNS}
          FROM activities
         WHERE POSITION(LOWER($1) IN LOWER(name)) > 0
         ORDER BY name
        "#
    ))
    .bind(q)
    .fetch_all(db)
    .await
    .context("search activity catalog")?;
    Ok(rows)
}

/// Inserts the default catalog when it is empty. Returns the number of rows
/// inserted.
pub async fn seed_catalog(db: &PgPool) -> anyhow::Result<usize> {
    let mut tx = db.begin().await.context("begin catalog seed")?;

    // serializes concurrent seeders on the empty-check
    sqlx::query("LOCK TABLE activities IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await
        .context("lock activity catalog")?;

    let present: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM activities)")
        .fetch_one(&mut *tx)
        .await
        .context("probe activity catalog")?;
    if present {
        return Ok(0);
    }

    for seed in SEED_CATALOG {
        sqlx::query(
            "INSERT INTO activities (name, category, description, default_cost) \
             VALUES ($1, $2, $3, $4::numeric)",
        )
        .bind(seed.name)
        .bind(seed.category)
        .bind(seed.description)
        .bind(seed.default_cost)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("seed activity {}", seed.name))?;
    }

    tx.commit().await.context("commit catalog seed")?;
    Ok(SEED_CATALOG.len())
}

/// Empty when the trip is missing or hidden from the requester.
pub async fn list_by_trip(
    db: &PgPool,
    trip_id: Uuid,
    requester: Option<Uuid>,
) -> anyhow::Result<Vec<TripActivity>> {
    let rows = sqlx::query_as::<_, TripActivity>(&format!(
        r#"
        SELECT {TRIP_ACTIVITY_COLUMNS}
          FROM trip_activities ta
          JOIN trips t ON t.id = ta.trip_id
         WHERE ta.trip_id = $1 AND {CAN_READ}
         ORDER BY ta.scheduled_date NULLS LAST, ta.order_index
        "#
    ))
    .bind(trip_id)
    .bind(requester)
    .fetch_all(db)
    .await
    .context("list activities by trip")?;
    Ok(rows)
}

pub async fn list_by_stop(
    db: &PgPool,
    stop_id: Uuid,
    requester: Option<Uuid>,
) -> anyhow::Result<Vec<TripActivity>> {
    let rows = sqlx::query_as::<_, TripActivity>(&format!(
        r#"
        SELECT {TRIP_ACTIVITY_COLUMNS}
          FROM trip_activities ta
          JOIN trips t ON t.id = ta.trip_id
         WHERE ta.stop_id = $1 AND {CAN_READ}
         ORDER BY ta.scheduled_date NULLS LAST, ta.order_index
        "#
    ))
    .bind(stop_id)
    .bind(requester)
    .fetch_all(db)
    .await
    .context("list activities by stop")?;
    Ok(rows)
}

/// Inserts under the trip when `me` may write it and any `stop_id` belongs to
/// the same trip; `None` otherwise. Title and cost default to the catalog
/// entry's.
pub async fn create(
    db: &PgPool,
    trip_id: Uuid,
    me: Uuid,
    new: &NewTripActivity,
) -> anyhow::Result<Option<TripActivity>> {
    let row = sqlx::query_as::<_, TripActivity>(&format!(
        r#"
        INSERT INTO trip_activities AS ta
               (trip_id, stop_id, activity_id, title, description, scheduled_date,
                cost, duration_minutes, order_index, notes)
        SELECT t.id, $3, $4,
               COALESCE($5, (SELECT c.name FROM activities c WHERE c.id = $4)),
               $6, $7,
               COALESCE($8, (SELECT c.default_cost FROM activities c WHERE c.id = $4), 0),
               $9,
               COALESCE($10, (SELECT LEAST(COALESCE(MAX(x.order_index)::bigint + 1, 0), {ORDER_INDEX_MAX})::int
                                FROM trip_activities x WHERE x.trip_id = t.id)),
               $11
          FROM trips t
         WHERE t.id = $1 AND {CAN_WRITE}
           AND ($3::uuid IS NULL
                OR EXISTS (SELECT 1 FROM trip_stops x WHERE x.id = $3 AND x.trip_id = t.id))
        RETURNING {TRIP_ACTIVITY_COLUMNS}
        "#
    ))
    .bind(trip_id)
    .bind(me)
    .bind(new.stop_id)
    .bind(new.activity_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.scheduled_date)
    .bind(new.cost)
    .bind(new.duration_minutes)
    .bind(new.order_index)
    .bind(&new.notes)
    .fetch_optional(db)
    .await
    .context("create trip activity")?;
    Ok(row)
}

/// Inserts under the stop's trip. `new.stop_id` is ignored.
pub async fn create_for_stop(
    db: &PgPool,
    stop_id: Uuid,
    me: Uuid,
    new: &NewTripActivity,
) -> anyhow::Result<Option<TripActivity>> {
    let row = sqlx::query_as::<_, TripActivity>(&format!(
        r#"
        INSERT INTO trip_activities AS ta
               (trip_id, stop_id, activity_id, title, description, scheduled_date,
                cost, duration_minutes, order_index, notes)
        SELECT t.id, st.id, $3,
               COALESCE($4, (SELECT c.name FROM activities c WHERE c.id = $3)),
               $5, $6,
               COALESCE($7, (SELECT c.default_cost FROM activities c WHERE c.id = $3), 0),
               $8,
               COALESCE($9, (SELECT LEAST(COALESCE(MAX(x.order_index)::bigint + 1, 0), {ORDER_INDEX_MAX})::int
                               FROM trip_activities x WHERE x.trip_id = t.id)),
               $10
          FROM trip_stops st
          JOIN trips t ON t.id = st.trip_id
         WHERE st.id = $1 AND {CAN_WRITE}
        RETURNING {TRIP_ACTIVITY_COLUMNS}
        "#
    ))
    .bind(stop_id)
    .bind(me)
    .bind(new.activity_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.scheduled_date)
    .bind(new.cost)
    .bind(new.duration_minutes)
    .bind(new.order_index)
    .bind(&new.notes)
    .fetch_optional(db)
    .await
    .context("create stop activity")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid, me: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(&format!(
        r#"
        DELETE FROM trip_activities ta
         USING trips t
         WHERE ta.id = $1 AND t.id = ta.trip_id AND {CAN_WRITE}
        "#
    ))
    .bind(id)
    .bind(me)
    .execute(db)
    .await
    .context("delete trip activity")?;
    Ok(res.rows_affected() > 0)
}

pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let found: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM trip_activities WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
            .context("probe trip activity")?;
    Ok(found)
}
