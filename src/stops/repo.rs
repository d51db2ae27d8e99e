use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewStop, StopPatch, TripStop, STOP_COLUMNS};
use crate::{
    trips::access::{CAN_READ, CAN_WRITE},
    validation::ORDER_INDEX_MAX,
};

/// Stops in display order; empty when the trip is missing or hidden.
pub async fn list_by_trip(
    db: &PgPool,
    trip_id: Uuid,
    requester: Option<Uuid>,
) -> anyhow::Result<Vec<TripStop>> {
    let rows = sqlx::query_as::<_, TripStop>(&format!(
        r#"
        SELECT {STOP_COLUMNS}
          FROM trip_stops st
          JOIN trips t ON t.id = st.trip_id
         WHERE st.trip_id = $1 AND {CAN_READ}
         ORDER BY st.order_index, st.arrival_date
        "#
    ))
    .bind(trip_id)
    .bind(requester)
    .fetch_all(db)
    .await
    .context("list stops by trip")?;
    Ok(rows)
}

/// Inserts only when `me` may write the trip; `None` otherwise.
pub async fn create(
    db: &PgPool,
    trip_id: Uuid,
    me: Uuid,
    new: &NewStop,
) -> anyhow::Result<Option<TripStop>> {
    let row = sqlx::query_as::<_, TripStop>(&format!(
        r#"
        INSERT INTO trip_stops AS st
               (trip_id, city, country, arrival_date, departure_date, order_index, notes)
        SELECT t.id, $3, $4, $5, $6,
               COALESCE($7, (SELECT LEAST(COALESCE(MAX(x.order_index)::bigint + 1, 0), {ORDER_INDEX_MAX})::int
                               FROM trip_stops x WHERE x.trip_id = t.id)),
               $8
          FROM trips t
         WHERE t.id = $1 AND {CAN_WRITE}
        RETURNING {STOP_COLUMNS}
        "#
    ))
    .bind(trip_id)
    .bind(me)
    .bind(&new.city)
    .bind(&new.country)
    .bind(new.arrival_date)
    .bind(new.departure_date)
    .bind(new.order_index)
    .bind(&new.notes)
    .fetch_optional(db)
    .await
    .context("create stop")?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    stop_id: Uuid,
    me: Uuid,
    patch: &StopPatch,
) -> anyhow::Result<Option<TripStop>> {
    let row = sqlx::query_as::<_, TripStop>(&format!(
        r#"
        UPDATE trip_stops AS st
           SET city           = COALESCE($3, st.city),
               country        = COALESCE($4, st.country),
               arrival_date   = COALESCE($5, st.arrival_date),
               departure_date = COALESCE($6, st.departure_date),
               order_index    = COALESCE($7, st.order_index),
               notes          = COALESCE($8, st.notes)
          FROM trips t
         WHERE st.id = $1 AND t.id = st.trip_id AND {CAN_WRITE}
        RETURNING {STOP_COLUMNS}
        "#
    ))
    .bind(stop_id)
    .bind(me)
    .bind(&patch.city)
    .bind(&patch.country)
    .bind(patch.arrival_date)
    .bind(patch.departure_date)
    .bind(patch.order_index)
    .bind(&patch.notes)
    .fetch_optional(db)
    .await
    .context("update stop")?;
    Ok(row)
}

/// Order indices are display hints; duplicates from racing reorders are
/// tolerated.
pub async fn update_order(
    db: &PgPool,
    stop_id: Uuid,
    me: Uuid,
    order_index: i32,
) -> anyhow::Result<Option<TripStop>> {
    let row = sqlx::query_as::<_, TripStop>(&format!(
        r#"
        UPDATE trip_stops AS st
           SET order_index = $3
          FROM trips t
         WHERE st.id = $1 AND t.id = st.trip_id AND {CAN_WRITE}
        RETURNING {STOP_COLUMNS}
        "#
    ))
    .bind(stop_id)
    .bind(me)
    .bind(order_index)
    .fetch_optional(db)
    .await
    .context("update stop order")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, stop_id: Uuid, me: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(&format!(
        r#"
        DELETE FROM trip_stops st
         USING trips t
         WHERE st.id = $1 AND t.id = st.trip_id AND {CAN_WRITE}
        "#
    ))
    .bind(stop_id)
    .bind(me)
    .execute(db)
    .await
    .context("delete stop")?;
    Ok(res.rows_affected() > 0)
}

pub async fn exists(db: &PgPool, stop_id: Uuid) -> anyhow::Result<bool> {
    let found: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM trip_stops WHERE id = $1)")
            .bind(stop_id)
            .fetch_one(db)
            .await
            .context("probe stop")?;
    Ok(found)
}
