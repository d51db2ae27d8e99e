use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Budget, CurrencyTotal, NewBudget, PlannedCost, BUDGET_COLUMNS};
use crate::trips::access::{CAN_READ, CAN_WRITE};

/// Empty when the trip is missing or hidden from the requester.
pub async fn list_by_trip(
    db: &PgPool,
    trip_id: Uuid,
    requester: Option<Uuid>,
) -> anyhow::Result<Vec<Budget>> {
    let rows = sqlx::query_as::<_, Budget>(&format!(
        r#"
        SELECT {BUDGET_COLUMNS}
          FROM budgets b
          JOIN trips t ON t.id = b.trip_id
         WHERE b.trip_id = $1 AND {CAN_READ}
         ORDER BY b.category, b.id
        "#
    ))
    .bind(trip_id)
    .bind(requester)
    .fetch_all(db)
    .await
    .context("list budgets by trip")?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    trip_id: Uuid,
    me: Uuid,
    new: &NewBudget,
) -> anyhow::Result<Option<Budget>> {
    let row = sqlx::query_as::<_, Budget>(&format!(
        r#"
        INSERT INTO budgets AS b (trip_id, category, amount, currency)
        SELECT t.id, $3, $4, $5
          FROM trips t
         WHERE t.id = $1 AND {CAN_WRITE}
        RETURNING {BUDGET_COLUMNS}
        "#
    ))
    .bind(trip_id)
    .bind(me)
    .bind(&new.category)
    .bind(new.amount)
    .bind(&new.currency)
    .fetch_optional(db)
    .await
    .context("create budget")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, budget_id: Uuid, me: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(&format!(
        r#"
        DELETE FROM budgets b
         USING trips t
         WHERE b.id = $1 AND t.id = b.trip_id AND {CAN_WRITE}
        "#
    ))
    .bind(budget_id)
    .bind(me)
    .execute(db)
    .await
    .context("delete budget")?;
    Ok(res.rows_affected() > 0)
}

pub async fn exists(db: &PgPool, budget_id: Uuid) -> anyhow::Result<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM budgets WHERE id = $1)")
        .bind(budget_id)
        .fetch_one(db)
        .await
        .context("probe budget")?;
    Ok(found)
}

pub async fn totals_by_currency(
    db: &PgPool,
    trip_id: Uuid,
    requester: Option<Uuid>,
) -> anyhow::Result<Vec<CurrencyTotal>> {
    let rows = sqlx::query_as::<_, CurrencyTotal>(&format!(
        r#"
        SELECT b.currency, SUM(b.amount) AS total
          FROM budgets b
          JOIN trips t ON t.id = b.trip_id
         WHERE b.trip_id = $1 AND {CAN_READ}
         GROUP BY b.currency
         ORDER BY b.currency
        "#
    ))
    .bind(trip_id)
    .bind(requester)
    .fetch_all(db)
    .await
    .context("sum budgets by currency")?;
    Ok(rows)
}

pub async fn planned_cost(
    db: &PgPool,
    trip_id: Uuid,
    requester: Option<Uuid>,
) -> anyhow::Result<PlannedCost> {
    let row = sqlx::query_as::<_, PlannedCost>(&format!(
        r#"
        SELECT COALESCE(SUM(ta.cost), 0.00) AS total, COUNT(ta.id) AS activities
          FROM trip_activities ta
          JOIN trips t ON t.id = ta.trip_id
         WHERE ta.trip_id = $1 AND {CAN_READ}
        "#
    ))
    .bind(trip_id)
    .bind(requester)
    .fetch_one(db)
    .await
    .context("sum planned activity cost")?;
    Ok(row)
}
