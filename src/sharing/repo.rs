use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::ShareRow;
use crate::trips::access::ShareRole;

/// Shares of a trip owned by `owner_id`. Empty for foreign or missing trips.
pub async fn list(db: &PgPool, trip_id: Uuid, owner_id: Uuid) -> anyhow::Result<Vec<ShareRow>> {
    let rows = sqlx::query_as::<_, ShareRow>(
        r#"
        SELECT sh.trip_id, sh.user_id, u.name, u.email, sh.role, sh.created_at
          FROM shared_trips sh
          JOIN trips t ON t.id = sh.trip_id
          JOIN users u ON u.id = sh.user_id
         WHERE sh.trip_id = $1 AND t.user_id = $2
         ORDER BY sh.created_at, u.email
        "#,
    )
    .bind(trip_id)
    .bind(owner_id)
    .fetch_all(db)
    .await
    .context("list trip shares")?;
    Ok(rows)
}

/// Grants or re-grants `role` to the user with `email`. `None` when the trip
/// is not owned by `owner_id`, the user is unknown, or the user is the owner.
pub async fn grant(
    db: &PgPool,
    trip_id: Uuid,
    owner_id: Uuid,
    email: &str,
    role: ShareRole,
) -> anyhow::Result<Option<ShareRow>> {
    let row = sqlx::query_as::<_, ShareRow>(
        r#"
        WITH granted AS (
            INSERT INTO shared_trips (trip_id, user_id, role)
            SELECT t.id, u.id, $4
              FROM trips t
              JOIN users u ON u.email = $3
             WHERE t.id = $1 AND t.user_id = $2 AND u.id <> t.user_id
            ON CONFLICT (trip_id, user_id) DO UPDATE SET role = EXCLUDED.role
            RETURNING trip_id, user_id, role, created_at
        )
        SELECT g.trip_id, g.user_id, u.name, u.email, g.role, g.created_at
          FROM granted g
          JOIN users u ON u.id = g.user_id
        "#,
    )
    .bind(trip_id)
    .bind(owner_id)
    .bind(email)
    .bind(role.as_str())
    .fetch_optional(db)
    .await
    .context("grant trip share")?;
    Ok(row)
}

pub async fn revoke(db: &PgPool, trip_id: Uuid, owner_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        DELETE FROM shared_trips sh
         USING trips t
         WHERE sh.trip_id = $1 AND t.id = sh.trip_id AND t.user_id = $2 AND sh.user_id = $3
        "#,
    )
    .bind(trip_id)
    .bind(owner_id)
    .bind(user_id)
    .execute(db)
    .await
    .context("revoke trip share")?;
    Ok(res.rows_affected() > 0)
}
