use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A share joined with the grantee's public profile. `role` is decoded by
/// the service layer.
#[derive(Debug, Clone, FromRow)]
pub struct ShareRow {
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: OffsetDateTime,
}
