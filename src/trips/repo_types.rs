use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_public: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A trip joined with the requester's share record, if any.
#[derive(Debug, Clone, FromRow)]
pub struct TripAccessRow {
    #[sqlx(flatten)]
    pub trip: Trip,
    pub share_role: Option<String>,
}

/// Fields for a new trip, already validated.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_public: bool,
}

/// Partial trip update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_public: Option<bool>,
}

pub(crate) const TRIP_COLUMNS: &str =
    "t.id, t.user_id, t.title, t.description, t.start_date, t.end_date, t.is_public, t.created_at";
