use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TripStop {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub city: String,
    pub country: String,
    #[serde(with = "time::serde::rfc3339")]
    pub arrival_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub departure_date: OffsetDateTime,
    pub order_index: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewStop {
    pub city: String,
    pub country: String,
    pub arrival_date: OffsetDateTime,
    pub departure_date: OffsetDateTime,
    /// `None` appends after the last stop.
    pub order_index: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StopPatch {
    pub city: Option<String>,
    pub country: Option<String>,
    pub arrival_date: Option<OffsetDateTime>,
    pub departure_date: Option<OffsetDateTime>,
    pub order_index: Option<i32>,
    pub notes: Option<String>,
}

pub(crate) const STOP_COLUMNS: &str =
    "st.id, st.trip_id, st.city, st.country, st.arrival_date, st.departure_date, st.order_index, st.notes";
