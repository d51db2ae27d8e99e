use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::validation::timestamp;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripActivityRequest {
    pub stop_id: Option<Uuid>,
    pub activity_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub scheduled_date: Option<OffsetDateTime>,
    pub cost: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub order_index: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
