use serde::Deserialize;
use time::OffsetDateTime;

use crate::validation::timestamp;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStopRequest {
    pub city: String,
    pub country: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub arrival_date: OffsetDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub departure_date: OffsetDateTime,
    pub order_index: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStopRequest {
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub arrival_date: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub departure_date: Option<OffsetDateTime>,
    pub order_index: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StopOrderRequest {
    pub order: i32,
}
