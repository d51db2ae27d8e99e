use serde::{Deserialize, Serialize};
use time::Date;

use super::access::{ShareRole, TripRole};
use super::repo_types::Trip;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_public: Option<bool>,
}

/// A trip as seen by a particular requester.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    #[serde(flatten)]
    pub trip: Trip,
    pub role: TripRole,
    /// Stops, activities and budgets may be changed.
    pub can_write: bool,
    /// The trip record and its shares may be changed.
    pub can_manage: bool,
}

impl TripDetails {
    pub fn new(trip: Trip, role: TripRole) -> Self {
        Self {
            trip,
            role,
            can_write: role.can_write(),
            can_manage: role.can_manage(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SharedTripItem {
    #[serde(flatten)]
    pub trip: Trip,
    pub role: ShareRole,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn trip() -> Trip {
        Trip {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Lisbon".into(),
            description: None,
            start_date: None,
            end_date: None,
            is_public: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn details_report_what_the_role_allows() {
        let v = serde_json::to_value(TripDetails::new(trip(), TripRole::Editor)).unwrap();
        assert_eq!(v["role"], "editor");
        assert_eq!(v["canWrite"], true);
        assert_eq!(v["canManage"], false);
        assert_eq!(v["title"], "Lisbon");

        let v = serde_json::to_value(TripDetails::new(trip(), TripRole::Public)).unwrap();
        assert_eq!(v["canWrite"], false);
        assert_eq!(v["canManage"], false);

        let v = serde_json::to_value(TripDetails::new(trip(), TripRole::Owner)).unwrap();
        assert_eq!(v["canWrite"], true);
        assert_eq!(v["canManage"], true);
    }
}
