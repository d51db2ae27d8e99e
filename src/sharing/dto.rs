use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::trips::access::ShareRole;

#[derive(Debug, Deserialize)]
pub struct GrantShareRequest {
    pub email: String,
    pub role: ShareRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: ShareRole,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
