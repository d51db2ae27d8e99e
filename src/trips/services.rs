use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::{
    access::{resolve_role, ShareRole},
    dto::{CreateTripRequest, SharedTripItem, TripDetails, UpdateTripRequest},
    repo,
    repo_types::{NewTrip, TripAccessRow, TripPatch},
};
use crate::{
    error::{AppError, AppResult},
    validation::{optional_text, ordered, required_text},
};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 5000;

pub fn validate_new(req: CreateTripRequest) -> AppResult<NewTrip> {
    ordered(
        "endDate",
        req.start_date,
        req.end_date,
        "End date must be on or after the start date",
    )?;
    Ok(NewTrip {
        title: required_text("title", &req.title, TITLE_MAX)?,
        description: optional_text("description", req.description, DESCRIPTION_MAX)?,
        start_date: req.start_date,
        end_date: req.end_date,
        is_public: req.is_public,
    })
}

/// Ordering against stored dates is left to the table constraint.
pub fn validate_patch(req: UpdateTripRequest) -> AppResult<TripPatch> {
    ordered(
        "endDate",
        req.start_date,
        req.end_date,
        "End date must be on or after the start date",
    )?;
    let title = match req.title {
        Some(t) => Some(required_text("title", &t, TITLE_MAX)?),
        None => None,
    };
    Ok(TripPatch {
        title,
        description: optional_text("description", req.description, DESCRIPTION_MAX)?,
        start_date: req.start_date,
        end_date: req.end_date,
        is_public: req.is_public,
    })
}

fn share_role(row: &TripAccessRow) -> Option<ShareRole> {
    row.share_role.as_deref().and_then(|r| match r.parse() {
        Ok(role) => Some(role),
        Err(e) => {
            warn!(error = %e, trip_id = %row.trip.id, "ignoring malformed share role");
            None
        }
    })
}

/// Readable trip with the requester's role; missing and hidden are both 404.
pub async fn get_for(db: &PgPool, trip_id: Uuid, requester: Option<Uuid>) -> AppResult<TripDetails> {
    let row = repo::get_readable(db, trip_id, requester)
        .await?
        .ok_or(AppError::NotFound("Trip"))?;
    let role = resolve_role(row.trip.user_id, row.trip.is_public, requester, share_role(&row))
        .ok_or(AppError::NotFound("Trip"))?;
    Ok(TripDetails::new(row.trip, role))
}

pub async fn list_shared_with(db: &PgPool, user_id: Uuid) -> AppResult<Vec<SharedTripItem>> {
    let rows = repo::list_shared_with(db, user_id).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let role = share_role(&row)?;
            Some(SharedTripItem {
                trip: row.trip,
                role,
            })
        })
        .collect())
}

/// Called after an authorized child mutation on `trip_id` matched nothing:
/// 403 when the trip exists, 404 when it does not.
pub async fn write_denied(db: &PgPool, trip_id: Uuid) -> AppError {
    match repo::exists(db, trip_id).await {
        Ok(true) => AppError::Forbidden,
        Ok(false) => AppError::NotFound("Trip"),
        Err(e) => e.into(),
    }
}
