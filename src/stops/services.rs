use sqlx::PgPool;
use uuid::Uuid;

use super::{
    dto::{CreateStopRequest, UpdateStopRequest},
    repo,
    repo_types::{NewStop, StopPatch},
};
use crate::{
    error::{AppError, AppResult},
    validation::{optional_text, order_index, ordered, required_text},
};

const PLACE_MAX: usize = 120;
const NOTES_MAX: usize = 5000;
const DATES_MSG: &str = "Departure must be on or after arrival";

fn check_order(order: Option<i32>) -> AppResult<()> {
    order_index("orderIndex", order).map(|_| ())
}

pub fn validate_new(req: CreateStopRequest) -> AppResult<NewStop> {
    let city = required_text("city", &req.city, PLACE_MAX)?;
    let country = required_text("country", &req.country, PLACE_MAX)?;
    ordered(
        "departureDate",
        Some(req.arrival_date),
        Some(req.departure_date),
        DATES_MSG,
    )?;
    check_order(req.order_index)?;
    Ok(NewStop {
        city,
        country,
        arrival_date: req.arrival_date,
        departure_date: req.departure_date,
        order_index: req.order_index,
        notes: optional_text("notes", req.notes, NOTES_MAX)?,
    })
}

/// A single changed date is checked against the stored one by the table
/// constraint.
pub fn validate_patch(req: UpdateStopRequest) -> AppResult<StopPatch> {
    let city = req
        .city
        .map(|c| required_text("city", &c, PLACE_MAX))
        .transpose()?;
    let country = req
        .country
        .map(|c| required_text("country", &c, PLACE_MAX))
        .transpose()?;
    ordered("departureDate", req.arrival_date, req.departure_date, DATES_MSG)?;
    check_order(req.order_index)?;
    Ok(StopPatch {
        city,
        country,
        arrival_date: req.arrival_date,
        departure_date: req.departure_date,
        order_index: req.order_index,
        notes: optional_text("notes", req.notes, NOTES_MAX)?,
    })
}

pub fn validate_order(order: i32) -> AppResult<i32> {
    check_order(Some(order))?;
    Ok(order)
}

/// After an authorized stop mutation matched nothing: 403 if the stop exists.
pub async fn stop_denied(db: &PgPool, stop_id: Uuid) -> AppError {
    match repo::exists(db, stop_id).await {
        Ok(true) => AppError::Forbidden,
        Ok(false) => AppError::NotFound("Stop"),
        Err(e) => e.into(),
    }
}
