use sqlx::PgPool;
use uuid::Uuid;

use super::{
    dto::CreateTripActivityRequest,
    repo,
    repo_types::{Activity, NewTripActivity},
};
use crate::{
    error::{AppError, AppResult},
    trips,
    validation::{non_negative, optional_text, order_index, required_text},
};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2000;
const NOTES_MAX: usize = 5000;

fn not_negative(field: &'static str, value: Option<i32>) -> AppResult<()> {
    match value {
        Some(v) if v < 0 => Err(AppError::validation(field, format!("{field} must not be negative"))),
        _ => Ok(()),
    }
}

pub fn validate_new(req: CreateTripActivityRequest) -> AppResult<NewTripActivity> {
    let title = match (req.title, req.activity_id) {
        (Some(t), _) => Some(required_text("title", &t, TITLE_MAX)?),
        (None, Some(_)) => None,
        (None, None) => return Err(AppError::validation("title", "Title is required")),
    };
    not_negative("durationMinutes", req.duration_minutes)?;
    order_index("orderIndex", req.order_index)?;
    Ok(NewTripActivity {
        stop_id: req.stop_id,
        activity_id: req.activity_id,
        title,
        description: optional_text("description", req.description, DESCRIPTION_MAX)?,
        scheduled_date: req.scheduled_date,
        cost: req.cost.map(|c| non_negative("cost", c)).transpose()?,
        duration_minutes: req.duration_minutes,
        order_index: req.order_index,
        notes: optional_text("notes", req.notes, NOTES_MAX)?,
    })
}

/// Blank queries list the whole catalog.
pub async fn search(db: &PgPool, q: &str) -> AppResult<Vec<Activity>> {
    let q = q.trim();
    let rows = if q.is_empty() {
        repo::list_catalog(db).await?
    } else {
        repo::search_catalog(db, q).await?
    };
    Ok(rows)
}

/// Picks the status after a trip-level insert matched nothing.
pub async fn create_denied(db: &PgPool, trip_id: Uuid, me: Uuid, stop_id: Option<Uuid>) -> AppError {
    match trips::repo::write_access(db, trip_id, me).await {
        Ok(None) => AppError::NotFound("Trip"),
        Ok(Some(false)) => AppError::Forbidden,
        Ok(Some(true)) if stop_id.is_some() => {
            AppError::validation("stopId", "Stop does not belong to this trip")
        }
        // trip removed between the insert and the probe
        Ok(Some(true)) => AppError::NotFound("Trip"),
        Err(e) => e.into(),
    }
}

pub async fn activity_denied(db: &PgPool, id: Uuid) -> AppError {
    match repo::exists(db, id).await {
        Ok(true) => AppError::Forbidden,
        Ok(false) => AppError::NotFound("Activity"),
        Err(e) => e.into(),
    }
}
