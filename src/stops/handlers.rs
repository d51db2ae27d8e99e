use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateStopRequest, StopOrderRequest, UpdateStopRequest},
    repo,
    repo_types::TripStop,
    services,
};
use crate::{auth::AuthUser, error::AppResult, state::AppState, trips};

pub fn stop_routes() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/stops", get(list_stops).post(create_stop))
        .route("/stops/:id", patch(update_stop).delete(delete_stop))
        .route("/stops/:id/order", patch(update_stop_order))
}

/// Public trips list for anyone; hidden trips list as empty.
#[instrument(skip(state))]
pub async fn list_stops(
    State(state): State<AppState>,
    me: Option<AuthUser>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<Vec<TripStop>>> {
    let requester = me.as_ref().map(AuthUser::id);
    Ok(Json(repo::list_by_trip(&state.db, trip_id, requester).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_stop(
    State(state): State<AppState>,
    me: AuthUser,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<CreateStopRequest>,
) -> AppResult<(StatusCode, Json<TripStop>)> {
    let new = services::validate_new(payload)?;
    match repo::create(&state.db, trip_id, me.id(), &new).await? {
        Some(stop) => {
            info!(stop_id = %stop.id, %trip_id, "stop created");
            Ok((StatusCode::CREATED, Json(stop)))
        }
        None => Err(trips::services::write_denied(&state.db, trip_id).await),
    }
}

#[instrument(skip(state, payload))]
pub async fn update_stop(
    State(state): State<AppState>,
    me: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStopRequest>,
) -> AppResult<Json<TripStop>> {
    let patch = services::validate_patch(payload)?;
    match repo::update(&state.db, id, me.id(), &patch).await? {
        Some(stop) => Ok(Json(stop)),
        None => Err(services::stop_denied(&state.db, id).await),
    }
}

#[instrument(skip(state))]
pub async fn update_stop_order(
    State(state): State<AppState>,
    me: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StopOrderRequest>,
) -> AppResult<Json<TripStop>> {
    let order = services::validate_order(payload.order)?;
    match repo::update_order(&state.db, id, me.id(), order).await? {
        Some(stop) => Ok(Json(stop)),
        None => Err(services::stop_denied(&state.db, id).await),
    }
}

#[instrument(skip(state))]
pub async fn delete_stop(
    State(state): State<AppState>,
    me: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !repo::delete(&state.db, id, me.id()).await? {
        return Err(services::stop_denied(&state.db, id).await);
    }
    info!(stop_id = %id, "stop deleted");
    Ok(StatusCode::NO_CONTENT)
}
