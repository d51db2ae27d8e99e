use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateTripRequest, SharedTripItem, TripDetails, UpdateTripRequest},
    repo,
    repo_types::Trip,
    services,
};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn trip_routes() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/shared", get(list_shared_trips))
        .route(
            "/trips/:id",
            get(get_trip).patch(update_trip).delete(delete_trip),
        )
}

#[instrument(skip(state))]
pub async fn list_trips(
    State(state): State<AppState>,
    me: AuthUser,
) -> AppResult<Json<Vec<Trip>>> {
    let trips = repo::list_owned(&state.db, me.id()).await?;
    Ok(Json(trips))
}

#[instrument(skip(state))]
pub async fn list_shared_trips(
    State(state): State<AppState>,
    me: AuthUser,
) -> AppResult<Json<Vec<SharedTripItem>>> {
    Ok(Json(services::list_shared_with(&state.db, me.id()).await?))
}

/// Anonymous callers see public trips only.
#[instrument(skip(state))]
pub async fn get_trip(
    State(state): State<AppState>,
    me: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TripDetails>> {
    let requester = me.as_ref().map(AuthUser::id);
    Ok(Json(services::get_for(&state.db, id, requester).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_trip(
    State(state): State<AppState>,
    me: AuthUser,
    Json(payload): Json<CreateTripRequest>,
) -> AppResult<(StatusCode, Json<Trip>)> {
    let new = services::validate_new(payload)?;
    let trip = repo::create(&state.db, me.id(), &new).await?;
    info!(trip_id = %trip.id, user_id = %me.id(), "trip created");
    Ok((StatusCode::CREATED, Json(trip)))
}

#[instrument(skip(state, payload))]
pub async fn update_trip(
    State(state): State<AppState>,
    me: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTripRequest>,
) -> AppResult<Json<Trip>> {
    let patch = services::validate_patch(payload)?;
    let trip = repo::update_owned(&state.db, id, me.id(), &patch)
        .await?
        .ok_or(AppError::NotFound("Trip"))?;
    Ok(Json(trip))
}

#[instrument(skip(state))]
pub async fn delete_trip(
    State(state): State<AppState>,
    me: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !repo::delete_owned(&state.db, id, me.id()).await? {
        return Err(AppError::NotFound("Trip"));
    }
    info!(trip_id = %id, user_id = %me.id(), "trip deleted");
    Ok(StatusCode::NO_CONTENT)
}
