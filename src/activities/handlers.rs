use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateTripActivityRequest, SearchQuery},
    repo,
    repo_types::{Activity, TripActivity},
    services,
};
use crate::{auth::AuthUser, error::AppResult, state::AppState, stops};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_catalog))
        .route("/activities/search", get(search_catalog))
}

pub fn trip_activity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/trips/:id/activities",
            get(list_trip_activities).post(create_trip_activity),
        )
        .route(
            "/trip-stops/:id/activities",
            get(list_stop_activities).post(create_stop_activity),
        )
        .route("/trip-activities/:id", delete(delete_trip_activity))
        .route("/activities/:id", delete(delete_trip_activity))
}

#[instrument(skip(state))]
pub async fn list_catalog(State(state): State<AppState>) -> AppResult<Json<Vec<Activity>>> {
    Ok(Json(repo::list_catalog(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn search_catalog(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Activity>>> {
    Ok(Json(services::search(&state.db, &query.q).await?))
}

#[instrument(skip(state))]
pub async fn list_trip_activities(
    State(state): State<AppState>,
    me: Option<AuthUser>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<Vec<TripActivity>>> {
    let requester = me.as_ref().map(AuthUser::id);
    Ok(Json(repo::list_by_trip(&state.db, trip_id, requester).await?))
}

#[instrument(skip(state))]
pub async fn list_stop_activities(
    State(state): State<AppState>,
    me: Option<AuthUser>,
    Path(stop_id): Path<Uuid>,
) -> AppResult<Json<Vec<TripActivity>>> {
    let requester = me.as_ref().map(AuthUser::id);
    Ok(Json(repo::list_by_stop(&state.db, stop_id, requester).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_trip_activity(
    State(state): State<AppState>,
    me: AuthUser,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<CreateTripActivityRequest>,
) -> AppResult<(StatusCode, Json<TripActivity>)> {
    let new = services::validate_new(payload)?;
    match repo::create(&state.db, trip_id, me.id(), &new).await? {
        Some(activity) => {
            info!(activity_id = %activity.id, %trip_id, "trip activity created");
            Ok((StatusCode::CREATED, Json(activity)))
        }
        None => Err(services::create_denied(&state.db, trip_id, me.id(), new.stop_id).await),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_stop_activity(
    State(state): State<AppState>,
    me: AuthUser,
    Path(stop_id): Path<Uuid>,
    Json(payload): Json<CreateTripActivityRequest>,
) -> AppResult<(StatusCode, Json<TripActivity>)> {
    let new = services::validate_new(payload)?;
    match repo::create_for_stop(&state.db, stop_id, me.id(), &new).await? {
        Some(activity) => {
            info!(activity_id = %activity.id, %stop_id, "stop activity created");
            Ok((StatusCode::CREATED, Json(activity)))
        }
        None => Err(stops::services::stop_denied(&state.db, stop_id).await),
    }
}

#[instrument(skip(state))]
pub async fn delete_trip_activity(
    State(state): State<AppState>,
    me: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !repo::delete(&state.db, id, me.id()).await? {
        return Err(services::activity_denied(&state.db, id).await);
    }
    info!(activity_id = %id, "trip activity deleted");
    Ok(StatusCode::NO_CONTENT)
}
