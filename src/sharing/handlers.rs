use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{GrantShareRequest, Share},
    services,
};
use crate::{auth::AuthUser, error::AppResult, state::AppState};

pub fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/shares", get(list_shares).put(grant_share))
        .route("/trips/:id/shares/:user_id", delete(revoke_share))
}

#[instrument(skip(state))]
pub async fn list_shares(
    State(state): State<AppState>,
    me: AuthUser,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<Vec<Share>>> {
    Ok(Json(services::list(&state.db, trip_id, me.id()).await?))
}

#[instrument(skip(state, payload))]
pub async fn grant_share(
    State(state): State<AppState>,
    me: AuthUser,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<GrantShareRequest>,
) -> AppResult<Json<Share>> {
    let share = services::grant(&state.db, trip_id, &me, payload).await?;
    info!(%trip_id, user_id = %share.user_id, role = %share.role, "trip shared");
    Ok(Json(share))
}

#[instrument(skip(state))]
pub async fn revoke_share(
    State(state): State<AppState>,
    me: AuthUser,
    Path((trip_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    services::revoke(&state.db, trip_id, me.id(), user_id).await?;
    info!(%trip_id, %user_id, "trip share revoked");
    Ok(StatusCode::NO_CONTENT)
}
