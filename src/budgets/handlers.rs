use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{BudgetSummary, CreateBudgetRequest},
    repo,
    repo_types::Budget,
    services,
};
use crate::{auth::AuthUser, error::AppResult, state::AppState, trips};

pub fn budget_routes() -> Router<AppState> {
    Router::new()
        .route("/trips/:id/budgets", get(list_budgets).post(create_budget))
        .route("/trips/:id/budget-summary", get(budget_summary))
        .route("/budgets/:id", delete(delete_budget))
}

#[instrument(skip(state))]
pub async fn list_budgets(
    State(state): State<AppState>,
    me: Option<AuthUser>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<Vec<Budget>>> {
    let requester = me.as_ref().map(AuthUser::id);
    Ok(Json(repo::list_by_trip(&state.db, trip_id, requester).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_budget(
    State(state): State<AppState>,
    me: AuthUser,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<CreateBudgetRequest>,
) -> AppResult<(StatusCode, Json<Budget>)> {
    let new = services::validate_new(payload)?;
    match repo::create(&state.db, trip_id, me.id(), &new).await? {
        Some(budget) => {
            info!(budget_id = %budget.id, %trip_id, "budget created");
            Ok((StatusCode::CREATED, Json(budget)))
        }
        None => Err(trips::services::write_denied(&state.db, trip_id).await),
    }
}

#[instrument(skip(state))]
pub async fn budget_summary(
    State(state): State<AppState>,
    me: Option<AuthUser>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<BudgetSummary>> {
    let requester = me.as_ref().map(AuthUser::id);
    Ok(Json(services::summary(&state.db, trip_id, requester).await?))
}

#[instrument(skip(state))]
pub async fn delete_budget(
    State(state): State<AppState>,
    me: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !repo::delete(&state.db, id, me.id()).await? {
        return Err(services::budget_denied(&state.db, id).await);
    }
    info!(budget_id = %id, "budget deleted");
    Ok(StatusCode::NO_CONTENT)
}
