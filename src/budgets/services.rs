use sqlx::PgPool;
use uuid::Uuid;

use super::{
    dto::{BudgetSummary, CreateBudgetRequest},
    repo,
    repo_types::NewBudget,
};
use crate::{
    error::{AppError, AppResult},
    trips,
    validation::{money, non_negative, required_text},
};

const CATEGORY_MAX: usize = 80;
pub const DEFAULT_CURRENCY: &str = "USD";

fn normalize_currency(raw: Option<String>) -> AppResult<String> {
    let code = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(DEFAULT_CURRENCY.to_string()),
        Some(c) => c,
    };
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::validation(
            "currency",
            "Currency must be a three-letter code",
        ));
    }
    Ok(code.to_ascii_uppercase())
}

pub fn validate_new(req: CreateBudgetRequest) -> AppResult<NewBudget> {
    Ok(NewBudget {
        category: required_text("category", &req.category, CATEGORY_MAX)?,
        amount: non_negative("amount", req.amount)?,
        currency: normalize_currency(req.currency)?,
    })
}

/// Missing and hidden trips are both 404.
pub async fn summary(db: &PgPool, trip_id: Uuid, requester: Option<Uuid>) -> AppResult<BudgetSummary> {
    trips::services::get_for(db, trip_id, requester).await?;
    let totals = repo::totals_by_currency(db, trip_id, requester).await?;
    let planned = repo::planned_cost(db, trip_id, requester).await?;
    Ok(BudgetSummary {
        totals,
        planned_cost: money(planned.total),
        activity_count: planned.activities,
    })
}

pub async fn budget_denied(db: &PgPool, budget_id: Uuid) -> AppError {
    match repo::exists(db, budget_id).await {
        Ok(true) => AppError::Forbidden,
        Ok(false) => AppError::NotFound("Budget"),
        Err(e) => e.into(),
    }
}
