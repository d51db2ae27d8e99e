use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::repo_types::CurrencyTotal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    pub category: String,
    pub amount: Decimal,
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub totals: Vec<CurrencyTotal>,
    pub planned_cost: Decimal,
    pub activity_count: i64,
}
