use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    /// Upper-case ISO-4217 code.
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CurrencyTotal {
    pub currency: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct PlannedCost {
    pub total: Decimal,
    pub activities: i64,
}

pub(crate) const BUDGET_COLUMNS: &str = "b.id, b.trip_id, b.category, b.amount, b.currency";
