use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "name": "HR-EAD-2026-00001",
    "employee": "HR-EMP-00001",
    "status": "Paid",
    "purpose": "Conference travel",
    "paid_amount": 500.0,
    "balance_amount": 150.0,
    "posting_date": "2026-03-01",
    "currency": "USD"
}))]
pub struct AdvanceBalance {
    pub name: String,
    pub employee: String,
    pub status: String,
    pub purpose: Option<String>,
    pub paid_amount: f64,
    /// Paid amount not yet claimed or returned.
    pub balance_amount: f64,
    #[schema(format = "date", value_type = String)]
    pub posting_date: NaiveDate,
    pub currency: String,
}
