use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ApprovalStatus {
    Draft,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ExpenseClaimItem {
    #[schema(example = "HR-EXP-2026-00001")]
    pub name: String,
    pub employee: String,
    pub employee_name: String,
    #[schema(example = "Draft")]
    pub approval_status: String,
    #[schema(example = "Draft")]
    pub status: String,
    pub expense_approver: Option<String>,
    #[schema(example = 120.5)]
    pub total_claimed_amount: f64,
    #[schema(example = "2026-02-01", format = "date", value_type = String)]
    pub posting_date: NaiveDate,
    pub company: String,
    /// First expense type among the claim's detail rows.
    #[schema(example = "Travel")]
    pub expense_type: Option<String>,
    #[schema(example = 2)]
    pub total_expenses: i64,
}

/// Which expense claims a listing returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimScope {
    /// Non-cancelled claims of the employee.
    Own { employee: String },
    /// Draft claims of other employees awaiting `approver`.
    ForApproval { employee: String, approver: String },
}

/// Conditional sums over an employee's non-cancelled claims.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct ClaimTotals {
    pub total_pending_amount: f64,
    pub total_approved_amount: f64,
    pub total_rejected_amount: f64,
    pub company: Option<String>,
}

impl ClaimTotals {
    /// Buckets one claim. Pending counts the claimed amount, the settled
    /// buckets count the sanctioned amount, any other status counts nowhere.
    pub fn add(&mut self, approval_status: &str, claimed: f64, sanctioned: f64) {
        match approval_status.parse::<ApprovalStatus>() {
            Ok(ApprovalStatus::Draft) => self.total_pending_amount += claimed,
            Ok(ApprovalStatus::Approved) => self.total_approved_amount += sanctioned,
            Ok(ApprovalStatus::Rejected) => self.total_rejected_amount += sanctioned,
            Err(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "total_pending_amount": 100.0,
    "total_approved_amount": 200.0,
    "total_rejected_amount": 300.0,
    "currency": "$"
}))]
pub struct ClaimSummary {
    pub total_pending_amount: f64,
    pub total_approved_amount: f64,
    pub total_rejected_amount: f64,
    /// Currency symbol of the claims' company, or the currency code.
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ExpenseClaimType {
    #[schema(example = "Travel")]
    pub name: String,
    #[schema(example = "Flights, trains and taxis")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_bucket_by_status() {
        let mut totals = ClaimTotals::default();
        totals.add("Draft", 100.0, 0.0);
        totals.add("Approved", 250.0, 200.0);
        totals.add("Rejected", 300.0, 300.0);

        assert_eq!(totals.total_pending_amount, 100.0);
        assert_eq!(totals.total_approved_amount, 200.0);
        assert_eq!(totals.total_rejected_amount, 300.0);
    }

    #[test]
    fn unknown_status_contributes_nothing() {
        let mut totals = ClaimTotals::default();
        totals.add("Cancelled", 500.0, 500.0);
        totals.add("draft", 500.0, 500.0);

        assert_eq!(totals, ClaimTotals::default());
    }
}
