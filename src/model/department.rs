use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Workflow whose approvers are being resolved.
///
/// The same department approver table serves both categories; rows are told
/// apart by their `parentfield`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ApproverCategory {
    #[strum(serialize = "leave_approvers")]
    Leave,
    #[strum(serialize = "expense_approvers")]
    Expense,
}

impl ApproverCategory {
    /// Column on the employee record holding the per-employee override.
    pub fn employee_field(self) -> &'static str {
        match self {
            ApproverCategory::Leave => "leave_approver",
            ApproverCategory::Expense => "expense_approver",
        }
    }

    /// HR settings flag telling whether an approver is required on submission.
    pub fn mandatory_setting(self) -> &'static str {
        match self {
            ApproverCategory::Leave => "leave_approver_mandatory_in_leave_application",
            ApproverCategory::Expense => "expense_approver_mandatory_in_expense_claim",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DepartmentApprover {
    pub parent: String,
    pub parentfield: String,
    pub idx: i32,
    pub approver: String,
}

/// An approver with their display name, as offered to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ApproverEntry {
    #[schema(example = "lead@acme.test")]
    pub id: String,
    #[schema(example = "Team Lead", nullable = true)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "approver_id": "lead@acme.test",
    "approver_name": "Team Lead",
    "alternates": [
        { "id": "lead@acme.test", "name": "Team Lead" },
        { "id": "hr@acme.test", "name": "HR Manager" }
    ],
    "is_mandatory": true
}))]
pub struct ApprovalDetails {
    pub approver_id: Option<String>,
    pub approver_name: Option<String>,
    pub alternates: Vec<ApproverEntry>,
    pub is_mandatory: bool,
}
