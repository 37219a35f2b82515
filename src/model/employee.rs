use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "name": "HR-EMP-00001",
        "employee_name": "Jane Doe",
        "designation": "Engineer",
        "department": "Engineering",
        "company": "Acme Ltd",
        "reports_to": "HR-EMP-00000",
        "user_id": "jane@acme.test"
    })
)]
pub struct EmployeeInfo {
    #[schema(example = "HR-EMP-00001")]
    pub name: String,

    #[schema(example = "Jane Doe")]
    pub employee_name: String,

    #[schema(example = "Engineer", nullable = true)]
    pub designation: Option<String>,

    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "Acme Ltd", nullable = true)]
    pub company: Option<String>,

    #[schema(example = "HR-EMP-00000", nullable = true)]
    pub reports_to: Option<String>,

    #[schema(example = "jane@acme.test", nullable = true)]
    pub user_id: Option<String>,
}

/// The two fields approver resolution reads from an employee:
/// the category-specific override and the department.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct ApproverAssignment {
    pub approver: Option<String>,
    pub department: Option<String>,
}
