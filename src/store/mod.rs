//! Storage seams.
//!
//! Every query the portal issues goes through one of these traits, so
//! handlers and services only ever see `dyn HrStore`. The server uses
//! [`mysql::MySqlStore`]; tests and demos use [`memory::MemoryStore`].

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::advance::AdvanceBalance;
use crate::model::currency::{CompanyCurrency, Currency};
use crate::model::department::{ApproverCategory, ApproverEntry};
use crate::model::doctype::{DocField, LinkOption, PermAction};
use crate::model::employee::{ApproverAssignment, EmployeeInfo};
use crate::model::expense::{ClaimScope, ClaimTotals, ExpenseClaimItem, ExpenseClaimType};
use crate::model::file::{FileRecord, NewFile};
use crate::model::leave::{Holiday, LeaveApplication, LeaveDetails, LeaveScope};
use crate::model::user::{UserCredentials, UserInfo};
use crate::utils::nested_set::NestedBounds;

pub mod memory;
pub mod mysql;

pub type StoreResult<T> = anyhow::Result<T>;

/// Users, employees, departments and their approvers.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn user_info(&self, user: &str) -> StoreResult<Option<UserInfo>>;

    async fn user_credentials(&self, user: &str) -> StoreResult<Option<UserCredentials>>;

    async fn user_full_name(&self, user: &str) -> StoreResult<Option<String>>;

    async fn employee_for_user(&self, user: &str) -> StoreResult<Option<EmployeeInfo>>;

    /// Override approver and department of an employee, `None` if the
    /// employee does not exist.
    async fn approver_assignment(
        &self,
        employee: &str,
        category: ApproverCategory,
    ) -> StoreResult<Option<ApproverAssignment>>;

    /// Approver configured at position `idx` (1-based) on a department.
    async fn department_approver_at(
        &self,
        department: &str,
        category: ApproverCategory,
        idx: i32,
    ) -> StoreResult<Option<String>>;

    async fn department_bounds(&self, department: &str) -> StoreResult<Option<NestedBounds>>;

    /// Names of enabled departments whose bounds lie within `bounds`.
    async fn departments_within(&self, bounds: NestedBounds) -> StoreResult<Vec<String>>;

    /// Every approver of `category` on any of `departments`, with display
    /// names. Order is unspecified and duplicates are possible.
    async fn approvers_of(
        &self,
        departments: &[String],
        category: ApproverCategory,
    ) -> StoreResult<Vec<ApproverEntry>>;

    async fn approver_mandatory(&self, category: ApproverCategory) -> StoreResult<bool>;
}

/// Leave applications, allocations and holidays.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Applications in scope, latest `from_date` first.
    async fn leave_applications(&self, scope: &LeaveScope) -> StoreResult<Vec<LeaveApplication>>;

    async fn leave_details(&self, employee: &str, date: NaiveDate) -> StoreResult<LeaveDetails>;

    /// The employee's holiday list, falling back to the company default.
    async fn holiday_list_for_employee(&self, employee: &str) -> StoreResult<Option<String>>;

    /// Non weekly-off holidays of a list in date order.
    async fn holidays(&self, holiday_list: &str) -> StoreResult<Vec<Holiday>>;
}

/// Expense claims and employee advances.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Claims in scope, latest `posting_date` first.
    async fn expense_claims(
        &self,
        scope: &ClaimScope,
        limit: Option<u32>,
    ) -> StoreResult<Vec<ExpenseClaimItem>>;

    async fn claim_totals(&self, employee: &str) -> StoreResult<ClaimTotals>;

    async fn expense_claim_types(&self) -> StoreResult<Vec<ExpenseClaimType>>;

    async fn expense_type_description(&self, expense_type: &str) -> StoreResult<Option<String>>;

    async fn advance_balances(&self, employee: &str) -> StoreResult<Vec<AdvanceBalance>>;
}

#[async_trait]
pub trait CurrencyStore: Send + Sync {
    async fn company_currency(&self, company: &str) -> StoreResult<Option<String>>;

    async fn currency(&self, code: &str) -> StoreResult<Option<Currency>>;

    async fn currencies(&self) -> StoreResult<Vec<Currency>>;

    /// Companies joined with their default currency.
    async fn company_currencies(&self) -> StoreResult<Vec<CompanyCurrency>>;
}

/// Document metadata, permissions and attachments.
#[async_trait]
pub trait MetaStore: Send + Sync {
    async fn doctype_fields(&self, doctype: &str) -> StoreResult<Vec<DocField>>;

    async fn link_options(&self, doctype: &str) -> StoreResult<Vec<LinkOption>>;

    /// Whether `user` may perform `action` on a document of `doctype` owned
    /// by `owner`.
    async fn has_permission(
        &self,
        doctype: &str,
        action: PermAction,
        user: &str,
        owner: Option<&str>,
    ) -> StoreResult<bool>;

    async fn insert_file(&self, file: NewFile) -> StoreResult<FileRecord>;
}

pub trait HrStore:
    DirectoryStore + LeaveStore + ExpenseStore + CurrencyStore + MetaStore
{
}

impl<T> HrStore for T where
    T: DirectoryStore + LeaveStore + ExpenseStore + CurrencyStore + MetaStore
{
}
