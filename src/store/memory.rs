use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::{
    CurrencyStore, DirectoryStore, ExpenseStore, LeaveStore, MetaStore, StoreResult,
};
use crate::model::advance::AdvanceBalance;
use crate::model::currency::{CompanyCurrency, Currency};
use crate::model::department::{ApproverCategory, ApproverEntry, DepartmentApprover};
use crate::model::doctype::{DocField, LinkOption, PermAction};
use crate::model::employee::{ApproverAssignment, EmployeeInfo};
use crate::model::expense::{ClaimScope, ClaimTotals, ExpenseClaimItem, ExpenseClaimType};
use crate::model::file::{FileRecord, NewFile};
use crate::model::leave::{
    AllocationWindow, Holiday, LeaveApplication, LeaveDetails, LeaveScope, LeaveUsage,
};
use crate::model::user::{UserCredentials, UserInfo};
use crate::utils::nested_set::{self, NestedBounds};

#[derive(Debug, Clone, Default)]
pub struct MemUser {
    pub name: String,
    pub first_name: Option<String>,
    pub full_name: Option<String>,
    pub user_image: Option<String>,
    pub password_hash: String,
    pub enabled: bool,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemEmployee {
    pub name: String,
    pub employee_name: String,
    pub user_id: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub company: Option<String>,
    pub reports_to: Option<String>,
    pub leave_approver: Option<String>,
    pub expense_approver: Option<String>,
    pub holiday_list: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemDepartment {
    pub name: String,
    pub parent_department: Option<String>,
    pub disabled: bool,
    /// Explicit interval; derived from the parent links when absent.
    pub bounds: Option<NestedBounds>,
}

#[derive(Debug, Clone, Default)]
pub struct MemSettings {
    pub leave_approver_mandatory: bool,
    pub expense_approver_mandatory: bool,
}

#[derive(Debug, Clone)]
pub struct MemAllocation {
    pub employee: String,
    pub leave_type: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub new_leaves_allocated: f64,
    pub docstatus: i32,
}

#[derive(Debug, Clone)]
pub struct MemLeaveApplication {
    pub application: LeaveApplication,
    pub docstatus: i32,
}

#[derive(Debug, Clone)]
pub struct MemHoliday {
    pub parent: String,
    pub holiday: Holiday,
    pub weekly_off: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemCompany {
    pub name: String,
    pub default_currency: String,
    pub default_holiday_list: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MemExpenseClaim {
    pub name: String,
    pub employee: String,
    pub employee_name: String,
    pub approval_status: String,
    pub status: String,
    pub expense_approver: Option<String>,
    pub total_claimed_amount: f64,
    pub total_sanctioned_amount: f64,
    pub posting_date: NaiveDate,
    pub company: String,
    pub docstatus: i32,
    /// Expense types of the detail rows, in row order.
    pub expense_types: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MemAdvance {
    pub name: String,
    pub employee: String,
    pub status: String,
    pub purpose: Option<String>,
    pub paid_amount: f64,
    pub claimed_amount: f64,
    pub return_amount: f64,
    pub posting_date: NaiveDate,
    pub currency: String,
    pub docstatus: i32,
}

#[derive(Debug, Clone, Default)]
pub struct MemDocType {
    pub name: String,
    pub title_field: Option<String>,
    pub fields: Vec<DocField>,
    /// `(name, title)` of every record of the doctype.
    pub records: Vec<(String, Option<String>)>,
}

#[derive(Debug, Clone)]
pub struct MemGrant {
    pub role: String,
    pub doctype: String,
    pub action: PermAction,
    pub if_owner: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    pub users: Vec<MemUser>,
    pub employees: Vec<MemEmployee>,
    pub departments: Vec<MemDepartment>,
    pub department_approvers: Vec<DepartmentApprover>,
    pub settings: MemSettings,
    /// `(name, is_lwp)`
    pub leave_types: Vec<(String, bool)>,
    pub allocations: Vec<MemAllocation>,
    pub leave_applications: Vec<MemLeaveApplication>,
    pub holidays: Vec<MemHoliday>,
    pub companies: Vec<MemCompany>,
    pub currencies: Vec<Currency>,
    pub expense_claims: Vec<MemExpenseClaim>,
    pub expense_claim_types: Vec<ExpenseClaimType>,
    pub advances: Vec<MemAdvance>,
    pub doctypes: Vec<MemDocType>,
    pub grants: Vec<MemGrant>,
    pub files: Vec<(FileRecord, Vec<u8>)>,
}

impl MemoryData {
    fn department_bounds(&self) -> HashMap<String, NestedBounds> {
        let mut bounds = nested_set::rebuild(
            self.departments
                .iter()
                .map(|d| (d.name.as_str(), d.parent_department.as_deref())),
        );
        for department in &self.departments {
            if let Some(explicit) = department.bounds {
                bounds.insert(department.name.clone(), explicit);
            }
        }
        bounds
    }

    fn employee(&self, name: &str) -> Option<&MemEmployee> {
        self.employees.iter().find(|e| e.name == name)
    }

    fn user(&self, name: &str) -> Option<&MemUser> {
        self.users.iter().find(|u| u.name == name)
    }
}

/// Store keeping every table in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new(data: MemoryData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Stored attachments with their content.
    pub fn files(&self) -> StoreResult<Vec<(FileRecord, Vec<u8>)>> {
        Ok(self.read()?.files.clone())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, MemoryData>> {
        self.data
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn user_info(&self, user: &str) -> StoreResult<Option<UserInfo>> {
        Ok(self.read()?.user(user).map(|u| UserInfo {
            first_name: u.first_name.clone(),
            full_name: u.full_name.clone(),
            user_image: u.user_image.clone(),
        }))
    }

    async fn user_credentials(&self, user: &str) -> StoreResult<Option<UserCredentials>> {
        Ok(self.read()?.user(user).map(|u| UserCredentials {
            name: u.name.clone(),
            password_hash: u.password_hash.clone(),
            enabled: u.enabled,
        }))
    }

    async fn user_full_name(&self, user: &str) -> StoreResult<Option<String>> {
        Ok(self.read()?.user(user).and_then(|u| u.full_name.clone()))
    }

    async fn employee_for_user(&self, user: &str) -> StoreResult<Option<EmployeeInfo>> {
        let data = self.read()?;
        let employee = data
            .employees
            .iter()
            .find(|e| e.user_id.as_deref() == Some(user))
            .map(|e| EmployeeInfo {
                name: e.name.clone(),
                employee_name: e.employee_name.clone(),
                designation: e.designation.clone(),
                department: e.department.clone(),
                company: e.company.clone(),
                reports_to: e.reports_to.clone(),
                user_id: e.user_id.clone(),
            });
        Ok(employee)
    }

    async fn approver_assignment(
        &self,
        employee: &str,
        category: ApproverCategory,
    ) -> StoreResult<Option<ApproverAssignment>> {
        let data = self.read()?;
        Ok(data.employee(employee).map(|e| ApproverAssignment {
            approver: match category {
                ApproverCategory::Leave => e.leave_approver.clone(),
                ApproverCategory::Expense => e.expense_approver.clone(),
            },
            department: e.department.clone(),
        }))
    }

    async fn department_approver_at(
        &self,
        department: &str,
        category: ApproverCategory,
        idx: i32,
    ) -> StoreResult<Option<String>> {
        let parentfield = category.to_string();
        let data = self.read()?;
        Ok(data
            .department_approvers
            .iter()
            .find(|a| a.parent == department && a.parentfield == parentfield && a.idx == idx)
            .map(|a| a.approver.clone()))
    }

    async fn department_bounds(&self, department: &str) -> StoreResult<Option<NestedBounds>> {
        Ok(self.read()?.department_bounds().get(department).copied())
    }

    async fn departments_within(&self, bounds: NestedBounds) -> StoreResult<Vec<String>> {
        let data = self.read()?;
        let all_bounds = data.department_bounds();
        Ok(data
            .departments
            .iter()
            .filter(|d| !d.disabled)
            .filter(|d| all_bounds.get(&d.name).is_some_and(|b| bounds.contains(b)))
            .map(|d| d.name.clone())
            .collect())
    }

    async fn approvers_of(
        &self,
        departments: &[String],
        category: ApproverCategory,
    ) -> StoreResult<Vec<ApproverEntry>> {
        let parentfield = category.to_string();
        let data = self.read()?;
        // inner join: approvers without a user row are dropped
        Ok(data
            .department_approvers
            .iter()
            .filter(|a| a.parentfield == parentfield && departments.contains(&a.parent))
            .filter_map(|a| {
                data.user(&a.approver).map(|u| ApproverEntry {
                    id: u.name.clone(),
                    name: u.full_name.clone(),
                })
            })
            .collect())
    }

    async fn approver_mandatory(&self, category: ApproverCategory) -> StoreResult<bool> {
        let data = self.read()?;
        Ok(match category {
            ApproverCategory::Leave => data.settings.leave_approver_mandatory,
            ApproverCategory::Expense => data.settings.expense_approver_mandatory,
        })
    }
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn leave_applications(&self, scope: &LeaveScope) -> StoreResult<Vec<LeaveApplication>> {
        let data = self.read()?;
        let mut rows: Vec<LeaveApplication> = data
            .leave_applications
            .iter()
            .filter(|l| match scope {
                LeaveScope::Own { employee } => {
                    l.application.employee == *employee && l.application.status != "Cancelled"
                }
                LeaveScope::Team { employee, approver } => {
                    l.application.employee != *employee
                        && l.application.leave_approver.as_deref() == Some(approver.as_str())
                        && l.application.status == "Open"
                        && l.docstatus == 0
                }
            })
            .map(|l| l.application.clone())
            .collect();
        rows.sort_by(|a, b| b.from_date.cmp(&a.from_date));
        Ok(rows)
    }

    async fn leave_details(&self, employee: &str, date: NaiveDate) -> StoreResult<LeaveDetails> {
        let data = self.read()?;

        let mut windows: Vec<AllocationWindow> = Vec::new();
        for allocation in data.allocations.iter().filter(|a| {
            a.employee == employee && a.docstatus == 1 && a.from_date <= date && date <= a.to_date
        }) {
            match windows.iter_mut().find(|w| w.leave_type == allocation.leave_type) {
                Some(window) => {
                    window.total_leaves += allocation.new_leaves_allocated;
                    window.from_date = window.from_date.min(allocation.from_date);
                    window.to_date = window.to_date.max(allocation.to_date);
                }
                None => windows.push(AllocationWindow {
                    leave_type: allocation.leave_type.clone(),
                    from_date: allocation.from_date,
                    to_date: allocation.to_date,
                    total_leaves: allocation.new_leaves_allocated,
                }),
            }
        }

        let usages: Vec<LeaveUsage> = data
            .leave_applications
            .iter()
            .filter(|l| {
                l.application.employee == employee
                    && l.docstatus < 2
                    && matches!(l.application.status.as_str(), "Open" | "Approved")
            })
            .map(|l| LeaveUsage {
                leave_type: l.application.leave_type.clone(),
                status: l.application.status.clone(),
                from_date: l.application.from_date,
                to_date: l.application.to_date,
                total_leave_days: l.application.total_leave_days,
            })
            .collect();

        let mut lwps: Vec<String> = data
            .leave_types
            .iter()
            .filter(|(_, is_lwp)| *is_lwp)
            .map(|(name, _)| name.clone())
            .collect();
        lwps.sort();

        Ok(LeaveDetails::compute(&windows, &usages, lwps))
    }

    async fn holiday_list_for_employee(&self, employee: &str) -> StoreResult<Option<String>> {
        let data = self.read()?;
        let Some(employee) = data.employee(employee) else {
            return Ok(None);
        };

        let own = employee.holiday_list.clone().filter(|l| !l.is_empty());
        let company_default = || {
            employee
                .company
                .as_deref()
                .and_then(|c| data.companies.iter().find(|co| co.name == c))
                .and_then(|co| co.default_holiday_list.clone())
        };
        Ok(own.or_else(company_default).filter(|l| !l.is_empty()))
    }

    async fn holidays(&self, holiday_list: &str) -> StoreResult<Vec<Holiday>> {
        let data = self.read()?;
        let mut holidays: Vec<Holiday> = data
            .holidays
            .iter()
            .filter(|h| h.parent == holiday_list && !h.weekly_off)
            .map(|h| h.holiday.clone())
            .collect();
        holidays.sort_by_key(|h| h.holiday_date);
        Ok(holidays)
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn expense_claims(
        &self,
        scope: &ClaimScope,
        limit: Option<u32>,
    ) -> StoreResult<Vec<ExpenseClaimItem>> {
        let data = self.read()?;
        let mut claims: Vec<ExpenseClaimItem> = data
            .expense_claims
            .iter()
            .filter(|c| match scope {
                ClaimScope::Own { employee } => c.docstatus != 2 && c.employee == *employee,
                ClaimScope::ForApproval { employee, approver } => {
                    c.docstatus == 0
                        && c.status == "Draft"
                        && c.expense_approver.as_deref() == Some(approver.as_str())
                        && c.employee != *employee
                }
            })
            // inner join on detail rows
            .filter(|c| !c.expense_types.is_empty())
            .map(|c| ExpenseClaimItem {
                name: c.name.clone(),
                employee: c.employee.clone(),
                employee_name: c.employee_name.clone(),
                approval_status: c.approval_status.clone(),
                status: c.status.clone(),
                expense_approver: c.expense_approver.clone(),
                total_claimed_amount: c.total_claimed_amount,
                posting_date: c.posting_date,
                company: c.company.clone(),
                expense_type: c.expense_types.first().cloned(),
                total_expenses: c.expense_types.len() as i64,
            })
            .collect();
        claims.sort_by(|a, b| b.posting_date.cmp(&a.posting_date));
        if let Some(limit) = limit {
            claims.truncate(limit as usize);
        }
        Ok(claims)
    }

    async fn claim_totals(&self, employee: &str) -> StoreResult<ClaimTotals> {
        let data = self.read()?;
        let claims: Vec<_> = data
            .expense_claims
            .iter()
            .filter(|c| c.docstatus != 2 && c.employee == employee)
            .collect();

        let mut totals = ClaimTotals::default();
        for claim in &claims {
            totals.add(
                &claim.approval_status,
                claim.total_claimed_amount,
                claim.total_sanctioned_amount,
            );
        }
        // company of the latest claim
        totals.company = claims
            .iter()
            .max_by(|a, b| {
                a.posting_date
                    .cmp(&b.posting_date)
                    .then_with(|| a.name.cmp(&b.name))
            })
            .map(|c| c.company.clone());
        Ok(totals)
    }

    async fn expense_claim_types(&self) -> StoreResult<Vec<ExpenseClaimType>> {
        Ok(self.read()?.expense_claim_types.clone())
    }

    async fn expense_type_description(&self, expense_type: &str) -> StoreResult<Option<String>> {
        Ok(self
            .read()?
            .expense_claim_types
            .iter()
            .find(|t| t.name == expense_type)
            .and_then(|t| t.description.clone()))
    }

    async fn advance_balances(&self, employee: &str) -> StoreResult<Vec<AdvanceBalance>> {
        let data = self.read()?;
        let mut advances: Vec<AdvanceBalance> = data
            .advances
            .iter()
            .filter(|a| {
                a.docstatus == 1
                    && a.paid_amount != 0.0
                    && a.employee == employee
                    && matches!(a.status.as_str(), "Paid" | "Unpaid")
            })
            .map(|a| AdvanceBalance {
                name: a.name.clone(),
                employee: a.employee.clone(),
                status: a.status.clone(),
                purpose: a.purpose.clone(),
                paid_amount: a.paid_amount,
                balance_amount: a.paid_amount - (a.claimed_amount + a.return_amount),
                posting_date: a.posting_date,
                currency: a.currency.clone(),
            })
            .collect();
        advances.sort_by(|a, b| b.posting_date.cmp(&a.posting_date));
        Ok(advances)
    }
}

#[async_trait]
impl CurrencyStore for MemoryStore {
    async fn company_currency(&self, company: &str) -> StoreResult<Option<String>> {
        Ok(self
            .read()?
            .companies
            .iter()
            .find(|c| c.name == company)
            .map(|c| c.default_currency.clone()))
    }

    async fn currency(&self, code: &str) -> StoreResult<Option<Currency>> {
        Ok(self
            .read()?
            .currencies
            .iter()
            .find(|c| c.name == code)
            .cloned())
    }

    async fn currencies(&self) -> StoreResult<Vec<Currency>> {
        Ok(self.read()?.currencies.clone())
    }

    async fn company_currencies(&self) -> StoreResult<Vec<CompanyCurrency>> {
        let data = self.read()?;
        Ok(data
            .companies
            .iter()
            .filter_map(|company| {
                data.currencies
                    .iter()
                    .find(|c| c.name == company.default_currency)
                    .map(|currency| CompanyCurrency {
                        name: company.name.clone(),
                        default_currency: company.default_currency.clone(),
                        symbol: currency.symbol.clone(),
                    })
            })
            .collect())
    }
}

#[async_trait]
impl MetaStore for MemoryStore {
    async fn doctype_fields(&self, doctype: &str) -> StoreResult<Vec<DocField>> {
        let data = self.read()?;
        let mut fields = data
            .doctypes
            .iter()
            .find(|d| d.name == doctype)
            .map(|d| d.fields.clone())
            .unwrap_or_default();
        fields.sort_by_key(|f| f.idx);
        Ok(fields)
    }

    async fn link_options(&self, doctype: &str) -> StoreResult<Vec<LinkOption>> {
        let data = self.read()?;
        let Some(doctype) = data.doctypes.iter().find(|d| d.name == doctype) else {
            return Ok(Vec::new());
        };

        let with_label = doctype
            .title_field
            .as_deref()
            .is_some_and(|f| !f.is_empty());
        let mut options: Vec<LinkOption> = doctype
            .records
            .iter()
            .map(|(name, title)| LinkOption {
                value: name.clone(),
                label: if with_label { title.clone() } else { None },
            })
            .collect();
        options.sort_by(|a, b| a.value.cmp(&b.value));
        Ok(options)
    }

    async fn has_permission(
        &self,
        doctype: &str,
        action: PermAction,
        user: &str,
        owner: Option<&str>,
    ) -> StoreResult<bool> {
        let data = self.read()?;
        let Some(user_row) = data.user(user) else {
            return Ok(false);
        };
        let is_owner = owner == Some(user);

        Ok(data.grants.iter().any(|g| {
            g.doctype == doctype
                && g.action == action
                && user_row.roles.contains(&g.role)
                && (!g.if_owner || is_owner)
        }))
    }

    async fn insert_file(&self, file: NewFile) -> StoreResult<FileRecord> {
        let record = FileRecord::from_new(Uuid::new_v4().to_simple().to_string(), &file);
        self.write()?.files.push((record.clone(), file.content));
        Ok(record)
    }
}
