use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use moka::future::Cache;
use sqlx::MySqlPool;
use tracing::debug;
use uuid::Uuid;

use super::{
    CurrencyStore, DirectoryStore, ExpenseStore, LeaveStore, MetaStore, StoreResult,
};
use crate::model::advance::AdvanceBalance;
use crate::model::currency::{CompanyCurrency, Currency};
use crate::model::department::{ApproverCategory, ApproverEntry};
use crate::model::doctype::{DocField, DocTypeMeta, LinkOption, PermAction, is_plain_identifier};
use crate::model::employee::{ApproverAssignment, EmployeeInfo};
use crate::model::expense::{ClaimScope, ClaimTotals, ExpenseClaimItem, ExpenseClaimType};
use crate::model::file::{FileRecord, NewFile};
use crate::model::leave::{
    AllocationWindow, Holiday, LeaveApplication, LeaveDetails, LeaveScope, LeaveUsage,
};
use crate::model::user::{UserCredentials, UserInfo};
use crate::utils::db_utils::Filters;
use crate::utils::nested_set::NestedBounds;

pub struct MySqlStore {
    pool: MySqlPool,
    // user -> full_name
    full_names: Cache<String, Option<String>>,
    // doctype -> storage metadata
    doctypes: Cache<String, Option<DocTypeMeta>>,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool, cache_ttl: Duration) -> Self {
        Self {
            pool,
            full_names: Cache::builder()
                .max_capacity(50_000)
                .time_to_live(cache_ttl)
                .build(),
            doctypes: Cache::builder()
                .max_capacity(1_000)
                .time_to_live(cache_ttl)
                .build(),
        }
    }

    async fn doctype_meta(&self, doctype: &str) -> StoreResult<Option<DocTypeMeta>> {
        let pool = self.pool.clone();
        let key = doctype.to_string();
        self.doctypes
            .try_get_with(key.clone(), async move {
                sqlx::query_as::<_, DocTypeMeta>(
                    "SELECT name, table_name, title_field FROM doctypes WHERE name = ?",
                )
                .bind(&key)
                .fetch_optional(&pool)
                .await
                .map_err(anyhow::Error::from)
            })
            .await
            .map_err(|e| anyhow!("doctype lookup failed: {e:#}"))
    }
}

#[async_trait]
impl DirectoryStore for MySqlStore {
    async fn user_info(&self, user: &str) -> StoreResult<Option<UserInfo>> {
        let info = sqlx::query_as::<_, UserInfo>(
            "SELECT first_name, full_name, user_image FROM users WHERE name = ?",
        )
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;
        Ok(info)
    }

    async fn user_credentials(&self, user: &str) -> StoreResult<Option<UserCredentials>> {
        let creds = sqlx::query_as::<_, UserCredentials>(
            "SELECT name, password_hash, enabled FROM users WHERE name = ?",
        )
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;
        Ok(creds)
    }

    async fn user_full_name(&self, user: &str) -> StoreResult<Option<String>> {
        let pool = self.pool.clone();
        let key = user.to_string();
        self.full_names
            .try_get_with(key.clone(), async move {
                let name = sqlx::query_scalar::<_, Option<String>>(
                    "SELECT full_name FROM users WHERE name = ?",
                )
                .bind(&key)
                .fetch_optional(&pool)
                .await?;
                anyhow::Ok(name.flatten())
            })
            .await
            .map_err(|e| anyhow!("user name lookup failed: {e:#}"))
    }

    async fn employee_for_user(&self, user: &str) -> StoreResult<Option<EmployeeInfo>> {
        let employee = sqlx::query_as::<_, EmployeeInfo>(
            r#"
            SELECT name, employee_name, designation, department, company, reports_to, user_id
            FROM employees
            WHERE user_id = ?
            LIMIT 1
            "#,
        )
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn approver_assignment(
        &self,
        employee: &str,
        category: ApproverCategory,
    ) -> StoreResult<Option<ApproverAssignment>> {
        let sql = format!(
            "SELECT {} AS approver, department FROM employees WHERE name = ?",
            category.employee_field()
        );
        let assignment = sqlx::query_as::<_, ApproverAssignment>(&sql)
            .bind(employee)
            .fetch_optional(&self.pool)
            .await?;
        Ok(assignment)
    }

    async fn department_approver_at(
        &self,
        department: &str,
        category: ApproverCategory,
        idx: i32,
    ) -> StoreResult<Option<String>> {
        let approver = sqlx::query_scalar::<_, String>(
            r#"
            SELECT approver
            FROM department_approvers
            WHERE parent = ? AND parentfield = ? AND idx = ?
            "#,
        )
        .bind(department)
        .bind(category.to_string())
        .bind(idx)
        .fetch_optional(&self.pool)
        .await?;
        Ok(approver)
    }

    async fn department_bounds(&self, department: &str) -> StoreResult<Option<NestedBounds>> {
        let bounds = sqlx::query_as::<_, (i64, i64)>(
            "SELECT lft, rgt FROM departments WHERE name = ?",
        )
        .bind(department)
        .fetch_optional(&self.pool)
        .await?;
        Ok(bounds.map(|(lft, rgt)| NestedBounds { lft, rgt }))
    }

    async fn departments_within(&self, bounds: NestedBounds) -> StoreResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM departments
            WHERE lft >= ? AND rgt <= ? AND disabled = 0
            "#,
        )
        .bind(bounds.lft)
        .bind(bounds.rgt)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn approvers_of(
        &self,
        departments: &[String],
        category: ApproverCategory,
    ) -> StoreResult<Vec<ApproverEntry>> {
        if departments.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; departments.len()].join(", ");
        let sql = format!(
            r#"
            SELECT u.name AS id, u.full_name AS name
            FROM users u
            JOIN department_approvers a ON a.approver = u.name
            WHERE a.parent IN ({placeholders}) AND a.parentfield = ?
            "#
        );

        let mut query = sqlx::query_as::<_, ApproverEntry>(&sql);
        for department in departments {
            query = query.bind(department);
        }
        let approvers = query
            .bind(category.to_string())
            .fetch_all(&self.pool)
            .await?;
        Ok(approvers)
    }

    async fn approver_mandatory(&self, category: ApproverCategory) -> StoreResult<bool> {
        let sql = format!(
            "SELECT {} FROM hr_settings WHERE id = 1",
            category.mandatory_setting()
        );
        let flag = sqlx::query_scalar::<_, bool>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(flag.unwrap_or(false))
    }
}

#[async_trait]
impl LeaveStore for MySqlStore {
    async fn leave_applications(&self, scope: &LeaveScope) -> StoreResult<Vec<LeaveApplication>> {
        let filters = match scope {
            LeaveScope::Own { employee } => Filters::new()
                .eq("employee = ?", employee.as_str())
                .raw("status != 'Cancelled'"),
            LeaveScope::Team { employee, approver } => Filters::new()
                .eq("employee != ?", employee.as_str())
                .eq("leave_approver = ?", approver.as_str())
                .raw("status = 'Open'")
                .raw("docstatus = 0"),
        };

        let sql = format!(
            r#"
            SELECT name, employee, employee_name, leave_type, status, from_date, to_date,
                   half_day, half_day_date, description, total_leave_days, leave_balance,
                   leave_approver, posting_date, owner
            FROM leave_applications
            {}
            ORDER BY from_date DESC
            "#,
            filters.where_sql()
        );
        debug!(sql = %sql, values = ?filters.values(), "Fetching leave applications");

        let rows = filters
            .bind(sqlx::query_as::<_, LeaveApplication>(&sql))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn leave_details(&self, employee: &str, date: NaiveDate) -> StoreResult<LeaveDetails> {
        let allocations = sqlx::query_as::<_, AllocationWindow>(
            r#"
            SELECT leave_type,
                   MIN(from_date) AS from_date,
                   MAX(to_date) AS to_date,
                   CAST(SUM(new_leaves_allocated) AS DOUBLE) AS total_leaves
            FROM leave_allocations
            WHERE employee = ? AND docstatus = 1 AND ? BETWEEN from_date AND to_date
            GROUP BY leave_type
            "#,
        )
        .bind(employee)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .context("failed to load leave allocations")?;

        let usages = sqlx::query_as::<_, LeaveUsage>(
            r#"
            SELECT leave_type, status, from_date, to_date, total_leave_days
            FROM leave_applications
            WHERE employee = ? AND docstatus < 2 AND status IN ('Open', 'Approved')
            "#,
        )
        .bind(employee)
        .fetch_all(&self.pool)
        .await
        .context("failed to load leave applications")?;

        let lwps = sqlx::query_scalar::<_, String>(
            "SELECT name FROM leave_types WHERE is_lwp = 1 ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(LeaveDetails::compute(&allocations, &usages, lwps))
    }

    async fn holiday_list_for_employee(&self, employee: &str) -> StoreResult<Option<String>> {
        let list = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT COALESCE(NULLIF(e.holiday_list, ''), c.default_holiday_list)
            FROM employees e
            LEFT JOIN companies c ON c.name = e.company
            WHERE e.name = ?
            "#,
        )
        .bind(employee)
        .fetch_optional(&self.pool)
        .await?;
        Ok(list.flatten().filter(|l| !l.is_empty()))
    }

    async fn holidays(&self, holiday_list: &str) -> StoreResult<Vec<Holiday>> {
        let holidays = sqlx::query_as::<_, Holiday>(
            r#"
            SELECT name, holiday_date, description
            FROM holidays
            WHERE parent = ? AND weekly_off = 0
            ORDER BY holiday_date ASC
            "#,
        )
        .bind(holiday_list)
        .fetch_all(&self.pool)
        .await?;
        Ok(holidays)
    }
}

#[async_trait]
impl ExpenseStore for MySqlStore {
    async fn expense_claims(
        &self,
        scope: &ClaimScope,
        limit: Option<u32>,
    ) -> StoreResult<Vec<ExpenseClaimItem>> {
        let filters = match scope {
            ClaimScope::Own { employee } => Filters::new()
                .raw("c.docstatus != 2")
                .eq("c.employee = ?", employee.as_str()),
            ClaimScope::ForApproval { employee, approver } => Filters::new()
                .raw("c.docstatus = 0")
                .raw("c.status = 'Draft'")
                .eq("c.expense_approver = ?", approver.as_str())
                .eq("c.employee != ?", employee.as_str()),
        };

        let limit_sql = limit.map(|n| format!(" LIMIT {n}")).unwrap_or_default();
        let sql = format!(
            r#"
            SELECT c.name, c.employee, c.employee_name, c.approval_status, c.status,
                   c.expense_approver, c.total_claimed_amount, c.posting_date, c.company,
                   (SELECT d2.expense_type FROM expense_claim_details d2
                    WHERE d2.parent = c.name
                    ORDER BY d2.idx LIMIT 1) AS expense_type,
                   COUNT(d.expense_type) AS total_expenses
            FROM expense_claims c
            JOIN expense_claim_details d ON d.parent = c.name
            {}
            GROUP BY c.name
            ORDER BY c.posting_date DESC{}
            "#,
            filters.where_sql(),
            limit_sql
        );
        debug!(sql = %sql, values = ?filters.values(), "Fetching expense claims");

        let claims = filters
            .bind(sqlx::query_as::<_, ExpenseClaimItem>(&sql))
            .fetch_all(&self.pool)
            .await?;
        Ok(claims)
    }

    async fn claim_totals(&self, employee: &str) -> StoreResult<ClaimTotals> {
        let totals = sqlx::query_as::<_, ClaimTotals>(
            r#"
            SELECT
                CAST(COALESCE(SUM(CASE WHEN approval_status = 'Draft'
                    THEN total_claimed_amount ELSE 0 END), 0) AS DOUBLE) AS total_pending_amount,
                CAST(COALESCE(SUM(CASE WHEN approval_status = 'Approved'
                    THEN total_sanctioned_amount ELSE 0 END), 0) AS DOUBLE) AS total_approved_amount,
                CAST(COALESCE(SUM(CASE WHEN approval_status = 'Rejected'
                    THEN total_sanctioned_amount ELSE 0 END), 0) AS DOUBLE) AS total_rejected_amount,
                (SELECT l.company FROM expense_claims l
                 WHERE l.docstatus != 2 AND l.employee = ?
                 ORDER BY l.posting_date DESC, l.name DESC LIMIT 1) AS company
            FROM expense_claims
            WHERE docstatus != 2 AND employee = ?
            "#,
        )
        .bind(employee)
        .bind(employee)
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }

    async fn expense_claim_types(&self) -> StoreResult<Vec<ExpenseClaimType>> {
        let types = sqlx::query_as::<_, ExpenseClaimType>(
            "SELECT name, description FROM expense_claim_types",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    async fn expense_type_description(&self, expense_type: &str) -> StoreResult<Option<String>> {
        let description = sqlx::query_scalar::<_, Option<String>>(
            "SELECT description FROM expense_claim_types WHERE name = ?",
        )
        .bind(expense_type)
        .fetch_optional(&self.pool)
        .await?;
        Ok(description.flatten())
    }

    async fn advance_balances(&self, employee: &str) -> StoreResult<Vec<AdvanceBalance>> {
        // claimed and returned advances are settled, only paid ones carry a balance
        let advances = sqlx::query_as::<_, AdvanceBalance>(
            r#"
            SELECT name, employee, status, purpose, paid_amount,
                   paid_amount - (claimed_amount + return_amount) AS balance_amount,
                   posting_date, currency
            FROM employee_advances
            WHERE docstatus = 1
              AND paid_amount != 0
              AND employee = ?
              AND status IN ('Paid', 'Unpaid')
            ORDER BY posting_date DESC
            "#,
        )
        .bind(employee)
        .fetch_all(&self.pool)
        .await?;
        Ok(advances)
    }
}

#[async_trait]
impl CurrencyStore for MySqlStore {
    async fn company_currency(&self, company: &str) -> StoreResult<Option<String>> {
        let currency = sqlx::query_scalar::<_, String>(
            "SELECT default_currency FROM companies WHERE name = ?",
        )
        .bind(company)
        .fetch_optional(&self.pool)
        .await?;
        Ok(currency)
    }

    async fn currency(&self, code: &str) -> StoreResult<Option<Currency>> {
        let currency =
            sqlx::query_as::<_, Currency>("SELECT name, symbol FROM currencies WHERE name = ?")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(currency)
    }

    async fn currencies(&self) -> StoreResult<Vec<Currency>> {
        let currencies = sqlx::query_as::<_, Currency>("SELECT name, symbol FROM currencies")
            .fetch_all(&self.pool)
            .await?;
        Ok(currencies)
    }

    async fn company_currencies(&self) -> StoreResult<Vec<CompanyCurrency>> {
        let companies = sqlx::query_as::<_, CompanyCurrency>(
            r#"
            SELECT c.name, c.default_currency, cur.symbol
            FROM companies c
            JOIN currencies cur ON cur.name = c.default_currency
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(companies)
    }
}

#[async_trait]
impl MetaStore for MySqlStore {
    async fn doctype_fields(&self, doctype: &str) -> StoreResult<Vec<DocField>> {
        let fields = sqlx::query_as::<_, DocField>(
            r#"
            SELECT fieldname, label, fieldtype, options, reqd, idx
            FROM doctype_fields
            WHERE parent = ?
            ORDER BY idx
            "#,
        )
        .bind(doctype)
        .fetch_all(&self.pool)
        .await?;
        Ok(fields)
    }

    async fn link_options(&self, doctype: &str) -> StoreResult<Vec<LinkOption>> {
        let Some(meta) = self.doctype_meta(doctype).await? else {
            return Ok(Vec::new());
        };

        if !is_plain_identifier(&meta.table_name) {
            return Err(anyhow!(
                "doctype {} has invalid table name {:?}",
                meta.name,
                meta.table_name
            ));
        }

        let label = match meta.title_field.as_deref().filter(|f| !f.is_empty()) {
            Some(field) if is_plain_identifier(field) => format!("CAST(`{field}` AS CHAR)"),
            Some(field) => {
                return Err(anyhow!(
                    "doctype {} has invalid title field {:?}",
                    meta.name,
                    field
                ));
            }
            None => "NULL".to_string(),
        };

        let sql = format!(
            "SELECT name AS value, {label} AS label FROM `{}` ORDER BY name",
            meta.table_name
        );
        let options = sqlx::query_as::<_, LinkOption>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(options)
    }

    async fn has_permission(
        &self,
        doctype: &str,
        action: PermAction,
        user: &str,
        owner: Option<&str>,
    ) -> StoreResult<bool> {
        let is_owner = owner == Some(user);
        let allowed = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT CAST(EXISTS(
                SELECT 1
                FROM doctype_permissions p
                JOIN user_roles r ON r.role = p.role
                WHERE r.`user` = ? AND p.doctype = ? AND p.action = ?
                  AND (p.if_owner = 0 OR ?)
            ) AS SIGNED)
            "#,
        )
        .bind(user)
        .bind(doctype)
        .bind(action.to_string())
        .bind(is_owner)
        .fetch_one(&self.pool)
        .await?;
        Ok(allowed != 0)
    }

    async fn insert_file(&self, file: NewFile) -> StoreResult<FileRecord> {
        let record = FileRecord::from_new(Uuid::new_v4().to_simple().to_string(), &file);

        sqlx::query(
            r#"
            INSERT INTO files
                (name, file_name, file_url, file_size, content_type, attached_to_doctype,
                 attached_to_name, attached_to_field, folder, is_private, content)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.name)
        .bind(&record.file_name)
        .bind(&record.file_url)
        .bind(record.file_size)
        .bind(&record.content_type)
        .bind(&record.attached_to_doctype)
        .bind(&record.attached_to_name)
        .bind(&record.attached_to_field)
        .bind(&record.folder)
        .bind(record.is_private)
        .bind(file.content)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to store file {}", record.file_name))?;

        Ok(record)
    }
}
