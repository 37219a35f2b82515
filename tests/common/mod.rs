use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::test;
use chrono::NaiveDate;
use once_cell::sync::Lazy;

use hrms_portal::auth::jwt::generate_access_token;
use hrms_portal::auth::password::hash_password;
use hrms_portal::config::Config;
use hrms_portal::model::currency::Currency;
use hrms_portal::model::department::{ApproverCategory, DepartmentApprover};
use hrms_portal::model::doctype::{DocField, PermAction};
use hrms_portal::model::expense::ExpenseClaimType;
use hrms_portal::model::leave::{LEAVE_APPLICATION, LeaveApplication};
use hrms_portal::store::memory::{
    MemAdvance, MemAllocation, MemCompany, MemDepartment, MemDocType, MemEmployee, MemExpenseClaim, MemGrant,
    MemLeaveApplication, MemSettings, MemUser, MemoryData, MemoryStore,
};

pub const SECRET: &str = "integration-secret";
pub const PASSWORD: &str = "correct horse";

static PASSWORD_HASH: Lazy<String> = Lazy::new(|| hash_password(PASSWORD).unwrap());

pub fn config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: SECRET.to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        access_token_ttl: 900,
        rate_login_per_min: 1000,
        rate_protected_per_min: 10_000,
        api_prefix: "/api".to_string(),
        cache_ttl_secs: 60,
        log_dir: "logs".to_string(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn bearer(user: &str) -> (&'static str, String) {
    let token = generate_access_token(user, SECRET, 900).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

pub fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

pub fn get(uri: &str, user: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .peer_addr(peer())
        .insert_header(bearer(user))
}

pub fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(seeded()))
}

/// Routes wired exactly as the server does, over an in-memory store.
macro_rules! init_app {
    ($store:expr) => {{
        let config = $crate::common::config();
        let store: std::sync::Arc<dyn hrms_portal::store::HrStore> = $store;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(store))
                .app_data(actix_web::web::Data::new(config.clone()))
                .configure(|cfg| hrms_portal::routes::configure(cfg, &config)),
        )
        .await
    }};
}

fn user(name: &str, full_name: &str, roles: &[&str]) -> MemUser {
    MemUser {
        name: name.to_string(),
        first_name: full_name.split(' ').next().map(str::to_string),
        full_name: Some(full_name.to_string()),
        user_image: None,
        password_hash: PASSWORD_HASH.clone(),
        enabled: true,
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

fn leave(name: &str, employee: &str, status: &str, from: NaiveDate, owner: &str) -> LeaveApplication {
    LeaveApplication {
        name: name.to_string(),
        employee: employee.to_string(),
        employee_name: employee.to_string(),
        leave_type: "Casual Leave".to_string(),
        status: status.to_string(),
        from_date: from,
        to_date: from,
        half_day: false,
        half_day_date: None,
        description: None,
        total_leave_days: 1.0,
        leave_balance: 9.0,
        leave_approver: Some("lead@acme.test".to_string()),
        posting_date: from,
        owner: owner.to_string(),
        can_cancel: false,
        can_delete: false,
    }
}

fn claim(name: &str, employee: &str, status: &str, amounts: (f64, f64), posted: NaiveDate) -> MemExpenseClaim {
    MemExpenseClaim {
        name: name.to_string(),
        employee: employee.to_string(),
        employee_name: employee.to_string(),
        approval_status: status.to_string(),
        status: status.to_string(),
        expense_approver: Some("lead@acme.test".to_string()),
        total_claimed_amount: amounts.0,
        total_sanctioned_amount: amounts.1,
        posting_date: posted,
        company: "Acme Ltd".to_string(),
        docstatus: if status == "Draft" { 0 } else { 1 },
        expense_types: vec!["Travel".to_string(), "Meals".to_string()],
    }
}

/// Acme Ltd with an Engineering department led by lead@acme.test and one
/// developer, dev@acme.test (EMP-1).
pub fn seeded() -> MemoryData {
    MemoryData {
        users: vec![
            user("dev@acme.test", "Dev One", &["Employee"]),
            user("lead@acme.test", "Team Lead", &["Employee", "Leave Approver"]),
            user("hr@acme.test", "Hannah Reyes", &["HR Manager"]),
        ],
        employees: vec![
            MemEmployee {
                name: "EMP-1".into(),
                employee_name: "Dev One".into(),
                user_id: Some("dev@acme.test".into()),
                designation: Some("Engineer".into()),
                department: Some("Engineering".into()),
                company: Some("Acme Ltd".into()),
                reports_to: Some("EMP-LEAD".into()),
                ..Default::default()
            },
            MemEmployee {
                name: "EMP-LEAD".into(),
                employee_name: "Team Lead".into(),
                user_id: Some("lead@acme.test".into()),
                department: Some("Engineering".into()),
                company: Some("Acme Ltd".into()),
                ..Default::default()
            },
        ],
        departments: vec![
            MemDepartment {
                name: "Engineering".into(),
                ..Default::default()
            },
            MemDepartment {
                name: "Platform".into(),
                parent_department: Some("Engineering".into()),
                ..Default::default()
            },
        ],
        department_approvers: vec![
            DepartmentApprover {
                parent: "Engineering".into(),
                parentfield: ApproverCategory::Leave.to_string(),
                idx: 1,
                approver: "lead@acme.test".into(),
            },
            DepartmentApprover {
                parent: "Platform".into(),
                parentfield: ApproverCategory::Leave.to_string(),
                idx: 1,
                approver: "hr@acme.test".into(),
            },
        ],
        settings: MemSettings {
            leave_approver_mandatory: true,
            expense_approver_mandatory: false,
        },
        leave_types: vec![
            ("Casual Leave".into(), false),
            ("Leave Without Pay".into(), true),
        ],
        allocations: vec![MemAllocation {
            employee: "EMP-1".into(),
            leave_type: "Casual Leave".into(),
            from_date: date(2026, 1, 1),
            to_date: date(2026, 12, 31),
            new_leaves_allocated: 10.0,
            docstatus: 1,
        }],
        leave_applications: vec![
            MemLeaveApplication {
                application: leave("LA-1", "EMP-1", "Open", date(2026, 3, 2), "dev@acme.test"),
                docstatus: 0,
            },
            MemLeaveApplication {
                application: leave("LA-2", "EMP-1", "Approved", date(2026, 2, 2), "dev@acme.test"),
                docstatus: 1,
            },
            MemLeaveApplication {
                application: leave("LA-3", "EMP-LEAD", "Open", date(2026, 3, 9), "lead@acme.test"),
                docstatus: 0,
            },
        ],
        companies: vec![MemCompany {
            name: "Acme Ltd".into(),
            default_currency: "USD".into(),
            default_holiday_list: None,
        }],
        currencies: vec![
            Currency {
                name: "USD".into(),
                symbol: Some("$".into()),
            },
            Currency {
                name: "EUR".into(),
                symbol: None,
            },
        ],
        expense_claims: vec![
            claim("EXP-1", "EMP-1", "Draft", (100.0, 0.0), date(2026, 3, 1)),
            claim("EXP-2", "EMP-1", "Approved", (250.0, 200.0), date(2026, 2, 1)),
            claim("EXP-3", "EMP-1", "Rejected", (300.0, 300.0), date(2026, 1, 1)),
        ],
        expense_claim_types: vec![ExpenseClaimType {
            name: "Travel".into(),
            description: Some("Flights, trains and taxis".into()),
        }],
        doctypes: vec![
            MemDocType {
                name: "Employee".into(),
                title_field: Some("employee_name".into()),
                fields: vec![],
                records: vec![
                    ("EMP-LEAD".into(), Some("Team Lead".into())),
                    ("EMP-1".into(), Some("Dev One".into())),
                ],
            },
            MemDocType {
                name: "Leave Type".into(),
                title_field: None,
                fields: vec![
                    DocField {
                        fieldname: "is_lwp".into(),
                        label: Some("Is Leave Without Pay".into()),
                        fieldtype: "Check".into(),
                        options: None,
                        reqd: false,
                        idx: 2,
                    },
                    DocField {
                        fieldname: "leave_type_name".into(),
                        label: Some("Leave Type Name".into()),
                        fieldtype: "Data".into(),
                        options: None,
                        reqd: true,
                        idx: 1,
                    },
                ],
                records: vec![("Casual Leave".into(), None)],
            },
        ],
        grants: vec![
            MemGrant {
                role: "Employee".into(),
                doctype: LEAVE_APPLICATION.into(),
                action: PermAction::Cancel,
                if_owner: true,
            },
            MemGrant {
                role: "HR Manager".into(),
                doctype: LEAVE_APPLICATION.into(),
                action: PermAction::Delete,
                if_owner: false,
            },
        ],
        advances: vec![
            MemAdvance {
                name: "ADV-1".into(),
                employee: "EMP-1".into(),
                status: "Paid".into(),
                purpose: Some("Conference travel".into()),
                paid_amount: 500.0,
                claimed_amount: 300.0,
                return_amount: 50.0,
                posting_date: date(2026, 3, 1),
                currency: "USD".into(),
                docstatus: 1,
            },
            MemAdvance {
                name: "ADV-2".into(),
                employee: "EMP-1".into(),
                status: "Claimed".into(),
                purpose: None,
                paid_amount: 200.0,
                claimed_amount: 200.0,
                return_amount: 0.0,
                posting_date: date(2026, 2, 1),
                currency: "USD".into(),
                docstatus: 1,
            },
        ],
        ..Default::default()
    }
}
