use crate::auth::auth::AuthUser;
use crate::error::ApiResult;
use crate::model::department::ApproverCategory;
use crate::model::leave::LeaveScope;
use crate::service::{approval, leave};
use crate::store::HrStore;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaveTypesQuery {
    /// Day the allocations must cover, today when omitted
    #[param(value_type = Option<String>, example = "2026-01-05")]
    pub date: Option<NaiveDate>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/* =========================
Own leave applications
========================= */
#[utoipa::path(
    get,
    path = "/api/employees/{employee}/leave-applications",
    params(
        ("employee" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Non-cancelled applications, latest first", body = Vec<crate::model::leave::LeaveApplication>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_applications(
    auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let scope = LeaveScope::Own {
        employee: path.into_inner(),
    };
    let leaves = leave::list_leave_applications(store.get_ref(), &scope, &auth.user).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Applications awaiting the caller
========================= */
#[utoipa::path(
    get,
    path = "/api/employees/{employee}/team-leave-applications",
    params(
        ("employee" = String, Path, description = "The approver's own employee id, excluded from the list")
    ),
    responses(
        (status = 200, description = "Open draft applications assigned to the signed-in user", body = Vec<crate::model::leave::LeaveApplication>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn team_leave_applications(
    auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let scope = LeaveScope::Team {
        employee: path.into_inner(),
        approver: auth.user.clone(),
    };
    let leaves = leave::list_leave_applications(store.get_ref(), &scope, &auth.user).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Balance per leave type
========================= */
#[utoipa::path(
    get,
    path = "/api/employees/{employee}/leave-balance",
    params(
        ("employee" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Allocated and remaining days per leave type as of today",
         body = std::collections::BTreeMap<String, crate::model::leave::LeaveBalance>,
         example = json!({
            "Casual Leave": { "allocated_leaves": 10.0, "balance_leaves": 6.0 }
         })
        ),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_balance(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let balances = leave::leave_balance_map(store.get_ref(), &path, today()).await?;
    Ok(HttpResponse::Ok().json(balances))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee}/leave-types",
    params(
        ("employee" = String, Path, description = "Employee id"),
        LeaveTypesQuery
    ),
    responses(
        (status = 200, description = "Allocated leave types followed by leave without pay types",
         body = Vec<String>,
         example = json!(["Casual Leave", "Leave Without Pay"])
        ),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_types(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
    query: web::Query<LeaveTypesQuery>,
) -> ApiResult<impl Responder> {
    let date = query.date.unwrap_or_else(today);
    let types = leave::leave_types(store.get_ref(), &path, date).await?;
    Ok(HttpResponse::Ok().json(types))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee}/holidays",
    params(
        ("employee" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Holidays of the employee's list, weekly offs excluded", body = Vec<crate::model::leave::Holiday>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn holidays(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let holidays = leave::holidays_for_employee(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(holidays))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee}/leave-approval-details",
    params(
        ("employee" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Default and alternate leave approvers", body = crate::model::department::ApprovalDetails),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_approval_details(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let details =
        approval::resolve_approvers(store.get_ref(), &path, ApproverCategory::Leave).await?;
    Ok(HttpResponse::Ok().json(details))
}
