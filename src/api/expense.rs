use crate::auth::auth::AuthUser;
use crate::error::ApiResult;
use crate::model::department::ApproverCategory;
use crate::model::expense::ClaimScope;
use crate::service::{approval, expense};
use crate::store::HrStore;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClaimListQuery {
    /// List draft claims of other employees awaiting the signed-in user
    #[param(example = false)]
    #[serde(default)]
    pub for_approval: bool,
    /// Maximum number of claims returned
    #[param(example = 20)]
    pub limit: Option<u32>,
}

/* =========================
Expense claims
========================= */
#[utoipa::path(
    get,
    path = "/api/employees/{employee}/expense-claims",
    params(
        ("employee" = String, Path, description = "Employee id"),
        ClaimListQuery
    ),
    responses(
        (status = 200, description = "Claims with their first expense type and detail count, latest first", body = Vec<crate::model::expense::ExpenseClaimItem>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Expense"
)]
pub async fn expense_claims(
    auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
    query: web::Query<ClaimListQuery>,
) -> ApiResult<impl Responder> {
    let employee = path.into_inner();
    let scope = if query.for_approval {
        ClaimScope::ForApproval {
            employee,
            approver: auth.user,
        }
    } else {
        ClaimScope::Own { employee }
    };

    let claims = store.expense_claims(&scope, query.limit).await?;
    Ok(HttpResponse::Ok().json(claims))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee}/expense-claim-summary",
    params(
        ("employee" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Pending, approved and rejected totals", body = crate::model::expense::ClaimSummary),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Expense"
)]
pub async fn expense_claim_summary(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let summary = expense::claim_summary(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(summary))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee}/expense-approval-details",
    params(
        ("employee" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Default and alternate expense approvers", body = crate::model::department::ApprovalDetails),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Expense"
)]
pub async fn expense_approval_details(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let details =
        approval::resolve_approvers(store.get_ref(), &path, ApproverCategory::Expense).await?;
    Ok(HttpResponse::Ok().json(details))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee}/advances",
    params(
        ("employee" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Paid or unpaid advances with their open balance", body = Vec<crate::model::advance::AdvanceBalance>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Expense"
)]
pub async fn advances(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let advances = store.advance_balances(&path).await?;
    Ok(HttpResponse::Ok().json(advances))
}

/* =========================
Claim types
========================= */
#[utoipa::path(
    get,
    path = "/api/expense-claim-types",
    responses(
        (status = 200, description = "All expense claim types", body = Vec<crate::model::expense::ExpenseClaimType>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Expense"
)]
pub async fn expense_claim_types(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
) -> ApiResult<impl Responder> {
    let types = store.expense_claim_types().await?;
    Ok(HttpResponse::Ok().json(types))
}

#[utoipa::path(
    get,
    path = "/api/expense-claim-types/{expense_type}/description",
    params(
        ("expense_type" = String, Path, description = "Expense claim type name")
    ),
    responses(
        (status = 200, description = "Description of the type, null when unknown or blank",
         body = String,
         example = json!("Flights, trains and taxis")
        ),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Expense"
)]
pub async fn expense_type_description(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    let description = store.expense_type_description(&path).await?;
    Ok(HttpResponse::Ok().json(description))
}
