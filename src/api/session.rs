use crate::auth::auth::AuthUser;
use crate::error::ApiResult;
use crate::store::HrStore;
use actix_web::{HttpResponse, Responder, web};

/// Profile of the signed-in user
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user, null if the user record is gone", body = crate::model::user::UserInfo),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Session"
)]
pub async fn current_user(
    auth: AuthUser,
    store: web::Data<dyn HrStore>,
) -> ApiResult<impl Responder> {
    let info = store.user_info(&auth.user).await?;
    Ok(HttpResponse::Ok().json(info))
}

/// Employee record linked to the signed-in user
#[utoipa::path(
    get,
    path = "/api/me/employee",
    responses(
        (status = 200, description = "Linked employee, null when there is none", body = crate::model::employee::EmployeeInfo),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Session"
)]
pub async fn current_employee(
    auth: AuthUser,
    store: web::Data<dyn HrStore>,
) -> ApiResult<impl Responder> {
    let employee = store.employee_for_user(&auth.user).await?;
    Ok(HttpResponse::Ok().json(employee))
}
