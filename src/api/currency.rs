use crate::auth::auth::AuthUser;
use crate::error::ApiResult;
use crate::service::currency;
use crate::store::HrStore;
use actix_web::{HttpResponse, Responder, web};

#[utoipa::path(
    get,
    path = "/api/currencies/companies",
    responses(
        (status = 200, description = "Company to currency symbol, or code when the currency has no symbol",
         body = Object,
         example = json!({ "Acme Ltd": "$", "Acme India": "INR" })
        ),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Currency"
)]
pub async fn company_currencies(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
) -> ApiResult<impl Responder> {
    let map = currency::company_currency_map(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(map))
}

#[utoipa::path(
    get,
    path = "/api/currencies/symbols",
    responses(
        (status = 200, description = "Currency code to symbol, or the code itself",
         body = Object,
         example = json!({ "USD": "$", "INR": "INR" })
        ),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Currency"
)]
pub async fn currency_symbols(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
) -> ApiResult<impl Responder> {
    let map = currency::currency_symbol_map(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(map))
}
