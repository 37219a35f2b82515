use crate::auth::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::store::HrStore;
use actix_web::{HttpResponse, Responder, web};

/// Doctype names are words separated by single spaces, e.g. "Leave Type".
fn valid_doctype(name: &str) -> bool {
    let plain_word = |word: &str| {
        !word.is_empty()
            && word
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    };
    name.len() <= 140 && name.split(' ').all(plain_word)
}

#[utoipa::path(
    get,
    path = "/api/doctypes/{doctype}/fields",
    params(
        ("doctype" = String, Path, description = "Document type, e.g. Leave Application")
    ),
    responses(
        (status = 200, description = "Field definitions in form order, empty for unknown doctypes", body = Vec<crate::model::doctype::DocField>),
        (status = 400, description = "Malformed doctype name"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Metadata"
)]
pub async fn doctype_fields(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    if !valid_doctype(&path) {
        return Err(ApiError::InvalidDocType);
    }
    let fields = store.doctype_fields(&path).await?;
    Ok(HttpResponse::Ok().json(fields))
}

#[utoipa::path(
    get,
    path = "/api/doctypes/{doctype}/link-options",
    params(
        ("doctype" = String, Path, description = "Target doctype of a link field")
    ),
    responses(
        (status = 200, description = "Record names, labelled with the title field when the doctype has one", body = Vec<crate::model::doctype::LinkOption>),
        (status = 400, description = "Malformed doctype name"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Metadata"
)]
pub async fn link_options(
    _auth: AuthUser,
    store: web::Data<dyn HrStore>,
    path: web::Path<String>,
) -> ApiResult<impl Responder> {
    if !valid_doctype(&path) {
        return Err(ApiError::InvalidDocType);
    }
    let options = store.link_options(&path).await?;
    Ok(HttpResponse::Ok().json(options))
}
