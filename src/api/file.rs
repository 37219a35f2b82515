use crate::auth::auth::AuthUser;
use crate::error::ApiResult;
use crate::service::upload::{self, UploadRequest};
use crate::store::HrStore;
use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

/// Upload a base64 encoded attachment
#[utoipa::path(
    post,
    path = "/api/files",
    request_body(
        content = UploadRequest,
        description = "File content and the document it belongs to",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "File stored as a private attachment", body = crate::model::file::FileRecord),
        (status = 400, description = "Unsupported file type, bad file name or invalid base64", body = Object, example = json!({
            "message": "You can only upload JPG, PNG, PDF, TXT or Microsoft documents."
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Files"
)]
#[instrument(
    name = "upload_file",
    skip(auth, store, payload),
    fields(user = %auth.user, filename = %payload.filename)
)]
pub async fn upload_file(
    auth: AuthUser,
    store: web::Data<dyn HrStore>,
    payload: web::Json<UploadRequest>,
) -> ApiResult<impl Responder> {
    let record = upload::upload_file(store.get_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}
