use crate::{
    auth::{jwt::generate_access_token, password::verify_password},
    config::Config,
    error::{ApiError, ApiResult},
    models::{LoginReqDto, LoginResponse},
    store::HrStore,
};
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, info, instrument};

/// Exchange portal credentials for a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(
        content = LoginReqDto,
        description = "Portal credentials",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<dyn HrStore>,
    config: web::Data<Config>,
) -> ApiResult<impl Responder> {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Ok(HttpResponse::BadRequest().body("Username or password required"));
    }

    debug!("Fetching user credentials");

    let credentials = match store.user_credentials(user.username.trim()).await? {
        Some(c) if c.enabled => c,
        Some(_) => {
            info!("Invalid credentials: user disabled");
            return Err(ApiError::InvalidCredentials);
        }
        None => {
            info!("Invalid credentials: user not found");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if let Err(e) = verify_password(&user.password, &credentials.password_hash) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    debug!("Password verified, generating access token");

    let access_token =
        generate_access_token(&credentials.name, &config.jwt_secret, config.access_token_ttl)
            .map_err(|e| ApiError::Internal(e.into()))?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse { access_token }))
}
