use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "You can only upload JPG, PNG, PDF, TXT or Microsoft documents.")]
    DisallowedFileType,
    #[display(fmt = "File content is not valid base64")]
    InvalidFileContent,
    #[display(fmt = "Invalid file name")]
    InvalidFileName,
    #[display(fmt = "Invalid doctype name")]
    InvalidDocType,
    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,
    #[display(fmt = "Internal Server Error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DisallowedFileType
            | ApiError::InvalidFileContent
            | ApiError::InvalidFileName
            | ApiError::InvalidDocType => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // the cause stays in the log, the client only sees the generic message
        if let ApiError::Internal(e) = self {
            tracing::error!(error = %e, "Request failed");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
