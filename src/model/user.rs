use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "first_name": "Jane",
    "full_name": "Jane Doe",
    "user_image": "/files/jane.png"
}))]
pub struct UserInfo {
    pub first_name: Option<String>,
    pub full_name: Option<String>,
    pub user_image: Option<String>,
}

/// Row used by the login handler. Never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub name: String,
    pub password_hash: String,
    pub enabled: bool,
}
