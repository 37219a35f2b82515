use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DocField {
    #[schema(example = "leave_type")]
    pub fieldname: String,
    #[schema(example = "Leave Type")]
    pub label: Option<String>,
    #[schema(example = "Link")]
    pub fieldtype: String,
    /// Link target, select choices or similar, depending on the field type.
    #[schema(example = "Leave Type")]
    pub options: Option<String>,
    pub reqd: bool,
    pub idx: i32,
}

/// Storage location and title column of a document type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DocTypeMeta {
    pub name: String,
    pub table_name: String,
    pub title_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LinkOption {
    #[schema(example = "HR-EMP-00001")]
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Jane Doe")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PermAction {
    Read,
    Cancel,
    Delete,
}

/// Plain SQL identifier: ASCII letters, digits and underscores, not starting
/// with a digit.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
