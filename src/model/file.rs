use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A decoded upload ready to be stored as a private attachment.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub content: Vec<u8>,
    pub attached_to_doctype: Option<String>,
    pub attached_to_name: Option<String>,
    pub attached_to_field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "name": "5f0c8e0e6c",
    "file_name": "receipt.pdf",
    "file_url": "/private/files/5f0c8e0e6c/receipt.pdf",
    "file_size": 18342,
    "content_type": "application/pdf",
    "attached_to_doctype": "Expense Claim",
    "attached_to_name": "HR-EXP-2026-00001",
    "attached_to_field": null,
    "folder": "Home",
    "is_private": true
}))]
pub struct FileRecord {
    pub name: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub content_type: String,
    pub attached_to_doctype: Option<String>,
    pub attached_to_name: Option<String>,
    pub attached_to_field: Option<String>,
    pub folder: String,
    pub is_private: bool,
}

impl FileRecord {
    pub const FOLDER: &'static str = "Home";

    /// The record name is part of the URL so same-named uploads never collide.
    pub fn from_new(name: String, file: &NewFile) -> Self {
        Self {
            file_url: format!("/private/files/{}/{}", name, file.file_name),
            name,
            file_name: file.file_name.clone(),
            file_size: file.content.len() as i64,
            content_type: file.content_type.to_string(),
            attached_to_doctype: file.attached_to_doctype.clone(),
            attached_to_name: file.attached_to_name.clone(),
            attached_to_field: file.attached_to_field.clone(),
            folder: Self::FOLDER.to_string(),
            is_private: true,
        }
    }
}
