use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::model::file::{FileRecord, NewFile};
use crate::store::MetaStore;
use crate::utils::mime::allowed_type;

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "content": "JVBERi0xLjQK",
    "filename": "receipt.pdf",
    "dt": "Expense Claim",
    "dn": "HR-EXP-2026-00001",
    "fieldname": null
}))]
pub struct UploadRequest {
    /// Base64 encoded file content.
    pub content: String,
    pub filename: String,
    /// Doctype of the document the file is attached to.
    pub dt: Option<String>,
    /// Name of the document the file is attached to.
    pub dn: Option<String>,
    pub fieldname: Option<String>,
}

/// Validates and decodes an upload, then stores it as a private file.
pub async fn upload_file<S: MetaStore + ?Sized>(
    store: &S,
    request: UploadRequest,
) -> ApiResult<FileRecord> {
    let file_name = request.filename.trim();
    if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
        return Err(ApiError::InvalidFileName);
    }

    let content_type = allowed_type(file_name).ok_or(ApiError::DisallowedFileType)?;
    let content = STANDARD
        .decode(request.content.trim())
        .map_err(|_| ApiError::InvalidFileContent)?;

    let file = NewFile {
        file_name: file_name.to_string(),
        content_type,
        content,
        attached_to_doctype: non_empty(request.dt),
        attached_to_name: non_empty(request.dn),
        attached_to_field: non_empty(request.fieldname),
    };

    let record = store.insert_file(file).await?;
    info!(
        file = %record.name,
        file_name = %record.file_name,
        size = record.file_size,
        "File uploaded"
    );
    Ok(record)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn request(filename: &str, content: &str) -> UploadRequest {
        UploadRequest {
            content: content.to_string(),
            filename: filename.to_string(),
            dt: Some("Expense Claim".to_string()),
            dn: Some("HR-EXP-2026-00001".to_string()),
            fieldname: Some(String::new()),
        }
    }

    #[actix_web::test]
    async fn stores_decoded_pdf() {
        let store = MemoryStore::default();
        let encoded = STANDARD.encode(b"%PDF-1.4 receipt");

        let record = upload_file(&store, request("receipt.pdf", &encoded))
            .await
            .unwrap();

        assert_eq!(record.content_type, "application/pdf");
        assert_eq!(
            record.file_url,
            format!("/private/files/{}/receipt.pdf", record.name)
        );
        assert_eq!(record.file_size, 16);
        assert_eq!(record.attached_to_doctype.as_deref(), Some("Expense Claim"));
        assert_eq!(record.attached_to_field, None);
        assert!(record.is_private);

        let files = store.files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].1, b"%PDF-1.4 receipt");
    }

    #[actix_web::test]
    async fn same_name_uploads_get_distinct_urls() {
        let store = MemoryStore::default();
        let encoded = STANDARD.encode(b"hello");

        let first = upload_file(&store, request("notes.txt", &encoded)).await.unwrap();
        let second = upload_file(&store, request("notes.txt", &encoded)).await.unwrap();

        assert_eq!(first.file_name, second.file_name);
        assert_ne!(first.file_url, second.file_url);
    }

    #[actix_web::test]
    async fn rejects_disallowed_extension() {
        let store = MemoryStore::default();
        let encoded = STANDARD.encode(b"MZ");

        let err = upload_file(&store, request("setup.exe", &encoded))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::DisallowedFileType));
        assert!(store.files().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn rejects_bad_base64() {
        let store = MemoryStore::default();

        let err = upload_file(&store, request("notes.txt", "not base64!!"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidFileContent));
    }

    #[actix_web::test]
    async fn rejects_path_in_file_name() {
        let store = MemoryStore::default();
        let encoded = STANDARD.encode(b"hello");

        for name in ["../etc/passwd.txt", "dir/notes.txt", "", "   "] {
            let err = upload_file(&store, request(name, &encoded)).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidFileName), "{name}");
        }
    }
}
