use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Content types accepted for portal uploads.
pub static ALLOWED_MIMETYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "image/png",
        "image/jpeg",
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "application/vnd.oasis.opendocument.text",
        "application/vnd.oasis.opendocument.spreadsheet",
        "text/plain",
        "video/quicktime",
        "video/mp4",
    ])
});

/// Guess a MIME type from the file extension.
pub fn guess_type(filename: &str) -> Option<&'static str> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())?
        .to_lowercase();

    let mime = match ext.as_str() {
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" | "text" | "log" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "doc" | "dot" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" | "xlt" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "mov" | "qt" => "video/quicktime",
        "mp4" => "video/mp4",
        "zip" => "application/zip",
        "exe" | "dll" | "msi" => "application/x-msdownload",
        "sh" => "application/x-sh",
        _ => return None,
    };
    Some(mime)
}

/// The MIME type of `filename` if it is one portal uploads accept.
pub fn allowed_type(filename: &str) -> Option<&'static str> {
    guess_type(filename).filter(|mime| ALLOWED_MIMETYPES.contains(mime))
}
