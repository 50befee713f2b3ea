//! Image Upload Handler
//!
//! Accepts a single multipart `file` field, fully buffered. Only the
//! file extension is checked against the allow-list; the bytes are
//! stored as-is.

use axum::Json;
use axum::extract::{Multipart, State};
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, time::now_millis};

/// Accepted image extensions
const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "webp", "gif", "svg"];

/// Upload response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

/// A served filename must be a bare name, no separators or parent refs
pub(super) fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}

/// Check a lowercase extension against the allow-list
fn validate_extension(ext: &str) -> AppResult<()> {
    if !ALLOWED_EXTENSIONS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Only images are allowed ({})",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

/// Collision-resistant stored name: timestamp plus a random hex suffix
fn unique_filename(ext: &str) -> String {
    let mut suffix = [0u8; 4];
    rand::thread_rng().fill(&mut suffix);
    format!("{}-{}.{}", now_millis(), hex::encode(suffix), ext)
}

/// POST /api/upload - store one image and return its public URL
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'".to_string())
    })?;

    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field".to_string()))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty file provided".to_string()));
    }

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_lowercase()))
        .ok_or_else(|| {
            AppError::validation(format!("Invalid file extension for: {filename}"))
        })?;

    validate_extension(&ext)?;

    let upload_dir = state.upload_dir();
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create upload directory: {e}")))?;

    let stored_name = unique_filename(&ext);
    let file_path = upload_dir.join(&stored_name);

    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

    tracing::info!(
        original_name = %filename,
        stored_name = %stored_name,
        size = data.len(),
        "Image uploaded"
    );

    Ok(Json(UploadResponse {
        image_url: format!("/uploads/{stored_name}"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allow_list() {
        for ext in ["jpeg", "jpg", "png", "webp", "gif", "svg"] {
            assert!(validate_extension(ext).is_ok(), "{ext} should be allowed");
        }
        for ext in ["exe", "pdf", "html", "js", "sh", ""] {
            assert!(validate_extension(ext).is_err(), "{ext} should be rejected");
        }
    }

    #[test]
    fn test_unique_filenames_differ() {
        let a = unique_filename("png");
        let b = unique_filename("png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }

    #[test]
    fn test_safe_filename_guard() {
        assert!(is_safe_filename("1714690000000-a1b2c3d4.png"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("../secrets.txt"));
        assert!(!is_safe_filename("dir/file.png"));
        assert!(!is_safe_filename("dir\\file.png"));
    }
}
