//! Upload routes
//!
//! Image upload for admins, public serving of stored files.

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use crate::auth::require_admin;
use crate::core::ServerState;

/// Stored file response
enum UploadFileResponse {
    Ok(String, Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for UploadFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            UploadFileResponse::Ok(content_type, content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            UploadFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            UploadFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve uploaded file handler
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> UploadFileResponse {
    if !handler::is_safe_filename(&filename) {
        return UploadFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.upload_dir().join(&filename);

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .to_string();
            UploadFileResponse::Ok(content_type, content.into())
        }
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Uploaded file not found");
            UploadFileResponse::NotFound
        }
    }
}

pub fn router() -> Router<ServerState> {
    Router::new()
        // Upload image API - admin only
        .route(
            "/api/upload",
            post(handler::upload).layer(middleware::from_fn(require_admin)),
        )
        // Serve uploaded images - public access
        .route("/uploads/{filename}", get(serve_uploaded_file))
}
