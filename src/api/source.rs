use axum::{body::Bytes, extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{SessionService, SourceInfo};

/// Dimensions of the accepted source image
#[derive(Debug, Serialize, ToSchema)]
pub struct SourceResponse {
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
}

impl From<SourceInfo> for SourceResponse {
    fn from(info: SourceInfo) -> Self {
        Self {
            width: info.width,
            height: info.height,
        }
    }
}

/// Upload a source image
///
/// The request body is the raw encoded image (PNG, JPEG or WebP). A new
/// source resets pan and zoom. A rejected upload leaves the current source
/// in place.
#[utoipa::path(
    post,
    path = "/api/source",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Source image accepted", body = SourceResponse),
        (status = 422, description = "Bytes could not be decoded as an image"),
    ),
    tag = "Source"
)]
pub async fn handle_upload_source(
    State(session): State<Arc<SessionService>>,
    body: Bytes,
) -> Result<Json<SourceResponse>, ApiError> {
    tracing::debug!(bytes = body.len(), "Source upload received");
    let info = session.load_source(body.to_vec()).await?;
    Ok(Json(info.into()))
}
