use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::{PreviewMode, SessionService};

/// Query parameters for the preview endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    /// Requested side in pixels (capped by the configured preview size)
    #[serde(default)]
    pub size: Option<u32>,
    /// Override the grid setting for this preview
    #[serde(default)]
    pub grid: Option<bool>,
    /// `pixel` (default) or `source`
    #[serde(default)]
    pub mode: Option<String>,
}

/// Query parameters for the export endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    /// Output pixels per cell
    #[serde(default)]
    pub multiplier: Option<u32>,
}

fn parse_mode(mode: Option<&str>) -> Result<PreviewMode, ApiError> {
    match mode {
        None | Some("pixel") => Ok(PreviewMode::Pixel),
        Some("source") => Ok(PreviewMode::Source),
        Some(other) => Err(ApiError::BadRequest(format!(
            "Unknown preview mode '{other}' (expected 'pixel' or 'source')"
        ))),
    }
}

/// Render a preview
///
/// In `pixel` mode the resampled grid is magnified with nearest-neighbor
/// scaling. In `source` mode the viewport crop is shown at display
/// resolution.
#[utoipa::path(
    get,
    path = "/api/preview.png",
    responses(
        (status = 200, description = "Preview image", content_type = "image/png"),
        (status = 400, description = "Invalid mode or preview size"),
        (status = 409, description = "No source image loaded"),
    ),
    params(
        ("size" = Option<u32>, Query, description = "Preview side in pixels"),
        ("grid" = Option<bool>, Query, description = "Draw the cell grid"),
        ("mode" = Option<String>, Query, description = "'pixel' or 'source'"),
    ),
    tag = "Image"
)]
pub async fn handle_preview(
    State(session): State<Arc<SessionService>>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, ApiError> {
    let mode = parse_mode(query.mode.as_deref())?;
    let png = session.preview(query.size, query.grid, mode).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        png,
    )
        .into_response())
}

/// Export the pixel art
///
/// Each cell becomes a `multiplier` x `multiplier` block of one color.
#[utoipa::path(
    get,
    path = "/api/export.png",
    responses(
        (status = 200, description = "Exported PNG", content_type = "image/png"),
        (status = 400, description = "Multiplier is zero or the output is too large"),
        (status = 409, description = "No source image loaded"),
    ),
    params(
        ("multiplier" = Option<u32>, Query, description = "Output pixels per cell"),
    ),
    tag = "Image"
)]
pub async fn handle_export(
    State(session): State<Arc<SessionService>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let exported = session.export(query.multiplier).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", exported.filename),
            ),
        ],
        exported.bytes,
    )
        .into_response())
}
