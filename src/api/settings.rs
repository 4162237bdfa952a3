use axum::{extract::State, response::Json, Json as JsonExtractor};
use grid_resample::PixelSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::{SessionService, SettingsUpdate};

/// Partial settings update; omitted fields keep their value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SettingsPatch {
    /// Output cells per side (clamped to 8..=64)
    #[serde(default)]
    pub grid_size: Option<u32>,
    /// Contrast adjustment (clamped to -50..=50)
    #[serde(default)]
    pub contrast: Option<i32>,
    /// Saturation adjustment (clamped to -50..=50)
    #[serde(default)]
    pub saturation: Option<i32>,
    /// Draw the cell grid on previews
    #[serde(default)]
    pub show_grid: Option<bool>,
}

/// Effective pixelation settings
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub grid_size: u32,
    pub contrast: i32,
    pub saturation: i32,
    pub show_grid: bool,
}

impl From<PixelSettings> for SettingsResponse {
    fn from(s: PixelSettings) -> Self {
        Self {
            grid_size: s.grid_size,
            contrast: s.contrast,
            saturation: s.saturation,
            show_grid: s.show_grid,
        }
    }
}

/// Get the current settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse),
    ),
    tag = "Settings"
)]
pub async fn handle_get_settings(
    State(session): State<Arc<SessionService>>,
) -> Json<SettingsResponse> {
    Json(session.settings().await.into())
}

/// Update settings
///
/// Out-of-range values are clamped rather than rejected.
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = SettingsPatch,
    responses(
        (status = 200, description = "Settings after the update", body = SettingsResponse),
    ),
    tag = "Settings"
)]
pub async fn handle_update_settings(
    State(session): State<Arc<SessionService>>,
    JsonExtractor(patch): JsonExtractor<SettingsPatch>,
) -> Json<SettingsResponse> {
    let update = SettingsUpdate {
        grid_size: patch.grid_size,
        contrast: patch.contrast,
        saturation: patch.saturation,
        show_grid: patch.show_grid,
    };
    Json(session.update_settings(update).await.into())
}
