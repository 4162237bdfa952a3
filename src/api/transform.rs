use axum::{extract::State, response::Json, Json as JsonExtractor};
use grid_resample::TransformEvent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::{ControllerState, SessionService};

/// Pointer and wheel input, as sent by the viewport
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Wheel movement; negative deltas zoom in
    Zoom { delta: f64 },
    /// Pointer movement in screen pixels
    Pan { dx: f64, dy: f64 },
    /// Pointer button pressed
    Press,
    /// Pointer button released
    Release,
    /// Pointer left the viewport
    Leave,
    /// Restore the identity transform and end any drag
    Reset,
}

impl From<InputEvent> for TransformEvent {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::Zoom { delta } => TransformEvent::Zoom { delta },
            InputEvent::Pan { dx, dy } => TransformEvent::Pan { dx, dy },
            InputEvent::Press => TransformEvent::Press,
            InputEvent::Release => TransformEvent::Release,
            InputEvent::Leave => TransformEvent::Leave,
            InputEvent::Reset => TransformEvent::Reset,
        }
    }
}

/// Current viewport transform
#[derive(Debug, Serialize, ToSchema)]
pub struct TransformResponse {
    /// Horizontal pan offset in source pixels
    pub x: f64,
    /// Vertical pan offset in source pixels
    pub y: f64,
    /// Zoom factor
    pub scale: f64,
    /// Whether a drag is in progress
    pub dragging: bool,
}

impl From<ControllerState> for TransformResponse {
    fn from(state: ControllerState) -> Self {
        Self {
            x: state.transform.x,
            y: state.transform.y,
            scale: state.transform.scale,
            dragging: state.dragging,
        }
    }
}

/// Get the current transform
#[utoipa::path(
    get,
    path = "/api/transform",
    responses(
        (status = 200, description = "Current transform", body = TransformResponse),
    ),
    tag = "Transform"
)]
pub async fn handle_get_transform(
    State(session): State<Arc<SessionService>>,
) -> Json<TransformResponse> {
    Json(session.controller_state().await.into())
}

/// Apply an input event
///
/// Pan events only move the viewport while a drag is in progress.
#[utoipa::path(
    post,
    path = "/api/transform",
    request_body = InputEvent,
    responses(
        (status = 200, description = "Transform after the event", body = TransformResponse),
    ),
    tag = "Transform"
)]
pub async fn handle_transform_event(
    State(session): State<Arc<SessionService>>,
    JsonExtractor(event): JsonExtractor<InputEvent>,
) -> Json<TransformResponse> {
    Json(session.apply_event(event.into()).await.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_event_wire_format() {
        let zoom: InputEvent = serde_json::from_str(r#"{"type":"zoom","delta":-100}"#).unwrap();
        assert!(matches!(zoom, InputEvent::Zoom { delta } if delta == -100.0));

        let pan: InputEvent = serde_json::from_str(r#"{"type":"pan","dx":3,"dy":-1.5}"#).unwrap();
        assert!(matches!(pan, InputEvent::Pan { dx, dy } if dx == 3.0 && dy == -1.5));

        let press: InputEvent = serde_json::from_str(r#"{"type":"press"}"#).unwrap();
        assert!(matches!(press, InputEvent::Press));
    }

    #[test]
    fn test_unknown_event_rejected() {
        assert!(serde_json::from_str::<InputEvent>(r#"{"type":"spin"}"#).is_err());
    }
}
