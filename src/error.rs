use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use grid_resample::ResampleError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Failures of a single decode, resample, render or export operation.
///
/// None of these are retried. The session keeps its last good buffer when
/// one is returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Cannot allocate {width}x{height} surface")]
    Surface { width: u32, height: u32 },

    #[error("No source image loaded")]
    EmptyInput,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Render task failed: {0}")]
    Task(String),
}

impl From<ResampleError> for PipelineError {
    fn from(e: ResampleError) -> Self {
        match e {
            ResampleError::Surface { width, height } => PipelineError::Surface { width, height },
            ResampleError::InvalidSource { .. } => PipelineError::Decode(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Pipeline(e) => {
                let status = match e {
                    PipelineError::EmptyInput => StatusCode::CONFLICT,
                    PipelineError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    PipelineError::Surface { .. } => StatusCode::BAD_REQUEST,
                    PipelineError::PngEncode(_) | PipelineError::Task(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.to_string())
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
