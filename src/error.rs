use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stitch_quant::QuantizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Pattern not found")]
    NotFound,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QuantizeError> for ApiError {
    fn from(e: QuantizeError) -> Self {
        ApiError::Pipeline(PipelineError::Quantize(e))
    }
}

impl From<ImageError> for ApiError {
    fn from(e: ImageError) -> Self {
        ApiError::Pipeline(PipelineError::Image(e))
    }
}

impl ApiError {
    /// Extractor rejections are client errors; an oversized body keeps its 413.
    fn rejected(status: StatusCode, text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(text)
        } else {
            ApiError::BadRequest(text)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::rejected(e.status(), e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::rejected(e.status(), e.body_text())
    }
}

/// Failure while turning a request into a pattern.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    Quantize(#[from] QuantizeError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("{field} must be at most {max}, got {value}")]
    OutOfBounds {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u64, height: u64 },

    #[error("Image too large: {pixels} pixels (max {max})")]
    TooLarge { pixels: u64, max: u64 },

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageError {
    fn status(&self) -> StatusCode {
        match self {
            ImageError::Decode(_) | ImageError::UnsupportedDimensions { .. } => {
                StatusCode::BAD_REQUEST
            }
            ImageError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ImageError::Encode(_) | ImageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl PipelineError {
    fn status(&self) -> StatusCode {
        match self {
            PipelineError::Quantize(_) => StatusCode::BAD_REQUEST,
            PipelineError::Image(e) => e.status(),
            PipelineError::OutOfBounds { .. } | PipelineError::Zero { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Pipeline(e) => e.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
