use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stitch_quant::{CodeFormat, Pattern};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::services::{ImageRequest, PatternService, PatternStore, PixelRequest, StoredPattern};

/// Request body for building a pattern from raw pixels
#[derive(Debug, Deserialize, ToSchema)]
pub struct PixelPatternRequest {
    pub rows: usize,
    pub cols: usize,
    /// Row-major `[r, g, b]` triples, each channel in 0..=255
    #[schema(value_type = Vec<Vec<i64>>, example = json!([[0, 0, 0], [255, 128, 0]]))]
    pub pixels: Vec<[i64; 3]>,
    /// Upper bound on distinct output colors (server default when omitted)
    #[serde(default)]
    pub max_colors: Option<usize>,
    /// "padded", "numeric" or "prefix:<text>"
    #[serde(default)]
    #[schema(example = "padded")]
    pub code_format: Option<String>,
}

/// Query parameters for building a pattern from an uploaded PNG
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImagePatternQuery {
    /// Grid width in stitches
    pub cols: Option<usize>,
    /// Grid height in stitches (follows the image aspect ratio when omitted)
    pub rows: Option<usize>,
    pub max_colors: Option<usize>,
    /// "padded", "numeric" or "prefix:<text>"
    pub code_format: Option<String>,
}

/// A stored pattern
#[derive(Debug, Serialize, ToSchema)]
pub struct PatternResponse {
    /// Content address, stable for identical patterns
    pub id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// `{grid, colorMap, colorCounts, numColors}`
    #[schema(value_type = Object)]
    pub pattern: Arc<Pattern>,
}

impl From<StoredPattern> for PatternResponse {
    fn from(stored: StoredPattern) -> Self {
        Self {
            id: stored.id,
            created_at: stored.created_at,
            pattern: stored.pattern,
        }
    }
}

pub(crate) fn parse_code_format(raw: Option<String>) -> Result<Option<CodeFormat>, ApiError> {
    raw.map(|s| s.parse::<CodeFormat>())
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

async fn store_pattern(
    store: &PatternStore,
    pattern: Pattern,
) -> Result<(StatusCode, Json<PatternResponse>), ApiError> {
    let stored = store
        .insert(pattern)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(
        id = %stored.id,
        num_colors = stored.pattern.num_colors(),
        "Stored pattern"
    );

    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// Build a pattern from raw pixels
///
/// Quantizes the pixels to at most `max_colors` colors and assigns codes,
/// most frequent color first.
#[utoipa::path(
    post,
    path = "/api/patterns",
    request_body = PixelPatternRequest,
    responses(
        (status = 201, description = "Pattern created", body = PatternResponse),
        (status = 400, description = "Malformed request or invalid pixels"),
    ),
    tag = "Patterns"
)]
pub async fn handle_create_pattern(
    State(service): State<Arc<PatternService>>,
    State(store): State<Arc<PatternStore>>,
    body: Result<Json<PixelPatternRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PatternResponse>), ApiError> {
    let Json(body) = body?;

    let request = PixelRequest {
        rows: body.rows,
        cols: body.cols,
        pixels: body.pixels,
        max_colors: body.max_colors,
        code_format: parse_code_format(body.code_format)?,
    };

    let pattern = tokio::task::spawn_blocking(move || service.from_pixels(&request))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    store_pattern(&store, pattern).await
}

/// Build a pattern from a PNG image
///
/// The image is composited over white, resampled onto a `cols x rows`
/// grid by area averaging, then quantized.
#[utoipa::path(
    post,
    path = "/api/patterns/image",
    request_body(content = Vec<u8>, description = "PNG image", content_type = "image/png"),
    params(ImagePatternQuery),
    responses(
        (status = 201, description = "Pattern created", body = PatternResponse),
        (status = 400, description = "Invalid parameters or undecodable image"),
        (status = 413, description = "Upload or decoded image too large"),
    ),
    tag = "Patterns"
)]
pub async fn handle_create_from_image(
    State(service): State<Arc<PatternService>>,
    State(store): State<Arc<PatternStore>>,
    query: Result<Query<ImagePatternQuery>, QueryRejection>,
    body: Bytes,
) -> Result<(StatusCode, Json<PatternResponse>), ApiError> {
    let Query(query) = query?;

    let request = ImageRequest {
        cols: query.cols,
        rows: query.rows,
        max_colors: query.max_colors,
        code_format: parse_code_format(query.code_format)?,
    };

    tracing::debug!(bytes = body.len(), ?request, "Image upload received");

    let pattern = tokio::task::spawn_blocking(move || service.from_png(&body, &request))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    store_pattern(&store, pattern).await
}

/// Fetch a stored pattern
#[utoipa::path(
    get,
    path = "/api/patterns/{id}",
    params(("id" = String, Path, description = "Pattern id")),
    responses(
        (status = 200, description = "Stored pattern", body = PatternResponse),
        (status = 404, description = "Unknown or evicted id"),
    ),
    tag = "Patterns"
)]
pub async fn handle_get_pattern(
    State(store): State<Arc<PatternStore>>,
    Path(id): Path<String>,
) -> Result<Json<PatternResponse>, ApiError> {
    let stored = store.get(&id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(stored.into()))
}
