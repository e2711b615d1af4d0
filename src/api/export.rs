use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::{grid_csv, legend_csv, render_png, PreviewOptions};
use crate::services::{PatternStore, StoredPattern};

const CSV: &str = "text/csv; charset=utf-8";

/// Query parameters for the preview image
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreviewQuery {
    /// Edge length of one stitch in pixels
    pub cell_size: Option<u32>,
    /// Draw separating lines between stitches
    pub grid_lines: Option<bool>,
}

async fn lookup(store: &PatternStore, id: &str) -> Result<StoredPattern, ApiError> {
    store.get(id).await.ok_or(ApiError::NotFound)
}

fn attachment(id: &str, suffix: &str) -> String {
    format!("attachment; filename=\"{id}-{suffix}\"")
}

/// Download the stitch grid as CSV
#[utoipa::path(
    get,
    path = "/api/patterns/{id}/grid.csv",
    params(("id" = String, Path, description = "Pattern id")),
    responses(
        (status = 200, description = "One line per grid row", content_type = "text/csv", body = String),
        (status = 404, description = "Unknown or evicted id"),
    ),
    tag = "Export"
)]
pub async fn handle_grid_csv(
    State(store): State<Arc<PatternStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = lookup(&store, &id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, CSV.to_string()),
            (header::CONTENT_DISPOSITION, attachment(&stored.id, "grid.csv")),
        ],
        grid_csv(&stored.pattern),
    ))
}

/// Download the color legend as CSV
#[utoipa::path(
    get,
    path = "/api/patterns/{id}/legend.csv",
    params(("id" = String, Path, description = "Pattern id")),
    responses(
        (status = 200, description = "code,color,count per pattern color", content_type = "text/csv", body = String),
        (status = 404, description = "Unknown or evicted id"),
    ),
    tag = "Export"
)]
pub async fn handle_legend_csv(
    State(store): State<Arc<PatternStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = lookup(&store, &id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, CSV.to_string()),
            (header::CONTENT_DISPOSITION, attachment(&stored.id, "legend.csv")),
        ],
        legend_csv(&stored.pattern),
    ))
}

/// Render a PNG preview of the pattern
#[utoipa::path(
    get,
    path = "/api/patterns/{id}/preview.png",
    params(("id" = String, Path, description = "Pattern id"), PreviewQuery),
    responses(
        (status = 200, description = "PNG preview", content_type = "image/png"),
        (status = 400, description = "Invalid parameters or empty pattern"),
        (status = 404, description = "Unknown or evicted id"),
        (status = 413, description = "Preview exceeds the raster limit"),
    ),
    tag = "Export"
)]
pub async fn handle_preview(
    State(config): State<Arc<AppConfig>>,
    State(store): State<Arc<PatternStore>>,
    Path(id): Path<String>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let stored = lookup(&store, &id).await?;

    let options = PreviewOptions {
        cell_size: query.cell_size.unwrap_or(config.render.cell_size),
        grid_lines: query.grid_lines.unwrap_or(config.render.grid_lines),
    };
    let max_pixels = config.limits.max_render_pixels;

    let pattern = stored.pattern.clone();
    let png_bytes = tokio::task::spawn_blocking(move || render_png(&pattern, &options, max_pixels))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
