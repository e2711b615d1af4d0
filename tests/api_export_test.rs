//! Integration tests for CSV and preview exports.

mod common;

use axum::http::StatusCode;
use common::fixtures::two_by_two_request;
use common::{assert_api_error, assert_csv, assert_png, assert_status, TestApp};
use pretty_assertions::assert_eq;
use serde_json::json;
use stitch_quant::Rgb;
use stitchgrid::imaging::{decode_png, pixel_at};

#[tokio::test]
async fn test_grid_csv() {
    let app = TestApp::new();
    let id = app.create_pattern(&two_by_two_request(2)).await;

    let response = app.get(&format!("/api/patterns/{id}/grid.csv")).await;
    assert_csv(&response);
    assert_eq!(response.text(), "01,02\n01,02\n");
    assert_eq!(
        response.header("content-disposition"),
        Some(format!("attachment; filename=\"{id}-grid.csv\"").as_str())
    );
}

#[tokio::test]
async fn test_legend_csv() {
    let app = TestApp::new();
    let id = app.create_pattern(&two_by_two_request(2)).await;

    let response = app.get(&format!("/api/patterns/{id}/legend.csv")).await;
    assert_csv(&response);
    assert_eq!(
        response.text(),
        "code,color,count\n01,#000000,2\n02,#FF8080,2\n"
    );
}

#[tokio::test]
async fn test_preview_png_defaults() {
    let app = TestApp::new();
    let id = app.create_pattern(&two_by_two_request(2)).await;

    let response = app.get(&format!("/api/patterns/{id}/preview.png")).await;
    assert_png(&response);

    // 2 cells of 12px plus 3 grid lines in each direction
    let image = decode_png(response.bytes(), u64::MAX).unwrap();
    assert_eq!(image.dimensions(), (27, 27));
    assert_eq!(pixel_at(&image, 5, 5), Rgb::new(0, 0, 0));
    assert_eq!(pixel_at(&image, 20, 20), Rgb::new(255, 128, 128));
}

#[tokio::test]
async fn test_preview_png_options() {
    let app = TestApp::new();
    let id = app.create_pattern(&two_by_two_request(2)).await;

    let response = app
        .get(&format!(
            "/api/patterns/{id}/preview.png?cell_size=3&grid_lines=false"
        ))
        .await;
    assert_png(&response);

    let image = decode_png(response.bytes(), u64::MAX).unwrap();
    assert_eq!(image.dimensions(), (6, 6));
    assert_eq!(pixel_at(&image, 0, 0), Rgb::new(0, 0, 0));
    assert_eq!(pixel_at(&image, 3, 5), Rgb::new(255, 128, 128));
}

#[tokio::test]
async fn test_preview_rejections() {
    let app = TestApp::new();
    let id = app.create_pattern(&two_by_two_request(2)).await;

    let response = app
        .get(&format!("/api/patterns/{id}/preview.png?cell_size=0"))
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .get(&format!("/api/patterns/{id}/preview.png?cell_size=100000"))
        .await;
    assert_api_error(&response, StatusCode::PAYLOAD_TOO_LARGE);

    let response = app
        .get(&format!("/api/patterns/{id}/preview.png?grid_lines=maybe"))
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);

    // Nothing to draw for an empty grid
    let empty = app
        .create_pattern(&json!({"rows": 0, "cols": 0, "pixels": []}))
        .await;
    let response = app
        .get(&format!("/api/patterns/{empty}/preview.png"))
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_exports_for_unknown_id() {
    let app = TestApp::new();

    for suffix in ["grid.csv", "legend.csv", "preview.png"] {
        let response = app
            .get(&format!("/api/patterns/ffffffffffffffff/{suffix}"))
            .await;
        assert_api_error(&response, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_responses_carry_nosniff() {
    let app = TestApp::new();
    let id = app.create_pattern(&two_by_two_request(2)).await;

    let response = app.get(&format!("/api/patterns/{id}/grid.csv")).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
}
