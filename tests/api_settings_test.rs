//! Tests for GET/PUT /api/settings.

mod common;

use common::TestApp;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_default_settings() {
    let app = TestApp::new();

    let response = app.get("/api/settings").await;
    common::assert_ok(&response);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body,
        json!({"grid_size": 32, "contrast": 0, "saturation": 0, "show_grid": true})
    );
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::new();

    let response = app.put_json("/api/settings", r#"{"contrast":20}"#).await;
    common::assert_ok(&response);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body,
        json!({"grid_size": 32, "contrast": 20, "saturation": 0, "show_grid": true})
    );
}

#[tokio::test]
async fn test_out_of_range_values_are_clamped() {
    let app = TestApp::new();

    let response = app
        .put_json(
            "/api/settings",
            r#"{"grid_size":4,"contrast":80,"saturation":-90,"show_grid":false}"#,
        )
        .await;
    common::assert_ok(&response);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body,
        json!({"grid_size": 8, "contrast": 50, "saturation": -50, "show_grid": false})
    );

    let response = app.put_json("/api/settings", r#"{"grid_size":500}"#).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["grid_size"], 64);
}

#[tokio::test]
async fn test_configured_defaults() {
    let mut config = TestApp::test_config();
    config.defaults.grid_size = 16;
    config.defaults.show_grid = false;
    let app = TestApp::with_config(config);

    let body: serde_json::Value = app.get("/api/settings").await.json();

    assert_eq!(body["grid_size"], 16);
    assert_eq!(body["show_grid"], false);
}
