//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert a JSON error body carrying `expected` as its status field
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    assert!(
        json["error"].as_str().is_some_and(|e| !e.is_empty()),
        "Expected an error message, got {json}"
    );
}

/// Assert every pixel of `img` inside the `side` x `side` block at (`bx`, `by`) equals `rgba`
pub fn assert_solid_block(img: &image::RgbaImage, bx: u32, by: u32, side: u32, rgba: [u8; 4]) {
    for y in by * side..(by + 1) * side {
        for x in bx * side..(bx + 1) * side {
            assert_eq!(
                img.get_pixel(x, y).0,
                rgba,
                "pixel ({x}, {y}) of block ({bx}, {by})"
            );
        }
    }
}
