//! Test helper utilities for imgur-contract unit tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::config::ImgurConfig;
use crate::response::ApiResponse;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::path::PathBuf;

/// Configuration with a token, pointing at a local base URL that is never contacted
pub fn create_test_config() -> ImgurConfig {
    ImgurConfig {
        base_url: "http://127.0.0.1:9/3".to_string(),
        access_token: Some("test-access-token".to_string()),
        username: "test-user".to_string(),
        fixture_image: fixture_image_path(),
        ..ImgurConfig::default()
    }
}

/// Absolute path of the JPEG fixture shipped with the crate
pub fn fixture_image_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test.jpg")
}

/// Build a response without any network round trip
pub fn create_response(status: u16, body: serde_json::Value) -> ApiResponse {
    create_raw_response(status, &body.to_string())
}

pub fn create_raw_response(status: u16, body: &str) -> ApiResponse {
    ApiResponse::from_parts(
        Method::POST,
        "http://127.0.0.1:9/3/upload",
        StatusCode::from_u16(status).expect("valid status code"),
        HeaderMap::new(),
        body,
    )
}

/// Body of a successful JPEG upload
pub fn upload_success_body() -> serde_json::Value {
    serde_json::json!({
        "status": 200,
        "success": true,
        "data": {
            "id": "aBcD123",
            "deletehash": "dElEtEhAsH",
            "account_id": 42,
            "account_url": null,
            "ad_type": null,
            "ad_url": null,
            "title": null,
            "description": null,
            "name": "",
            "type": "image/jpeg",
            "width": 8,
            "height": 8,
            "size": 159,
            "views": 0,
            "section": null,
            "vote": null,
            "bandwidth": 0,
            "animated": false,
            "favorite": false,
            "in_gallery": false,
            "in_most_viral": false,
            "has_sound": false,
            "is_ad": false,
            "nsfw": null,
            "link": "https://i.imgur.com/aBcD123.jpg",
            "tags": [],
            "datetime": 1_600_000_000,
            "mp4": "",
            "hls": ""
        }
    })
}

/// Body of an upload rejected as a bad request
pub fn bad_request_body() -> serde_json::Value {
    serde_json::json!({
        "status": 400,
        "success": false,
        "data": {
            "error": "Bad Request",
            "request": "/3/upload",
            "method": "POST"
        }
    })
}
