//! Test helper utilities for imgur-contract integration tests
//!
//! Provides a wiremock server that answers like the image API for the calls
//! the scenarios make, plus client and logging setup.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use imgur_contract::{ImgurClient, ImgurConfig};
use multipart::server::Multipart;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::Once;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_USERNAME: &str = "contract-user";
pub const EXISTING_IMAGE_HASH: &str = "JoZqQmY";
pub const UPLOADED_IMAGE_ID: &str = "aBcD123";
pub const UPLOADED_DELETEHASH: &str = "dElEtEhAsH";

static LOGGING: Once = Once::new();

/// Install a fmt subscriber honoring `RUST_LOG`, once per test binary
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn fixture_image_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test.jpg")
}

pub fn create_test_config(server: &MockServer) -> ImgurConfig {
    ImgurConfig {
        base_url: format!("{}/3", server.uri()),
        access_token: Some(TEST_TOKEN.to_string()),
        username: TEST_USERNAME.to_string(),
        existing_image_hash: EXISTING_IMAGE_HASH.to_string(),
        fixture_image: fixture_image_path(),
        request_timeout: Some(std::time::Duration::from_secs(5)),
    }
}

pub fn create_test_client(server: &MockServer) -> ImgurClient {
    ImgurClient::new(create_test_config(server)).expect("Failed to create test client")
}

fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

// ============================================================================
// Request body parsing
// ============================================================================

/// One field of a submitted form
#[derive(Debug, Clone)]
pub struct FormField {
    pub value: Vec<u8>,
    pub file_name: Option<String>,
}

impl FormField {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

fn boundary_of(request: &Request) -> Option<String> {
    let content_type = request.headers.get("content-type")?.to_str().ok()?;
    let (_, boundary) = content_type.split_once("boundary=")?;
    Some(boundary.trim_matches('"').to_string())
}

/// Fields of a `multipart/form-data` body; empty for any other body
pub fn parse_form(request: &Request) -> HashMap<String, FormField> {
    let mut fields = HashMap::new();
    let Some(boundary) = boundary_of(request) else {
        return fields;
    };

    let mut multipart = Multipart::with_body(Cursor::new(request.body.as_slice()), boundary);
    while let Ok(Some(mut field)) = multipart.read_entry() {
        let mut value = Vec::new();
        if field.data.read_to_end(&mut value).is_err() {
            break;
        }
        fields.insert(
            field.headers.name.to_string(),
            FormField {
                value,
                file_name: field.headers.filename.clone(),
            },
        );
    }
    fields
}

// ============================================================================
// Fake upload endpoint
// ============================================================================

fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xD8])
}

pub fn bad_request_body() -> Value {
    json!({
        "data": {
            "error": "Bad Request",
            "request": "/3/upload",
            "method": "POST"
        },
        "success": false,
        "status": 400
    })
}

pub fn image_body(id: &str, title: Value, name: Value) -> Value {
    json!({
        "data": {
            "id": id,
            "deletehash": UPLOADED_DELETEHASH,
            "account_id": null,
            "account_url": null,
            "ad_type": null,
            "ad_url": null,
            "title": title,
            "description": null,
            "name": name,
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
            "link": format!("https://i.imgur.com/{id}.jpg"),
            "tags": [],
            "datetime": 1_700_000_000,
            "mp4": "",
            "hls": "",
            "edited": "0"
        },
        "success": true,
        "status": 200
    })
}

/// Answers `POST /upload` the way the image API does
///
/// - no `image` field: 400
/// - `type=base64`: the value is decoded before the JPEG check
/// - anything else: the raw value must be JPEG bytes
/// - an empty `title` is stored as null, an empty `name` as `""`
pub struct FakeUpload;

impl Respond for FakeUpload {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let fields = parse_form(request);
        let Some(image) = fields.get("image") else {
            return ResponseTemplate::new(400).set_body_json(bad_request_body());
        };

        let declared = fields.get("type").map(FormField::text);
        let bytes = match declared.as_deref() {
            Some("base64") => match STANDARD.decode(image.text().trim()) {
                Ok(decoded) => decoded,
                Err(_) => return ResponseTemplate::new(400).set_body_json(bad_request_body()),
            },
            _ => image.value.clone(),
        };
        if !is_jpeg(&bytes) {
            return ResponseTemplate::new(400).set_body_json(bad_request_body());
        }

        let title = match fields.get("title").map(FormField::text) {
            Some(title) if !title.is_empty() => Value::String(title),
            _ => Value::Null,
        };
        let name = fields
            .get("name")
            .map(|field| Value::String(field.text()))
            .unwrap_or(Value::Null);

        ResponseTemplate::new(200).set_body_json(image_body(UPLOADED_IMAGE_ID, title, name))
    }
}

// ============================================================================
// Mock mounting
// ============================================================================

pub async fn mount_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/3/upload"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(FakeUpload)
        .mount(server)
        .await;
}

/// `DELETE` of the uploaded image, expected exactly `times` times
pub async fn mount_delete(server: &MockServer, times: u64) {
    Mock::given(method("DELETE"))
        .and(path(format!("/3/image/{UPLOADED_DELETEHASH}")))
        .and(header("authorization", bearer().as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": true, "success": true, "status": 200})),
        )
        .expect(times)
        .named("delete uploaded image")
        .mount(server)
        .await;
}

pub async fn mount_get_image(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/3/image/{EXISTING_IMAGE_HASH}")))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body(
            EXISTING_IMAGE_HASH,
            Value::Null,
            Value::String(String::new()),
        )))
        .mount(server)
        .await;
}

pub async fn mount_favorite(server: &MockServer, state: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/3/image/{EXISTING_IMAGE_HASH}/favorite")))
        .and(header("authorization", bearer().as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": state, "success": true, "status": 200})),
        )
        .mount(server)
        .await;
}

pub async fn mount_unknown_favorite(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/3/image/test/favorite"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "data": {
                "error": "Unable to find an image with the id, test",
                "request": "/3/image/test/favorite",
                "method": "POST"
            },
            "success": false,
            "status": 404
        })))
        .mount(server)
        .await;
}

pub async fn mount_account(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/3/account/{TEST_USERNAME}")))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 12345,
                "url": TEST_USERNAME,
                "bio": null,
                "avatar": null,
                "reputation": 0,
                "reputation_name": "Neutral",
                "created": 1_600_000_000,
                "pro_expiration": false,
                "is_blocked": false
            },
            "success": true,
            "status": 200
        })))
        .mount(server)
        .await;
}

/// A server answering every endpoint the scenarios use
pub async fn start_fake_imgur() -> MockServer {
    init_logging();
    let server = MockServer::start().await;
    mount_upload(&server).await;
    mount_get_image(&server).await;
    mount_favorite(&server, "favorited").await;
    mount_unknown_favorite(&server).await;
    mount_account(&server).await;
    server
}
