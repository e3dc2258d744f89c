//! Response data-transfer objects
//!
//! Every payload the API returns is wrapped in the same envelope:
//!
//! ```json
//! { "status": 200, "success": true, "data": { ... } }
//! ```
//!
//! Known fields map 1:1 to struct fields. Keys the structs do not know are
//! kept in `additional_properties` instead of being rejected, and fields that
//! are absent stay absent when serialized again.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `{status, success, data}` envelope around every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

/// Response of `POST /upload` and `GET /image/{imageHash}`
pub type PostImageResponse = ApiEnvelope<ImageData>;

/// Response of `GET /account/{username}`
pub type AccountResponse = ApiEnvelope<AccountData>;

/// Response of `POST /image/{imageHash}/favorite`
pub type FavoriteResponse = ApiEnvelope<String>;

/// Response of any failed call
pub type ErrorResponse = ApiEnvelope<ErrorData>;

/// Image resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Secret needed to delete an anonymously uploaded image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletehash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// MIME type, e.g. `image/jpeg`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_gallery: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_most_viral: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sound: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Value>>,
    /// Upload time, seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

/// Account resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// `false`, or the expiry timestamp of a pro subscription
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_expiration: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

/// `data` of a failed call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    /// Either a message such as `"Bad Request"` or an object with details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

impl ErrorData {
    /// The error message, whether given as a string or as `{"message": ...}`
    pub fn message(&self) -> Option<&str> {
        match self.error.as_ref()? {
            Value::String(message) => Some(message),
            Value::Object(details) => details.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// State reported by the favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteState {
    Favorited,
    Unfavorited,
}

impl FavoriteState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorited => "favorited",
            Self::Unfavorited => "unfavorited",
        }
    }

    /// Parse the `data` string of a favorite response
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "favorited" => Some(Self::Favorited),
            "unfavorited" => Some(Self::Unfavorited),
            _ => None,
        }
    }
}

impl std::fmt::Display for FavoriteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
