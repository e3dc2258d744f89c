//! Upload payloads
//!
//! The upload endpoint takes the image either as a binary multipart file
//! (`type=jpeg`) or as base64 text (`type=base64`), plus optional `title`,
//! `name` and `description` form fields.

use crate::error::{ApiError, ApiResult};
use crate::logging::log_debug;
use crate::request::{MultiPartSpec, RequestSpec, RequestSpecBuilder};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// Form field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Read an image fixture from disk
pub fn load_image(path: impl AsRef<Path>) -> ApiResult<Vec<u8>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| ApiError::fixture_error(path, e))?;
    log_debug!(
        path = %path.display(),
        size = bytes.len(),
        "Loaded image fixture"
    );
    Ok(bytes)
}

/// Standard base64 text of `bytes`
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// How the image travels in the request body
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// Binary file part
    File { data: Vec<u8>, file_name: String },
    /// Base64 text part
    Base64(String),
}

impl ImagePayload {
    fn to_multipart(&self) -> MultiPartSpec {
        match self {
            Self::File { data, file_name } => {
                MultiPartSpec::file(IMAGE_FIELD, data.clone(), file_name.clone())
            }
            Self::Base64(encoded) => MultiPartSpec::text(IMAGE_FIELD, encoded.clone()),
        }
    }
}

/// Fields of one `POST /upload` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageUpload {
    pub image: Option<ImagePayload>,
    pub image_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ImageUpload {
    /// An upload carrying no fields at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Binary JPEG upload, declared as `type=jpeg`
    pub fn jpeg_file(data: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            image: Some(ImagePayload::File {
                data,
                file_name: file_name.into(),
            }),
            image_type: Some("jpeg".to_string()),
            ..Self::default()
        }
    }

    /// Base64 upload of `bytes`, declared as `type=base64`
    pub fn base64(bytes: &[u8]) -> Self {
        Self {
            image: Some(ImagePayload::Base64(encode_image(bytes))),
            image_type: Some("base64".to_string()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, image_type: impl Into<String>) -> Self {
        self.image_type = Some(image_type.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Request spec for this upload, layered on top of `base`
    ///
    /// Empty strings are sent as given; only unset fields are left out.
    pub fn to_request_spec(&self, base: &RequestSpec) -> RequestSpec {
        let mut builder = RequestSpecBuilder::new().add_request_spec(base);

        let fields = [
            ("type", &self.image_type),
            ("title", &self.title),
            ("name", &self.name),
            ("description", &self.description),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                builder = builder.add_form_param(field, value.clone());
            }
        }
        if let Some(image) = &self.image {
            builder = builder.add_multipart(image.to_multipart());
        }
        builder.build()
    }
}
