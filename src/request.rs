//! Request specifications
//!
//! A [`RequestSpec`] is a reusable request template: base URL, headers, form
//! fields and multipart parts. Specs are composed with [`RequestSpecBuilder`]
//! and sent against a path template such as `/image/{imageHash}`.
//!
//! ```rust
//! use imgur_contract::request::{build_auth_headers, MultiPartSpec, RequestSpecBuilder};
//!
//! # fn example() -> imgur_contract::ApiResult<()> {
//! let with_auth = RequestSpecBuilder::new()
//!     .base_url("https://api.imgur.com/3")
//!     .add_headers(build_auth_headers("token")?)
//!     .build();
//!
//! let base64_upload = RequestSpecBuilder::new()
//!     .add_request_spec(&with_auth)
//!     .add_form_param("type", "base64")
//!     .add_multipart(MultiPartSpec::text("image", "aGVsbG8="))
//!     .build();
//! assert_eq!(base64_upload.form_param("type"), Some("base64"));
//! # Ok(())
//! # }
//! ```

use crate::error::{ApiError, ApiResult};
use crate::logging::{log_debug, log_error, log_info};
use crate::response::ApiResponse;
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::path::Path;

/// Everything but RFC 3986 unreserved characters is escaped
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Build the headers every authenticated call carries
///
/// # Errors
///
/// Returns [`ApiError::ConfigurationError`] if the token is blank or cannot
/// be used as a header value.
pub fn build_auth_headers(access_token: &str) -> ApiResult<HeaderMap> {
    if access_token.trim().is_empty() {
        return Err(ApiError::configuration_error("Access token is empty"));
    }

    let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|e| ApiError::configuration_error(format!("Invalid access token format: {e}")))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Substitute `{name}` placeholders in `template` with `params`, in order
///
/// Each value is percent-encoded as a single path segment.
///
/// # Errors
///
/// Returns [`ApiError::ConfigurationError`] when the number of placeholders
/// and the number of values differ.
pub fn expand_path(template: &str, params: &[&str]) -> ApiResult<String> {
    let placeholders = PLACEHOLDER.find_iter(template).count();
    if placeholders != params.len() {
        return Err(ApiError::configuration_error(format!(
            "Path template {template} has {placeholders} placeholder(s) but {} value(s) were given",
            params.len()
        )));
    }

    let mut values = params.iter();
    let expanded = PLACEHOLDER.replace_all(template, |_: &regex::Captures<'_>| {
        values
            .next()
            .map(|value| encode_path_segment(value))
            .unwrap_or_default()
    });
    Ok(expanded.into_owned())
}

fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Content of one multipart part
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    /// Binary file content
    File {
        data: Vec<u8>,
        file_name: String,
        mime_type: String,
    },
    /// Plain text value
    Text(String),
}

/// One named part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPartSpec {
    pub control_name: String,
    pub body: PartBody,
}

impl MultiPartSpec {
    /// A binary part, sent as `application/octet-stream`
    pub fn file(
        control_name: impl Into<String>,
        data: Vec<u8>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            control_name: control_name.into(),
            body: PartBody::File {
                data,
                file_name: file_name.into(),
                mime_type: "application/octet-stream".to_string(),
            },
        }
    }

    /// A binary part read from disk, named after the file
    pub fn from_path(control_name: impl Into<String>, path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| ApiError::fixture_error(path, e))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::file(control_name, data, file_name))
    }

    /// A text part
    pub fn text(control_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            control_name: control_name.into(),
            body: PartBody::Text(value.into()),
        }
    }

    /// Override the MIME type of a file part; text parts are unchanged
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        if let PartBody::File { mime_type, .. } = &mut self.body {
            *mime_type = mime.into();
        }
        self
    }

    fn to_part(&self) -> ApiResult<Part> {
        match &self.body {
            PartBody::File {
                data,
                file_name,
                mime_type,
            } => Part::bytes(data.clone())
                .file_name(file_name.clone())
                .mime_str(mime_type)
                .map_err(|e| {
                    ApiError::configuration_error(format!(
                        "Invalid MIME type {mime_type} for part {}: {e}",
                        self.control_name
                    ))
                }),
            PartBody::Text(value) => Ok(Part::text(value.clone())),
        }
    }
}

/// A reusable, immutable request template
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    base_url: Option<String>,
    headers: HeaderMap,
    form_params: Vec<(String, String)>,
    multiparts: Vec<MultiPartSpec>,
    log_method_and_uri: bool,
}

impl RequestSpec {
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn form_params(&self) -> &[(String, String)] {
        &self.form_params
    }

    /// Value of the form param `name`, if set
    pub fn form_param(&self, name: &str) -> Option<&str> {
        self.form_params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn multiparts(&self) -> &[MultiPartSpec] {
        &self.multiparts
    }

    pub fn logs_method_and_uri(&self) -> bool {
        self.log_method_and_uri
    }

    /// Copy of this spec with `name` set to `value`, replacing any earlier value
    ///
    /// RestAssured's `formParam` would send both values of a repeated name;
    /// here the body only ever carries the last one.
    pub fn with_form_param(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut spec = self.clone();
        spec.set_form_param(name.into(), value.into());
        spec
    }

    /// Copy of this spec with one more multipart part
    pub fn with_multipart(&self, part: MultiPartSpec) -> Self {
        let mut spec = self.clone();
        spec.multiparts.push(part);
        spec
    }

    /// Copy of this spec that logs method and URI at info level when sent
    pub fn logging_method_and_uri(&self) -> Self {
        let mut spec = self.clone();
        spec.log_method_and_uri = true;
        spec
    }

    fn set_form_param(&mut self, name: String, value: String) {
        match self.form_params.iter_mut().find(|(key, _)| *key == name) {
            Some(existing) => existing.1 = value,
            None => self.form_params.push((name, value)),
        }
    }

    /// Full URL for `template` expanded with `params`
    pub fn url_for(&self, template: &str, params: &[&str]) -> ApiResult<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| ApiError::configuration_error("Request spec has no base URL"))?;
        let path = expand_path(template, params)?;
        Ok(format!("{}{}", base.trim_end_matches('/'), path))
    }

    fn multipart_form(&self) -> ApiResult<Form> {
        let mut form = Form::new();
        for (name, value) in &self.form_params {
            form = form.text(name.clone(), value.clone());
        }
        for part in &self.multiparts {
            form = form.part(part.control_name.clone(), part.to_part()?);
        }
        Ok(form)
    }

    /// Send this spec as `method` to `template` expanded with `params`
    ///
    /// Any status code is returned as a response; judging it is the job of a
    /// [`ResponseSpec`](crate::response::ResponseSpec).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigurationError`] for a missing base URL or a bad
    /// template, and [`ApiError::RequestFailed`] when the exchange fails.
    pub async fn send(
        &self,
        client: &reqwest::Client,
        method: Method,
        template: &str,
        params: &[&str],
    ) -> ApiResult<ApiResponse> {
        let url = self.url_for(template, params)?;

        if self.log_method_and_uri {
            log_info!(method = %method, uri = %url, "Request method and URI");
        }
        log_debug!(
            method = %method,
            uri = %url,
            form_params = self.form_params.len(),
            multiparts = self.multiparts.len(),
            "Sending request"
        );

        let mut builder = client
            .request(method.clone(), &url)
            .headers(self.headers.clone());
        if !self.multiparts.is_empty() {
            builder = builder.multipart(self.multipart_form()?);
        } else if !self.form_params.is_empty() {
            builder = builder.form(&self.form_params);
        }

        let response = builder.send().await.map_err(|e| {
            log_error!(
                method = %method,
                uri = %url,
                error = %e,
                "HTTP request failed"
            );
            ApiError::request_failed(format!("{method} {url} failed: {e}"), Some(Box::new(e)))
        })?;

        ApiResponse::read(method, response).await
    }
}

/// Composes [`RequestSpec`]s; later settings win
#[derive(Debug, Default)]
pub struct RequestSpecBuilder {
    spec: RequestSpec,
}

impl RequestSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.spec.base_url = Some(base_url.into());
        self
    }

    /// Merge every setting of `other` into this builder
    pub fn add_request_spec(mut self, other: &RequestSpec) -> Self {
        if let Some(base_url) = &other.base_url {
            self.spec.base_url = Some(base_url.clone());
        }
        self = self.add_headers(other.headers.clone());
        for (name, value) in &other.form_params {
            self.spec.set_form_param(name.clone(), value.clone());
        }
        self.spec.multiparts.extend(other.multiparts.iter().cloned());
        self.spec.log_method_and_uri |= other.log_method_and_uri;
        self
    }

    pub fn add_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.spec.headers.insert(name, value);
        self
    }

    pub fn add_headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in headers.iter() {
            self.spec.headers.insert(name.clone(), value.clone());
        }
        self
    }

    pub fn add_form_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.set_form_param(name.into(), value.into());
        self
    }

    pub fn add_multipart(mut self, part: MultiPartSpec) -> Self {
        self.spec.multiparts.push(part);
        self
    }

    pub fn build(self) -> RequestSpec {
        self.spec
    }
}
