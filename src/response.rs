//! Responses and response specifications
//!
//! [`ApiResponse`] keeps the whole HTTP answer so that expected failures
//! (400, 404) can be inspected exactly like successes. A [`ResponseSpec`]
//! declares the status and JSON field values a response must carry and
//! reports every mismatch at once.
//!
//! JSON fields are addressed with dotted paths: `success`, `data.error`,
//! `data.tags.0`.

use crate::error::{ApiError, ApiResult, ExpectationFailure};
use crate::logging::{log_info, log_warn};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: Method,
    url: String,
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    json: Option<Value>,
}

impl ApiResponse {
    /// Read status, headers and body of `response`
    pub(crate) async fn read(method: Method, response: reqwest::Response) -> ApiResult<Self> {
        let url = response.url().to_string();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| {
            ApiError::request_failed(
                format!("Failed to read body of {method} {url}: {e}"),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self::from_parts(method, url, status, headers, body))
    }

    /// Assemble a response from already-read parts
    pub fn from_parts(
        method: Method,
        url: impl Into<String>,
        status: StatusCode,
        headers: HeaderMap,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        let json = serde_json::from_str(&body).ok();
        Self {
            method,
            url: url.into(),
            status,
            headers,
            body,
            json,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The body as JSON
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ResponseParsingError`] if the body is not JSON.
    pub fn json(&self) -> ApiResult<&Value> {
        self.json.as_ref().ok_or_else(|| {
            ApiError::response_parsing_error(format!(
                "{} {} returned a non-JSON body: {}",
                self.method, self.url, self.body
            ))
        })
    }

    /// Value at a dotted `path`, `None` if the body is not JSON or the path is absent
    pub fn json_path(&self, path: &str) -> Option<&Value> {
        self.json.as_ref().and_then(|root| lookup(root, path))
    }

    /// String value at `path`, `None` if absent or not a string
    pub fn string_at(&self, path: &str) -> Option<&str> {
        self.json_path(path).and_then(Value::as_str)
    }

    /// Deserialize the body into `T`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ResponseParsingError`] if the body does not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ApiError::response_parsing_error(format!(
                "{} {} body does not match {}: {e}",
                self.method,
                self.url,
                std::any::type_name::<T>()
            ))
        })
    }

    /// Log status, headers and pretty-printed body, returning `self` for chaining
    pub fn pretty_peek(&self) -> &Self {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| format!("{name}: {}", value.to_str().unwrap_or("<binary>")))
            .collect::<Vec<_>>()
            .join(", ");
        let body = match &self.json {
            Some(json) => serde_json::to_string_pretty(json).unwrap_or_else(|_| self.body.clone()),
            None => self.body.clone(),
        };

        log_info!(
            method = %self.method,
            url = %self.url,
            status = self.status.as_u16(),
            headers = %headers,
            body = %body,
            "Response"
        );
        self
    }

    /// Verify this response against `spec`, returning `self` for chaining
    pub fn assert_spec(&self, spec: &ResponseSpec) -> ApiResult<&Self> {
        spec.verify(self)?;
        Ok(self)
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Expectation on a single JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Equal to the given JSON value
    Is(Value),
    /// Absent or JSON `null`
    IsNull,
    /// Present and not `null`
    NotNull,
    /// Equal to any of the given values
    OneOf(Vec<Value>),
}

impl Matcher {
    pub fn is(value: impl Into<Value>) -> Self {
        Self::Is(value.into())
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, actual: Option<&Value>) -> bool {
        match self {
            Self::Is(expected) => actual == Some(expected),
            Self::IsNull => matches!(actual, None | Some(Value::Null)),
            Self::NotNull => !matches!(actual, None | Some(Value::Null)),
            Self::OneOf(expected) => actual.is_some_and(|value| expected.contains(value)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Is(expected) => expected.to_string(),
            Self::IsNull => "null".to_string(),
            Self::NotNull => "a non-null value".to_string(),
            Self::OneOf(expected) => format!(
                "one of [{}]",
                expected
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Expected status and body values of a response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSpec {
    status: Option<u16>,
    body: Vec<(String, Matcher)>,
}

impl ResponseSpec {
    pub fn expected_status(&self) -> Option<u16> {
        self.status
    }

    pub fn body_expectations(&self) -> &[(String, Matcher)] {
        &self.body
    }

    /// Every expectation that `response` violates
    pub fn failures(&self, response: &ApiResponse) -> Vec<ExpectationFailure> {
        let mut failures = Vec::new();

        if let Some(expected) = self.status {
            if response.status_code() != expected {
                failures.push(ExpectationFailure {
                    path: "status".to_string(),
                    expected: expected.to_string(),
                    actual: response.status_code().to_string(),
                });
            }
        }

        if self.body.is_empty() {
            return failures;
        }

        if response.json.is_none() {
            for (path, matcher) in &self.body {
                failures.push(ExpectationFailure {
                    path: path.clone(),
                    expected: matcher.describe(),
                    actual: "<body is not JSON>".to_string(),
                });
            }
            return failures;
        }

        for (path, matcher) in &self.body {
            let actual = response.json_path(path);
            if !matcher.matches(actual) {
                failures.push(ExpectationFailure {
                    path: path.clone(),
                    expected: matcher.describe(),
                    actual: actual.map_or_else(|| "<absent>".to_string(), Value::to_string),
                });
            }
        }
        failures
    }

    /// Check `response` against every expectation
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ExpectationFailed`] listing all mismatches.
    pub fn verify(&self, response: &ApiResponse) -> ApiResult<()> {
        let failures = self.failures(response);
        if failures.is_empty() {
            return Ok(());
        }

        log_warn!(
            url = %response.url(),
            body = %response.body(),
            "Response body of failed check"
        );
        Err(ApiError::expectation_failed(
            response.method().as_str(),
            response.url(),
            response.status_code(),
            failures,
        ))
    }
}

/// Composes [`ResponseSpec`]s; a later status replaces an earlier one and
/// body expectations accumulate
#[derive(Debug, Default)]
pub struct ResponseSpecBuilder {
    spec: ResponseSpec,
}

impl ResponseSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_status_code(mut self, status: u16) -> Self {
        self.spec.status = Some(status);
        self
    }

    pub fn expect_body(mut self, path: impl Into<String>, matcher: Matcher) -> Self {
        self.spec.body.push((path.into(), matcher));
        self
    }

    pub fn add_response_spec(mut self, other: &ResponseSpec) -> Self {
        if let Some(status) = other.status {
            self.spec.status = Some(status);
        }
        self.spec.body.extend(other.body.iter().cloned());
        self
    }

    pub fn build(self) -> ResponseSpec {
        self.spec
    }
}
