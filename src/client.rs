//! Image API client
//!
//! [`ImgurClient`] owns the HTTP client and the authenticated base request
//! spec, and exposes one method per endpoint. Every method returns the raw
//! [`ApiResponse`] whatever its status, so callers decide which outcome is
//! the expected one.

use crate::config::ImgurConfig;
use crate::error::{ApiError, ApiResult};
use crate::logging::log_debug;
use crate::request::{build_auth_headers, RequestSpec, RequestSpecBuilder};
use crate::response::ApiResponse;
use crate::upload::ImageUpload;
use reqwest::Method;

/// Endpoint path templates, relative to the API root
pub mod endpoints {
    pub const ACCOUNT: &str = "/account/{username}";
    pub const UPLOAD: &str = "/upload";
    pub const IMAGE: &str = "/image/{imageHash}";
    pub const IMAGE_FAVORITE: &str = "/image/{imageHash}/favorite";
}

/// Client for the image API
#[derive(Debug, Clone)]
pub struct ImgurClient {
    http: reqwest::Client,
    config: ImgurConfig,
    with_auth: RequestSpec,
}

impl ImgurClient {
    /// Create a client from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigurationError`] if:
    /// - Configuration validation fails
    /// - The access token is not a valid header value
    /// - HTTP client initialization fails
    pub fn new(config: ImgurConfig) -> ApiResult<Self> {
        config.validate()?;

        let headers = build_auth_headers(config.access_token()?)?;
        let with_auth = RequestSpecBuilder::new()
            .base_url(config.base_url.clone())
            .add_headers(headers)
            .build();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            ApiError::configuration_error(format!("Failed to build HTTP client: {e}"))
        })?;

        log_debug!(
            base_url = %config.base_url,
            request_timeout = ?config.request_timeout,
            "Imgur client initialized"
        );

        Ok(Self {
            http,
            config,
            with_auth,
        })
    }

    /// Create a client from `IMGUR_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ImgurConfig::from_env()?)
    }

    pub fn config(&self) -> &ImgurConfig {
        &self.config
    }

    /// Base URL plus authentication headers, shared by every call
    pub fn request_spec_with_auth(&self) -> &RequestSpec {
        &self.with_auth
    }

    /// Send any request spec through this client's HTTP connection pool
    pub async fn send(
        &self,
        spec: &RequestSpec,
        method: Method,
        template: &str,
        params: &[&str],
    ) -> ApiResult<ApiResponse> {
        spec.send(&self.http, method, template, params).await
    }

    /// `GET /account/{username}`
    pub async fn get_account(&self, username: &str) -> ApiResult<ApiResponse> {
        self.send(&self.with_auth, Method::GET, endpoints::ACCOUNT, &[username])
            .await
    }

    /// `POST /upload`
    pub async fn upload(&self, upload: &ImageUpload) -> ApiResult<ApiResponse> {
        let spec = upload.to_request_spec(&self.with_auth);
        self.send(&spec, Method::POST, endpoints::UPLOAD, &[]).await
    }

    /// `GET /image/{imageHash}`
    pub async fn get_image(&self, image_hash: &str) -> ApiResult<ApiResponse> {
        self.send(&self.with_auth, Method::GET, endpoints::IMAGE, &[image_hash])
            .await
    }

    /// `POST /image/{imageHash}/favorite`
    pub async fn toggle_favorite(&self, image_hash: &str) -> ApiResult<ApiResponse> {
        self.send(
            &self.with_auth,
            Method::POST,
            endpoints::IMAGE_FAVORITE,
            &[image_hash],
        )
        .await
    }

    /// `DELETE /image/{imageHash}`; accepts an image id or a deletehash
    pub async fn delete_image(&self, image_hash: &str) -> ApiResult<ApiResponse> {
        self.send(
            &self.with_auth,
            Method::DELETE,
            endpoints::IMAGE,
            &[image_hash],
        )
        .await
    }
}
