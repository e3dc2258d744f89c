use crate::error::{ApiError, ApiResult};
use crate::logging::log_debug;
use std::path::PathBuf;
use std::time::Duration;

/// Default API root, version segment included.
pub const DEFAULT_BASE_URL: &str = "https://api.imgur.com/3";

/// Hash of a pre-existing public image the read-only checks rely on.
pub const DEFAULT_EXISTING_IMAGE_HASH: &str = "JoZqQmY";

/// Default location of the JPEG uploaded by the upload checks.
pub const DEFAULT_FIXTURE_IMAGE: &str = "tests/fixtures/test.jpg";

/// Configuration for a contract run against the image API
#[derive(Debug, Clone)]
pub struct ImgurConfig {
    /// API root every endpoint path is appended to
    pub base_url: String,
    /// Bearer token sent in the `Authorization` header
    pub access_token: Option<String>,
    /// Account name used by the account checks
    pub username: String,
    /// Hash of an image that already exists on the service
    pub existing_image_hash: String,
    /// JPEG uploaded by the upload checks
    pub fixture_image: PathBuf,
    /// Per-request timeout; `None` waits for the service indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for ImgurConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            username: String::new(),
            existing_image_hash: DEFAULT_EXISTING_IMAGE_HASH.to_string(),
            fixture_image: PathBuf::from(DEFAULT_FIXTURE_IMAGE),
            request_timeout: None,
        }
    }
}

impl ImgurConfig {
    /// Validate the configuration is complete
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigurationError`] if:
    /// - The access token is missing or blank
    /// - The base URL is empty or not an http(s) URL
    pub fn validate(&self) -> ApiResult<()> {
        match self.access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => {
                return Err(ApiError::configuration_error(
                    "Imgur access token is required",
                ))
            }
        }

        if self.base_url.is_empty() {
            return Err(ApiError::configuration_error("Imgur base URL is required"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::configuration_error(format!(
                "Imgur base URL must be http(s): {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Get the access token, failing if none was configured
    pub fn access_token(&self) -> ApiResult<&str> {
        self.access_token
            .as_deref()
            .ok_or_else(|| ApiError::configuration_error("Imgur access token is required"))
    }

    /// Load configuration from environment variables
    /// This is the ONLY method that should access environment variables
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `IMGUR_BASE_URL` | `base_url` |
    /// | `IMGUR_ACCESS_TOKEN` | `access_token` |
    /// | `IMGUR_USERNAME` | `username` |
    /// | `IMGUR_EXISTING_IMAGE_HASH` | `existing_image_hash` |
    /// | `IMGUR_FIXTURE_IMAGE` | `fixture_image` |
    /// | `IMGUR_REQUEST_TIMEOUT_SECS` | `request_timeout` |
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigurationError`] if the timeout is not a whole
    /// number of seconds or the resulting configuration fails [`validate`](Self::validate).
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("IMGUR_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(token) = std::env::var("IMGUR_ACCESS_TOKEN") {
            config.access_token = Some(token);
        }
        if let Ok(username) = std::env::var("IMGUR_USERNAME") {
            config.username = username;
        }
        if let Ok(hash) = std::env::var("IMGUR_EXISTING_IMAGE_HASH") {
            config.existing_image_hash = hash;
        }
        if let Ok(path) = std::env::var("IMGUR_FIXTURE_IMAGE") {
            config.fixture_image = PathBuf::from(path);
        }
        if let Ok(raw) = std::env::var("IMGUR_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ApiError::configuration_error(format!(
                    "IMGUR_REQUEST_TIMEOUT_SECS must be whole seconds: {e}"
                ))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            username = %config.username,
            existing_image_hash = %config.existing_image_hash,
            fixture_image = %config.fixture_image.display(),
            has_access_token = config.access_token.is_some(),
            "Imgur configuration loaded and validated"
        );

        Ok(config)
    }
}
