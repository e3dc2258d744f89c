//! # imgur-contract
//!
//! Declarative request/response contract checks for the Imgur v3 image API.
//!
//! ## Key Features
//!
//! - **Request specs**: reusable templates carrying base URL, bearer token,
//!   form fields and multipart parts
//! - **Response specs**: expected status plus expected JSON values by dotted path
//! - **Open DTOs**: response structs that keep unknown keys instead of rejecting them
//! - **Scenarios**: one check per API operation with cleanup of uploaded images
//!
//! ## Example
//!
//! ```rust,no_run
//! use imgur_contract::{ImgurClient, ImgurConfig, ImageScenario};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ImgurConfig {
//!     access_token: Some("your-access-token".to_string()),
//!     ..ImgurConfig::default()
//! };
//!
//! let client = ImgurClient::new(config)?;
//! let scenario = ImageScenario::new(client)?;
//! let image = scenario.get_image("JoZqQmY").await?;
//! println!("{:?}", image.data.and_then(|d| d.link));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod client;
pub mod config;
pub mod contract;
pub mod dto;
pub mod error;
pub mod request;
pub mod response;
pub mod scenarios;
pub mod upload;

#[cfg(test)]
mod tests;

// Re-export main types
pub use client::ImgurClient;
pub use config::ImgurConfig;
pub use dto::{
    AccountData, ApiEnvelope, ErrorData, FavoriteState, ImageData, PostImageResponse,
};
pub use error::{ApiError, ApiResult};
pub use request::{MultiPartSpec, RequestSpec, RequestSpecBuilder};
pub use response::{ApiResponse, Matcher, ResponseSpec, ResponseSpecBuilder};
pub use scenarios::ImageScenario;
pub use upload::ImageUpload;
