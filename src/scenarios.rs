//! Contract scenarios, one per API operation
//!
//! Each scenario arranges its request, sends exactly one call, logs the
//! response and checks it against a [`ResponseSpec`]. Images created by an
//! upload scenario are remembered and removed by
//! [`ImageScenario::tear_down`].
//!
//! ```rust,no_run
//! use imgur_contract::{ImageScenario, ImgurClient};
//!
//! # async fn example() -> imgur_contract::ApiResult<()> {
//! let client = ImgurClient::from_env()?;
//! let mut scenario = ImageScenario::new(client)?;
//! let outcome = scenario.upload_file().await;
//! scenario.finish(outcome).await?;
//! # Ok(())
//! # }
//! ```

use crate::client::{endpoints, ImgurClient};
use crate::contract::{
    bad_request_spec, favorite_toggled_spec, image_with_id_spec, not_found_spec,
    positive_response_spec, upload_success_spec,
};
use crate::dto::{FavoriteState, PostImageResponse};
use crate::error::{ApiError, ApiResult};
use crate::logging::{log_debug, log_warn};
use crate::request::RequestSpec;
use crate::response::{ApiResponse, Matcher, ResponseSpec, ResponseSpecBuilder};
use crate::upload::{load_image, ImageUpload};
use reqwest::Method;

/// Hash that no image on the service carries
pub const UNKNOWN_IMAGE_HASH: &str = "test";

/// `GET /account/{username}` answers 200
pub async fn get_account_info(client: &ImgurClient, username: &str) -> ApiResult<ApiResponse> {
    let response = client.get_account(username).await?;
    response.assert_spec(&positive_response_spec())?;
    Ok(response)
}

/// Same as [`get_account_info`], logging the request method and URI
pub async fn get_account_info_with_logging(
    client: &ImgurClient,
    username: &str,
) -> ApiResult<ApiResponse> {
    let spec = client.request_spec_with_auth().logging_method_and_uri();
    let response = client
        .send(&spec, Method::GET, endpoints::ACCOUNT, &[username])
        .await?;
    response.assert_spec(&positive_response_spec())?;
    Ok(response)
}

/// Image checks sharing one fixture image and one cleanup slot
#[derive(Debug)]
pub struct ImageScenario {
    client: ImgurClient,
    multipart_upload: RequestSpec,
    base64_upload: RequestSpec,
    upload_success: ResponseSpec,
    bad_request: ResponseSpec,
    uploaded_image_id: Option<String>,
}

impl ImageScenario {
    /// Read the fixture image and prepare the upload request specs
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FixtureError`] if the fixture image is unreadable.
    pub fn new(client: ImgurClient) -> ApiResult<Self> {
        let fixture = &client.config().fixture_image;
        let bytes = load_image(fixture)?;
        let file_name = fixture
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "test.jpg".to_string());

        let with_auth = client.request_spec_with_auth();
        let multipart_upload =
            ImageUpload::jpeg_file(bytes.clone(), file_name).to_request_spec(with_auth);
        let base64_upload = ImageUpload::base64(&bytes).to_request_spec(with_auth);

        Ok(Self {
            client,
            multipart_upload,
            base64_upload,
            upload_success: upload_success_spec(),
            bad_request: bad_request_spec(),
            uploaded_image_id: None,
        })
    }

    pub fn client(&self) -> &ImgurClient {
        &self.client
    }

    /// Deletehash of the image uploaded by this scenario, if any
    pub fn uploaded_image_id(&self) -> Option<&str> {
        self.uploaded_image_id.as_deref()
    }

    async fn post_upload(&self, spec: &RequestSpec) -> ApiResult<ApiResponse> {
        let response = self
            .client
            .send(spec, Method::POST, endpoints::UPLOAD, &[])
            .await?;
        response.pretty_peek();
        Ok(response)
    }

    /// Verify a successful upload and remember its deletehash for cleanup
    async fn expect_uploaded(
        &mut self,
        spec: &RequestSpec,
        expectations: &ResponseSpec,
    ) -> ApiResult<PostImageResponse> {
        let response = self.post_upload(spec).await?;

        // Remember the image before verifying so a failed check still cleans up.
        let parsed = response.extract::<PostImageResponse>();
        if let Ok(uploaded) = &parsed {
            match uploaded.data.as_ref().and_then(|d| d.deletehash.clone()) {
                Some(deletehash) => self.uploaded_image_id = Some(deletehash),
                None => log_warn!(
                    url = %response.url(),
                    "Upload response carried no deletehash, nothing to clean up"
                ),
            }
        }

        response.assert_spec(expectations)?;
        parsed
    }

    async fn expect_rejected(&self, spec: &RequestSpec) -> ApiResult<ApiResponse> {
        let response = self.post_upload(spec).await?;
        response.assert_spec(&self.bad_request)?;
        Ok(response)
    }

    /// Multipart JPEG upload succeeds
    pub async fn upload_file(&mut self) -> ApiResult<PostImageResponse> {
        let spec = self.multipart_upload.clone();
        let expectations = self.upload_success.clone();
        self.expect_uploaded(&spec, &expectations).await
    }

    /// An empty `title` comes back as null
    pub async fn upload_with_empty_title(&mut self) -> ApiResult<PostImageResponse> {
        let spec = self.multipart_upload.with_form_param("title", "");
        let expectations = ResponseSpecBuilder::new()
            .add_response_spec(&self.upload_success)
            .expect_body("data.title", Matcher::IsNull)
            .build();
        self.expect_uploaded(&spec, &expectations).await
    }

    /// An empty `name` comes back as an empty string
    pub async fn upload_with_empty_name(&mut self) -> ApiResult<PostImageResponse> {
        let spec = self.multipart_upload.with_form_param("name", "");
        let expectations = ResponseSpecBuilder::new()
            .expect_body("data.name", Matcher::is(""))
            .add_response_spec(&self.upload_success)
            .build();
        self.expect_uploaded(&spec, &expectations).await
    }

    /// Base64 upload declared as `type=base64` succeeds
    pub async fn upload_base64(&mut self) -> ApiResult<PostImageResponse> {
        let spec = self.base64_upload.clone();
        let expectations = self.upload_success.clone();
        self.expect_uploaded(&spec, &expectations).await
    }

    /// Authenticated upload without any image is a 400
    pub async fn upload_without_image(&self) -> ApiResult<ApiResponse> {
        let spec = self.client.request_spec_with_auth().clone();
        self.expect_rejected(&spec).await
    }

    /// Upload built from an empty payload is a 400
    pub async fn upload_all_empty(&self) -> ApiResult<ApiResponse> {
        let spec = ImageUpload::empty().to_request_spec(self.client.request_spec_with_auth());
        self.expect_rejected(&spec).await
    }

    /// Base64 text declared as `type=jpeg` is a 400
    pub async fn upload_base64_declared_as_jpeg(&self) -> ApiResult<ApiResponse> {
        let spec = self.base64_upload.with_form_param("type", "jpeg");
        self.expect_rejected(&spec).await
    }

    /// Fetching `image_hash` returns that image
    pub async fn get_image(&self, image_hash: &str) -> ApiResult<PostImageResponse> {
        let response = self.client.get_image(image_hash).await?;
        response
            .pretty_peek()
            .assert_spec(&image_with_id_spec(image_hash))?
            .extract()
    }

    /// Toggling favorite on `image_hash` answers either direction
    pub async fn favorite_image(&self, image_hash: &str) -> ApiResult<FavoriteState> {
        let response = self.client.toggle_favorite(image_hash).await?;
        response
            .pretty_peek()
            .assert_spec(&favorite_toggled_spec())?;

        let raw = response.string_at("data").unwrap_or_default();
        FavoriteState::parse(raw).ok_or_else(|| {
            ApiError::response_parsing_error(format!("Unexpected favorite state: {raw}"))
        })
    }

    /// Toggling favorite on a hash that does not exist is a 404
    pub async fn favorite_unknown_image(&self) -> ApiResult<ApiResponse> {
        let response = self.client.toggle_favorite(UNKNOWN_IMAGE_HASH).await?;
        response.pretty_peek().assert_spec(&not_found_spec())?;
        Ok(response)
    }

    /// Delete the image uploaded by this scenario; no-op if nothing was uploaded
    pub async fn tear_down(&mut self) -> ApiResult<()> {
        let Some(image_id) = self.uploaded_image_id.take() else {
            return Ok(());
        };

        log_debug!(image_id = %image_id, "Deleting uploaded image");
        let response = self.client.delete_image(&image_id).await?;
        response
            .pretty_peek()
            .assert_spec(&positive_response_spec())?;
        Ok(())
    }

    /// Tear down, then hand back `outcome`
    ///
    /// A failed `outcome` is reported in preference to a failed teardown.
    pub async fn finish<T>(mut self, outcome: ApiResult<T>) -> ApiResult<T> {
        let teardown = self.tear_down().await;
        let value = outcome?;
        teardown?;
        Ok(value)
    }
}
