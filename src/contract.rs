//! Response specifications shared by the scenarios

use crate::dto::FavoriteState;
use crate::response::{Matcher, ResponseSpec, ResponseSpecBuilder};

pub const BAD_REQUEST_MESSAGE: &str = "Bad Request";
pub const UPLOADED_MIME_TYPE: &str = "image/jpeg";

/// Status 200, nothing else checked
pub fn positive_response_spec() -> ResponseSpec {
    ResponseSpecBuilder::new().expect_status_code(200).build()
}

/// A successful JPEG upload
pub fn upload_success_spec() -> ResponseSpec {
    ResponseSpecBuilder::new()
        .expect_status_code(200)
        .expect_body("success", Matcher::is(true))
        .expect_body("data.type", Matcher::is(UPLOADED_MIME_TYPE))
        .expect_body("data.id", Matcher::NotNull)
        .build()
}

/// An upload rejected for a missing or malformed image
pub fn bad_request_spec() -> ResponseSpec {
    ResponseSpecBuilder::new()
        .expect_status_code(400)
        .expect_body("success", Matcher::is(false))
        .expect_body("data.error", Matcher::is(BAD_REQUEST_MESSAGE))
        .build()
}

/// Status 404
pub fn not_found_spec() -> ResponseSpec {
    ResponseSpecBuilder::new().expect_status_code(404).build()
}

/// A favorite toggle; either direction passes since the prior state is unknown
pub fn favorite_toggled_spec() -> ResponseSpec {
    ResponseSpecBuilder::new()
        .expect_status_code(200)
        .expect_body(
            "data",
            Matcher::one_of([
                FavoriteState::Favorited.as_str(),
                FavoriteState::Unfavorited.as_str(),
            ]),
        )
        .build()
}

/// A 200 whose `data.id` is `image_hash`
pub fn image_with_id_spec(image_hash: &str) -> ResponseSpec {
    ResponseSpecBuilder::new()
        .add_response_spec(&positive_response_spec())
        .expect_body("data.id", Matcher::is(image_hash))
        .build()
}
