// Unit Tests for Response DTOs
//
// UNIT UNDER TEST: ApiEnvelope, ImageData, AccountData, ErrorData, FavoriteState
//
// BUSINESS RESPONSIBILITY:
//   - Mirrors the {status, success, data} envelope of every response
//   - Keeps unknown keys instead of rejecting them
//   - Leaves absent fields out when serialized again
//
// TEST COVERAGE:
//   - Full image payload mapping, including the `type` rename
//   - Null versus empty-string fields
//   - Catch-all bags at envelope and data level
//   - Error payloads with string and object `error`
//   - Favorite state parsing

use crate::dto::{
    AccountResponse, ErrorResponse, FavoriteResponse, FavoriteState, ImageData,
    PostImageResponse,
};
use crate::tests::helpers::{bad_request_body, upload_success_body};
use serde_json::json;

#[cfg(test)]
mod image_dto_tests {
    use super::*;

    #[test]
    fn test_upload_body_maps_known_fields() {
        // Arrange & Act
        let response: PostImageResponse = serde_json::from_value(upload_success_body()).unwrap();

        // Assert
        assert_eq!(response.status, Some(200));
        assert!(response.is_success());
        let data = response.data.expect("data should be present");
        assert_eq!(data.id.as_deref(), Some("aBcD123"));
        assert_eq!(data.deletehash.as_deref(), Some("dElEtEhAsH"));
        assert_eq!(data.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(data.account_id, Some(42));
        assert_eq!((data.width, data.height), (Some(8), Some(8)));
        assert_eq!(data.tags, Some(vec![]));
        assert_eq!(data.datetime, Some(1_600_000_000));
        assert!(data.additional_properties.is_empty());
    }

    #[test]
    fn test_null_title_and_empty_name_stay_distinct() {
        let response: PostImageResponse = serde_json::from_value(upload_success_body()).unwrap();
        let data = response.data.unwrap();

        assert_eq!(data.title, None);
        assert_eq!(data.name.as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let body = json!({
            "status": 200,
            "success": true,
            "request_id": "r-1",
            "data": {"id": "abc", "edited": "0", "is_album": false}
        });

        let response: PostImageResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.additional_properties.get("request_id"), Some(&json!("r-1")));
        let data = response.data.unwrap();
        assert_eq!(data.additional_properties.len(), 2);
        assert_eq!(data.additional_properties.get("is_album"), Some(&json!(false)));
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let data = ImageData {
            id: Some("abc".to_string()),
            mime_type: Some("image/jpeg".to_string()),
            ..ImageData::default()
        };

        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value, json!({"id": "abc", "type": "image/jpeg"}));
    }

    #[test]
    fn test_unknown_keys_are_serialized_back() {
        let body = json!({"success": true, "data": {"id": "abc", "edited": "0"}});

        let response: PostImageResponse = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(serde_json::to_value(&response).unwrap(), body);
    }
}

#[cfg(test)]
mod other_dto_tests {
    use super::*;

    #[test]
    fn test_bad_request_body_parses_as_error() {
        let response: ErrorResponse = serde_json::from_value(bad_request_body()).unwrap();

        assert!(!response.is_success());
        let data = response.data.unwrap();
        assert_eq!(data.message(), Some("Bad Request"));
        assert_eq!(data.request.as_deref(), Some("/3/upload"));
        assert_eq!(data.method.as_deref(), Some("POST"));
    }

    #[test]
    fn test_error_object_message() {
        let body = json!({
            "status": 400,
            "success": false,
            "data": {"error": {"code": 1003, "message": "File type invalid (1)", "type": "ImgurException"}}
        });

        let response: ErrorResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.data.unwrap().message(), Some("File type invalid (1)"));
    }

    #[test]
    fn test_account_body() {
        let body = json!({
            "status": 200,
            "success": true,
            "data": {
                "id": 12345,
                "url": "someone",
                "bio": null,
                "reputation": 10,
                "created": 1_500_000_000,
                "pro_expiration": false,
                "user_follow": {"status": false}
            }
        });

        let response: AccountResponse = serde_json::from_value(body).unwrap();

        let data = response.data.unwrap();
        assert_eq!(data.id, Some(12345));
        assert_eq!(data.url.as_deref(), Some("someone"));
        assert_eq!(data.bio, None);
        assert_eq!(data.reputation, Some(10.0));
        assert_eq!(data.pro_expiration, Some(json!(false)));
        assert!(data.additional_properties.contains_key("user_follow"));
    }

    #[test]
    fn test_favorite_body() {
        let response: FavoriteResponse =
            serde_json::from_value(json!({"status": 200, "success": true, "data": "unfavorited"}))
                .unwrap();

        let state = response.data.as_deref().and_then(FavoriteState::parse);

        assert_eq!(state, Some(FavoriteState::Unfavorited));
    }

    #[test]
    fn test_favorite_state_round_trip() {
        for state in [FavoriteState::Favorited, FavoriteState::Unfavorited] {
            assert_eq!(FavoriteState::parse(state.as_str()), Some(state));
            assert_eq!(state.to_string(), state.as_str());
        }
        assert_eq!(FavoriteState::parse("Favorited"), None);
    }
}
