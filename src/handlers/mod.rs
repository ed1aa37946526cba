pub mod blogs;
pub mod categories;
pub mod users;

use crate::error::ApiError;
use crate::store::RecordId;

/// Presence + format guard run before any store access. The 400 message
/// names the offending parameter.
pub(crate) fn require_id(raw: Option<&str>, name: &str) -> Result<RecordId, ApiError> {
    raw.and_then(RecordId::parse)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid or missing {}", name)))
}

/// Required body field guard; blank counts as missing.
pub(crate) fn require_field(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("Missing required field: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn missing_id_is_a_bad_request_naming_the_field() {
        let err = require_id(None, "userId").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid or missing userId");
    }

    #[test]
    fn malformed_id_is_a_bad_request() {
        for raw in ["", "short", "zzzzzzzzzzzzzzzzzzzzzzzz", "507f1f77bcf86cd7994390111"] {
            let err = require_id(Some(raw), "categoryId").unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn well_formed_id_passes() {
        let id = require_id(Some("507f1f77bcf86cd799439011"), "userId").unwrap();
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn missing_or_blank_field_is_a_bad_request_naming_the_field() {
        for value in [None, Some(String::new()), Some("   ".to_string())] {
            let err = require_field(value, "title").unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), "Missing required field: title");
        }
        assert_eq!(require_field(Some("ok".to_string()), "title").unwrap(), "ok");
    }
}
