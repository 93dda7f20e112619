//! API-tier error model and HTTP status mapping.

use crate::model::post::PostId;
use crate::service::post_service::PostServiceError;
use http::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use http::{Response, StatusCode};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced to API callers, each with a fixed HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Addressed post does not exist (404).
    PostNotFound(PostId),
    /// Path id and body id of a replace disagree (400).
    IdMismatch { path_id: PostId, body_id: PostId },
    /// Partial update carried no fields (400).
    EmptyPatch,
    /// Body is not valid JSON for the expected shape (422).
    InvalidBody(String),
    /// Path segment is not an integer id (422).
    InvalidPathId(String),
    /// No route matches the path (404).
    RouteNotFound,
    /// Route exists but not for this method (405).
    MethodNotAllowed { allowed: &'static str },
    /// Response body could not be encoded (500).
    Serialization(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PostNotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::IdMismatch { .. } | Self::EmptyPatch => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) | Self::InvalidPathId(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "post_not_found",
            Self::IdMismatch { .. } => "id_mismatch",
            Self::EmptyPatch => "empty_patch",
            Self::InvalidBody(_) => "invalid_body",
            Self::InvalidPathId(_) => "invalid_path_id",
            Self::RouteNotFound => "route_not_found",
            Self::MethodNotAllowed { .. } => "method_not_allowed",
            Self::Serialization(_) => "serialization_failed",
        }
    }

    /// Renders `{"detail": ...}` with the mapped status.
    pub fn into_response(self) -> Response<Vec<u8>> {
        let body = json!({ "detail": self.to_string() }).to_string().into_bytes();
        let mut response = Response::new(body);
        *response.status_mut() = self.status();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Self::MethodNotAllowed { allowed } = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allowed));
        }
        response
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostNotFound(_) => write!(f, "Post not found"),
            Self::IdMismatch { .. } => write!(f, "Post ID in URL and body do not match"),
            Self::EmptyPatch => write!(f, "No fields provided for update"),
            Self::InvalidBody(message) => write!(f, "Invalid request body: {message}"),
            Self::InvalidPathId(value) => write!(f, "Invalid post id: `{value}`"),
            Self::RouteNotFound => write!(f, "Not Found"),
            Self::MethodNotAllowed { .. } => write!(f, "Method Not Allowed"),
            Self::Serialization(message) => write!(f, "Failed to encode response: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<PostServiceError> for ApiError {
    fn from(value: PostServiceError) -> Self {
        match value {
            PostServiceError::PostNotFound(id) => Self::PostNotFound(id),
            PostServiceError::EmptyPatch => Self::EmptyPatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use http::header::ALLOW;
    use http::StatusCode;

    #[test]
    fn status_mapping_matches_contract() {
        assert_eq!(ApiError::PostNotFound(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::IdMismatch {
                path_id: 1,
                body_id: 2
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidPathId("x".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn method_not_allowed_sets_allow_header() {
        let response = ApiError::MethodNotAllowed {
            allowed: "GET, POST",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, POST");
    }

    #[test]
    fn error_body_is_detail_object() {
        let response = ApiError::PostNotFound(3).into_response();
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, serde_json::json!({ "detail": "Post not found" }));
    }
}
