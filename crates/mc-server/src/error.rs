use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mc_core::McError;

/// Carries an explicit 404 through the `anyhow::Error` chain for lookups
/// that are not store records.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// 400 Bad Request.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(McError::InvalidInput(msg.into()).into())
    }

    /// 409 Conflict.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self(McError::Conflict(msg.into()).into())
    }

    /// 404 Not Found.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }

    pub fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<NotFoundError>().is_some() {
            return StatusCode::NOT_FOUND;
        }
        match self.0.downcast_ref::<McError>() {
            Some(e) => match e {
                McError::NotFound { .. } => StatusCode::NOT_FOUND,
                McError::NotInitialized
                | McError::InvalidInput(_)
                | McError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
                McError::Conflict(_) => StatusCode::CONFLICT,
                McError::ComputeFailed(_) | McError::CacheUnavailable(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                McError::HomeNotFound | McError::Io(_) | McError::Yaml(_) | McError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn status_of(err: McError) -> StatusCode {
        AppError(err.into()).into_response().status()
    }

    #[test]
    fn record_not_found_maps_to_404() {
        assert_eq!(
            status_of(McError::not_found("task", "T9")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn invalid_input_maps_to_400() {
        assert_eq!(
            status_of(McError::InvalidInput("title must not be empty".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(McError::InvalidStatus("pending".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_initialized_maps_to_400() {
        assert_eq!(status_of(McError::NotInitialized), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        assert_eq!(
            status_of(McError::Conflict("already approved".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::conflict("x").into_response().status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn compute_and_cache_failures_map_to_503() {
        assert_eq!(
            status_of(McError::ComputeFailed("timed out".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(McError::CacheUnavailable("cache/caffeine.json".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        assert_eq!(
            status_of(McError::Io(io_err)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn foreign_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn constructors_map_to_their_status() {
        assert_eq!(
            AppError::not_found("no such route").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_request("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError(McError::not_found("proposal", "P1").into()).into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
