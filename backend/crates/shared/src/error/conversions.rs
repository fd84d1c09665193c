//! Error conversions
//!
//! The HTTP boundary handler (`IntoResponse`) and the mapping of axum
//! extractor rejections into [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

/// The boundary handler: every failure leaves the service through here.
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        self.log();

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.payload())).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        let kind = if rejection.status().is_server_error() {
            ErrorKind::ServerError
        } else {
            ErrorKind::BadRequest
        };
        AppError::new(kind, rejection.body_text())
    }
}

impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        let kind = if rejection.status().is_server_error() {
            ErrorKind::ServerError
        } else {
            ErrorKind::BadRequest
        };
        AppError::new(kind, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_into_response_emits_payload() {
        use axum::response::IntoResponse;

        let response = AppError::conflict("User already exists").into_response();
        assert_eq!(response.status().as_u16(), 409);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 409);
        assert_eq!(body["error"], "Conflict");
        assert_eq!(body["message"], "User already exists");
    }
}
