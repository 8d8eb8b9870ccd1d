//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::ErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Venue not found: {0}")]
    VenueNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::VenueNotFound(_) => "venue_not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Pricing(PricingError::InvalidDuration { .. }) => "invalid_duration",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::VenueNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Pricing(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);

        let body = ErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
