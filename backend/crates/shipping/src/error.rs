//! Shipping Error Types

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldErrors},
    kind::ErrorKind,
};
use thiserror::Error;

pub type ShippingResult<T> = Result<T, ShippingError>;

#[derive(Debug, Error)]
pub enum ShippingError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Transport failure, non-2xx status, or an error status in the envelope
    #[error("Shipping provider error: {0}")]
    Upstream(String),

    #[error("Shipping provider returned no results")]
    EmptyResults,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShippingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShippingError::Validation(_) => ErrorKind::BadRequest,
            ShippingError::Upstream(_) | ShippingError::EmptyResults => ErrorKind::BadGateway,
            ShippingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            ShippingError::Validation(fields) => {
                AppError::new(self.kind(), self.to_string()).with_field_errors(fields.clone())
            }
            ShippingError::Upstream(_) | ShippingError::EmptyResults => {
                AppError::new(self.kind(), "Failed to fetch shipping data")
                    .with_action("Try again in a moment")
            }
            ShippingError::Internal(_) => AppError::new(self.kind(), "Internal server error"),
        }
    }

    fn log(&self) {
        match self {
            ShippingError::Upstream(msg) => {
                tracing::error!(message = %msg, "RajaOngkir request failed");
            }
            ShippingError::EmptyResults => {
                tracing::warn!("RajaOngkir returned an empty result set");
            }
            ShippingError::Internal(msg) => {
                tracing::error!(message = %msg, "Shipping internal error");
            }
            ShippingError::Validation(_) => {
                tracing::debug!(error = %self, "Shipping request rejected");
            }
        }
    }
}

impl IntoResponse for ShippingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for ShippingError {
    fn from(rejection: JsonRejection) -> Self {
        ShippingError::Validation(kernel::error::conversions::json_rejection_errors(&rejection))
    }
}

impl From<reqwest::Error> for ShippingError {
    fn from(err: reqwest::Error) -> Self {
        ShippingError::Upstream(err.to_string())
    }
}
