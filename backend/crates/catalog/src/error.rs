//! Catalog Error Types

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldErrors},
    kind::ErrorKind,
};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product name is required.")]
    ProductNameRequired,

    #[error("Missing required fields or no categories selected.")]
    MissingProductFields,

    #[error("Invalid identifier")]
    InvalidIdentifier,

    /// Body is not JSON or a field has the wrong type
    #[error("Invalid request body.")]
    InvalidBody(FieldErrors),

    #[error("Product name must be unique.")]
    DuplicateProductName,

    #[error("One or more categories do not exist.")]
    UnknownCategory,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Store not found.")]
    StoreNotFound,

    /// The product row exists; only the inventory row failed.
    #[error("Failed to link product to store.")]
    StoreLinkFailed(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        use CatalogError::*;
        match self {
            ProductNameRequired
            | MissingProductFields
            | InvalidIdentifier
            | InvalidBody(_)
            | UnknownCategory => ErrorKind::BadRequest,
            DuplicateProductName => ErrorKind::Conflict,
            ProductNotFound | StoreNotFound => ErrorKind::NotFound,
            StoreLinkFailed(_) | Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::InvalidBody(fields) => {
                AppError::new(self.kind(), self.to_string()).with_field_errors(fields.clone())
            }
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::StoreLinkFailed(e) => {
                tracing::error!(error = %e, "Product created but store link failed");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::InvalidBody(kernel::error::conversions::json_rejection_errors(&rejection))
    }
}

impl From<uuid::Error> for CatalogError {
    fn from(_: uuid::Error) -> Self {
        CatalogError::InvalidIdentifier
    }
}

/// Unique violations on `products.name` are duplicates; foreign key
/// violations on `product_categories` are unknown categories.
pub(crate) fn map_product_insert_error(err: sqlx::Error) -> CatalogError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => CatalogError::DuplicateProductName,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => CatalogError::UnknownCategory,
        _ => CatalogError::Database(err),
    }
}
