//! Shared carts service errors.

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use crate::domain::shared_carts::models::CartStatus;

#[derive(Debug, Error)]
pub enum SharedCartsServiceError {
    /// Submitted cart had no items. Rejected before any persistence.
    #[error("cart is empty")]
    EmptyCart,

    /// An item was submitted with quantity zero.
    #[error("item quantity must be at least 1")]
    InvalidQuantity,

    /// Every allocation attempt drew an already-taken share code.
    #[error("share code allocation exhausted")]
    CodeAllocationExhausted,

    #[error("shared cart not found")]
    NotFound,

    /// The requested status change is not a forward transition.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: CartStatus, to: CartStatus },

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for SharedCartsServiceError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

/// Whether an insert failure is a share-code collision.
///
/// The unique index on `short_code` is the real uniqueness check; hitting it
/// is expected under concurrency and is retried with a fresh draw rather
/// than surfaced to the caller.
pub(crate) fn is_code_collision(error: &sqlx::Error) -> bool {
    matches!(
        error.as_database_error().map(DatabaseError::kind),
        Some(ErrorKind::UniqueViolation)
    )
}
