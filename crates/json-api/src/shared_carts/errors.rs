//! Errors

use salvo::http::StatusError;
use tracing::error;

use cartlink_app::domain::shared_carts::SharedCartsServiceError;

pub(crate) fn into_status_error(error: SharedCartsServiceError) -> StatusError {
    match error {
        SharedCartsServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        SharedCartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Item quantity must be at least 1")
        }
        SharedCartsServiceError::NotFound => StatusError::not_found(),
        SharedCartsServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("Cannot move a {from} cart to {to}"))
        }
        SharedCartsServiceError::CodeAllocationExhausted => {
            error!("share code allocation exhausted");

            StatusError::internal_server_error().brief("Could not allocate a share code")
        }
        SharedCartsServiceError::Sql(source) => {
            error!("shared cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
