//! Resolve Shared Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::CACHE_CONTROL, oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    shared_carts::{errors::into_status_error, get::SharedCartResponse},
    state::State,
};

/// Resolve Shared Cart Handler
///
/// Looks up a snapshot by share code and records one view.
#[endpoint(
    tags("cart"),
    summary = "Resolve Shared Cart",
    responses(
        (status_code = StatusCode::OK, description = "Snapshot found"),
        (status_code = StatusCode::NOT_FOUND, description = "No snapshot under that code"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SharedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .shared_carts
        .resolve(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    // Every open must reach the server, or the view counter lies.
    res.add_header(CACHE_CONTROL, "no-store", true)
        .or_500("failed to set cache-control header")?;

    Ok(Json(SharedCartResponse::as_of(cart, Timestamp::now())))
}
