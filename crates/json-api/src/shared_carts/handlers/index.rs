//! Shared Cart Index Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    shared_carts::{errors::into_status_error, get::SharedCartResponse},
    state::State,
};

/// Shared Carts Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SharedCartsResponse {
    /// Stored snapshots, newest first
    pub carts: Vec<SharedCartResponse>,
}

/// Shared Cart Index Handler
///
/// Staff index, newest first.
#[endpoint(
    tags("admin"),
    summary = "List Shared Carts",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SharedCartsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let carts = state
        .shared_carts
        .list_shared_carts()
        .await
        .map_err(into_status_error)?;

    let now = Timestamp::now();

    Ok(Json(SharedCartsResponse {
        carts: carts
            .into_iter()
            .map(|cart| SharedCartResponse::as_of(cart, now))
            .collect(),
    }))
}
