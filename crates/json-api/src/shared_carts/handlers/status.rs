//! Update Cart Status Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cartlink_app::domain::shared_carts::models::CartStatus;

use crate::{
    extensions::*,
    shared_carts::{errors::into_status_error, get::SharedCartResponse},
    state::State,
};

/// Update Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// Target status, one of `pending`, `contacted`, `converted`, `expired`
    pub status: String,
}

/// Update Cart Status Handler
///
/// Moves a cart one stage forward.
#[endpoint(
    tags("admin"),
    summary = "Update Cart Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Not a forward transition"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<SharedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<CartStatus>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let updated = state
        .shared_carts
        .set_status(uuid.into_inner(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SharedCartResponse::as_of(updated, Timestamp::now())))
}
