//! Share Cart Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cartlink_app::domain::shared_carts::models::{CustomerInfo, NewSharedCart, SnapshotItem};

use crate::{extensions::*, shared_carts::errors::into_status_error, state::State};

/// One submitted cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShareItemRequest {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price in minor units
    pub price: u64,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub customization: Option<String>,
}

impl From<ShareItemRequest> for SnapshotItem {
    fn from(item: ShareItemRequest) -> Self {
        Self {
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
            image: item.image,
            customization: item.customization,
        }
    }
}

/// Contact details submitted alongside the cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShareCustomerRequest {
    pub name: String,
    pub phone: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub delivery_date: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ShareCustomerRequest> for CustomerInfo {
    fn from(customer: ShareCustomerRequest) -> Self {
        Self {
            name: customer.name,
            phone: customer.phone,
            email: customer.email,
            delivery_date: customer.delivery_date,
            notes: customer.notes,
        }
    }
}

/// Share Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShareCartRequest {
    pub items: Vec<ShareItemRequest>,

    #[serde(default)]
    pub customer_info: Option<ShareCustomerRequest>,

    /// Subtotal in minor units
    pub subtotal: u64,
}

impl From<ShareCartRequest> for NewSharedCart {
    fn from(request: ShareCartRequest) -> Self {
        Self {
            items: request.items.into_iter().map(Into::into).collect(),
            customer: request.customer_info.map(Into::into),
            subtotal: request.subtotal,
        }
    }
}

/// Cart Shared Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSharedResponse {
    pub success: bool,

    /// Allocated share code
    pub short_code: String,

    /// Absolute link the snapshot can be opened with
    pub url: String,

    /// Stored snapshot UUID
    pub cart_id: Uuid,
}

/// Share Cart Handler
///
/// Stores an immutable snapshot of the submitted cart and returns the link
/// to hand off.
#[endpoint(
    tags("cart"),
    summary = "Share Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart snapshot stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ShareCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartSharedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let created = state
        .shared_carts
        .create_shared_cart(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let url = format!(
        "{}/c/{}",
        state.public_base_url.trim_end_matches('/'),
        created.short_code
    );

    res.add_header(LOCATION, url.clone(), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CartSharedResponse {
        success: true,
        short_code: created.short_code.to_string(),
        url,
        cart_id: created.uuid,
    }))
}
