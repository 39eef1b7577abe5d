//! Get Shared Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cartlink_app::domain::shared_carts::models::{CustomerInfo, SharedCart, SnapshotItem};

use crate::{extensions::*, shared_carts::errors::into_status_error, state::State};

/// Shared Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SharedCartResponse {
    /// Stored snapshot UUID
    pub uuid: Uuid,

    /// Share code the snapshot is reachable under
    pub short_code: String,

    /// The snapshot items, exactly as submitted
    pub items: Vec<SnapshotItemResponse>,

    /// Subtotal in minor units
    pub subtotal: u64,

    /// Contact details, when the shopper supplied them
    pub customer: Option<CustomerResponse>,

    /// Status as seen at the time of the request
    pub status: String,

    /// Number of times the share link has been opened
    pub views: u64,

    /// When the snapshot was stored
    pub created_at: String,

    /// When the snapshot stops being actionable
    pub expires_at: String,
}

impl SharedCartResponse {
    /// Render a cart as seen at `now`. Overdue non-terminal carts are
    /// labeled expired without a stored-state change.
    pub(crate) fn as_of(cart: SharedCart, now: Timestamp) -> Self {
        let status = cart.effective_status(now).to_string();

        Self {
            uuid: cart.uuid,
            short_code: cart.short_code.to_string(),
            items: cart.cart.items.into_iter().map(Into::into).collect(),
            subtotal: cart.cart.subtotal,
            customer: cart.customer.map(Into::into),
            status,
            views: cart.views,
            created_at: cart.created_at.to_string(),
            expires_at: cart.expires_at.to_string(),
        }
    }
}

/// Snapshot Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SnapshotItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price in minor units
    pub price: u64,

    pub image: Option<String>,
    pub customization: Option<String>,
}

impl From<SnapshotItem> for SnapshotItemResponse {
    fn from(item: SnapshotItem) -> Self {
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

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub delivery_date: Option<String>,
    pub notes: Option<String>,
}

impl From<CustomerInfo> for CustomerResponse {
    fn from(customer: CustomerInfo) -> Self {
        Self {
            name: customer.name,
            phone: customer.phone,
            email: customer.email,
            delivery_date: customer.delivery_date,
            notes: customer.notes,
        }
    }
}

/// Get Shared Cart Handler
///
/// Staff detail view. Does not count a view.
#[endpoint(
    tags("admin"),
    summary = "Get Shared Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SharedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .shared_carts
        .get_shared_cart(uuid.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SharedCartResponse::as_of(cart, Timestamp::now())))
}
