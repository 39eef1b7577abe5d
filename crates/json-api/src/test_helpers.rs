//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use cartlink_app::domain::shared_carts::{
    MockSharedCartsService,
    models::{CartSnapshot, CartStatus, SharedCart, SnapshotItem},
};

use crate::state::State;

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";

pub(crate) const TEST_BASE_URL: &str = "https://shop.test";

pub(crate) fn state_with_shared_carts(shared_carts: MockSharedCartsService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(shared_carts),
        TEST_BASE_URL.to_string(),
        TEST_ADMIN_TOKEN.to_string(),
    ))
}

pub(crate) fn shared_carts_service(shared_carts: MockSharedCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_shared_carts(shared_carts)))
            .push(route),
    )
}

/// A pending one-item cart with a far-future expiry.
pub(crate) fn make_shared_cart(uuid: Uuid) -> SharedCart {
    SharedCart {
        uuid,
        short_code: "ABCDEFG".parse().expect("valid share code"),
        cart: CartSnapshot {
            items: vec![SnapshotItem {
                product_id: "cookie-box".to_string(),
                product_name: "Cookie Box".to_string(),
                quantity: 1,
                price: 3500,
                image: None,
                customization: None,
            }],
            subtotal: 3500,
        },
        customer: None,
        status: CartStatus::Pending,
        views: 0,
        created_at: Timestamp::UNIX_EPOCH,
        expires_at: "2100-01-01T00:00:00Z".parse().expect("valid timestamp"),
    }
}
