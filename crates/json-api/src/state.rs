//! State

use std::sync::Arc;

use cartlink_app::{context::AppContext, domain::shared_carts::SharedCartsService};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) shared_carts: Arc<dyn SharedCartsService>,

    /// Base URL prepended to `/c/{code}` when building share links.
    pub(crate) public_base_url: String,

    /// Token the staff routes expect in the `Authorization` header.
    pub(crate) admin_token: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        shared_carts: Arc<dyn SharedCartsService>,
        public_base_url: String,
        admin_token: String,
    ) -> Self {
        Self {
            shared_carts,
            public_base_url,
            admin_token,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(
        app: AppContext,
        public_base_url: String,
        admin_token: String,
    ) -> Arc<Self> {
        Arc::new(Self::new(app.shared_carts, public_base_url, admin_token))
    }
}
