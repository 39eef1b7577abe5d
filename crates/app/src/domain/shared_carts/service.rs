//! Shared carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::shared_carts::{
        code::ShortCode,
        errors::{SharedCartsServiceError, is_code_collision},
        models::{CartSnapshot, CartStatus, NewSharedCart, SharedCart},
        repository::PgSharedCartsRepository,
    },
};

/// Allocation attempts before giving up on a request. Five misses against a
/// 32^7 code space means the table is effectively full or the store is
/// misbehaving; either way the caller retries the whole operation.
const MAX_CODE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PgSharedCartsService {
    db: Db,
    repository: PgSharedCartsRepository,
}

impl PgSharedCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSharedCartsRepository::new(),
        }
    }
}

#[async_trait]
impl SharedCartsService for PgSharedCartsService {
    async fn create_shared_cart(
        &self,
        new: NewSharedCart,
    ) -> Result<SharedCart, SharedCartsServiceError> {
        if new.items.is_empty() {
            return Err(SharedCartsServiceError::EmptyCart);
        }

        if new.items.iter().any(|item| item.quantity == 0) {
            return Err(SharedCartsServiceError::InvalidQuantity);
        }

        let snapshot = CartSnapshot {
            items: new.items,
            subtotal: new.subtotal,
        };

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = ShortCode::generate(&mut rand::thread_rng());

            let mut tx = self.db.begin().await?;

            match self
                .repository
                .create_shared_cart(&mut tx, Uuid::now_v7(), &code, &snapshot, new.customer.as_ref())
                .await
            {
                Ok(created) => {
                    tx.commit().await?;

                    return Ok(created);
                }
                Err(error) if is_code_collision(&error) => {
                    debug!(%code, attempt, "share code collision, redrawing");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(SharedCartsServiceError::CodeAllocationExhausted)
    }

    async fn resolve(&self, code: &str) -> Result<SharedCart, SharedCartsServiceError> {
        // Anything that cannot name a record is a plain miss, not a
        // validation error.
        let Ok(code) = code.parse::<ShortCode>() else {
            return Err(SharedCartsServiceError::NotFound);
        };

        let mut tx = self.db.begin().await?;

        let cart = self.repository.resolve_shared_cart(&mut tx, &code).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn get_shared_cart(&self, uuid: Uuid) -> Result<SharedCart, SharedCartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.repository.get_shared_cart(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn list_shared_carts(&self) -> Result<Vec<SharedCart>, SharedCartsServiceError> {
        let mut tx = self.db.begin().await?;

        let carts = self.repository.list_shared_carts(&mut tx).await?;

        tx.commit().await?;

        Ok(carts)
    }

    async fn set_status(
        &self,
        uuid: Uuid,
        status: CartStatus,
    ) -> Result<SharedCart, SharedCartsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_shared_cart(&mut tx, uuid).await?;

        if !current.status.can_transition_to(status) {
            return Err(SharedCartsServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self.repository.set_status(&mut tx, uuid, status).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait SharedCartsService: Send + Sync {
    /// Persist an immutable snapshot of the submitted cart under a freshly
    /// allocated share code.
    async fn create_shared_cart(
        &self,
        new: NewSharedCart,
    ) -> Result<SharedCart, SharedCartsServiceError>;

    /// Look up a cart by share code (case-insensitive) and record one view.
    async fn resolve(&self, code: &str) -> Result<SharedCart, SharedCartsServiceError>;

    /// Staff detail view. Does not touch the view counter.
    async fn get_shared_cart(&self, uuid: Uuid) -> Result<SharedCart, SharedCartsServiceError>;

    /// Staff index, newest first.
    async fn list_shared_carts(&self) -> Result<Vec<SharedCart>, SharedCartsServiceError>;

    /// Advance the fulfillment status. Forward transitions only.
    async fn set_status(
        &self,
        uuid: Uuid,
        status: CartStatus,
    ) -> Result<SharedCart, SharedCartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::shared_carts::{
            code::{ALPHABET, CODE_LEN},
            models::{CustomerInfo, SnapshotItem},
        },
        test::TestContext,
    };

    use super::*;

    fn cookie_box(quantity: u32) -> SnapshotItem {
        SnapshotItem {
            product_id: "a".to_string(),
            product_name: "Cookie Box".to_string(),
            quantity,
            price: 35,
            image: None,
            customization: None,
        }
    }

    fn new_cart(items: Vec<SnapshotItem>, subtotal: u64) -> NewSharedCart {
        NewSharedCart {
            items,
            customer: None,
            subtotal,
        }
    }

    #[tokio::test]
    async fn create_returns_pending_cart_with_valid_code() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(2)], 70))
            .await?;

        assert_eq!(cart.short_code.as_str().len(), CODE_LEN, "wrong code length");
        assert!(
            cart.short_code.as_str().bytes().all(|b| ALPHABET.contains(&b)),
            "code {} contains a symbol outside the alphabet",
            cart.short_code
        );
        assert_eq!(cart.status, CartStatus::Pending);
        assert_eq!(cart.views, 0);
        assert_eq!(cart.cart.subtotal, 70);
        assert!(cart.expires_at > cart.created_at, "expiry must be in the future");

        Ok(())
    }

    #[tokio::test]
    async fn create_empty_cart_is_rejected_and_persists_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![], 0))
            .await;

        assert!(
            matches!(result, Err(SharedCartsServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shared_carts")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(rows, 0, "empty-cart submission must not persist");

        Ok(())
    }

    #[tokio::test]
    async fn create_zero_quantity_item_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(0)], 0))
            .await;

        assert!(
            matches!(result, Err(SharedCartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn resolve_round_trips_the_snapshot_unchanged() -> TestResult {
        let ctx = TestContext::new().await;

        let customer = CustomerInfo {
            name: "Ana".to_string(),
            phone: "+55 47 99999-0000".to_string(),
            email: None,
            delivery_date: Some("2026-09-12".to_string()),
            notes: Some("no sprinkles".to_string()),
        };

        let created = ctx
            .shared_carts
            .create_shared_cart(NewSharedCart {
                items: vec![cookie_box(2), cookie_box(1)],
                customer: Some(customer.clone()),
                subtotal: 105,
            })
            .await?;

        let resolved = ctx
            .shared_carts
            .resolve(created.short_code.as_str())
            .await?;

        assert_eq!(resolved.cart, created.cart, "snapshot must be immutable");
        assert_eq!(resolved.customer.as_ref(), Some(&customer));
        assert_eq!(resolved.views, 1);

        Ok(())
    }

    #[tokio::test]
    async fn sequential_resolves_count_every_view() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
            .await?;

        for expected in 1..=5u64 {
            let resolved = ctx
                .shared_carts
                .resolve(created.short_code.as_str())
                .await?;

            assert_eq!(resolved.views, expected);
        }

        Ok(())
    }

    #[tokio::test]
    async fn resolve_is_case_insensitive() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
            .await?;

        let resolved = ctx
            .shared_carts
            .resolve(&created.short_code.as_str().to_ascii_lowercase())
            .await?;

        assert_eq!(resolved.uuid, created.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn resolve_unknown_or_malformed_code_is_not_found() {
        let ctx = TestContext::new().await;

        for code in ["ZZZZZZZ", "nope", "ABCDEF0"] {
            let result = ctx.shared_carts.resolve(code).await;

            assert!(
                matches!(result, Err(SharedCartsServiceError::NotFound)),
                "expected NotFound for {code:?}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn forward_status_transitions_succeed() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
            .await?;

        let contacted = ctx
            .shared_carts
            .set_status(created.uuid, CartStatus::Contacted)
            .await?;

        assert_eq!(contacted.status, CartStatus::Contacted);

        let converted = ctx
            .shared_carts
            .set_status(created.uuid, CartStatus::Converted)
            .await?;

        assert_eq!(converted.status, CartStatus::Converted);

        Ok(())
    }

    #[tokio::test]
    async fn backward_transition_is_rejected_and_leaves_status_unchanged() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
            .await?;

        ctx.shared_carts
            .set_status(created.uuid, CartStatus::Contacted)
            .await?;

        let result = ctx
            .shared_carts
            .set_status(created.uuid, CartStatus::Pending)
            .await;

        assert!(
            matches!(
                result,
                Err(SharedCartsServiceError::InvalidTransition {
                    from: CartStatus::Contacted,
                    to: CartStatus::Pending,
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        let current = ctx.shared_carts.get_shared_cart(created.uuid).await?;

        assert_eq!(current.status, CartStatus::Contacted);

        Ok(())
    }

    #[tokio::test]
    async fn expired_is_reachable_from_pending() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
            .await?;

        let expired = ctx
            .shared_carts
            .set_status(created.uuid, CartStatus::Expired)
            .await?;

        assert_eq!(expired.status, CartStatus::Expired);

        Ok(())
    }

    #[tokio::test]
    async fn set_status_unknown_cart_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .shared_carts
            .set_status(Uuid::now_v7(), CartStatus::Contacted)
            .await;

        assert!(
            matches!(result, Err(SharedCartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_shared_cart_does_not_count_a_view() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
            .await?;

        let fetched = ctx.shared_carts.get_shared_cart(created.uuid).await?;

        assert_eq!(fetched.views, 0);

        Ok(())
    }

    #[tokio::test]
    async fn list_returns_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
            .await?;

        let second = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(2)], 70))
            .await?;

        let carts = ctx.shared_carts.list_shared_carts().await?;
        let uuids: Vec<_> = carts.iter().map(|cart| cart.uuid).collect();

        assert!(
            uuids.iter().position(|&u| u == second.uuid)
                < uuids.iter().position(|&u| u == first.uuid),
            "newest cart should come first, got {uuids:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn codes_are_unique_across_creates() -> TestResult {
        let ctx = TestContext::new().await;

        let mut codes = std::collections::HashSet::new();

        for _ in 0..10 {
            let cart = ctx
                .shared_carts
                .create_shared_cart(new_cart(vec![cookie_box(1)], 35))
                .await?;

            assert!(
                codes.insert(cart.short_code.clone()),
                "duplicate code {}",
                cart.short_code
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn shopper_handoff_end_to_end() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .shared_carts
            .create_shared_cart(new_cart(vec![cookie_box(2)], 70))
            .await?;

        assert_eq!(created.short_code.as_str().len(), CODE_LEN, "wrong code length");

        let first = ctx
            .shared_carts
            .resolve(created.short_code.as_str())
            .await?;

        assert_eq!(first.cart.subtotal, 70);
        assert_eq!(first.views, 1);
        assert_eq!(first.status, CartStatus::Pending);

        ctx.shared_carts
            .set_status(created.uuid, CartStatus::Contacted)
            .await?;

        let second = ctx
            .shared_carts
            .resolve(created.short_code.as_str())
            .await?;

        assert_eq!(second.status, CartStatus::Contacted);
        assert_eq!(second.views, 2);

        Ok(())
    }
}
