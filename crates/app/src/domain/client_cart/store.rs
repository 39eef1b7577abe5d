//! Working cart store.

use crate::domain::client_cart::{
    errors::CartStoreError, models::CartItem, storage::CartStorage,
};

/// The shopper's working cart plus its panel flag.
///
/// One instance per session, injected where needed. Every content mutation
/// writes through to storage so items survive a restart; the `is_open` flag
/// is deliberately left out of the persisted payload.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    items: Vec<CartItem>,
    is_open: bool,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Restore a cart from its storage backend. The panel starts closed
    /// regardless of how the previous session ended.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    pub fn load(storage: S) -> Result<Self, CartStoreError> {
        let items = storage.load()?;

        Ok(Self {
            items,
            is_open: false,
            storage,
        })
    }

    /// Add an item, merging by id: an existing entry has its quantity
    /// increased by the incoming amount (zero counts as one), a new id is
    /// appended. Opens the panel as a side effect.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated contents fails.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartStoreError> {
        let added = item.quantity.max(1);

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity += added;
        } else {
            self.items.push(CartItem {
                quantity: added,
                ..item
            });
        }

        self.is_open = true;

        self.persist()
    }

    /// Remove an entry. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated contents fails.
    pub fn remove_item(&mut self, id: &str) -> Result<(), CartStoreError> {
        self.items.retain(|item| item.id != id);

        self.persist()
    }

    /// Set an entry's quantity exactly. Zero removes the entry; quantities
    /// below one are never stored.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated contents fails.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> Result<(), CartStoreError> {
        if quantity == 0 {
            return self.remove_item(id);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }

        self.persist()
    }

    /// Empty the cart and close the panel.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated contents fails.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.items.clear();
        self.is_open = false;

        self.persist()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of `unit_price * quantity`, computed on demand.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.unit_price * u64::from(item.quantity))
            .sum()
    }

    /// Sum of quantities, computed on demand.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    fn persist(&self) -> Result<(), CartStoreError> {
        self.storage.save(&self.items)
    }
}
