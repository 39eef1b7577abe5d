//! Durable storage for cart contents.

use std::path::PathBuf;

use fs_err as fs;
use mockall::automock;

use crate::domain::client_cart::{errors::CartStoreError, models::CartItem};

/// Persistence seam for the working cart.
///
/// Only the item list crosses this boundary; UI state stays in memory.
/// Concurrent writers (two sessions sharing one backing file) get
/// last-write-wins, which is acceptable for a personal cart.
#[automock]
pub trait CartStorage {
    /// Load the persisted item list. An absent backing store is an empty
    /// cart, not an error.
    fn load(&self) -> Result<Vec<CartItem>, CartStoreError>;

    /// Replace the persisted item list.
    fn save(&self, items: &[CartItem]) -> Result<(), CartStoreError>;
}

/// JSON file backing for the working cart.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartItem>, CartStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CartStoreError> {
        let contents = serde_json::to_string_pretty(items)?;

        fs::write(&self.path, contents)?;

        Ok(())
    }
}
