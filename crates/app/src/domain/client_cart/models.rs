//! Client Cart Models

use serde::{Deserialize, Serialize};

/// An item in the shopper's working cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: u64,

    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
