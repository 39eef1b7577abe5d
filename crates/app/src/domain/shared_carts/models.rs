//! Shared Cart Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::shared_carts::code::ShortCode;

/// Fulfillment stage of a shared cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    Pending,
    Contacted,
    Converted,
    Expired,
}

impl CartStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Converted => "converted",
            Self::Expired => "expired",
        }
    }

    /// Whether staff may move a cart from `self` to `next`.
    ///
    /// Carts only move forward: `pending -> contacted -> converted`, with
    /// `expired` reachable from either non-terminal state. Backward moves,
    /// skipped stages and same-state writes are all rejected.
    #[must_use]
    pub fn can_transition_to(self, next: CartStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Contacted)
                | (Self::Contacted, Self::Converted)
                | (Self::Pending | Self::Contacted, Self::Expired)
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converted | Self::Expired)
    }
}

impl Display for CartStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for CartStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "contacted" => Ok(Self::Contacted),
            "converted" => Ok(Self::Converted),
            "expired" => Ok(Self::Expired),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Failure to parse a [`CartStatus`] from caller input.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown cart status {0:?}")]
pub struct ParseStatusError(String);

/// One line of an immutable cart snapshot.
///
/// Names and prices are recorded exactly as submitted; re-validating them
/// against the catalog is the catalog collaborator's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price in minor units.
    pub price: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
}

/// The cart contents captured at handoff time. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<SnapshotItem>,

    /// Subtotal in minor units, as submitted.
    pub subtotal: u64,
}

/// Contact details captured at handoff time. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Shared Cart Model
///
/// Only `status` and `views` change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedCart {
    pub uuid: Uuid,
    pub short_code: ShortCode,
    pub cart: CartSnapshot,
    pub customer: Option<CustomerInfo>,
    pub status: CartStatus,
    pub views: u64,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl SharedCart {
    /// Status as seen by readers.
    ///
    /// Expiry is a read-time label: a non-terminal cart past its deadline
    /// reports `expired` without any stored-state change.
    #[must_use]
    pub fn effective_status(&self, now: Timestamp) -> CartStatus {
        if !self.status.is_terminal() && now > self.expires_at {
            CartStatus::Expired
        } else {
            self.status
        }
    }
}

/// New Shared Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSharedCart {
    pub items: Vec<SnapshotItem>,
    pub customer: Option<CustomerInfo>,
    pub subtotal: u64,
}
