//! Client cart store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("failed to read or write cart storage")]
    Io(#[from] std::io::Error),

    #[error("cart storage contents are not valid JSON")]
    Serialization(#[from] serde_json::Error),
}
