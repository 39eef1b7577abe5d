//! Client cart
//!
//! The shopper's working cart, owned by the session that is building it.
//! Contents are durable across restarts through a storage seam; the
//! open/closed panel flag is ephemeral session state and never persisted.

pub mod errors;
pub mod models;
pub mod storage;
pub mod store;

pub use errors::CartStoreError;
pub use store::CartStore;
