//! Cartlink Domain Concerns

pub mod client_cart;
pub mod handoff;
pub mod shared_carts;
