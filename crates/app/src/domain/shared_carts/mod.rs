//! Shared carts

pub mod code;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use code::ShortCode;
pub use errors::SharedCartsServiceError;
pub use service::*;
