//! Shared Cart Handlers

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod resolve;
pub(crate) mod share;
pub(crate) mod status;
