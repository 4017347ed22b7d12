//! Data models for the webhook and the operational endpoints.

pub mod api;
pub mod weather;
pub mod webhook;

pub use api::*;
pub use weather::*;
pub use webhook::*;
