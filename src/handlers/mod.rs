//! HTTP request handlers.
//!
//! `webhook` is the fulfillment endpoint; the rest are the operational
//! endpoints every deployment carries.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod version;
pub mod webhook;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use version::*;
pub use webhook::*;
