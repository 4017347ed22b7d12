//! Small helpers shared across modules.

pub mod redact;

pub use redact::redact_credentials;
