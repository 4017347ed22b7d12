//! Business logic and core services.
//!
//! The webhook path runs: `slots` (extract city and date) → `dates` and
//! `forecast` (resolve the target day) → `weather` (provider call through
//! `upstream`) → `replies` (format the sentence). `fulfillment` ties them
//! together per intent.

pub mod dates;
pub mod forecast;
pub mod fulfillment;
pub mod metrics;
pub mod replies;
pub mod slots;
pub mod upstream;
pub mod weather;

pub use fulfillment::{Fulfillment, FulfillmentService, Intent, Outcome};
pub use metrics::{AppMetrics, UpstreamMetrics};
pub use upstream::{UpstreamClient, UpstreamError};
pub use weather::{OpenWeatherService, WeatherError, WeatherProvider};
