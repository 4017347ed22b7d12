//! Weather Webhook - a fulfillment webhook answering weather questions
//!
//! A conversational agent posts each matched intent to `POST /webhook`; the
//! service resolves the city and date slots, asks OpenWeatherMap for current
//! conditions or a forecast, and answers with one sentence of fulfillment
//! text. Every failure, from a missing slot to a provider timeout, becomes a
//! reply rather than an HTTP error.
//!
//! ## Architecture
//!
//! - `models/` - Webhook payloads, weather values and operational responses
//! - `handlers/` - HTTP handlers and the app factory
//! - `middleware/` - Request ID and metrics middleware
//! - `services/` - Intent routing, slot parsing, provider client, replies
//! - `config/` - Environment-driven configuration
//! - `state` - Shared state built once at startup
//! - `telemetry` - Tracing subscriber setup
//! - `utils/` - Credential redaction for logs
//!
//! ## Quick Start
//!
//! ```no_run
//! use weather_webhook::{AppConfig, AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::from_env().map_err(std::io::Error::other)?;
//!     let state = AppState::from_config(&config).map_err(std::io::Error::other)?;
//!     actix_web::HttpServer::new(move || create_app(state.clone()))
//!         .bind(config.server.bind_address())?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use config::{AppConfig, ConfigError, ConversationConfig, MetricsConfig, WeatherApiConfig};
pub use handlers::{create_app, create_openapi_spec, get_metrics, health, version, webhook};
pub use middleware::{MetricsMiddleware, RequestId, RequestIdMiddleware};
pub use models::{
    Forecast, ForecastEntry, HealthResponse, OutputContext, VersionResponse, WeatherSnapshot,
    WebhookRequest, WebhookResponse,
};
pub use services::{
    AppMetrics, Fulfillment, FulfillmentService, Intent, OpenWeatherService, Outcome,
    UpstreamClient, UpstreamError, WeatherError, WeatherProvider,
};
pub use state::{AppState, StartupError};
pub use telemetry::init_tracing;
