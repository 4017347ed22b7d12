//! Shared application state built once at startup.

use crate::{
    config::{AppConfig, MetricsConfig},
    services::{
        AppMetrics, FulfillmentService, OpenWeatherService, UpstreamClient, WeatherProvider,
    },
};
use std::sync::Arc;

/// Errors that stop the server from starting
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to create metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Everything the request handlers read; cheap to clone per worker
#[derive(Clone)]
pub struct AppState {
    pub fulfillment: Arc<FulfillmentService>,
    pub metrics: Arc<AppMetrics>,
    pub metrics_config: MetricsConfig,
}

impl AppState {
    /// Wire the OpenWeatherMap provider and metrics from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let metrics = AppMetrics::new()?;
        let client = UpstreamClient::new(config.upstream.clone(), Some(metrics.upstream.clone()))?;
        let provider = OpenWeatherService::new(client, config.weather.clone());

        tracing::info!(
            base_url = %config.weather.base_url,
            units = %config.weather.units,
            forecast_horizon_days = config.conversation.forecast_horizon_days,
            "Weather provider configured"
        );

        Ok(Self::with_provider(
            Arc::new(provider),
            config,
            metrics,
        ))
    }

    /// Build state around an arbitrary provider
    pub fn with_provider(
        provider: Arc<dyn WeatherProvider>,
        config: &AppConfig,
        metrics: AppMetrics,
    ) -> Self {
        Self {
            fulfillment: Arc::new(FulfillmentService::new(
                provider,
                config.conversation.clone(),
            )),
            metrics: Arc::new(metrics),
            metrics_config: config.metrics.clone(),
        }
    }
}
