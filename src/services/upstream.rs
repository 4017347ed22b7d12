//! Outbound HTTP client for the weather provider.
//!
//! Wraps `reqwest` with:
//! - a hard per-call deadline and a connect timeout
//! - structured logging with credentials stripped from URLs
//! - Prometheus counters per endpoint and outcome
//!
//! No retries: a call either completes within the deadline or fails.

use crate::{
    config::UpstreamClientConfig, services::metrics::UpstreamMetrics,
    utils::redact::redact_credentials,
};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use url::Url;

/// Raw provider reply: status plus body text
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors that can occur before a provider reply is available
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client used for every provider call
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamClientConfig,
    metrics: Option<UpstreamMetrics>,
}

impl UpstreamClient {
    pub fn new(
        config: UpstreamClientConfig,
        metrics: Option<UpstreamMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    /// GET `base` joined with `path` and `query`, returning status and body.
    ///
    /// `endpoint` is a short label used for logs and metrics.
    pub async fn get(
        &self,
        endpoint: &str,
        base: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = build_url(base, path, query)?;
        let loggable_url = redact_credentials(url.as_str());
        let deadline = Duration::from_secs(self.config.timeout_seconds);
        let start = Instant::now();

        let call = async {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(UpstreamResponse { status, body })
        };

        let result = match tokio::time::timeout(deadline, call).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) if e.is_timeout() => Err(UpstreamError::Timeout),
            Ok(Err(e)) => Err(UpstreamError::NetworkError(e)),
            Err(_) => Err(UpstreamError::Timeout),
        };
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                let outcome = if response.is_success() { "success" } else { "http_error" };
                self.record(endpoint, outcome, duration);
                if !response.is_success() {
                    warn!(
                        endpoint = %endpoint,
                        url = %loggable_url,
                        status = response.status,
                        duration_ms = duration.as_millis(),
                        "Weather provider returned non-success status"
                    );
                } else if self.config.enable_detailed_logging {
                    info!(
                        endpoint = %endpoint,
                        url = %loggable_url,
                        status = response.status,
                        duration_ms = duration.as_millis(),
                        "Weather provider request completed"
                    );
                }
            }
            Err(UpstreamError::Timeout) => {
                self.record(endpoint, "timeout", duration);
                warn!(
                    endpoint = %endpoint,
                    url = %loggable_url,
                    timeout_seconds = deadline.as_secs(),
                    "Weather provider request timed out"
                );
            }
            Err(e) => {
                self.record(endpoint, "network_error", duration);
                error!(
                    endpoint = %endpoint,
                    url = %loggable_url,
                    error = %redact_credentials(&e.to_string()),
                    duration_ms = duration.as_millis(),
                    "Weather provider request failed"
                );
            }
        }

        result
    }

    fn record(&self, endpoint: &str, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics.record(endpoint, outcome, duration);
        }
    }
}

/// Join `path` onto `base` and append url-encoded query pairs
fn build_url(base: &str, path: &str, query: &[(&str, &str)]) -> Result<Url, UpstreamError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut().extend_pairs(query.iter());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_city() {
        let url = build_url(
            "https://api.example.com/data/2.5/",
            "/weather",
            &[("q", "São Paulo"), ("appid", "k"), ("units", "metric")],
        )
        .unwrap();

        assert_eq!(url.path(), "/data/2.5/weather");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_string(), "São Paulo".to_string()));
        assert_eq!(pairs[2], ("units".to_string(), "metric".to_string()));
    }

    #[test]
    fn test_build_url_rejects_garbage() {
        let err = build_url("not a base", "weather", &[]).unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = UpstreamClientConfig {
            timeout_seconds: 2,
            connect_timeout_seconds: 1,
            enable_detailed_logging: false,
        };
        let client = UpstreamClient::new(config, None).unwrap();

        // Port 9 on loopback is the discard service; nothing listens there in CI.
        let result = client
            .get("weather", "http://127.0.0.1:9", "weather", &[("q", "Paris")])
            .await;

        assert!(matches!(
            result,
            Err(UpstreamError::NetworkError(_)) | Err(UpstreamError::Timeout)
        ));
    }
}
