//! Weather provider abstraction and the OpenWeatherMap implementation.

use crate::{
    config::WeatherApiConfig,
    models::{Forecast, ForecastEntry, WeatherSnapshot},
    services::upstream::{UpstreamClient, UpstreamError, UpstreamResponse},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const UNKNOWN_CONDITIONS: &str = "unknown conditions";

/// Failures of a provider lookup
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Provider rejected the request with code {code}: {message}")]
    Rejected { code: u16, message: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Transport(#[from] UpstreamError),
}

/// Source of current conditions and 3-hour forecasts for a city
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// All forecast buckets the provider offers, in provider order
    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError>;
}

/// OpenWeatherMap `cod` field; the API emits it as a number or a string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(i64),
    Text(String),
}

impl OwCode {
    fn as_i64(&self) -> Option<i64> {
        match self {
            OwCode::Number(n) => Some(*n),
            OwCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwEnvelope {
    cod: Option<OwCode>,
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
    wind: Option<OwWind>,
}

#[derive(Debug, Default, Deserialize)]
struct OwCity {
    /// Shift in seconds from UTC
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
    #[serde(default)]
    city: OwCity,
}

fn snapshot(
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: Option<OwWind>,
    observed_at: Option<DateTime<Utc>>,
) -> WeatherSnapshot {
    let description = weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_CONDITIONS.to_string());

    WeatherSnapshot {
        description,
        temperature_c: main.temp,
        humidity_pct: main.humidity,
        wind_speed_mps: wind.map(|w| w.speed).unwrap_or(0.0),
        pressure_hpa: main.pressure,
        observed_at,
    }
}

/// Reject anything that is not a successful reply carrying `cod` 200
fn check_status(response: &UpstreamResponse, city: &str) -> Result<(), WeatherError> {
    let envelope: Option<OwEnvelope> = serde_json::from_str(&response.body).ok();
    let code = envelope
        .as_ref()
        .and_then(|e| e.cod.as_ref())
        .and_then(OwCode::as_i64);
    let message = envelope
        .as_ref()
        .and_then(|e| e.message.as_ref())
        .map(|m| match m {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default();

    if response.status == 404 || code == Some(404) {
        return Err(WeatherError::CityNotFound(city.to_string()));
    }

    if !response.is_success() {
        return Err(WeatherError::Rejected {
            code: response.status,
            message,
        });
    }

    match code {
        Some(200) => Ok(()),
        Some(other) => Err(WeatherError::Rejected {
            code: u16::try_from(other).unwrap_or(0),
            message,
        }),
        None if envelope.is_none() => Err(WeatherError::Malformed(
            "response body is not JSON".to_string(),
        )),
        None => Err(WeatherError::Malformed("response has no cod".to_string())),
    }
}

pub(crate) fn parse_current(
    response: &UpstreamResponse,
    city: &str,
) -> Result<WeatherSnapshot, WeatherError> {
    check_status(response, city)?;

    let parsed: OwCurrentResponse = serde_json::from_str(&response.body)
        .map_err(|e| WeatherError::Malformed(e.to_string()))?;

    let observed_at = parsed.dt.and_then(|ts| DateTime::from_timestamp(ts, 0));
    Ok(snapshot(parsed.main, parsed.weather, parsed.wind, observed_at))
}

pub(crate) fn parse_forecast(
    response: &UpstreamResponse,
    city: &str,
) -> Result<Forecast, WeatherError> {
    check_status(response, city)?;

    let parsed: OwForecastResponse = serde_json::from_str(&response.body)
        .map_err(|e| WeatherError::Malformed(e.to_string()))?;

    let entries = parsed
        .list
        .into_iter()
        .map(|entry| {
            let at = DateTime::from_timestamp(entry.dt, 0).ok_or_else(|| {
                WeatherError::Malformed(format!("forecast timestamp {} out of range", entry.dt))
            })?;
            Ok(ForecastEntry {
                at,
                snapshot: snapshot(entry.main, entry.weather, entry.wind, Some(at)),
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    Ok(Forecast {
        utc_offset_seconds: parsed.city.timezone,
        entries,
    })
}

/// Weather service backed by the OpenWeatherMap 2.5 API
#[derive(Clone)]
pub struct OpenWeatherService {
    client: UpstreamClient,
    config: WeatherApiConfig,
}

impl OpenWeatherService {
    pub fn new(client: UpstreamClient, config: WeatherApiConfig) -> Self {
        Self { client, config }
    }

    async fn fetch(&self, endpoint: &str, city: &str) -> Result<UpstreamResponse, WeatherError> {
        let response = self
            .client
            .get(
                endpoint,
                &self.config.base_url,
                endpoint,
                &[
                    ("q", city),
                    ("appid", self.config.api_key.as_str()),
                    ("units", self.config.units.as_str()),
                ],
            )
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherService {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let response = self.fetch("weather", city).await?;
        parse_current(&response, city)
    }

    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let response = self.fetch("forecast", city).await?;
        parse_forecast(&response, city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(status: u16, body: serde_json::Value) -> UpstreamResponse {
        UpstreamResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_parse_current_success() {
        let response = reply(
            200,
            json!({
                "cod": 200,
                "name": "Paris",
                "dt": 1746446400,
                "main": { "temp": 15.3, "humidity": 82, "pressure": 1012 },
                "weather": [{ "main": "Clouds", "description": "broken clouds" }],
                "wind": { "speed": 3.6 }
            }),
        );

        let snapshot = parse_current(&response, "Paris").unwrap();
        assert_eq!(snapshot.description, "broken clouds");
        assert_eq!(snapshot.temperature_c, 15.3);
        assert_eq!(snapshot.humidity_pct, 82);
        assert_eq!(snapshot.wind_speed_mps, 3.6);
        assert_eq!(snapshot.pressure_hpa, Some(1012.0));
        assert_eq!(snapshot.observed_at.unwrap().timestamp(), 1746446400);
    }

    #[test]
    fn test_parse_current_city_not_found() {
        let response = reply(404, json!({ "cod": "404", "message": "city not found" }));

        let err = parse_current(&response, "Atlantis").unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(ref c) if c == "Atlantis"));
    }

    #[test]
    fn test_parse_current_not_found_code_with_ok_status() {
        let response = reply(200, json!({ "cod": "404", "message": "city not found" }));

        let err = parse_current(&response, "Atlantis").unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(_)));
    }

    #[test]
    fn test_parse_current_unauthorized() {
        let response = reply(401, json!({ "cod": 401, "message": "Invalid API key" }));

        let err = parse_current(&response, "Paris").unwrap_err();
        match err {
            WeatherError::Rejected { code, message } => {
                assert_eq!(code, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_current_malformed_body() {
        let response = UpstreamResponse {
            status: 200,
            body: "<html>gateway</html>".to_string(),
        };
        assert!(matches!(
            parse_current(&response, "Paris"),
            Err(WeatherError::Malformed(_))
        ));

        let missing_main = reply(200, json!({ "cod": 200, "weather": [] }));
        assert!(matches!(
            parse_current(&missing_main, "Paris"),
            Err(WeatherError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_current_fallback_fields() {
        let response = reply(
            200,
            json!({ "cod": 200, "main": { "temp": -2, "humidity": 90 } }),
        );

        let snapshot = parse_current(&response, "Oslo").unwrap();
        assert_eq!(snapshot.description, UNKNOWN_CONDITIONS);
        assert_eq!(snapshot.temperature_c, -2.0);
        assert_eq!(snapshot.wind_speed_mps, 0.0);
        assert_eq!(snapshot.pressure_hpa, None);
        assert_eq!(snapshot.observed_at, None);
    }

    #[test]
    fn test_parse_forecast_entries() {
        let response = reply(
            200,
            json!({
                "cod": "200",
                "message": 0,
                "cnt": 2,
                "list": [
                    {
                        "dt": 1746435600,
                        "main": { "temp": 12.1, "humidity": 70, "pressure": 1015 },
                        "weather": [{ "description": "clear sky" }],
                        "wind": { "speed": 2.4 },
                        "dt_txt": "2025-05-05 09:00:00"
                    },
                    {
                        "dt": 1746446400,
                        "main": { "temp": 17.8, "humidity": 55, "pressure": 1014 },
                        "weather": [{ "description": "few clouds" }],
                        "wind": { "speed": 4.1 },
                        "dt_txt": "2025-05-05 12:00:00"
                    }
                ],
                "city": { "name": "Paris", "country": "FR", "timezone": 7200 }
            }),
        );

        let forecast = parse_forecast(&response, "Paris").unwrap();
        assert_eq!(forecast.utc_offset_seconds, 7200);
        let entries = &forecast.entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].at.timestamp(), 1746446400);
        assert_eq!(entries[1].snapshot.description, "few clouds");
        assert_eq!(entries[1].snapshot.pressure_hpa, Some(1014.0));
    }

    #[test]
    fn test_parse_forecast_without_city_is_utc() {
        let response = reply(200, json!({ "cod": "200", "list": [] }));
        let forecast = parse_forecast(&response, "Paris").unwrap();
        assert_eq!(forecast.utc_offset_seconds, 0);
        assert!(forecast.entries.is_empty());
    }

    #[test]
    fn test_parse_forecast_missing_cod_is_malformed() {
        let response = reply(200, json!({ "list": [] }));
        assert!(matches!(
            parse_forecast(&response, "Paris"),
            Err(WeatherError::Malformed(_))
        ));
    }

    #[test]
    fn test_code_accepts_number_and_text() {
        assert_eq!(OwCode::Number(200).as_i64(), Some(200));
        assert_eq!(OwCode::Text("404".into()).as_i64(), Some(404));
        assert_eq!(OwCode::Text("oops".into()).as_i64(), None);
    }
}
