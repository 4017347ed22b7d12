//! Intent routing: turns one webhook request into exactly one reply.

use crate::{
    config::ConversationConfig,
    models::{OutputContext, WebhookRequest, WebhookResponse},
    services::{
        dates::{TargetDate, resolve_target_date},
        forecast::{check_horizon, nearest_entry},
        replies::{self, Lookup},
        slots::{CitySource, city_parameter, date_parameter, resolve_city},
        weather::{WeatherError, WeatherProvider},
    },
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Intents the agent is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greetings,
    Goodbye,
    SetUserCity,
    GetCurrentWeather,
    GetWeatherForecast,
    Unknown,
}

impl Intent {
    pub fn from_display_name(name: &str) -> Self {
        match name.trim() {
            "Greetings" => Intent::Greetings,
            "Goodbye" => Intent::Goodbye,
            "SetUserCity" => Intent::SetUserCity,
            "GetCurrentWeather" => Intent::GetCurrentWeather,
            "GetWeatherForecast" => Intent::GetWeatherForecast,
            _ => Intent::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greetings => "Greetings",
            Intent::Goodbye => "Goodbye",
            Intent::SetUserCity => "SetUserCity",
            Intent::GetCurrentWeather => "GetCurrentWeather",
            Intent::GetWeatherForecast => "GetWeatherForecast",
            Intent::Unknown => "unknown",
        }
    }
}

/// How a request was resolved, for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered,
    Clarification,
    NotFound,
    Unavailable,
    Fallback,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Answered => "answered",
            Outcome::Clarification => "clarification",
            Outcome::NotFound => "not_found",
            Outcome::Unavailable => "unavailable",
            Outcome::Fallback => "fallback",
        }
    }

    fn from_weather_error(error: &WeatherError) -> Self {
        match error {
            WeatherError::CityNotFound(_) => Outcome::NotFound,
            _ => Outcome::Unavailable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fulfillment {
    pub intent: Intent,
    pub outcome: Outcome,
    pub response: WebhookResponse,
}

impl Fulfillment {
    fn text(intent: Intent, outcome: Outcome, text: impl Into<String>) -> Self {
        Self {
            intent,
            outcome,
            response: WebhookResponse::text(text),
        }
    }
}

/// Routes intents to weather lookups and formats the replies
#[derive(Clone)]
pub struct FulfillmentService {
    provider: Arc<dyn WeatherProvider>,
    config: ConversationConfig,
}

impl FulfillmentService {
    pub fn new(provider: Arc<dyn WeatherProvider>, config: ConversationConfig) -> Self {
        Self { provider, config }
    }

    /// Answer `request` as of `now`. Never fails: every path yields a reply.
    pub async fn fulfill(&self, request: &WebhookRequest, now: DateTime<Utc>) -> Fulfillment {
        let query = &request.query_result;
        let intent = Intent::from_display_name(&query.intent.display_name);

        info!(
            intent = %query.intent.display_name,
            session = %request.session,
            response_id = request.response_id.as_deref().unwrap_or(""),
            query_text = query.query_text.as_deref().unwrap_or(""),
            language_code = query.language_code.as_deref().unwrap_or(""),
            "Fulfilling intent"
        );

        match intent {
            Intent::Greetings => Fulfillment::text(intent, Outcome::Answered, replies::GREETING),
            Intent::Goodbye => Fulfillment::text(intent, Outcome::Answered, replies::FAREWELL),
            Intent::SetUserCity => self.set_user_city(request),
            Intent::GetCurrentWeather => {
                match resolve_city(&query.parameters, &query.output_contexts) {
                    Some((city, source)) => {
                        log_city_source(&city, &source);
                        self.current_weather(&city).await
                    }
                    None => Fulfillment::text(intent, Outcome::Clarification, replies::ASK_CITY),
                }
            }
            Intent::GetWeatherForecast => {
                match resolve_city(&query.parameters, &query.output_contexts) {
                    Some((city, source)) => {
                        log_city_source(&city, &source);
                        let date = date_parameter(&query.parameters);
                        self.forecast(&city, date.as_deref(), now).await
                    }
                    None => Fulfillment::text(
                        intent,
                        Outcome::Clarification,
                        replies::ASK_FORECAST_CITY,
                    ),
                }
            }
            Intent::Unknown => {
                debug!(intent = %query.intent.display_name, "No handler for intent");
                Fulfillment::text(intent, Outcome::Fallback, replies::FALLBACK)
            }
        }
    }

    fn set_user_city(&self, request: &WebhookRequest) -> Fulfillment {
        let intent = Intent::SetUserCity;
        let Some(city) = city_parameter(&request.query_result.parameters) else {
            return Fulfillment::text(intent, Outcome::Clarification, replies::ASK_USER_CITY);
        };

        let context = OutputContext::user_city(
            &request.session,
            &city,
            self.config.user_city_context_lifespan,
        );

        Fulfillment {
            intent,
            outcome: Outcome::Answered,
            response: WebhookResponse::text(replies::city_remembered(&city)).with_context(context),
        }
    }

    async fn current_weather(&self, city: &str) -> Fulfillment {
        let intent = Intent::GetCurrentWeather;
        match self.provider.current(city).await {
            Ok(weather) => Fulfillment::text(
                intent,
                Outcome::Answered,
                replies::current_weather(city, &weather),
            ),
            Err(e) => {
                warn!(city = %city, error = %e, "Current weather lookup failed");
                Fulfillment::text(
                    intent,
                    Outcome::from_weather_error(&e),
                    replies::lookup_failed(Lookup::Current, city, &e),
                )
            }
        }
    }

    async fn forecast(&self, city: &str, date: Option<&str>, now: DateTime<Utc>) -> Fulfillment {
        let intent = Intent::GetWeatherForecast;

        let TargetDate { date: target, today } = match date {
            Some(text) => match resolve_target_date(text, now) {
                Ok(resolved) => resolved,
                Err(e) => {
                    info!(error = %e, "Date slot could not be parsed");
                    return Fulfillment::text(intent, Outcome::Clarification, e.user_message());
                }
            },
            None => TargetDate::today(now),
        };

        if let Err(violation) = check_horizon(target, today, self.config.forecast_horizon_days) {
            info!(target_date = %target, today = %today, "Forecast date outside provider horizon");
            return Fulfillment::text(intent, Outcome::Clarification, replies::horizon(violation));
        }

        let result = self.provider.forecast(city).await.and_then(|forecast| {
            nearest_entry(&forecast.entries, target, forecast.offset())
                .map(|entry| entry.snapshot.clone())
                .ok_or_else(|| WeatherError::Malformed("forecast list is empty".to_string()))
        });

        match result {
            Ok(weather) => Fulfillment::text(
                intent,
                Outcome::Answered,
                replies::forecast(city, target, &weather),
            ),
            Err(e) => {
                warn!(city = %city, target_date = %target, error = %e, "Forecast lookup failed");
                Fulfillment::text(
                    intent,
                    Outcome::from_weather_error(&e),
                    replies::lookup_failed(Lookup::Forecast, city, &e),
                )
            }
        }
    }
}

fn log_city_source(city: &str, source: &CitySource) {
    match source {
        CitySource::Parameter => debug!(city = %city, "City taken from parameters"),
        CitySource::Context(name) => {
            info!(city = %city, context = %name, "City recovered from conversation context")
        }
    }
}
