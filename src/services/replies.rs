//! Fulfillment text for every reply the webhook can give.

use crate::{
    models::WeatherSnapshot,
    services::{forecast::HorizonViolation, weather::WeatherError},
};
use chrono::NaiveDate;

pub const GREETING: &str = "Hello! This is Weather Bot. How may I help you?";
pub const FAREWELL: &str = "Thank you for contacting me. Goodbye!";
pub const FALLBACK: &str = "I'm sorry, I didn't understand that. How may I assist you?";
pub const ASK_CITY: &str = "Please provide your city.";
pub const ASK_FORECAST_CITY: &str = "Please provide the city for the forecast.";
pub const ASK_USER_CITY: &str = "Which city are you in?";
pub const INVALID_DATE: &str = "Invalid date format. Please provide a valid date.";
pub const PAST_DATE: &str = "Sorry, I can't provide forecasts for past dates.";
pub const TRANSPORT_FAILURE: &str = "Error fetching weather data. Please try again later.";

/// `Monday, 05 May 2025`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}

pub fn city_remembered(city: &str) -> String {
    format!("Got it! I'll remember that you're in {city}.")
}

pub fn current_weather(city: &str, weather: &WeatherSnapshot) -> String {
    format!(
        "The current weather for {city} is {} with a temperature of {}°C, humidity {}%, and wind speed {} m/s.",
        weather.description, weather.temperature_c, weather.humidity_pct, weather.wind_speed_mps
    )
}

pub fn forecast(city: &str, date: NaiveDate, weather: &WeatherSnapshot) -> String {
    let pressure = weather
        .pressure_hpa
        .map(|p| format!(" pressure {p} hPa,"))
        .unwrap_or_default();

    format!(
        "The forecast for {city} on {} is {} with a temperature of {}°C, humidity {}%,{pressure} and wind speed {} m/s.",
        long_date(date),
        weather.description,
        weather.temperature_c,
        weather.humidity_pct,
        weather.wind_speed_mps
    )
}

pub fn horizon(violation: HorizonViolation) -> String {
    match violation {
        HorizonViolation::Past => PAST_DATE.to_string(),
        HorizonViolation::Beyond { last_available } => format!(
            "Sorry, I can only provide forecasts up to {}.",
            long_date(last_available)
        ),
    }
}

/// Which lookup failed, for wording the apology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Current,
    Forecast,
}

pub fn lookup_failed(lookup: Lookup, city: &str, error: &WeatherError) -> String {
    match error {
        WeatherError::Transport(_) => TRANSPORT_FAILURE.to_string(),
        WeatherError::CityNotFound(_)
        | WeatherError::Rejected { .. }
        | WeatherError::Malformed(_) => match lookup {
            Lookup::Current => format!("Sorry, I couldn't fetch the current weather for {city}."),
            Lookup::Forecast => format!("Sorry, I couldn't fetch the forecast for {city}."),
        },
    }
}
