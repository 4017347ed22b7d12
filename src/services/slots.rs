//! Slot extraction from intent parameters and prior contexts.

use crate::models::{CITY_PARAM, DATE_PARAMS, OutputContext};
use serde_json::Value;
use std::collections::HashMap;

/// Where a resolved city came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitySource {
    Parameter,
    Context(String),
}

fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// City slot from the current intent's parameters
pub fn city_parameter(parameters: &HashMap<String, Value>) -> Option<String> {
    parameters.get(CITY_PARAM).and_then(|value| match value {
        // Some agents configure the slot as a list
        Value::Array(items) => items.iter().find_map(non_blank),
        other => non_blank(other),
    })
}

/// First context, in the order supplied, that remembers a city
pub fn city_from_contexts(contexts: &[OutputContext]) -> Option<(String, String)> {
    contexts.iter().find_map(|context| {
        city_parameter(&context.parameters).map(|city| (city, context.name.clone()))
    })
}

/// City from the parameters, falling back to earlier contexts
pub fn resolve_city(
    parameters: &HashMap<String, Value>,
    contexts: &[OutputContext],
) -> Option<(String, CitySource)> {
    if let Some(city) = city_parameter(parameters) {
        return Some((city, CitySource::Parameter));
    }
    city_from_contexts(contexts).map(|(city, name)| (city, CitySource::Context(name)))
}

/// Raw date slot text, if the user supplied one.
///
/// Accepts a plain string, a `{"date_time": ..}` object, or a date range
/// (`{"startDate": .., "endDate": ..}`), in which case the start is used.
pub fn date_parameter(parameters: &HashMap<String, Value>) -> Option<String> {
    DATE_PARAMS
        .iter()
        .filter_map(|key| parameters.get(*key))
        .find_map(date_text)
}

fn date_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => non_blank(value),
        Value::Object(map) => ["date_time", "dateTime", "startDate", "startDateTime", "date"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(non_blank),
        Value::Array(items) => items.iter().find_map(date_text),
        _ => None,
    }
}
