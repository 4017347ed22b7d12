//! Fulfillment webhook request and response models.
//!
//! These mirror the JSON the conversational platform posts to the webhook.
//! Every inbound field defaults so that partially populated payloads still
//! deserialize; slot values stay as raw JSON because the platform sends
//! strings for some slots and objects for others.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Slot name carrying the city
pub const CITY_PARAM: &str = "geo-city";
/// Slot names carrying the requested date, in lookup order
pub const DATE_PARAMS: [&str; 2] = ["date-time", "date"];
/// Context name under which a stated city is remembered
pub const USER_CITY_CONTEXT: &str = "user-city";

/// Body posted by the platform for each matched intent
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookRequest {
    pub response_id: Option<String>,
    /// Session path, e.g. `projects/p/agent/sessions/abc`
    pub session: String,
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResult {
    pub query_text: Option<String>,
    pub language_code: Option<String>,
    pub intent: IntentInfo,
    pub parameters: HashMap<String, Value>,
    pub output_contexts: Vec<OutputContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase", default)]
pub struct IntentInfo {
    pub name: Option<String>,
    pub display_name: String,
}

/// A named, lifespan-limited key-value record owned by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct OutputContext {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan_count: Option<u32>,
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
}

impl OutputContext {
    /// Context remembering `city`, scoped to `session`
    pub fn user_city(session: &str, city: &str, lifespan: u32) -> Self {
        let name = if session.is_empty() {
            USER_CITY_CONTEXT.to_string()
        } else {
            format!("{}/contexts/{USER_CITY_CONTEXT}", session.trim_end_matches('/'))
        };

        let mut parameters = HashMap::new();
        parameters.insert(CITY_PARAM.to_string(), Value::String(city.to_string()));

        Self {
            name,
            lifespan_count: Some(lifespan),
            parameters,
        }
    }
}

/// Reply returned to the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_contexts: Option<Vec<OutputContext>>,
}

impl WebhookResponse {
    pub fn text(fulfillment_text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
            output_contexts: None,
        }
    }

    pub fn with_context(mut self, context: OutputContext) -> Self {
        self.output_contexts.get_or_insert_with(Vec::new).push(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_platform_payload() {
        let body = json!({
            "responseId": "r-1",
            "session": "projects/demo/agent/sessions/42",
            "queryResult": {
                "queryText": "weather in Paris tomorrow",
                "parameters": { "geo-city": "Paris", "date-time": "2025-05-06T12:00:00+02:00" },
                "intent": { "name": "projects/demo/agent/intents/x", "displayName": "GetWeatherForecast" },
                "outputContexts": [
                    { "name": "projects/demo/agent/sessions/42/contexts/user-city",
                      "lifespanCount": 3,
                      "parameters": { "geo-city": "Lyon" } }
                ],
                "languageCode": "en"
            }
        });

        let request: WebhookRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.session, "projects/demo/agent/sessions/42");
        assert_eq!(request.query_result.intent.display_name, "GetWeatherForecast");
        assert_eq!(request.query_result.parameters[CITY_PARAM], "Paris");
        assert_eq!(request.query_result.output_contexts.len(), 1);
        assert_eq!(request.query_result.output_contexts[0].lifespan_count, Some(3));
    }

    #[test]
    fn test_deserialize_empty_payload() {
        let request: WebhookRequest = serde_json::from_str("{}").unwrap();
        assert!(request.session.is_empty());
        assert!(request.query_result.intent.display_name.is_empty());
        assert!(request.query_result.parameters.is_empty());
        assert!(request.query_result.output_contexts.is_empty());
    }

    #[test]
    fn test_response_omits_missing_contexts() {
        let json = serde_json::to_value(WebhookResponse::text("hi")).unwrap();
        assert_eq!(json, json!({ "fulfillmentText": "hi" }));
    }

    #[test]
    fn test_user_city_context_shape() {
        let response = WebhookResponse::text("ok").with_context(OutputContext::user_city(
            "projects/demo/agent/sessions/42",
            "Paris",
            5,
        ));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({
                "fulfillmentText": "ok",
                "outputContexts": [{
                    "name": "projects/demo/agent/sessions/42/contexts/user-city",
                    "lifespanCount": 5,
                    "parameters": { "geo-city": "Paris" }
                }]
            })
        );
    }

    #[test]
    fn test_user_city_context_without_session() {
        let context = OutputContext::user_city("", "Oslo", 2);
        assert_eq!(context.name, USER_CITY_CONTEXT);
    }
}
