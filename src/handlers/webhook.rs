//! Fulfillment webhook handler.

use crate::{
    models::{WebhookRequest, WebhookResponse},
    services::{AppMetrics, FulfillmentService, replies},
};
use actix_web::{
    Error, HttpRequest, HttpResponse, Result,
    error::{InternalError, JsonPayloadError},
    web,
};
use chrono::Utc;
use paperclip::actix::api_v2_operation;

/// Fulfillment webhook
///
/// Receives one matched intent from the conversational platform and answers
/// with a single fulfillment text, optionally setting output contexts.
/// Weather lookup failures are turned into apologies, never HTTP errors.
#[api_v2_operation(
    summary = "Fulfillment Webhook",
    description = "Answers a matched intent (Greetings, Goodbye, SetUserCity, GetCurrentWeather, GetWeatherForecast) with fulfillment text. City and date are read from the intent parameters; a city remembered in an earlier output context is used when the parameter is blank.",
    tags("Webhook"),
    responses(
        (status = 200, description = "Fulfillment reply", body = WebhookResponse),
        (status = 400, description = "Body is not a valid webhook request; carries the fallback reply")
    )
)]
pub async fn webhook(
    req: HttpRequest,
    body: web::Json<WebhookRequest>,
) -> Result<web::Json<WebhookResponse>, Error> {
    let Some(service) = req.app_data::<web::Data<FulfillmentService>>() else {
        tracing::error!("Fulfillment service is not configured");
        return Ok(web::Json(WebhookResponse::text(replies::TRANSPORT_FAILURE)));
    };

    let fulfillment = service.fulfill(&body, Utc::now()).await;

    tracing::info!(
        intent = fulfillment.intent.as_str(),
        outcome = fulfillment.outcome.as_str(),
        "Webhook answered"
    );

    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_fulfillment(fulfillment.intent.as_str(), fulfillment.outcome.as_str());
    }

    Ok(web::Json(fulfillment.response))
}

/// Body extractor settings for the webhook.
///
/// A payload that does not decode is answered with 400 and the fallback text,
/// so the platform still has something to say.
pub fn webhook_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected malformed webhook body");

    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_fulfillment("unknown", "fallback");
    }

    let response = HttpResponse::BadRequest().json(WebhookResponse::text(replies::FALLBACK));
    InternalError::from_response(err, response).into()
}
