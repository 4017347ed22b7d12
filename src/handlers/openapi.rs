//! OpenAPI document and app factory.

use crate::{
    handlers::{get_metrics, health, version, webhook, webhook_json_config},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    state::AppState,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// OpenAPI metadata served at `/api/spec/v2`
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Weather Webhook".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Fulfillment webhook answering weather questions from a conversational agent.\n\n\
                ## Intents\n\
                - `Greetings` / `Goodbye`: fixed replies\n\
                - `SetUserCity`: remembers `geo-city` in a `user-city` output context\n\
                - `GetCurrentWeather`: current conditions for `geo-city`\n\
                - `GetWeatherForecast`: forecast for `geo-city` on `date-time`, within the provider horizon\n\
                \n\
                Any other intent gets a generic fallback reply. When `geo-city` is blank the city is\n\
                taken from the first output context that carries one.\n\
                \n\
                ## Errors\n\
                Provider failures are reported in `fulfillmentText`; the webhook answers 200.\n\
                Only an undecodable body is rejected, with 400 and the fallback reply."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build the application around `state`.
///
/// Used by `main` for each worker and by the integration tests.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(webhook_json_config())
        .app_data(web::Data::from(state.fulfillment))
        .app_data(web::Data::from(state.metrics))
        .app_data(web::Data::new(state.metrics_config))
        .service(web::resource("/webhook").route(web::post().to(webhook)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
