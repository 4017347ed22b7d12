use actix_web::HttpServer;
use std::io;
use weather_webhook::{AppConfig, AppState, create_app, init_tracing};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // A missing .env is normal in containers
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {e}");
        io::Error::other(e)
    })?;

    init_tracing(&config.logging);

    let state = AppState::from_config(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialise application state");
        io::Error::other(e)
    })?;

    let bind_address = config.server.bind_address();
    tracing::info!(
        host = %bind_address.0,
        port = bind_address.1,
        version = env!("CARGO_PKG_VERSION"),
        "Weather webhook listening"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(bind_address)?
        .run()
        .await
}
