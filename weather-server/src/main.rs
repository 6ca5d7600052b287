use axum::http::{HeaderValue, header};
use axum::{Router, routing::get};
use common::tracing::init_tracing_pretty;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use weather_server::{cache, cities, config, handlers, history, openapi, rate_limit, service, upstream};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_pretty();

    let config = config::Config::from_env();

    let client = Arc::new(upstream::OpenMeteoClient::new(
        config.open_meteo_url.clone(),
        Duration::from_secs(config.fetch_timeout_seconds),
    ));
    let history = Arc::new(history::HistoryStore::new(
        cities::CITIES.iter().map(|c| c.key),
    ));
    let cache = Arc::new(cache::WeatherCache::new(
        client.clone(),
        history.clone(),
        Duration::from_secs(config.cache_ttl_seconds),
    ));

    info!("Seeding weather cache from Open-Meteo");
    cache.seed().await;
    info!("Weather cache initialized");

    let limiter = Arc::new(rate_limit::RateLimiter::new(config.rate_limit_per_minute));
    let service = Arc::new(service::WeatherService::new(
        limiter,
        cache,
        client,
        history,
    ));

    let state = handlers::AppState { service };

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/weather/{city}", get(handlers::current_weather))
        .route("/api/forecast/{city}", get(handlers::forecast))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=300"),
        ))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Weather server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Weather server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
