use std::sync::Arc;
use std::time::Duration;

use common::errors::AppError;
use common::models::{Condition, Trend};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_server::cache::WeatherCache;
use weather_server::cities;
use weather_server::history::HistoryStore;
use weather_server::rate_limit::RateLimiter;
use weather_server::service::WeatherService;
use weather_server::upstream::OpenMeteoClient;

const FORECAST_PATH: &str = "/v1/forecast";

fn current_body(temperature: f64, weather_code: u32) -> serde_json::Value {
    json!({
        "current": {
            "temperature_2m": temperature,
            "relative_humidity_2m": 65.0,
            "wind_speed_10m": 10.2,
            "weather_code": weather_code
        }
    })
}

async fn mount_current(server: &MockServer, temperature: f64, weather_code: u32) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(temperature, weather_code)))
        .mount(server)
        .await;
}

async fn mount_failure(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> Arc<OpenMeteoClient> {
    Arc::new(OpenMeteoClient::new(
        format!("{}{}", server.uri(), FORECAST_PATH),
        Duration::from_secs(2),
    ))
}

fn cache_with(client: Arc<OpenMeteoClient>, ttl: Duration) -> (Arc<WeatherCache>, Arc<HistoryStore>) {
    let history = Arc::new(HistoryStore::new(cities::CITIES.iter().map(|c| c.key)));
    let cache = Arc::new(WeatherCache::new(client, history.clone(), ttl));
    (cache, history)
}

fn service_with(
    cache: Arc<WeatherCache>,
    client: Arc<OpenMeteoClient>,
    history: Arc<HistoryStore>,
    limit: u32,
) -> WeatherService {
    WeatherService::with_rng(
        Arc::new(RateLimiter::new(limit)),
        cache,
        client,
        history,
        StdRng::seed_from_u64(42),
    )
}

#[tokio::test]
async fn seed_falls_back_when_upstream_is_down() {
    let server = MockServer::start().await;
    mount_failure(&server).await;

    let client = client_for(&server);
    let (cache, _) = cache_with(client, Duration::from_secs(300));
    cache.seed().await;

    // Every configured city has a snapshot even though every fetch failed.
    for city in cities::CITIES {
        let snapshot = cache.get(city.key).await.unwrap();
        assert_eq!(snapshot.location, city.name);
        assert!(!snapshot.dramatic_message.is_empty());
    }

    let zagreb = cache.get("zagreb").await.unwrap();
    assert_eq!(zagreb.temperature, 3);
    assert_eq!(zagreb.condition, Condition::Cloudy);
}

#[tokio::test]
async fn unknown_city_is_surfaced_as_an_error() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, _) = cache_with(client, Duration::from_secs(300));
    cache.seed().await;

    let err = cache.get("vukovar").await.unwrap_err();
    assert!(matches!(err, AppError::UnknownLocation(_)));
}

#[tokio::test]
async fn reads_within_ttl_serve_identical_cached_fields() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, _) = cache_with(client, Duration::from_secs(300));
    cache.seed().await;

    // Upstream now reports different weather, but the TTL has not elapsed.
    server.reset().await;
    mount_current(&server, 20.4, 0).await;

    let first = cache.get("zagreb").await.unwrap();
    let second = cache.get("zagreb").await.unwrap();
    assert_eq!(first.temperature, 15);
    assert_eq!(first.condition, Condition::Cloudy);
    assert_eq!(second.temperature, first.temperature);
    assert_eq!(second.condition, first.condition);
    assert_eq!(second.dramatic_message, first.dramatic_message);
}

#[tokio::test]
async fn stale_read_refreshes_from_upstream() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client, Duration::ZERO);
    cache.seed().await;
    let seeded_at = cache.last_refreshed("zagreb").await.unwrap();

    server.reset().await;
    mount_current(&server, 20.4, 0).await;

    let snapshot = cache.get("zagreb").await.unwrap();
    assert_eq!(snapshot.temperature, 20); // truncated from 20.4
    assert_eq!(snapshot.condition, Condition::Sunny);

    let refreshed_at = cache.last_refreshed("zagreb").await.unwrap();
    assert!(refreshed_at > seeded_at);

    // The refresh recorded a history sample; seeding does not.
    assert_eq!(history.temperatures("zagreb").await, vec![20]);
}

#[tokio::test]
async fn failed_refresh_serves_stale_and_keeps_timestamp() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client, Duration::ZERO);
    cache.seed().await;
    let seeded_at = cache.last_refreshed("zagreb").await.unwrap();

    server.reset().await;
    mount_failure(&server).await;

    let snapshot = cache.get("zagreb").await.unwrap();
    assert_eq!(snapshot.temperature, 15);
    assert_eq!(snapshot.condition, Condition::Cloudy);
    assert_eq!(cache.last_refreshed("zagreb").await.unwrap(), seeded_at);
    assert!(history.temperatures("zagreb").await.is_empty());

    // No negative caching: the next read retries and picks up new data.
    server.reset().await;
    mount_current(&server, 21.0, 0).await;
    let snapshot = cache.get("zagreb").await.unwrap();
    assert_eq!(snapshot.temperature, 21);
    assert!(cache.last_refreshed("zagreb").await.unwrap() > seeded_at);
}

#[tokio::test]
async fn concurrent_readers_never_observe_a_torn_snapshot() {
    let server = MockServer::start().await;
    mount_current(&server, 10.0, 3).await;

    let client = client_for(&server);
    let (cache, _) = cache_with(client, Duration::ZERO);
    cache.seed().await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body(30.0, 0))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move { cache.get("zagreb").await.unwrap() }));
    }

    for handle in handles {
        let snapshot = handle.await.unwrap();
        let pre_refresh = snapshot.temperature == 10 && snapshot.condition == Condition::Cloudy;
        let post_refresh = snapshot.temperature == 30 && snapshot.condition == Condition::Sunny;
        assert!(
            pre_refresh || post_refresh,
            "torn snapshot: {}°C / {:?}",
            snapshot.temperature,
            snapshot.condition
        );
    }
}

#[tokio::test]
async fn facade_rejects_queries_past_the_rate_ceiling() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client.clone(), Duration::from_secs(300));
    cache.seed().await;
    let service = service_with(cache, client, history, 3);

    for _ in 0..3 {
        assert!(service.current("zagreb").await.is_ok());
    }
    let err = service.current("zagreb").await.unwrap_err();
    assert!(matches!(err, AppError::RateLimited));

    // The forecast endpoint shares the same window.
    let err = service.forecast("zagreb").await.unwrap_err();
    assert!(matches!(err, AppError::RateLimited));
}

#[tokio::test]
async fn synthetic_fields_are_randomized_per_call_and_never_cached() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client.clone(), Duration::from_secs(300));
    cache.seed().await;
    let service = service_with(cache.clone(), client, history, 100);

    let first = service.current("zagreb").await.unwrap();
    let second = service.current("zagreb").await.unwrap();

    // Core fields are cached and identical across calls.
    assert_eq!(first.current.temperature, second.current.temperature);
    assert_eq!(first.current.condition, second.current.condition);
    assert_eq!(first.current.dramatic_message, second.current.dramatic_message);

    for report in [&first, &second] {
        assert!((0.0..=11.0).contains(&report.current.uv_index));
        assert!((0..=99).contains(&report.current.precip_chance));
        assert_eq!(report.forecast.len(), 5);
        assert_eq!(report.ascii_art, weather_server::text::ascii_art(Condition::Cloudy));
    }

    // The randomized extras never land in the cache.
    let cached = cache.peek("zagreb").await.unwrap();
    assert_eq!(cached.uv_index, 0.0);
    assert_eq!(cached.precip_chance, 0);
}

#[tokio::test]
async fn trend_follows_successive_refreshes() {
    let server = MockServer::start().await;
    mount_current(&server, 12.0, 3).await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client.clone(), Duration::ZERO);
    cache.seed().await;
    let service = service_with(cache, client, history, 100);

    // One sample after the first refresh: still stable.
    let report = service.current("zagreb").await.unwrap();
    assert_eq!(report.trend, Trend::Stable);

    server.reset().await;
    mount_current(&server, 10.0, 3).await;
    let report = service.current("zagreb").await.unwrap();
    assert_eq!(report.trend, Trend::Falling);

    server.reset().await;
    mount_current(&server, 15.0, 3).await;
    let report = service.current("zagreb").await.unwrap();
    assert_eq!(report.trend, Trend::Rising);
}

#[tokio::test]
async fn forecast_falls_back_to_synthetic_on_upstream_failure() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client.clone(), Duration::from_secs(300));
    cache.seed().await;
    let service = service_with(cache, client, history, 100);

    server.reset().await;
    mount_failure(&server).await;

    let response = service.forecast("zagreb").await.unwrap();
    assert_eq!(response.current.temperature, 15);
    assert_eq!(response.forecast.len(), 5);
    for day in &response.forecast {
        assert!((5..=19).contains(&day.high));
        assert!((-3..=0).contains(&day.low));
    }
}

#[tokio::test]
async fn forecast_maps_upstream_daily_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "temperature_2m": 15.9,
                "relative_humidity_2m": 65.0,
                "wind_speed_10m": 10.2,
                "weather_code": 3
            },
            "daily": {
                "time": ["d1", "d2", "d3", "d4", "d5", "d6"],
                "weather_code": [0, 3, 61, 71, 80, 95],
                "temperature_2m_max": [12.7, 8.0, 6.2, 1.0, 4.9, 7.0],
                "temperature_2m_min": [-0.5, -1.5, 0.0, -4.0, 1.2, 2.0]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client.clone(), Duration::from_secs(300));
    cache.seed().await;
    let service = service_with(cache, client, history, 100);

    let response = service.forecast("zagreb").await.unwrap();
    assert_eq!(response.forecast.len(), 5); // capped at five days

    let first = &response.forecast[0];
    assert_eq!(first.high, 12); // truncated from 12.7
    assert_eq!(first.low, 0); // truncated toward zero from -0.5
    assert_eq!(first.condition, Condition::Sunny);

    assert_eq!(response.forecast[1].low, -1);
    assert_eq!(response.forecast[2].condition, Condition::Rain);
    assert_eq!(response.forecast[3].condition, Condition::Snow);
    assert_eq!(response.forecast[4].condition, Condition::Showers);
    for day in &response.forecast {
        assert!(!day.date.is_empty());
    }
}

#[tokio::test]
async fn forecast_for_unknown_city_is_not_found() {
    let server = MockServer::start().await;
    mount_current(&server, 15.9, 3).await;

    let client = client_for(&server);
    let (cache, history) = cache_with(client.clone(), Duration::from_secs(300));
    cache.seed().await;
    let service = service_with(cache, client, history, 100);

    let err = service.forecast("vukovar").await.unwrap_err();
    assert!(matches!(err, AppError::UnknownLocation(_)));
}
