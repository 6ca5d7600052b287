use std::sync::Arc;

use common::errors::AppError;
use common::models::{ForecastResponse, WeatherReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::cache::WeatherCache;
use crate::forecast;
use crate::history::HistoryStore;
use crate::rate_limit::RateLimiter;
use crate::text;
use crate::upstream::OpenMeteoClient;

/// Query facade: the only entry point the handlers call. Sequences the
/// rate limiter, the cache (which refreshes and records history) and the
/// response assembly.
pub struct WeatherService {
    limiter: Arc<RateLimiter>,
    cache: Arc<WeatherCache>,
    client: Arc<OpenMeteoClient>,
    history: Arc<HistoryStore>,
    // Seedable so tests can pin the synthetic fields.
    rng: Mutex<StdRng>,
}

impl WeatherService {
    pub fn new(
        limiter: Arc<RateLimiter>,
        cache: Arc<WeatherCache>,
        client: Arc<OpenMeteoClient>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self::with_rng(limiter, cache, client, history, StdRng::from_os_rng())
    }

    pub fn with_rng(
        limiter: Arc<RateLimiter>,
        cache: Arc<WeatherCache>,
        client: Arc<OpenMeteoClient>,
        history: Arc<HistoryStore>,
        rng: StdRng,
    ) -> Self {
        Self {
            limiter,
            cache,
            client,
            history,
            rng: Mutex::new(rng),
        }
    }

    /// Current conditions for a city: cached core fields plus per-request
    /// synthetic extras (UV index, precipitation chance, synthetic
    /// forecast). The extras are randomized on every call and never
    /// persisted into the cache.
    #[instrument(skip(self), fields(city = %city_key))]
    pub async fn current(&self, city_key: &str) -> Result<WeatherReport, AppError> {
        if !self.limiter.admit().await {
            return Err(AppError::RateLimited);
        }

        let mut snapshot = self.cache.get(city_key).await?;
        let trend = self.history.trend(city_key).await;

        let forecast = {
            let mut rng = self.rng.lock().await;
            snapshot.uv_index = rng.random_range(0..12) as f64;
            snapshot.precip_chance = rng.random_range(0..100);
            forecast::synthetic_forecast(&mut *rng)
        };

        info!(city = %city_key, temperature = snapshot.temperature, ?trend, "Serving current conditions");

        let ascii_art = text::ascii_art(snapshot.condition).to_string();
        Ok(WeatherReport {
            current: snapshot,
            trend,
            forecast,
            ascii_art,
        })
    }

    /// Five-day forecast for a city. Always re-fetches upstream (no TTL);
    /// on any upstream failure it falls back to a synthetic forecast. The
    /// accompanying current conditions come from the cache as-is.
    #[instrument(skip(self), fields(city = %city_key))]
    pub async fn forecast(&self, city_key: &str) -> Result<ForecastResponse, AppError> {
        if !self.limiter.admit().await {
            return Err(AppError::RateLimited);
        }

        let current = self
            .cache
            .peek(city_key)
            .await
            .ok_or_else(|| AppError::unknown_location(city_key))?;

        let forecast = match self.client.fetch_daily(city_key).await {
            Ok(days) => days,
            Err(e) => {
                warn!(city = %city_key, error = %e, "Daily fetch failed, generating synthetic forecast");
                let mut rng = self.rng.lock().await;
                forecast::synthetic_forecast(&mut *rng)
            }
        };

        Ok(ForecastResponse { current, forecast })
    }
}
