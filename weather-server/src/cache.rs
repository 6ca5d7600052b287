use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::errors::AppError;
use common::models::CitySnapshot;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::cities;
use crate::history::HistoryStore;
use crate::upstream::OpenMeteoClient;

struct CacheEntry {
    snapshot: CitySnapshot,
    refreshed_at: Instant,
}

/// Per-city snapshot cache with refresh-on-stale-read.
///
/// Each city has its own entry mutex, so a reader only ever blocks behind
/// an in-flight refresh for the same city. Refresh failures leave both the
/// snapshot and its timestamp untouched: the next stale read retries, and
/// callers get stale data instead of an error.
pub struct WeatherCache {
    entries: RwLock<HashMap<String, Arc<Mutex<CacheEntry>>>>,
    ttl: Duration,
    client: Arc<OpenMeteoClient>,
    history: Arc<HistoryStore>,
}

impl WeatherCache {
    pub fn new(client: Arc<OpenMeteoClient>, history: Arc<HistoryStore>, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            client,
            history,
        }
    }

    /// Creates one entry per registered city, fetching live data where
    /// possible and falling back to the built-in defaults otherwise. The
    /// fallback table is complete, so every city ends up with a snapshot.
    pub async fn seed(&self) {
        let mut entries = self.entries.write().await;
        for city in cities::CITIES {
            let snapshot = match self.client.fetch_current(city.key).await {
                Ok(snapshot) => {
                    info!(city = city.key, temperature = snapshot.temperature, "Seeded from upstream");
                    snapshot
                }
                Err(e) => {
                    warn!(city = city.key, error = %e, "Initial fetch failed, using fallback data");
                    cities::fallback_snapshot(city)
                }
            };
            entries.insert(
                city.key.to_string(),
                Arc::new(Mutex::new(CacheEntry {
                    snapshot,
                    refreshed_at: Instant::now(),
                })),
            );
        }
    }

    /// Returns the snapshot for a city, refreshing it first when its age
    /// exceeds the TTL. The returned snapshot may be stale but is never
    /// partially written; concurrent readers of the same city serialize on
    /// the entry lock.
    #[instrument(skip(self), fields(city = %city_key))]
    pub async fn get(&self, city_key: &str) -> Result<CitySnapshot, AppError> {
        let entry = {
            let entries = self.entries.read().await;
            entries.get(city_key).cloned()
        }
        .ok_or_else(|| AppError::unknown_location(city_key))?;

        let mut entry = entry.lock().await;

        if entry.refreshed_at.elapsed() > self.ttl {
            match self.client.fetch_current(city_key).await {
                Ok(snapshot) => {
                    info!(city = %city_key, temperature = snapshot.temperature, "Refreshed snapshot");
                    self.history.append(city_key, snapshot.temperature).await;
                    entry.snapshot = snapshot;
                    entry.refreshed_at = Instant::now();
                }
                Err(e) => {
                    // Fail open: keep the stale snapshot and do not advance
                    // the timestamp, so the next read retries.
                    warn!(city = %city_key, error = %e, "Refresh failed, serving cached snapshot");
                }
            }
        }

        Ok(entry.snapshot.clone())
    }

    /// Returns the cached snapshot without triggering a refresh.
    pub async fn peek(&self, city_key: &str) -> Option<CitySnapshot> {
        let entry = {
            let entries = self.entries.read().await;
            entries.get(city_key).cloned()
        }?;
        let entry = entry.lock().await;
        Some(entry.snapshot.clone())
    }

    /// When the city's entry was last successfully refreshed (or seeded).
    pub async fn last_refreshed(&self, city_key: &str) -> Option<Instant> {
        let entry = {
            let entries = self.entries.read().await;
            entries.get(city_key).cloned()
        }?;
        let entry = entry.lock().await;
        Some(entry.refreshed_at)
    }
}
