use std::collections::{HashMap, VecDeque};

use common::models::Trend;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// 4 hours of samples at the 5-minute refresh cadence.
pub const MAX_SAMPLES: usize = 48;

/// Per-city bounded ring of (temperature, sampled-at) pairs.
///
/// Appends happen only on successful refreshes, so the ring advances at
/// most once per TTL window per city. Unknown cities are ignored on append
/// and report a stable trend; trend is advisory, not load-bearing.
pub struct HistoryStore {
    series: RwLock<HashMap<String, VecDeque<(i32, Instant)>>>,
}

impl HistoryStore {
    /// Pre-seeds an empty series for every given city key.
    pub fn new<I>(cities: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let series = cities
            .into_iter()
            .map(|key| (key.into(), VecDeque::with_capacity(MAX_SAMPLES)))
            .collect();
        Self {
            series: RwLock::new(series),
        }
    }

    /// Appends a sample, evicting from the front once the ring is full.
    pub async fn append(&self, city: &str, temperature: i32) {
        let mut series = self.series.write().await;
        if let Some(ring) = series.get_mut(city) {
            ring.push_back((temperature, Instant::now()));
            while ring.len() > MAX_SAMPLES {
                ring.pop_front();
            }
        }
    }

    /// Compares the two most recent samples. Fewer than two samples, equal
    /// values, or an unknown city all yield `Stable`.
    pub async fn trend(&self, city: &str) -> Trend {
        let series = self.series.read().await;
        let Some(ring) = series.get(city) else {
            return Trend::Stable;
        };
        if ring.len() < 2 {
            return Trend::Stable;
        }

        let current = ring[ring.len() - 1].0;
        let previous = ring[ring.len() - 2].0;

        if current > previous {
            Trend::Rising
        } else if current < previous {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }

    /// Number of stored samples for a city; 0 for unknown cities.
    pub async fn len(&self, city: &str) -> usize {
        let series = self.series.read().await;
        series.get(city).map(VecDeque::len).unwrap_or(0)
    }

    /// Oldest-to-newest temperatures for a city.
    pub async fn temperatures(&self, city: &str) -> Vec<i32> {
        let series = self.series.read().await;
        series
            .get(city)
            .map(|ring| ring.iter().map(|(t, _)| *t).collect())
            .unwrap_or_default()
    }
}
