use std::time::Duration;

use chrono::{Datelike, Days, Local};
use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::{CitySnapshot, Condition, ForecastDay};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::cities;
use crate::text;

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: Option<CurrentBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    weather_code: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    weather_code: Vec<u32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

/// Open-Meteo client: one GET per call, bounded timeout, no retries.
/// Callers absorb failures by serving stale or synthetic data.
pub struct OpenMeteoClient {
    http_client: HttpClient,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http_client: HttpClient::new(timeout),
            base_url,
        }
    }

    /// Fetches current conditions for a registered city and maps them into
    /// a snapshot. Temperatures are truncated toward zero, matching the
    /// integer degrees the API serves elsewhere.
    #[instrument(skip(self), fields(city = %city_key))]
    pub async fn fetch_current(&self, city_key: &str) -> Result<CitySnapshot, AppError> {
        let city = cities::lookup(city_key)
            .ok_or_else(|| AppError::internal(format!("No coordinates for city: {}", city_key)))?;

        let url = format!(
            "{}?latitude={:.4}&longitude={:.4}&current=temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m&daily=weather_code,temperature_2m_max,temperature_2m_min&timezone=Europe/Belgrade",
            self.base_url, city.latitude, city.longitude
        );

        let response: OpenMeteoResponse = self.http_client.get_json(&url).await?;
        let current = response
            .current
            .ok_or_else(|| AppError::internal("Response missing current block"))?;

        let condition = condition_for_code(current.weather_code.unwrap_or(0));
        let temperature = current.temperature_2m as i32;

        info!(city = %city_key, temperature, condition = condition.label(), "Fetched current conditions");

        Ok(CitySnapshot {
            location: city.name.to_string(),
            temperature,
            condition,
            emoji: condition.emoji().to_string(),
            dramatic_message: text::dramatic_message(condition).to_string(),
            wind_speed: current.wind_speed_10m.unwrap_or(0.0) as i32,
            humidity: current.relative_humidity_2m.unwrap_or(0.0) as i32,
            feels_like: temperature - 2, // rough estimate
            uv_index: 0.0,
            precip_chance: 0,
        })
    }

    /// Fetches the daily forecast for a registered city, mapped to at most
    /// five days labelled with Croatian day names starting tomorrow.
    #[instrument(skip(self), fields(city = %city_key))]
    pub async fn fetch_daily(&self, city_key: &str) -> Result<Vec<ForecastDay>, AppError> {
        let city = cities::lookup(city_key)
            .ok_or_else(|| AppError::internal(format!("No coordinates for city: {}", city_key)))?;

        let url = format!(
            "{}?latitude={:.4}&longitude={:.4}&daily=weather_code,temperature_2m_max,temperature_2m_min&timezone=Europe/Belgrade",
            self.base_url, city.latitude, city.longitude
        );

        let response: OpenMeteoResponse = self.http_client.get_json(&url).await?;
        let daily = response
            .daily
            .ok_or_else(|| AppError::internal("Response missing daily block"))?;

        let today = Local::now();
        let forecast = daily
            .time
            .iter()
            .enumerate()
            .take(5)
            .map(|(i, _)| {
                let condition = condition_for_code(daily.weather_code.get(i).copied().unwrap_or(0));
                let date = today
                    .checked_add_days(Days::new(i as u64 + 1))
                    .map(|d| text::croatian_day(d.weekday()))
                    .unwrap_or_default();
                ForecastDay {
                    date: date.to_string(),
                    high: daily.temperature_2m_max.get(i).copied().unwrap_or(0.0) as i32,
                    low: daily.temperature_2m_min.get(i).copied().unwrap_or(0.0) as i32,
                    condition,
                    emoji: condition.emoji().to_string(),
                }
            })
            .collect();

        Ok(forecast)
    }
}

/// Ordered WMO weather-code buckets, evaluated first-match-wins.
///
/// The two trailing Storm rows overlap the shower rows above them and are
/// therefore unreachable; the table mirrors the published mapping as-is
/// rather than resolving the overlap.
const CODE_TABLE: &[(u32, u32, Condition)] = &[
    (0, 1, Condition::Sunny),
    (2, 2, Condition::PartlyCloudy),
    (3, 3, Condition::Cloudy),
    (45, 45, Condition::Fog),
    (48, 48, Condition::Fog),
    (51, 67, Condition::Rain),
    (71, 77, Condition::Snow),
    (80, 82, Condition::Showers),
    (85, 86, Condition::SnowShowers),
    (80, 82, Condition::Storm),
    (85, 86, Condition::Storm),
];

/// Buckets a WMO weather code into a condition; unmatched codes fall back
/// to cloudy.
pub fn condition_for_code(code: u32) -> Condition {
    CODE_TABLE
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&code))
        .map(|(_, _, condition)| *condition)
        .unwrap_or(Condition::Cloudy)
}
