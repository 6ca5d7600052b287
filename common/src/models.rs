use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Weather condition categories, serialized with their Croatian labels.
///
/// This is a closed set: upstream WMO codes are bucketed into it and the
/// synthetic forecast generator samples from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Condition {
    #[serde(rename = "Sunčano")]
    Sunny,
    #[serde(rename = "Djelomično oblačno")]
    PartlyCloudy,
    #[serde(rename = "Oblačno")]
    Cloudy,
    #[serde(rename = "Magla")]
    Fog,
    #[serde(rename = "Kišno")]
    Rain,
    #[serde(rename = "Snježno")]
    Snow,
    #[serde(rename = "Pljuskovi")]
    Showers,
    #[serde(rename = "Snježni pljuskovi")]
    SnowShowers,
    #[serde(rename = "Oluja")]
    Storm,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunčano",
            Condition::PartlyCloudy => "Djelomično oblačno",
            Condition::Cloudy => "Oblačno",
            Condition::Fog => "Magla",
            Condition::Rain => "Kišno",
            Condition::Snow => "Snježno",
            Condition::Showers => "Pljuskovi",
            Condition::SnowShowers => "Snježni pljuskovi",
            Condition::Storm => "Oluja",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Condition::Sunny => "☀️",
            Condition::PartlyCloudy => "⛅",
            Condition::Cloudy => "☁️",
            Condition::Fog => "🌫️",
            Condition::Rain => "🌧️",
            Condition::Snow => "❄️",
            Condition::Showers => "⛈️",
            Condition::SnowShowers => "🌨️",
            Condition::Storm => "⛈️",
        }
    }
}

/// Short-term temperature direction derived from the history ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

/// Cached weather state for one city.
///
/// `uv_index` and `precip_chance` are zero in the cache and randomized
/// per request by the query facade; they are never written back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitySnapshot {
    pub location: String,
    pub temperature: i32,
    pub condition: Condition,
    pub emoji: String,
    pub dramatic_message: String,
    pub wind_speed: i32,
    pub humidity: i32,
    pub feels_like: i32,
    pub uv_index: f64,
    pub precip_chance: i32,
}

/// One day of forecast, real or synthetic.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastDay {
    pub date: String,
    pub high: i32,
    pub low: i32,
    pub condition: Condition,
    pub emoji: String,
}

/// Response of `GET /api/weather/{city}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeatherReport {
    pub current: CitySnapshot,
    pub trend: Trend,
    pub forecast: Vec<ForecastDay>,
    pub ascii_art: String,
}

/// Response of `GET /api/forecast/{city}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ForecastResponse {
    pub current: CitySnapshot,
    pub forecast: Vec<ForecastDay>,
}
