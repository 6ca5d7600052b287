use common::models::{CitySnapshot, Condition};

use crate::text;

/// One entry of the fixed city registry: lookup key, display name and the
/// coordinates used for upstream fetches.
pub struct City {
    pub key: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub const CITIES: &[City] = &[
    City {
        key: "zagreb",
        name: "Zagreb 🏛️",
        latitude: 45.815,
        longitude: 15.9819,
    },
    City {
        key: "split",
        name: "Split 🏖️",
        latitude: 43.5081,
        longitude: 16.4402,
    },
    City {
        key: "dubrovnik",
        name: "Dubrovnik ⛱️",
        latitude: 42.6412,
        longitude: 18.1084,
    },
    City {
        key: "rijeka",
        name: "Rijeka 🌊",
        latitude: 45.3271,
        longitude: 14.4205,
    },
    City {
        key: "zadar",
        name: "Zadar 🐚",
        latitude: 43.1312,
        longitude: 15.2313,
    },
    City {
        key: "osijek",
        name: "Osijek 🌾",
        latitude: 45.5544,
        longitude: 18.6955,
    },
];

pub fn lookup(key: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.key == key)
}

struct Defaults {
    temperature: i32,
    condition: Condition,
    wind_speed: i32,
    humidity: i32,
    feels_like: i32,
}

/// Built-in defaults used when the initial upstream fetch fails. The table
/// is complete for every registered city, so seeding never leaves a hole.
fn defaults(key: &str) -> Defaults {
    match key {
        "zagreb" => Defaults {
            temperature: 3,
            condition: Condition::Cloudy,
            wind_speed: 12,
            humidity: 75,
            feels_like: 0,
        },
        "split" => Defaults {
            temperature: 11,
            condition: Condition::Sunny,
            wind_speed: 8,
            humidity: 65,
            feels_like: 10,
        },
        "dubrovnik" => Defaults {
            temperature: 13,
            condition: Condition::Sunny,
            wind_speed: 5,
            humidity: 60,
            feels_like: 12,
        },
        "rijeka" => Defaults {
            temperature: 5,
            condition: Condition::Rain,
            wind_speed: 18,
            humidity: 88,
            feels_like: 2,
        },
        "zadar" => Defaults {
            temperature: 10,
            condition: Condition::PartlyCloudy,
            wind_speed: 10,
            humidity: 70,
            feels_like: 8,
        },
        _ => Defaults {
            temperature: 7,
            condition: Condition::Cloudy,
            wind_speed: 10,
            humidity: 72,
            feels_like: 5,
        },
    }
}

/// Build a synthetic snapshot for a city from the defaults table.
/// Synthetic humidity is clamped to [30, 99]; upstream values are not.
pub fn fallback_snapshot(city: &City) -> CitySnapshot {
    let d = defaults(city.key);
    CitySnapshot {
        location: city.name.to_string(),
        temperature: d.temperature,
        condition: d.condition,
        emoji: d.condition.emoji().to_string(),
        dramatic_message: text::dramatic_message(d.condition).to_string(),
        wind_speed: d.wind_speed,
        humidity: d.humidity.clamp(30, 99),
        feels_like: d.feels_like,
        uv_index: 0.0,
        precip_chance: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_registered_cities() {
        assert!(lookup("zagreb").is_some());
        assert!(lookup("split").is_some());
        assert!(lookup("vukovar").is_none());
        assert!(lookup("Zagreb").is_none()); // keys are lowercase
    }

    #[test]
    fn fallback_table_covers_every_city() {
        for city in CITIES {
            let snapshot = fallback_snapshot(city);
            assert_eq!(snapshot.location, city.name);
            assert!(!snapshot.dramatic_message.is_empty());
            assert!((30..=99).contains(&snapshot.humidity));
        }
    }

    #[test]
    fn fallback_zagreb_matches_defaults() {
        let snapshot = fallback_snapshot(lookup("zagreb").unwrap());
        assert_eq!(snapshot.temperature, 3);
        assert_eq!(snapshot.condition, Condition::Cloudy);
        assert_eq!(snapshot.wind_speed, 12);
        assert_eq!(snapshot.feels_like, 0);
    }
}
