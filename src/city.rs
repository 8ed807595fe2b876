use std::fmt;

use crate::error::WeatherError;

/// Longest city name accepted, in characters.
pub const MAX_CITY_LEN: usize = 100;

/// A city name that has been checked once at the edge and can be forwarded
/// to any provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City(String);

impl City {
    /// Trims surrounding whitespace and rejects empty, oversized or
    /// control-character-bearing names.
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(WeatherError::InvalidCity("city must not be empty".into()));
        }
        if name.chars().count() > MAX_CITY_LEN {
            return Err(WeatherError::InvalidCity(format!(
                "city must be at most {MAX_CITY_LEN} characters"
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(WeatherError::InvalidCity(
                "city must not contain control characters".into(),
            ));
        }

        Ok(City(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
