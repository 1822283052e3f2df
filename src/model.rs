use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system a caller wants readings converted into.
///
/// The vendor always reports in its metric baseline (°C, hPa, m/s, mm);
/// conversion happens locally during mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Classification of a single reading relative to request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Current,
    Forecast,
    Historical,
}

/// Attribution for the data source a reading came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl Source {
    pub fn new(id: &str, name: &str, url: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string(), url: url.to_string() }
    }
}

/// Immutable input descriptor for a single weather lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Point in time the caller is interested in; `None` means "now".
    pub when: Option<DateTime<Utc>>,
    pub units: UnitSystem,
}

impl WeatherQuery {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, when: None, units: UnitSystem::default() }
    }

    #[must_use]
    pub fn at(mut self, when: DateTime<Utc>) -> Self {
        self.when = Some(when);
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }
}

/// One canonical weather reading.
///
/// Every numeric field is optional: a field the vendor did not report stays
/// `None`, it is never defaulted to zero. Values are in the unit system the
/// caller requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_time: DateTime<Utc>,
    pub kind: WeatherKind,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub dew_point: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub cloud_cover: Option<f64>,
    /// Provider-agnostic condition code, shared across all adapters.
    pub condition_code: Option<u16>,
    /// Day/night-aware pictogram identifier, e.g. `"day-cloudy"`.
    pub icon: Option<&'static str>,
    pub sources: Vec<Source>,
}

impl Weather {
    pub fn new(latitude: f64, longitude: f64, utc_time: DateTime<Utc>, kind: WeatherKind) -> Self {
        Self {
            latitude,
            longitude,
            utc_time,
            kind,
            temperature: None,
            feels_like: None,
            dew_point: None,
            humidity: None,
            pressure: None,
            wind_speed: None,
            wind_direction: None,
            precipitation: None,
            precipitation_probability: None,
            cloud_cover: None,
            condition_code: None,
            icon: None,
            sources: Vec::new(),
        }
    }
}

/// Ordered collection of readings, insertion order = vendor response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherCollection {
    readings: Vec<Weather>,
}

impl WeatherCollection {
    pub fn push(&mut self, weather: Weather) {
        self.readings.push(weather);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Weather> {
        self.readings.iter()
    }

    /// First reading classified as current, if the response carried one.
    pub fn current(&self) -> Option<&Weather> {
        self.readings.iter().find(|w| w.kind == WeatherKind::Current)
    }
}

impl IntoIterator for WeatherCollection {
    type Item = Weather;
    type IntoIter = std::vec::IntoIter<Weather>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.into_iter()
    }
}

impl<'a> IntoIterator for &'a WeatherCollection {
    type Item = &'a Weather;
    type IntoIter = std::slice::Iter<'a, Weather>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn query_builder_defaults_to_metric_and_now() {
        let query = WeatherQuery::new(47.8739259, 8.0043961);
        assert_eq!(query.units, UnitSystem::Metric);
        assert!(query.when.is_none());
    }

    #[test]
    fn query_builder_sets_time_and_units() {
        let when = Utc.with_ymd_and_hms(2022, 7, 31, 16, 0, 0).unwrap();
        let query = WeatherQuery::new(47.8739259, 8.0043961)
            .at(when)
            .with_units(UnitSystem::Imperial);
        assert_eq!(query.when, Some(when));
        assert_eq!(query.units, UnitSystem::Imperial);
    }

    #[test]
    fn collection_current_finds_first_current_reading() {
        let when = Utc.with_ymd_and_hms(2022, 7, 31, 16, 0, 0).unwrap();
        let mut collection = WeatherCollection::default();
        collection.push(Weather::new(1.0, 2.0, when, WeatherKind::Historical));
        let mut current = Weather::new(1.0, 2.0, when, WeatherKind::Current);
        current.temperature = Some(20.5);
        collection.push(current);

        let found = collection.current().expect("current reading must exist");
        assert_eq!(found.temperature, Some(20.5));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn collection_current_is_none_without_current_reading() {
        let when = Utc.with_ymd_and_hms(2022, 7, 31, 16, 0, 0).unwrap();
        let mut collection = WeatherCollection::default();
        collection.push(Weather::new(1.0, 2.0, when, WeatherKind::Forecast));
        assert!(collection.current().is_none());
    }

    #[test]
    fn new_weather_has_no_defaulted_values() {
        let when = Utc.with_ymd_and_hms(2022, 7, 31, 16, 0, 0).unwrap();
        let weather = Weather::new(1.0, 2.0, when, WeatherKind::Forecast);
        assert!(weather.temperature.is_none());
        assert!(weather.pressure.is_none());
        assert!(weather.condition_code.is_none());
        assert!(weather.icon.is_none());
        assert!(weather.sources.is_empty());
    }
}
