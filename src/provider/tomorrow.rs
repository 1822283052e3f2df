//! Tomorrow.io `v4/timelines` adapter.
//!
//! Builds the exact request URL for current/forecast/historical lookups and
//! maps the timeline response into canonical readings. The vendor is always
//! asked for metric data; conversion into the caller's unit system happens
//! here during mapping.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::{
    codes,
    http::{HttpExchange, ReqwestExchange},
    model::{Source, UnitSystem, Weather, WeatherCollection, WeatherKind, WeatherQuery},
    provider::{RequestMode, WeatherProvider},
    units,
};

const ENDPOINT: &str = "https://api.tomorrow.io/v4/timelines";

/// Vendor field names requested on every call, in fixed order.
const QUERY_FIELDS: [&str; 11] = [
    "cloudCover",
    "dewPoint",
    "temperatureApparent",
    "humidity",
    "precipitationIntensity",
    "precipitationProbability",
    "pressureSeaLevel",
    "temperature",
    "weatherCode",
    "windSpeed",
    "windDirection",
];

#[derive(Debug, Clone)]
pub struct TomorrowProvider {
    api_key: String,
    http: Arc<dyn HttpExchange>,
}

impl TomorrowProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_exchange(api_key, Arc::new(ReqwestExchange::new()))
    }

    /// Provider with an injected transport, used by tests and callers that
    /// manage their own client.
    pub fn with_exchange(api_key: String, http: Arc<dyn HttpExchange>) -> Self {
        Self { api_key, http }
    }

    /// Attribution attached to every reading this provider produces.
    pub fn sources() -> Vec<Source> {
        vec![Source::new("tomorrow", "tomorrow.io", "https://www.tomorrow.io/")]
    }

    /// Exact request URL for the given mode.
    ///
    /// Repeated keys become one `key=value` pair per element; parameter groups
    /// keep insertion order (location, fields, units, timesteps, apikey, then
    /// startTime for historical queries carrying a timestamp). The string is
    /// deliberately not URL-encoded; commas and colons stay literal.
    fn build_url(&self, query: &WeatherQuery, mode: RequestMode) -> String {
        let mut pairs: Vec<String> = Vec::new();

        pairs.push(format!("location={},{}", query.latitude, query.longitude));
        for field in QUERY_FIELDS {
            pairs.push(format!("fields={field}"));
        }
        pairs.push("units=metric".to_string());
        match mode {
            RequestMode::Current => pairs.push("timesteps=current".to_string()),
            RequestMode::Forecast | RequestMode::Historical => {
                pairs.push("timesteps=current".to_string());
                pairs.push("timesteps=1h".to_string());
            }
        }
        pairs.push(format!("apikey={}", self.api_key));

        if mode == RequestMode::Historical {
            if let Some(when) = query.when {
                pairs.push(format!("startTime={}", when.format("%Y-%m-%dT%H:%M:%SZ")));
            }
        }

        format!("{ENDPOINT}?{}", pairs.join("&"))
    }

    async fn fetch(&self, query: &WeatherQuery, mode: RequestMode) -> Result<WeatherCollection> {
        let url = self.build_url(query, mode);
        debug!(url = %url, ?mode, "requesting timelines");

        let body = self.http.get(&url).await.context("Tomorrow.io request failed")?;

        let raw: Value =
            serde_json::from_str(&body).context("Failed to parse Tomorrow.io JSON")?;

        Ok(map_raw_data(&raw, query.latitude, query.longitude, query.units))
    }
}

#[async_trait]
impl WeatherProvider for TomorrowProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherCollection> {
        self.fetch(query, RequestMode::Current).await
    }

    async fn forecast_weather(&self, query: &WeatherQuery) -> Result<WeatherCollection> {
        self.fetch(query, RequestMode::Forecast).await
    }

    async fn historical_weather(&self, query: &WeatherQuery) -> Result<WeatherCollection> {
        self.fetch(query, RequestMode::Historical).await
    }
}

/// Maps a raw timelines body into a collection, in vendor response order.
///
/// Any absent or mistyped node degrades to an empty or partial collection;
/// nothing in the payload is treated as fatal.
fn map_raw_data(raw: &Value, latitude: f64, longitude: f64, units: UnitSystem) -> WeatherCollection {
    let mut collection = WeatherCollection::default();

    let Some(timelines) =
        raw.get("data").and_then(|d| d.get("timelines")).and_then(Value::as_array)
    else {
        return collection;
    };

    for timeline in timelines {
        // Re-derived per timeline, never inherited from a prior entry.
        let kind_hint = (timeline.get("timestep").and_then(Value::as_str) == Some("current"))
            .then_some(WeatherKind::Current);

        let Some(intervals) = timeline.get("intervals").and_then(Value::as_array) else {
            continue;
        };

        for interval in intervals {
            if let Some(weather) = map_interval(interval, latitude, longitude, units, kind_hint) {
                collection.push(weather);
            }
        }
    }

    collection
}

fn map_interval(
    interval: &Value,
    latitude: f64,
    longitude: f64,
    units: UnitSystem,
    kind_hint: Option<WeatherKind>,
) -> Option<Weather> {
    let start_time = interval.get("startTime")?.as_str()?;
    let values = interval.get("values")?.as_object()?;
    let time = DateTime::parse_from_rfc3339(start_time).ok()?.with_timezone(&Utc);

    // The wall clock is read fresh per interval. Across a slow mapping pass
    // this can classify intervals of one response inconsistently; bounded by
    // call duration and kept that way.
    let kind = kind_hint.unwrap_or_else(|| {
        if time < Utc::now() { WeatherKind::Historical } else { WeatherKind::Forecast }
    });

    let mut weather = Weather::new(latitude, longitude, time, kind);
    weather.sources = TomorrowProvider::sources();

    let field = |name: &str| values.get(name).and_then(Value::as_f64);

    weather.temperature =
        field("temperature").map(|v| units::temperature_from_celsius(v, units));
    weather.feels_like =
        field("temperatureApparent").map(|v| units::temperature_from_celsius(v, units));
    weather.dew_point = field("dewPoint").map(|v| units::temperature_from_celsius(v, units));
    weather.humidity = field("humidity");
    weather.pressure = field("pressureSeaLevel").map(|v| units::pressure_from_hpa(v, units));
    weather.wind_speed = field("windSpeed").map(|v| units::speed_from_mps(v, units));
    weather.wind_direction = field("windDirection");
    weather.precipitation =
        field("precipitationIntensity").map(|v| units::precipitation_from_mm(v, units));
    weather.precipitation_probability = field("precipitationProbability");
    weather.cloud_cover = field("cloudCover");

    if let Some(code) = values.get("weatherCode").and_then(Value::as_i64) {
        weather.condition_code = codes::condition_code(code);
        weather.icon = codes::icon(code, time, latitude, longitude);
    }

    Some(weather)
}
