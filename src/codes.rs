//! Vendor weather-code resolution.
//!
//! Tomorrow.io reports a 4-digit weather code, optionally extended with a
//! trailing digit encoding day/night. The leading 4 digits classify the
//! condition; the 5th digit, when it is `1`, forces the night icon variant.
//! Without that digit the day/night decision falls back to sunrise/sunset
//! astronomy for the reading's position and date.

use chrono::{DateTime, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

/// Day/night state driving icon variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Day,
    Night,
}

/// Maps a vendor weather code to the shared condition taxonomy.
///
/// Only the leading 4 digits of the code are significant here. Unmapped codes
/// yield `None`.
pub fn condition_code(vendor_code: i64) -> Option<u16> {
    match condition_prefix(vendor_code)? {
        1000 => Some(0),
        1100 | 1101 | 1103 => Some(1),
        1102 => Some(2),
        1001 => Some(3),
        2000 | 2100 | 2102 | 2103 | 2106 | 2107 | 2108 => Some(45),
        4000 | 4203 | 4204 | 4205 => Some(53),
        4200 | 4213 | 4214 | 4215 => Some(61),
        4001 | 4208 | 4209 | 4210 => Some(63),
        4201 | 4202 | 4211 | 4212 => Some(65),
        5108 | 5112 | 5114 | 6201 | 6202 | 6207 | 6208 | 6212 | 6213 | 6214 | 6215 | 6220
        | 6222 | 7000 | 7101 | 7102 | 7103 | 7105 | 7106 | 7107 | 7108 | 7109 | 7110 | 7111
        | 7112 | 7113 | 7114 | 7115 | 7116 | 7117 => Some(67),
        5001 | 5100 | 5102 | 5103 | 5104 | 5115 | 5116 | 5117 => Some(71),
        5000 | 5105 | 5106 | 5107 | 5110 => Some(73),
        5101 | 5119 | 5120 | 5121 => Some(75),
        5122 | 6000 | 6002 | 6003 | 6004 | 6200 | 6204 | 6206 => Some(56),
        6001 | 6203 | 6205 | 6209 => Some(66),
        8000 | 8001 | 8002 | 8003 => Some(95),
        _ => None,
    }
}

/// Maps a vendor weather code to a day/night-aware icon identifier.
pub fn icon(
    vendor_code: i64,
    time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Option<&'static str> {
    let code = condition_code(vendor_code)?;
    let night = day_phase(vendor_code, time, latitude, longitude) == DayPhase::Night;
    icon_for(code, night)
}

/// Resolves the day/night state for a reading.
///
/// A 5th code digit of `1` is an explicit night marker; any other digit, or no
/// 5th digit at all, defers to the solar computation.
pub fn day_phase(
    vendor_code: i64,
    time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> DayPhase {
    match embedded_phase(vendor_code) {
        Some(phase) => phase,
        None => solar_phase(time, latitude, longitude),
    }
}

/// Icon for a canonical condition code.
///
/// The table covers the full shared taxonomy, not just the codes this
/// adapter's own resolver can produce.
pub(crate) fn icon_for(code: u16, night: bool) -> Option<&'static str> {
    let (day, night_variant) = match code {
        0 | 1 => ("day-sunny", "night-clear"),
        2 => ("day-sunny-overcast", "night-partly-cloudy"),
        3 => ("day-cloudy", "night-cloudy"),
        45 | 48 => ("day-fog", "night-fog"),
        51 | 53 | 55 | 56 | 57 => ("day-sprinkle", "night-sprinkle"),
        61 | 63 | 65 | 66 | 67 => ("day-rain", "night-rain"),
        71 | 73 | 75 | 77 | 85 | 86 => ("day-snow", "night-snow"),
        80..=82 => ("day-showers", "night-showers"),
        95 | 96 | 99 => ("day-thunderstorm", "night-thunderstorm"),
        _ => return None,
    };
    Some(if night { night_variant } else { day })
}

fn condition_prefix(vendor_code: i64) -> Option<i64> {
    let digits = vendor_code.to_string();
    let prefix: String = digits.chars().take(4).collect();
    prefix.parse().ok()
}

fn embedded_phase(vendor_code: i64) -> Option<DayPhase> {
    let digits = vendor_code.to_string();
    match digits.as_bytes().get(4) {
        Some(b'1') => Some(DayPhase::Night),
        _ => None,
    }
}

fn solar_phase(time: DateTime<Utc>, latitude: f64, longitude: f64) -> DayPhase {
    let Some(coords) = Coordinates::new(latitude, longitude) else {
        // Out-of-range position, no meaningful solar day.
        return DayPhase::Day;
    };
    let solar_day = SolarDay::new(coords, time.date_naive());
    let sunrise = solar_day.event_time(SolarEvent::Sunrise);
    let sunset = solar_day.event_time(SolarEvent::Sunset);
    if time < sunrise || time > sunset { DayPhase::Night } else { DayPhase::Day }
}
