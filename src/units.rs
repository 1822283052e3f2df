//! Conversions from the vendor's metric baseline into a target unit system.
//!
//! The vendor always reports °C, hPa, m/s and mm. A metric target is therefore
//! the identity; imperial converts to °F, inHg, mph and inches.

use crate::model::UnitSystem;

pub fn temperature_from_celsius(value: f64, to: UnitSystem) -> f64 {
    match to {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value * 9.0 / 5.0 + 32.0,
    }
}

pub fn pressure_from_hpa(value: f64, to: UnitSystem) -> f64 {
    match to {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value * 0.029_529_98,
    }
}

pub fn speed_from_mps(value: f64, to: UnitSystem) -> f64 {
    match to {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value * 2.236_936_29,
    }
}

pub fn precipitation_from_mm(value: f64, to: UnitSystem) -> f64 {
    match to {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value / 25.4,
    }
}
