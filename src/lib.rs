//! Tomorrow.io provider adapter.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - A transport seam (`HttpExchange`) so the network client stays injectable
//! - Shared domain models (queries, readings, collections)
//! - The Tomorrow.io adapter itself: request building, response mapping,
//!   weather-code and day/night-aware icon resolution
//!
//! Readings come back in the caller's unit system; the vendor is always asked
//! for its metric baseline and conversion happens locally.

pub mod codes;
pub mod config;
pub mod http;
pub mod model;
pub mod provider;
pub mod units;

pub use config::{Config, ProviderConfig};
pub use http::{HttpExchange, ReqwestExchange, StatusError};
pub use model::{Source, UnitSystem, Weather, WeatherCollection, WeatherKind, WeatherQuery};
pub use provider::{RequestMode, WeatherProvider, tomorrow::TomorrowProvider, tomorrow_from_config};
