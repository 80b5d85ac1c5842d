//! Multi-city weather panel core for homedash.
//!
//! Fetches JMA (Japan Meteorological Agency) forecast data per location,
//! normalizes it to a fixed 3-day view, and substitutes static fallback
//! data when the remote source is unavailable or incomplete.

pub mod aggregator;
pub mod client;
pub mod codes;
pub mod locations;
pub mod overrides;
pub mod types;

pub use aggregator::WeatherAggregator;
pub use client::{ForecastPayload, JmaClient};
pub use types::*;
