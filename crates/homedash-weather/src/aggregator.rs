//! Per-location fetch-or-fallback pipeline and the published forecast view.
//!
//! One refresh cycle per location: fetch, validate, normalize, backfill,
//! regional override, publish. `refresh_all` runs every location
//! concurrently and never fails as a whole; individual failures degrade to
//! the static fallback table.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;
use tokio::task::JoinSet;

use crate::client::{ForecastPayload, JmaClient};
use crate::codes;
use crate::locations::{self, LocationSpec, LOCATIONS};
use crate::overrides;
use crate::types::{Condition, Coverage, FetchError, ForecastEntry, LocationForecast, Provenance};

/// Fetches and normalizes forecasts for the configured locations and holds
/// the latest published view for display consumers.
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    client: JmaClient,
    published: Arc<RwLock<HashMap<String, LocationForecast>>>,
}

impl WeatherAggregator {
    pub fn new(client: JmaClient) -> Self {
        Self {
            client,
            published: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Refresh every configured location concurrently and publish the
    /// results. Waits for all locations; none aborts the others. Returns
    /// the number of locations that got data from the remote source.
    pub async fn refresh_all(&self) -> usize {
        let mut set = JoinSet::new();
        for spec in LOCATIONS {
            let client = self.client.clone();
            set.spawn(async move {
                let fetched = client.fetch_forecast(spec.area_code).await;
                build_forecast(&spec, fetched)
            });
        }

        let mut successes = 0;
        let mut seen: HashSet<String> = HashSet::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(forecast) => {
                    if forecast.coverage != Coverage::None {
                        successes += 1;
                    }
                    seen.insert(forecast.location_id.clone());
                    self.publish(forecast);
                }
                Err(e) => {
                    tracing::error!("Forecast task failed: {}", e);
                }
            }
        }

        // A crashed task still gets its location a forecast
        for spec in LOCATIONS {
            if !seen.contains(spec.id) {
                self.publish(fallback_forecast(&spec));
            }
        }

        tracing::info!(
            "Weather refresh complete: {}/{} locations from remote",
            successes,
            LOCATIONS.len()
        );
        successes
    }

    /// Refresh a single location (manual refresh). Returns the resulting
    /// coverage, or `None` for an unknown location id.
    pub async fn refresh_location(&self, id: &str) -> Option<Coverage> {
        let spec = locations::find(id)?;
        let fetched = self.client.fetch_forecast(spec.area_code).await;
        let forecast = build_forecast(spec, fetched);
        let coverage = forecast.coverage;
        self.publish(forecast);
        Some(coverage)
    }

    fn publish(&self, forecast: LocationForecast) {
        tracing::debug!(
            "Publishing forecast for {} ({:?} coverage)",
            forecast.location_id,
            forecast.coverage
        );
        self.published
            .write()
            .insert(forecast.location_id.clone(), forecast);
    }

    /// Latest published forecast for one location.
    pub fn forecast_for(&self, id: &str) -> Option<LocationForecast> {
        self.published.read().get(id).cloned()
    }

    /// Snapshot of all published forecasts, in configured display order.
    pub fn published(&self) -> Vec<LocationForecast> {
        let published = self.published.read();
        LOCATIONS
            .iter()
            .filter_map(|spec| published.get(spec.id).cloned())
            .collect()
    }
}

/// Turn a fetch result into a complete 3-day forecast.
fn build_forecast(
    spec: &LocationSpec,
    fetched: Result<ForecastPayload, FetchError>,
) -> LocationForecast {
    let (mut entries, coverage) = match fetched {
        Ok(payload) => {
            let mut entries = normalize(spec, &payload);
            let primary_days = entries.len();
            backfill(spec, &mut entries);
            let coverage = if primary_days >= 3 {
                Coverage::Full
            } else {
                Coverage::Partial
            };
            (entries, coverage)
        }
        Err(e) => {
            tracing::warn!("JMA fetch failed for {}, using fallback: {}", spec.id, e);
            let mut entries = Vec::new();
            backfill(spec, &mut entries);
            (entries, Coverage::None)
        }
    };

    for entry in &mut entries {
        overrides::apply(spec.id, entry);
    }

    LocationForecast {
        location_id: spec.id.to_string(),
        display_name: spec.display_name.to_string(),
        forecasts: entries,
        source: if coverage == Coverage::None {
            Provenance::Fallback
        } else {
            Provenance::Primary
        },
        coverage,
        updated_at: Utc::now(),
    }
}

/// Map up to 3 source days to normalized entries, tagged `Primary`.
fn normalize(spec: &LocationSpec, payload: &ForecastPayload) -> Vec<ForecastEntry> {
    let days = payload.weather_codes.len().min(3);
    let mut entries = Vec::with_capacity(3);
    let mut rng = rand::thread_rng();

    for i in 0..days {
        let code = &payload.weather_codes[i];
        let raw_text = payload.weathers.get(i);

        let (condition, description, emoji) = match codes::lookup(code) {
            Some(info) => (
                info.condition,
                info.description.to_string(),
                info.emoji.to_string(),
            ),
            None => (
                Condition::Default,
                raw_text
                    .cloned()
                    .unwrap_or_else(|| Condition::Default.description_ja().to_string()),
                Condition::Default.emoji().to_string(),
            ),
        };

        // Source temps only when both bounds are present and non-zero,
        // otherwise derive from the per-location baseline minus day index.
        let high = parsed_temp(&payload.temps_max, i);
        let low = parsed_temp(&payload.temps_min, i);
        let (high, low) = match (high, low) {
            (Some(h), Some(l)) => (h, l),
            _ => (spec.base_high - i as i32, spec.base_low - i as i32),
        };

        // Humidity and wind aren't in the consumed payload; sample a
        // plausible cosmetic value.
        let humidity = rng.gen_range(50.0..70.0);
        let wind_speed = (rng.gen_range(1.0..4.0_f64) * 10.0).round() / 10.0;

        entries.push(ForecastEntry {
            day_offset: i as u8,
            condition,
            description,
            emoji,
            high,
            low,
            humidity,
            wind_speed,
            source: Provenance::Primary,
        });
    }

    entries
}

fn parsed_temp(values: &[String], index: usize) -> Option<i32> {
    values
        .get(index)
        .and_then(|s| s.trim().parse::<i32>().ok())
        .filter(|v| *v != 0)
}

/// Fill remaining day slots from the static fallback table, tagged
/// `Fallback`. Already-normalized days keep their tags.
fn backfill(spec: &LocationSpec, entries: &mut Vec<ForecastEntry>) {
    let fallback = locations::fallback_days(spec.id);
    for offset in entries.len()..3 {
        let day = fallback[offset];
        entries.push(ForecastEntry {
            day_offset: offset as u8,
            condition: day.condition,
            description: day.condition.description_ja().to_string(),
            emoji: day.condition.emoji().to_string(),
            high: day.high,
            low: day.low,
            humidity: day.humidity,
            wind_speed: day.wind_speed,
            source: Provenance::Fallback,
        });
    }
}

/// Complete fallback forecast for a location.
fn fallback_forecast(spec: &LocationSpec) -> LocationForecast {
    let mut entries = Vec::new();
    backfill(spec, &mut entries);
    for entry in &mut entries {
        overrides::apply(spec.id, entry);
    }

    LocationForecast {
        location_id: spec.id.to_string(),
        display_name: spec.display_name.to_string(),
        forecasts: entries,
        source: Provenance::Fallback,
        coverage: Coverage::None,
        updated_at: Utc::now(),
    }
}
