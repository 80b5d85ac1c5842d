use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from JMA codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Drizzle,
    Mist,
    Thunderstorm,
    PartlyCloudy,
    PartlySunny,
    /// Unrecognized source code; description carries the raw text.
    #[default]
    Default,
}

impl Condition {
    /// Japanese description used when the source provides none.
    pub fn description_ja(&self) -> &'static str {
        match self {
            Self::Clear => "晴れ",
            Self::Clouds => "曇り",
            Self::Rain => "雨",
            Self::Snow => "雪",
            Self::Drizzle => "霧雨",
            Self::Mist => "霧",
            Self::Thunderstorm => "雷雨",
            Self::PartlyCloudy => "曇り時々晴れ",
            Self::PartlySunny => "晴れ時々曇り",
            Self::Default => "不明",
        }
    }

    /// Default emoji for the condition.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Clouds => "☁️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Drizzle => "🌦️",
            Self::Mist => "🌫️",
            Self::Thunderstorm => "⛈️",
            Self::PartlyCloudy => "⛅",
            Self::PartlySunny => "🌤️",
            Self::Default => "🌤️",
        }
    }
}

/// Where a forecast entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Remote forecast source (JMA).
    Primary,
    /// Static hand-authored fallback table.
    Fallback,
}

/// How much of a location's 3-day view came from the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// All three days from the remote source.
    Full,
    /// At least one day remote, the rest backfilled.
    Partial,
    /// Entirely fallback data.
    None,
}

/// One day of normalized forecast data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// 0 = today, 1 = tomorrow, 2 = day after.
    pub day_offset: u8,
    pub condition: Condition,
    pub description: String,
    pub emoji: String,
    pub high: i32,
    pub low: i32,
    /// Percent, 0..100. Cosmetic when the source omits it.
    pub humidity: f64,
    /// m/s. Cosmetic when the source omits it.
    pub wind_speed: f64,
    pub source: Provenance,
}

/// Normalized 3-day weather view for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationForecast {
    pub location_id: String,
    pub display_name: String,
    /// Always exactly 3 entries (today, tomorrow, day after).
    pub forecasts: Vec<ForecastEntry>,
    /// Primary when the remote source contributed at least one day.
    pub source: Provenance,
    pub coverage: Coverage,
    pub updated_at: DateTime<Utc>,
}

/// Weather fetch errors. Every variant degrades to fallback data inside
/// the aggregator; none propagates further.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Forecast endpoint returned status {0}")]
    Status(u16),
    #[error("Malformed forecast payload: {0}")]
    MalformedPayload(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "Weather service unreachable. Showing saved data.",
            FetchError::Status(_) => "Weather service error. Showing saved data.",
            FetchError::MalformedPayload(_) => {
                "Weather data could not be read. Showing saved data."
            }
        }
    }
}

const WEEKDAYS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Day label for a forecast column, e.g. `8月23日(土)` for today + offset.
pub fn day_label(day_offset: u8) -> String {
    day_label_on(Local::now().date_naive(), day_offset)
}

/// Label for `today + day_offset` relative to an explicit date.
pub fn day_label_on(today: NaiveDate, day_offset: u8) -> String {
    let date = today + chrono::Duration::days(i64::from(day_offset));
    let weekday = WEEKDAYS_JA[date.weekday().num_days_from_sunday() as usize];
    format!("{}月{}日({})", date.month(), date.day(), weekday)
}
