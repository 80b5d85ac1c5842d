//! Regional cosmetic overrides.
//!
//! Per-location substitutions applied after normalization. Only `emoji`
//! and `description` may change; condition and numeric fields never do.

use crate::types::{Condition, ForecastEntry};

/// Cosmetic substitution for one `(location, condition)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Override {
    pub emoji: Option<&'static str>,
    pub description: Option<&'static str>,
}

/// Look up the override for a location/condition pair.
pub fn lookup(location_id: &str, condition: Condition) -> Option<Override> {
    let o = match (location_id, condition) {
        // Clear skies in Naha get the hibiscus
        ("naha", Condition::Clear) => Override {
            emoji: Some("🌺"),
            description: None,
        },
        ("kochi", Condition::PartlySunny) => Override {
            emoji: Some("🌤️"),
            description: None,
        },
        ("sapporo", Condition::Snow) => Override {
            emoji: Some("❄️"),
            description: None,
        },
        _ => return None,
    };
    Some(o)
}

/// Apply the regional override to a normalized entry, if any.
pub fn apply(location_id: &str, entry: &mut ForecastEntry) {
    if let Some(o) = lookup(location_id, entry.condition) {
        if let Some(emoji) = o.emoji {
            entry.emoji = emoji.to_string();
        }
        if let Some(description) = o.description {
            entry.description = description.to_string();
        }
    }
}
