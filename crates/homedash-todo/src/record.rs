//! Todo record and derived view types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task entry.
///
/// Serde field names match the persisted document format
/// (`createdAt`/`completedAt`), so stored collections round-trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "completedAt", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TodoRecord {
    /// Invariant check: `completed_at` is present iff `completed` is true.
    pub fn is_consistent(&self) -> bool {
        self.completed == self.completed_at.is_some()
    }
}

/// View filter over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, record: &TodoRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !record.completed,
            Filter::Completed => record.completed,
        }
    }
}

/// Counts shown next to the filter buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    pub completed: usize,
    pub active: usize,
    pub total: usize,
}

/// Extended statistics for the dashboard footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailedStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub completed_today: usize,
    pub created_today: usize,
    /// Rounded percentage of completed tasks; 0 for an empty collection.
    pub completion_rate: u32,
}
