//! `TodoStore`: owns the task collection and mirrors it to storage.
//!
//! Single-writer model: every mutation updates the in-memory collection and
//! then serializes the whole collection under one key. Storage failures are
//! logged and never fatal; the in-memory state stays authoritative.

use chrono::{Duration, Utc};

use crate::error::TodoError;
use crate::record::{DetailedStats, Filter, TodoRecord, TodoStats};
use crate::storage::KeyValueStore;

/// Fixed persistence key. Matches the previous dashboard versions so
/// existing collections carry over.
pub const STORAGE_KEY: &str = "personal-dashboard-todos";

/// Caller decision for bulk destructive operations. Supplied by the UI
/// layer; the store never prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

pub struct TodoStore {
    backend: Box<dyn KeyValueStore>,
    todos: Vec<TodoRecord>,
    next_id: u64,
}

impl TodoStore {
    /// Open the store, loading any persisted collection.
    ///
    /// A missing, unreadable or unparsable stored value degrades to an
    /// empty collection; the id counter resumes above the highest stored id.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let todos = match backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<TodoRecord>>(&raw) {
                Ok(todos) => {
                    tracing::debug!("Loaded {} todos from storage", todos.len());
                    todos
                }
                Err(e) => {
                    tracing::warn!("Stored todo collection is corrupt, starting fresh: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                tracing::debug!("No stored todos found, starting fresh");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to load todos from storage: {}", e);
                Vec::new()
            }
        };

        let next_id = Self::next_id_for(&todos);
        Self {
            backend,
            todos,
            next_id,
        }
    }

    fn next_id_for(todos: &[TodoRecord]) -> u64 {
        todos.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }

    /// Serialize the whole collection to the backend. A failed write is
    /// logged and dropped; in-memory state stays authoritative.
    fn persist(&self) {
        let doc = match serde_json::to_string(&self.todos) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Failed to serialize todos: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.set(STORAGE_KEY, &doc) {
            tracing::warn!("Failed to save todos to storage: {}", e);
        }
    }

    /// Add a new task. New tasks go to the front (most-recent-first).
    ///
    /// # Errors
    /// Returns `TodoError::EmptyText` when the text is empty after trimming;
    /// the collection is unchanged.
    pub fn add(&mut self, text: &str) -> Result<TodoRecord, TodoError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TodoError::EmptyText);
        }

        let record = TodoRecord {
            id: self.next_id,
            text: trimmed.to_string(),
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        };
        self.next_id += 1;

        self.todos.insert(0, record.clone());
        self.persist();

        tracing::debug!("Added todo {}: \"{}\"", record.id, record.text);
        Ok(record)
    }

    /// Flip the completion state of a task. Returns the updated record,
    /// or `None` (no-op) when the id is unknown.
    pub fn toggle(&mut self, id: u64) -> Option<TodoRecord> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;

        todo.completed = !todo.completed;
        todo.completed_at = todo.completed.then(Utc::now);
        let updated = todo.clone();

        self.persist();
        tracing::debug!(
            "Toggled todo {}: {}",
            id,
            if updated.completed { "completed" } else { "active" }
        );
        Some(updated)
    }

    /// Remove a task. Returns the removed record, or `None` when the id is
    /// unknown.
    pub fn remove(&mut self, id: u64) -> Option<TodoRecord> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        let removed = self.todos.remove(index);

        self.persist();
        tracing::debug!("Deleted todo {}: \"{}\"", removed.id, removed.text);
        Some(removed)
    }

    /// Remove all completed tasks, gated on an explicit caller decision.
    /// Returns the number of tasks removed (0 when declined or when none
    /// are completed).
    pub fn clear_completed(&mut self, confirmation: Confirmation) -> usize {
        if confirmation == Confirmation::Declined {
            return 0;
        }
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let removed = before - self.todos.len();

        if removed > 0 {
            self.persist();
            tracing::debug!("Cleared {} completed todos", removed);
        }
        removed
    }

    /// Borrowed view over the collection matching the filter.
    /// Recomputed on each call, never cached.
    pub fn filtered_view(&self, filter: Filter) -> impl Iterator<Item = &TodoRecord> {
        self.todos.iter().filter(move |t| filter.matches(t))
    }

    /// Full collection, most-recent-first.
    pub fn all(&self) -> &[TodoRecord] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Counts computed by scanning the full collection.
    pub fn stats(&self) -> TodoStats {
        let completed = self.todos.iter().filter(|t| t.completed).count();
        TodoStats {
            completed,
            active: self.todos.len() - completed,
            total: self.todos.len(),
        }
    }

    /// Extended statistics: today's activity and completion rate.
    pub fn detailed_stats(&self) -> DetailedStats {
        let stats = self.stats();
        let today = Utc::now().date_naive();

        let completed_today = self
            .todos
            .iter()
            .filter(|t| t.completed_at.is_some_and(|at| at.date_naive() == today))
            .count();
        let created_today = self
            .todos
            .iter()
            .filter(|t| t.created_at.date_naive() == today)
            .count();
        let completion_rate = if stats.total == 0 {
            0
        } else {
            ((stats.completed as f64 / stats.total as f64) * 100.0).round() as u32
        };

        DetailedStats {
            total: stats.total,
            completed: stats.completed,
            active: stats.active,
            completed_today,
            created_today,
            completion_rate,
        }
    }

    /// Serialize the collection as a pretty-printed downloadable document.
    ///
    /// # Errors
    /// Returns `TodoError::InvalidImport` only if serialization fails,
    /// which does not happen for well-formed records.
    pub fn export_json(&self) -> Result<String, TodoError> {
        serde_json::to_string_pretty(&self.todos)
            .map_err(|e| TodoError::InvalidImport(e.to_string()))
    }

    /// Replace the collection from an exported document. The document must
    /// be a JSON array of records; anything else leaves the state unchanged.
    ///
    /// # Errors
    /// Returns `TodoError::InvalidImport` for any non-sequence or
    /// malformed document.
    pub fn import_json(&mut self, doc: &str) -> Result<usize, TodoError> {
        let imported: Vec<TodoRecord> =
            serde_json::from_str(doc).map_err(|e| TodoError::InvalidImport(e.to_string()))?;

        self.todos = imported;
        self.next_id = Self::next_id_for(&self.todos);
        self.persist();

        tracing::info!("Imported {} todos", self.todos.len());
        Ok(self.todos.len())
    }

    /// Seed the original sample tasks (third one completed). Intended for
    /// an empty store on first run.
    pub fn seed_samples(&mut self) {
        let samples = [
            "ダッシュボードを完成させる",
            "気象庁APIの動作確認",
            "タスクの保存と読み込みのテスト",
            "天気パネルの表示確認",
            "TODOリスト機能のテスト",
        ];

        let now = Utc::now();
        for (index, text) in samples.iter().enumerate() {
            let completed = index == 2;
            self.todos.push(TodoRecord {
                id: self.next_id,
                text: (*text).to_string(),
                completed,
                created_at: now - Duration::minutes(index as i64),
                completed_at: completed.then_some(now),
            });
            self.next_id += 1;
        }

        self.persist();
        tracing::debug!("Seeded {} sample todos", samples.len());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::storage::MemoryStore;
    use std::collections::BTreeSet;

    fn new_store() -> TodoStore {
        TodoStore::open(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_assigns_sequential_ids_and_prepends() {
        let mut store = new_store();

        let first = store.add("first").unwrap();
        let second = store.add("second").unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        // Newest first
        let ids: Vec<u64> = store.all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_add_rejects_empty_and_whitespace_text() {
        let mut store = new_store();

        assert!(matches!(store.add(""), Err(TodoError::EmptyText)));
        assert!(matches!(store.add("   "), Err(TodoError::EmptyText)));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_add_trims_text() {
        let mut store = new_store();
        let record = store.add("  Buy milk  ").unwrap();
        assert_eq!(record.text, "Buy milk");
    }

    #[test]
    fn test_stats_invariant_over_operation_sequences() {
        let mut store = new_store();

        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        store.toggle(2);
        store.remove(1);
        store.toggle(3);
        store.toggle(3);
        store.add("d").unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, stats.completed + stats.active);
        assert_eq!(stats.total, store.len());
    }

    #[test]
    fn test_toggle_twice_restores_record() {
        let mut store = new_store();
        let original = store.add("task").unwrap();

        store.toggle(original.id);
        let toggled_back = store.toggle(original.id).unwrap();

        // completed_at is None again, so the record is identical
        assert_eq!(toggled_back, original);
    }

    #[test]
    fn test_toggle_sets_and_clears_completed_at() {
        let mut store = new_store();
        let id = store.add("task").unwrap().id;

        let done = store.toggle(id).unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());
        assert!(done.is_consistent());

        let undone = store.toggle(id).unwrap();
        assert!(!undone.completed);
        assert!(undone.completed_at.is_none());
        assert!(undone.is_consistent());
    }

    #[test]
    fn test_toggle_and_remove_unknown_id_are_noops() {
        let mut store = new_store();
        store.add("task").unwrap();

        assert!(store.toggle(99).is_none());
        assert!(store.remove(99).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_persist_reload_round_trip_resumes_counter() {
        let backend = MemoryStore::new();
        let mut store = TodoStore::open(Box::new(backend.clone()));

        store.add("a").unwrap();
        store.add("b").unwrap();
        store.toggle(1);
        let before: Vec<TodoRecord> = store.all().to_vec();
        drop(store);

        let mut reloaded = TodoStore::open(Box::new(backend));
        assert_eq!(reloaded.all(), before.as_slice());

        let next = reloaded.add("c").unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_corrupt_stored_value_degrades_to_empty() {
        let backend = MemoryStore::new();
        backend.seed_raw(STORAGE_KEY, "not json at all {{{");

        let mut store = TodoStore::open(Box::new(backend));
        assert!(store.is_empty());
        assert_eq!(store.add("fresh").unwrap().id, 1);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let backend = MemoryStore::new();
        backend.set_simulate_write_error(true);

        let mut store = TodoStore::open(Box::new(backend));
        let record = store.add("kept in memory").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id, record.id);
    }

    #[test]
    fn test_filtered_views_partition_the_collection() {
        let mut store = new_store();
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        store.toggle(2);

        let active: BTreeSet<u64> = store.filtered_view(Filter::Active).map(|t| t.id).collect();
        let completed: BTreeSet<u64> = store
            .filtered_view(Filter::Completed)
            .map(|t| t.id)
            .collect();
        let all: BTreeSet<u64> = store.filtered_view(Filter::All).map(|t| t.id).collect();

        assert!(active.is_disjoint(&completed));
        let union: BTreeSet<u64> = active.union(&completed).copied().collect();
        assert_eq!(union, all);
        assert_eq!(all.len(), store.len());
    }

    #[test]
    fn test_buy_milk_scenario() {
        let mut store = new_store();

        let record = store.add("Buy milk").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(record.id, 1);
        assert!(!record.completed);

        let toggled = store.toggle(1).unwrap();
        assert!(toggled.completed);
        assert!(toggled.completed_at.is_some());

        let removed = store.clear_completed(Confirmation::Confirmed);
        assert_eq!(removed, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_completed_declined_is_noop() {
        let mut store = new_store();
        store.add("a").unwrap();
        store.toggle(1);

        assert_eq!(store.clear_completed(Confirmation::Declined), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_completed_with_none_completed() {
        let mut store = new_store();
        store.add("a").unwrap();

        assert_eq!(store.clear_completed(Confirmation::Confirmed), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = new_store();
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.toggle(1);
        let doc = store.export_json().unwrap();

        let mut other = new_store();
        let count = other.import_json(&doc).unwrap();
        assert_eq!(count, 2);
        assert_eq!(other.all(), store.all());

        // Counter resumes above the imported max
        assert_eq!(other.add("c").unwrap().id, 3);
    }

    #[test]
    fn test_import_rejects_non_sequence_document() {
        let mut store = new_store();
        store.add("keep me").unwrap();

        assert!(matches!(
            store.import_json("{\"not\": \"an array\"}"),
            Err(TodoError::InvalidImport(_))
        ));
        assert!(matches!(
            store.import_json("[1, 2, 3]"),
            Err(TodoError::InvalidImport(_))
        ));

        // State unchanged
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].text, "keep me");
    }

    #[test]
    fn test_seed_samples() {
        let mut store = new_store();
        store.seed_samples();

        assert_eq!(store.len(), 5);
        assert_eq!(store.stats().completed, 1);
        assert!(store.all().iter().all(TodoRecord::is_consistent));
    }

    #[test]
    fn test_detailed_stats() {
        let mut store = new_store();
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.toggle(1);

        let stats = store.detailed_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.created_today, 2);
        assert_eq!(stats.completed_today, 1);
        assert_eq!(stats.completion_rate, 50);
    }

    #[test]
    fn test_detailed_stats_empty_collection() {
        let store = new_store();
        assert_eq!(store.detailed_stats().completion_rate, 0);
    }
}
