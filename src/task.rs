//! Active task management for Ticklist
//!
//! The [`TaskStore`] owns the `todoTasks` collection: it is the only code that
//! reads or writes that key. Every operation loads the whole collection,
//! applies one change and writes the whole collection back.

use crate::backend::{load_collection, save_collection, KeyValueStore};
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::types::{next_time_id, TaskId};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::info;

/// Storage key of the active task collection
pub const TASKS_KEY: &str = "todoTasks";

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id, derived from the creation time
    pub id: TaskId,
    /// Trimmed, non-empty description
    pub text: String,
    /// Whether the task has been checked off
    #[serde(default)]
    pub completed: bool,
    /// When the task was added
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Checkbox marker used by the list views
    pub fn marker(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }

    /// Creation time in the local timezone
    pub fn formatted_created_at(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Status predicate applied to the active set for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Active, TaskFilter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }

    /// Next filter in All -> Active -> Completed order
    pub fn cycle(self) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Active,
            TaskFilter::Active => TaskFilter::Completed,
            TaskFilter::Completed => TaskFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "active" => Ok(TaskFilter::Active),
            "completed" => Ok(TaskFilter::Completed),
            other => Err(Error::invalid_arguments(format!(
                "unknown filter '{}', expected all, active or completed",
                other
            ))),
        }
    }
}

/// Owner of the active task collection
pub struct TaskStore {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
}

impl TaskStore {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn load(&self) -> Vec<Task> {
        load_collection(self.store.as_ref(), TASKS_KEY)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        save_collection(self.store.as_ref(), TASKS_KEY, tasks)
    }

    /// All tasks in insertion order
    #[must_use = "Query results should be used"]
    pub fn list_all(&self) -> Vec<Task> {
        self.load()
    }

    /// Tasks matching `filter`, in insertion order
    #[must_use = "Query results should be used"]
    pub fn list_filtered(&self, filter: TaskFilter) -> Vec<Task> {
        self.load()
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    /// Look up a single task
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.load().into_iter().find(|task| task.id == id)
    }

    /// Number of tasks matching `filter`
    pub fn count(&self, filter: TaskFilter) -> usize {
        self.load().iter().filter(|task| filter.matches(task)).count()
    }

    /// Add a task with the given text
    ///
    /// The text is trimmed; blank text is rejected without touching storage.
    pub fn add(&self, text: &str) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::validation("task text must not be empty"));
        }

        let mut tasks = self.load();
        let now = self.clock.now();
        let id = next_time_id(now, tasks.iter().map(|task| task.id.as_i64()))?;

        let task = Task {
            id: TaskId::new(id),
            text: text.to_string(),
            completed: false,
            created_at: now,
        };
        tasks.push(task.clone());
        self.save(&tasks)?;

        info!(id = %task.id, "added task");
        Ok(task)
    }

    /// Flip the completed flag of a task and return its new state
    pub fn toggle_completed(&self, id: TaskId) -> Result<Task> {
        let mut tasks = self.load();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::TaskNotFound { id })?;
        task.completed = !task.completed;
        let updated = task.clone();

        self.save(&tasks)?;
        info!(id = %id, completed = updated.completed, "toggled task");
        Ok(updated)
    }

    /// Remove a task and hand it back to the caller
    pub fn delete(&self, id: TaskId) -> Result<Task> {
        let mut tasks = self.load();
        let idx = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(Error::TaskNotFound { id })?;
        let removed = tasks.remove(idx);

        self.save(&tasks)?;
        info!(id = %id, "deleted task");
        Ok(removed)
    }

    /// Remove every completed task, returning the removed ones in order
    pub fn clear_completed(&self) -> Result<Vec<Task>> {
        let (removed, kept): (Vec<Task>, Vec<Task>) =
            self.load().into_iter().partition(|task| task.completed);

        self.save(&kept)?;
        info!(removed = removed.len(), remaining = kept.len(), "cleared completed tasks");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::{BrokenStore, RefusingStore};
    use crate::backend::MemoryStore;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;

    fn test_store() -> (TaskStore, Rc<MemoryStore>, Rc<ManualClock>) {
        let backend = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        ));
        let store = TaskStore::new(backend.clone(), clock.clone());
        (store, backend, clock)
    }

    fn texts(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.text.as_str()).collect()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (store, _, _) = test_store();
        assert!(store.list_all().is_empty());
        for filter in TaskFilter::ALL {
            assert!(store.list_filtered(filter).is_empty());
            assert_eq!(store.count(filter), 0);
        }
    }

    #[test]
    fn test_add_trims_and_defaults() {
        let (store, _, clock) = test_store();
        let task = store.add("  buy milk \n").unwrap();

        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.created_at, clock.now());
        assert_eq!(store.list_all(), vec![task]);
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let (store, backend, _) = test_store();
        store.add("keep").unwrap();
        let before = store.list_all();

        for blank in ["", "   ", "\t\n"] {
            let err = store.add(blank).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }));
        }
        assert_eq!(store.list_all(), before);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let (store, _, _) = test_store();
        // Clock never moves, so every add lands in the same millisecond
        for i in 0..5 {
            store.add(&format!("task {}", i)).unwrap();
        }
        let tasks = store.list_all();
        let ids: HashSet<TaskId> = tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids.len(), 5);
        assert!(tasks.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[test]
    fn test_duplicate_text_gets_distinct_ids() {
        let (store, _, clock) = test_store();
        let first = store.add("same").unwrap();
        clock.advance(Duration::milliseconds(5));
        let second = store.add("same").unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.list_all().len(), 2);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let (store, _, _) = test_store();
        let task = store.add("write spec").unwrap();

        let once = store.toggle_completed(task.id).unwrap();
        assert!(once.completed);
        let twice = store.toggle_completed(task.id).unwrap();
        assert!(!twice.completed);
        assert_eq!(store.get(task.id), Some(task));
    }

    #[test]
    fn test_toggle_unknown_id() {
        let (store, _, _) = test_store();
        store.add("a").unwrap();
        let before = store.list_all();

        let err = store.toggle_completed(TaskId::new(1)).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound { id } if id == TaskId::new(1)));
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (store, _, clock) = test_store();
        let a = store.add("a").unwrap();
        clock.advance(Duration::seconds(1));
        let b = store.add("b").unwrap();
        clock.advance(Duration::seconds(1));
        let c = store.add("c").unwrap();

        let removed = store.delete(b.id).unwrap();
        assert_eq!(removed, b);
        assert_eq!(store.list_all(), vec![a, c]);

        let err = store.delete(b.id).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound { .. }));
    }

    #[test]
    fn test_filters_partition_the_set() {
        let (store, _, _) = test_store();
        let ids: Vec<TaskId> = ["one", "two", "three", "four"]
            .iter()
            .map(|text| store.add(text).unwrap().id)
            .collect();
        store.toggle_completed(ids[1]).unwrap();
        store.toggle_completed(ids[3]).unwrap();

        let active = store.list_filtered(TaskFilter::Active);
        let completed = store.list_filtered(TaskFilter::Completed);
        assert_eq!(texts(&active), vec!["one", "three"]);
        assert_eq!(texts(&completed), vec!["two", "four"]);

        let active_ids: HashSet<TaskId> = active.iter().map(|task| task.id).collect();
        let completed_ids: HashSet<TaskId> = completed.iter().map(|task| task.id).collect();
        let all_ids: HashSet<TaskId> = store.list_all().iter().map(|task| task.id).collect();
        assert!(active_ids.is_disjoint(&completed_ids));
        assert_eq!(&active_ids | &completed_ids, all_ids);
        assert_eq!(store.list_filtered(TaskFilter::All), store.list_all());
    }

    #[test]
    fn test_clear_completed_returns_removed() {
        let (store, _, _) = test_store();
        let a = store.add("A").unwrap();
        let b = store.add("B").unwrap();
        let a = store.toggle_completed(a.id).unwrap();

        let removed = store.clear_completed().unwrap();
        assert_eq!(removed, vec![a]);
        assert_eq!(store.list_all(), vec![b]);

        assert!(store.clear_completed().unwrap().is_empty());
    }

    #[test]
    fn test_count_by_status() {
        let (store, _, _) = test_store();
        let a = store.add("a").unwrap();
        store.add("b").unwrap();
        store.toggle_completed(a.id).unwrap();

        assert_eq!(store.count(TaskFilter::Active), 1);
        assert_eq!(store.count(TaskFilter::Completed), 1);
        assert_eq!(store.count(TaskFilter::All), 2);
    }

    #[test]
    fn test_state_is_read_back_from_backend() {
        let (store, backend, clock) = test_store();
        store.add("persisted").unwrap();

        let reopened = TaskStore::new(backend, clock);
        assert_eq!(texts(&reopened.list_all()), vec!["persisted"]);
    }

    #[test]
    fn test_serialized_layout_uses_camel_case() {
        let (store, backend, _) = test_store();
        store.add("buy milk").unwrap();

        let raw = backend.read(TASKS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value[0];
        assert_eq!(record["text"], "buy milk");
        assert_eq!(record["completed"], false);
        assert!(record["createdAt"].is_string());
        assert!(record["id"].is_i64());
    }

    #[test]
    fn test_reads_records_written_by_older_layouts() {
        let (store, backend, _) = test_store();
        backend
            .write(
                TASKS_KEY,
                r#"[{"id":1714550400000,"text":"legacy","createdAt":"2024-05-01T08:00:00.000Z","color":"red"}]"#,
            )
            .unwrap();

        let tasks = store.list_all();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId::new(1714550400000));
        assert!(!tasks[0].completed);
    }

    #[test]
    fn test_write_failure_surfaces() {
        let clock = Rc::new(ManualClock::new(Utc::now()));
        let store = TaskStore::new(Rc::new(BrokenStore), clock);

        assert!(store.list_all().is_empty());
        let err = store.add("doomed").unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
    }

    fn refusing_store_with(json: &str) -> TaskStore {
        let backend = Rc::new(RefusingStore::refusing(&[TASKS_KEY]));
        backend.inner.write(TASKS_KEY, json).unwrap();
        TaskStore::new(backend, Rc::new(ManualClock::new(Utc::now())))
    }

    const SEEDED: &str = r#"[
        {"id":1,"text":"open","completed":false,"createdAt":"2024-03-01T09:00:00Z"},
        {"id":2,"text":"done","completed":true,"createdAt":"2024-03-01T09:00:00Z"}
    ]"#;

    #[test]
    fn test_toggle_write_failure_changes_nothing() {
        let store = refusing_store_with(SEEDED);
        let before = store.list_all();

        let err = store.toggle_completed(TaskId::new(1)).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn test_delete_write_failure_keeps_task() {
        let store = refusing_store_with(SEEDED);

        let err = store.delete(TaskId::new(1)).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert!(store.get(TaskId::new(1)).is_some());
    }

    #[test]
    fn test_clear_completed_write_failure_keeps_tasks() {
        let store = refusing_store_with(SEEDED);

        let err = store.clear_completed().unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(store.count(TaskFilter::Completed), 1);
    }

    #[test]
    fn test_broken_backend_reports_missing_tasks() {
        let store = TaskStore::new(Rc::new(BrokenStore), Rc::new(ManualClock::new(Utc::now())));

        assert!(matches!(
            store.toggle_completed(TaskId::new(1)),
            Err(Error::TaskNotFound { .. })
        ));
        assert!(matches!(
            store.delete(TaskId::new(1)),
            Err(Error::TaskNotFound { .. })
        ));
        assert!(matches!(
            store.clear_completed(),
            Err(Error::Persistence { .. })
        ));
    }

    #[test]
    fn test_add_after_largest_possible_id() {
        let (store, backend, _) = test_store();
        backend
            .write(
                TASKS_KEY,
                &format!(
                    r#"[{{"id":{},"text":"last","createdAt":"2024-03-01T09:00:00Z"}}]"#,
                    i64::MAX
                ),
            )
            .unwrap();

        let err = store.add("next").unwrap_err();
        assert!(matches!(err, Error::Custom { .. }));
        assert_eq!(texts(&store.list_all()), vec!["last"]);
    }

    #[test]
    fn test_formatted_created_at_is_local_time() {
        let (store, _, _) = test_store();
        let task = store.add("x").unwrap();
        let local = task.created_at.with_timezone(&Local);
        assert_eq!(
            task.formatted_created_at(),
            local.format("%Y-%m-%d %H:%M:%S").to_string()
        );
    }

    #[test]
    fn test_filter_parsing_and_cycle() {
        assert_eq!("Active".parse::<TaskFilter>().unwrap(), TaskFilter::Active);
        assert!("done".parse::<TaskFilter>().is_err());
        assert_eq!(TaskFilter::All.cycle(), TaskFilter::Active);
        assert_eq!(TaskFilter::Completed.cycle(), TaskFilter::All);
        assert_eq!(TaskFilter::Completed.to_string(), "completed");
    }
}
