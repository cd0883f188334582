//! Task-list data models
//!
//! Uses String for IDs and epoch-millisecond integers for timestamps so the
//! shapes match what mobile clients send and expect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::factory::generate_id;
use crate::sync::{SyncState, TransitionError};

/// Title given to tasks created without one
pub const DEFAULT_TASK_TITLE: &str = "New Task";

fn default_title() -> String {
    DEFAULT_TASK_TITLE.to_string()
}

/// A task/todo item
///
/// The `id` never changes once a task exists. Edits go through the `with_*`
/// methods, which return a new value carrying the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default = "generate_id")]
    id: String,
    last_update: i64,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
}

impl Task {
    /// Create a task with the default title, an empty description and not
    /// completed.
    pub fn new(id: impl Into<String>, last_update: i64) -> Self {
        Self {
            id: id.into(),
            last_update,
            title: default_title(),
            description: String::new(),
            completed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Epoch milliseconds of the last change
    pub fn last_update(&self) -> i64 {
        self.last_update
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn with_completed(self, completed: bool) -> Self {
        Self { completed, ..self }
    }

    pub fn with_last_update(self, last_update: i64) -> Self {
        Self {
            last_update,
            ..self
        }
    }
}

/// View filter used by the task list spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterType {
    /// Do not filter tasks
    #[default]
    Any,
    /// Only tasks not completed yet
    Active,
    /// Only completed tasks
    Complete,
}

impl FilterType {
    /// All filters, in spinner order
    pub const ALL: [FilterType; 3] = [FilterType::Any, FilterType::Active, FilterType::Complete];

    /// Whether `task` is visible under this filter
    pub fn predicate(self, task: &Task) -> bool {
        match self {
            FilterType::Any => true,
            FilterType::Active => !task.completed,
            FilterType::Complete => task.completed,
        }
    }

    /// Visible tasks of `tasks`, keeping their order
    pub fn apply<'a>(self, tasks: &'a [Task]) -> impl Iterator<Item = &'a Task> + 'a {
        tasks.iter().filter(move |task| self.predicate(task))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::Any => "ANY",
            FilterType::Active => "ACTIVE",
            FilterType::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}' (expected ANY, ACTIVE or COMPLETE)")]
pub struct ParseFilterError(pub String);

impl FromStr for FilterType {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FilterType::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseFilterError(trimmed.to_string()))
    }
}

/// One immutable snapshot of the task-list screen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    tasks: Vec<Task>,
    filter: FilterType,
    sync_state: SyncState,
}

impl AppState {
    pub fn new(tasks: Vec<Task>, filter: FilterType, sync_state: SyncState) -> Self {
        Self {
            tasks,
            filter,
            sync_state,
        }
    }

    /// Tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync_state
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks that pass the current filter
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        Self { tasks, ..self }
    }

    pub fn with_filter(self, filter: FilterType) -> Self {
        Self { filter, ..self }
    }

    /// Replace the sync state without checking the transition
    pub fn with_sync_state(self, sync_state: SyncState) -> Self {
        Self { sync_state, ..self }
    }

    /// Replace the sync state if the lifecycle allows moving there
    pub fn with_sync_transition(self, next: SyncState) -> Result<Self, TransitionError> {
        let Self {
            tasks,
            filter,
            sync_state,
        } = self;
        let sync_state = sync_state.transition(next)?;
        Ok(Self {
            tasks,
            filter,
            sync_state,
        })
    }

    /// Append a task at the end of the list
    pub fn with_task_added(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Swap in `task` for the task with the same id. Returns the new
    /// snapshot and whether an id matched; unknown ids leave it unchanged.
    pub fn with_task_replaced(mut self, task: Task) -> (Self, bool) {
        let replaced = match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => {
                tracing::debug!(task_id = %task.id, "Replace ignored, task not found");
                false
            }
        };
        (self, replaced)
    }

    pub fn with_task_removed(mut self, id: &str) -> Self {
        self.tasks.retain(|task| task.id != id);
        self
    }
}
