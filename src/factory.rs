//! Task construction with injectable clock and id sources

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::models::Task;

/// Source of `lastUpdate` timestamps
pub trait Clock {
    /// Epoch milliseconds
    fn now_millis(&self) -> i64;
}

/// Source of fresh task ids
pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Wall clock (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `<prefix>1`, `<prefix>2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// Fresh random task id
pub(crate) fn generate_id() -> String {
    UuidIds.next_id()
}

/// Builds new tasks, stamping ids and timestamps from its sources
#[derive(Debug, Clone, Default)]
pub struct TaskFactory<C = SystemClock, I = UuidIds> {
    clock: C,
    ids: I,
}

impl TaskFactory {
    /// Factory backed by the wall clock and random UUIDs
    pub fn system() -> Self {
        Self::default()
    }
}

impl<C: Clock, I: IdSource> TaskFactory<C, I> {
    pub fn new(clock: C, ids: I) -> Self {
        Self { clock, ids }
    }

    /// A task with a fresh id, the current time and default contents
    pub fn create(&self) -> Task {
        let task = Task::new(self.ids.next_id(), self.clock.now_millis());
        tracing::debug!(task_id = %task.id(), last_update = task.last_update(), "Task created");
        task
    }

    pub fn create_with(&self, title: impl Into<String>, description: impl Into<String>) -> Task {
        self.create()
            .with_title(title)
            .with_description(description)
    }

    /// Re-stamp `lastUpdate` after an edit
    pub fn touch(&self, task: Task) -> Task {
        task.with_last_update(self.clock.now_millis())
    }
}
