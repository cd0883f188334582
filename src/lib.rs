//! taskstate - Immutable state model for a task-list screen
//!
//! A snapshot ([`AppState`]) holds the tasks, the active view filter and the
//! synchronization lifecycle. Snapshots are plain values: every change
//! produces a new snapshot, and equality is structural so a store can detect
//! no-op updates.

pub mod config;
pub mod factory;
pub mod models;
pub mod sync;

pub use factory::{Clock, FixedClock, IdSource, SequentialIds, SystemClock, TaskFactory, UuidIds};
pub use models::{AppState, DEFAULT_TASK_TITLE, FilterType, ParseFilterError, Task};
pub use sync::{ParseSyncStateError, ProcessType, SyncFailure, SyncState, TransitionError};
