//! Synchronization lifecycle
//!
//! ```text
//! [*] --> IDLE
//! IDLE --> PROCESS : refresh / create / update
//! PROCESS --> IDLE : success
//! PROCESS --> ERROR : failed
//! ERROR --> IDLE
//! ```
//!
//! Any [`SyncState`] value can be built directly; [`SyncState::transition`]
//! is the check a reducer runs before adopting a new state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Which operation a `PROCESS` state is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    Refresh,
    Create,
    Update,
}

impl ProcessType {
    pub const ALL: [ProcessType; 3] = [
        ProcessType::Refresh,
        ProcessType::Create,
        ProcessType::Update,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessType::Refresh => "REFRESH",
            ProcessType::Create => "CREATE",
            ProcessType::Update => "UPDATE",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessType {
    type Err = ParseSyncStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProcessType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSyncStateError::UnknownProcess(trimmed.to_string()))
    }
}

/// Cause carried by an `ERROR` state
///
/// Cheap to clone. Two causes are equal when they share the same error or
/// render the same message chain, so a snapshot read back from JSON still
/// compares equal to the one that was written.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SyncFailure(Arc<anyhow::Error>);

impl SyncFailure {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(anyhow::Error::new(error)))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self(Arc::new(anyhow::Error::msg(message.into())))
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }

    /// Full message chain, outermost context first
    pub fn message(&self) -> String {
        format!("{:#}", self.0)
    }
}

impl PartialEq for SyncFailure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.message() == other.message()
    }
}

impl Eq for SyncFailure {}

impl fmt::Debug for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SyncFailure").field(&self.message()).finish()
    }
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

impl From<anyhow::Error> for SyncFailure {
    fn from(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }
}

impl From<String> for SyncFailure {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<&str> for SyncFailure {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<SyncFailure> for String {
    fn from(failure: SyncFailure) -> Self {
        failure.message()
    }
}

/// Tasks sync state
///
/// Serialized with external tagging: `"IDLE"`, `{"PROCESS":"REFRESH"}`,
/// `{"ERROR":"<cause>"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncState {
    #[default]
    Idle,
    Process(ProcessType),
    Error(SyncFailure),
}

impl SyncState {
    pub fn failed(cause: impl Into<SyncFailure>) -> Self {
        SyncState::Error(cause.into())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SyncState::Idle)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, SyncState::Process(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SyncState::Error(_))
    }

    /// Whether the lifecycle has an edge from `self` to `next`
    pub fn can_transition_to(&self, next: &SyncState) -> bool {
        matches!(
            (self, next),
            (SyncState::Idle, SyncState::Process(_))
                | (SyncState::Process(_), SyncState::Idle)
                | (SyncState::Process(_), SyncState::Error(_))
                | (SyncState::Error(_), SyncState::Idle)
        )
    }

    /// Move to `next`, or report the illegal edge
    pub fn transition(self, next: SyncState) -> Result<SyncState, TransitionError> {
        if self.can_transition_to(&next) {
            tracing::debug!(from = %self, to = %next, "Sync state transition");
            Ok(next)
        } else {
            tracing::debug!(from = %self, to = %next, "Sync state transition rejected");
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Idle => f.write_str("IDLE"),
            SyncState::Process(kind) => write!(f, "PROCESS({})", kind),
            SyncState::Error(cause) => write!(f, "ERROR({})", cause),
        }
    }
}

impl FromStr for SyncState {
    type Err = ParseSyncStateError;

    /// Parses the display form: `IDLE`, `PROCESS(<kind>)`, `ERROR(<cause>)`.
    /// Tags are case-insensitive; the cause is kept verbatim, even when empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("IDLE") {
            return Ok(SyncState::Idle);
        }

        let unknown = || ParseSyncStateError::Unknown(trimmed.to_string());
        let (tag, rest) = trimmed.split_once('(').ok_or_else(unknown)?;
        let inner = rest.strip_suffix(')').ok_or_else(unknown)?;

        match tag.trim().to_ascii_uppercase().as_str() {
            "PROCESS" => Ok(SyncState::Process(inner.parse()?)),
            "ERROR" => Ok(SyncState::failed(inner)),
            _ => Err(unknown()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSyncStateError {
    #[error("unknown sync state '{0}' (expected IDLE, PROCESS(<kind>) or ERROR(<cause>))")]
    Unknown(String),

    #[error("unknown process kind '{0}' (expected REFRESH, CREATE or UPDATE)")]
    UnknownProcess(String),
}

/// A move the sync lifecycle does not allow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal sync transition {from} -> {to}")]
pub struct TransitionError {
    pub from: SyncState,
    pub to: SyncState,
}
