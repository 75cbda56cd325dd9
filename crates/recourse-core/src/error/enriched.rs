//! Error enrichment with state snapshots and causal history

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::diagnostic::Diagnostic;
use crate::maybe::Maybe;

/// Label used by callers that only need a single state slot
pub const DEFAULT_STATE_LABEL: &str = "default";

/// A value captured at failure time, tagged with the capture instant
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// The captured value
    pub value: Value,
}

/// An error augmented with a chronological record of prior errors and
/// labeled state snapshots.
///
/// `EnrichedError` is a passive data carrier: it never intercepts control
/// flow and none of its operations fail. Handling code saves state and
/// appends prior errors before re-raising or converting to a response:
///
/// ```
/// use std::sync::Arc;
/// use recourse_core::EnrichedError;
///
/// let cause = Arc::new(std::io::Error::other("disk gone"));
/// let mut err = EnrichedError::caused_by("snapshot write failed", 500, cause);
/// err.save_state("segment", 42).save_state("attempted_path", "/var/db/seg42");
///
/// assert_eq!(err.history().len(), 1);
/// assert!(err.has_error_of_kind("io"));
/// ```
///
/// History entries are shared read-only (`Arc`); the error owns its state
/// values and its history vector. Mutators take `&mut self`, so sharing an
/// instance across threads requires external serialization by the caller.
#[derive(Debug)]
pub struct EnrichedError {
    message: String,
    code: i64,
    cause: Option<Arc<dyn Diagnostic>>,
    state_history: Vec<(String, StateSnapshot)>,
    error_history: Vec<Arc<dyn Diagnostic>>,
}

impl EnrichedError {
    /// Create an error with empty state and error histories
    pub fn new(message: impl Into<String>, code: i64) -> Self {
        Self {
            message: message.into(),
            code,
            cause: None,
            state_history: Vec::new(),
            error_history: Vec::new(),
        }
    }

    /// Create an error whose cause becomes the first history entry
    pub fn caused_by(message: impl Into<String>, code: i64, cause: Arc<dyn Diagnostic>) -> Self {
        let mut error = Self::new(message, code);
        error.error_history.push(Arc::clone(&cause));
        error.cause = Some(cause);
        error
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The numeric code attached at construction time
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Store a snapshot of `value` under `label`, stamped with the current
    /// time. Writing to an existing label overwrites the snapshot in place,
    /// keeping the label's original position.
    pub fn save_state(&mut self, label: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let label = label.into();
        let snapshot = StateSnapshot {
            timestamp: Utc::now(),
            value: value.into(),
        };
        match self
            .state_history
            .iter_mut()
            .find(|(existing, _)| *existing == label)
        {
            Some((_, slot)) => *slot = snapshot,
            None => self.state_history.push((label, snapshot)),
        }
        self
    }

    /// The value stored under `label`, absent when nothing was saved there
    pub fn state(&self, label: &str) -> Maybe<&Value> {
        match self
            .state_history
            .iter()
            .find(|(existing, _)| existing == label)
        {
            Some((_, snapshot)) => Maybe::Present(&snapshot.value),
            None => Maybe::Absent,
        }
    }

    /// All saved states with their timestamps, in insertion order
    pub fn states(&self) -> impl Iterator<Item = (&str, &StateSnapshot)> {
        self.state_history
            .iter()
            .map(|(label, snapshot)| (label.as_str(), snapshot))
    }

    /// Append a shared error to the history
    pub fn add_to_history(&mut self, error: Arc<dyn Diagnostic>) -> &mut Self {
        self.error_history.push(error);
        self
    }

    /// Append an owned error to the history
    pub fn record(&mut self, error: impl Diagnostic + 'static) -> &mut Self {
        self.add_to_history(Arc::new(error))
    }

    /// Accumulated errors, oldest first
    pub fn history(&self) -> &[Arc<dyn Diagnostic>] {
        &self.error_history
    }

    /// The most recently appended error, absent when the history is empty
    pub fn last_error(&self) -> Maybe<&Arc<dyn Diagnostic>> {
        match self.error_history.last() {
            Some(error) => Maybe::Present(error),
            None => Maybe::Absent,
        }
    }

    /// Whether any history entry reports the given kind
    pub fn has_error_of_kind(&self, kind: &str) -> bool {
        self.error_history.iter().any(|error| error.kind() == kind)
    }

    /// All history entries of the given kind, in original order
    pub fn errors_of_kind(&self, kind: &str) -> Vec<&Arc<dyn Diagnostic>> {
        self.error_history
            .iter()
            .filter(|error| error.kind() == kind)
            .collect()
    }

    /// Empty both the state history and the error history. The cause link
    /// set at construction time survives, so `source()` keeps working.
    pub fn clear_history(&mut self) -> &mut Self {
        self.state_history.clear();
        self.error_history.clear();
        self
    }

    /// Builder form of [`EnrichedError::add_to_history`], appending each
    /// error in order
    pub fn with_history(mut self, errors: impl IntoIterator<Item = Arc<dyn Diagnostic>>) -> Self {
        self.error_history.extend(errors);
        self
    }

    /// Builder form of [`EnrichedError::save_state`]
    pub fn with_state(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.save_state(label, value);
        self
    }
}

impl fmt::Display for EnrichedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for EnrichedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl Diagnostic for EnrichedError {
    fn kind(&self) -> &str {
        "enriched"
    }
}
