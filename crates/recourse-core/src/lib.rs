//! Recourse Core Library
//!
//! Functional error-handling building blocks: an explicit present/absent
//! container, error enrichment with labeled state snapshots and a causal
//! error history, a bounded fixed-delay retrier, and a message catalog for
//! turning error kinds into user-facing text.
//!
//! Everything here is synchronous and runs on the calling thread; the only
//! blocking operation is the inter-attempt delay inside
//! [`Retrier`], which goes through the injectable [`Sleeper`] capability.

pub mod error;
pub mod maybe;
pub mod messages;
pub mod recovery;

// Re-export commonly used types
pub use error::{DEFAULT_STATE_LABEL, Diagnostic, EnrichedError, StateSnapshot};
pub use maybe::{EmptyUnwrapError, Maybe};
pub use messages::{CatalogError, FALLBACK_KEY, MessageCatalog, MessageEntry};
pub use recovery::{
    InstantSleeper, OperationError, RecordingSleeper, Retrier, RetriesExhaustedError, RetryPolicy,
    Sleeper, ThreadSleeper, retry,
};
