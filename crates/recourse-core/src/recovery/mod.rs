//! Bounded retry support
//!
//! This module provides the only component of the toolkit that intercepts
//! errors as part of normal control flow:
//! - Fixed-delay retry policy and retrier
//! - Injectable sleep capability so tests never pay wall-clock delays

pub mod retry;
pub mod sleeper;

pub use retry::{OperationError, Retrier, RetriesExhaustedError, RetryPolicy, retry};
pub use sleeper::{InstantSleeper, RecordingSleeper, Sleeper, ThreadSleeper};
