//! Error enrichment for the Recourse toolkit
//!
//! This module provides the pieces that let errors carry their own
//! investigation material:
//! - [`Diagnostic`]: a stable `kind()` identifier on top of
//!   `std::error::Error`
//! - [`EnrichedError`]: message/code carrier accumulating prior errors and
//!   labeled state snapshots
//! - conversions giving common host errors a kind of their own

mod conversions;
mod diagnostic;
mod enriched;

pub use diagnostic::Diagnostic;
pub use enriched::{DEFAULT_STATE_LABEL, EnrichedError, StateSnapshot};
