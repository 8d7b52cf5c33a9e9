//! # diffcase-diagnose
//!
//! **Tier 2 (Diagnostics)**
//!
//! Replays a corpus against a candidate implementation, classifies every
//! case and reports the result as a delimited JSON block that callers can
//! pull out of unstructured console output.
//!
//! ## What belongs here
//! * `DiagnosticRunner` and its `Init -> Running -> Done` phases
//! * `DiagnosticSummary` / `FailureRecord` shapes
//! * Emitting and extracting the delimited block
//!
//! ## What does NOT belong here
//! * Building corpora (use diffcase-synth)
//! * Equality rules (use diffcase-compare)

#![forbid(unsafe_code)]

mod runner;
mod summary;

pub use diffcase_synth::{InvocationError, Subject};
pub use runner::{DiagnosticRunner, RunnerPhase};
pub use summary::{
    DiagnosticSummary, ExtractError, FailureRecord, SUMMARY_END, SUMMARY_START, extract_summary,
};
