//! # diffcase-synth
//!
//! **Tier 2 (Oracle Invocation & Synthesis)**
//!
//! Runs the reference function over synthesized inputs, keeps the tuples
//! that are worth persisting and drives them into a flushed corpus.
//!
//! ## What belongs here
//! * The `Subject` seam and `InvocationError`
//! * Panic containment for subject calls
//! * Interestingness filtering and the synthesis loop
//!
//! ## What does NOT belong here
//! * Strategy declarations (use diffcase-strategy)
//! * Replaying a corpus against a candidate (use diffcase-diagnose)

#![forbid(unsafe_code)]

mod driver;
mod invoker;
mod subject;

pub use driver::{SynthesisReport, synthesize};
pub use invoker::{AcceptAll, Interestingness, Invoker, Verdict};
pub use subject::{InvocationError, Subject, arg, invoke_guarded};
