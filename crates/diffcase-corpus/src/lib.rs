//! # diffcase-corpus
//!
//! **Tier 1 (Accumulation & Persistence)**
//!
//! Bounded, ordered collection of accepted test cases and the JSON store it
//! is flushed to.
//!
//! ## What belongs here
//! * `TestCase` and its `{"Inputs", "Expected"}` wire shape
//! * `Corpus` capacity and optional dedupe
//! * `CorpusStore` atomic flush and load
//! * `FlushGuard`, which flushes on every exit path
//!
//! ## What does NOT belong here
//! * Calling the reference function (use diffcase-synth)
//! * Replaying cases (use diffcase-diagnose)

#![forbid(unsafe_code)]

mod accumulator;
mod case;
mod guard;
mod store;

pub use accumulator::{Accept, Corpus};
pub use case::TestCase;
pub use guard::FlushGuard;
pub use store::{CorpusStore, StoreError};
