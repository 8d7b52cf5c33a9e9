//! # diffcase-strategy
//!
//! **Tier 1 (Input Synthesis)**
//!
//! Declarative per-parameter strategies and the [`Synthesizer`] that turns
//! them into a lazy, reproducible sequence of argument tuples.
//!
//! ## What belongs here
//! * `Strategy` / `Alphabet` declarations (Serde-loadable)
//! * Compilation of declarations into proptest strategies
//! * Seed-first, budget-bounded draw ordering
//!
//! ## What does NOT belong here
//! * Invoking the reference function (use diffcase-synth)
//! * Shrinking or coverage guidance
//!
//! ## Example
//! ```
//! use diffcase_strategy::{ParamSpec, Strategy, Synthesizer};
//! use diffcase_value::Value;
//!
//! let synth = Synthesizer::new(vec![
//!     ParamSpec::new("x", Strategy::int(0, 10)).with_seeds([Value::Int(0)]),
//! ])
//! .with_budget(5)
//! .with_seed(7);
//!
//! let tuples: Vec<_> = synth.draws().collect();
//! assert_eq!(tuples.len(), 6); // one seed tuple + five randomized draws
//! assert_eq!(tuples[0]["x"], Value::Int(0));
//! ```

#![forbid(unsafe_code)]

mod strategy;
mod synthesizer;

pub use strategy::{Alphabet, Field, Strategy};
pub use synthesizer::{Draws, ParamSpec, Synthesizer};
