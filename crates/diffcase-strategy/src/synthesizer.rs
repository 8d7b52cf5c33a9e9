//! Ordered, budget-bounded draw sequences.

use diffcase_value::{Inputs, Value};
use proptest::prelude::BoxedStrategy;
use proptest::strategy::{Strategy as _, ValueTree};
use proptest::test_runner::{Config, RngAlgorithm, TestRng, TestRunner};
use serde::{Deserialize, Serialize};

use crate::Strategy;

/// Randomized draws per run unless overridden.
const DEFAULT_BUDGET: usize = 10_000;

/// Strategy and seed values for one named parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub strategy: Strategy,
    /// Values tried before any randomized draw, one per seed tuple.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seeds: Vec<Value>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            strategy,
            seeds: Vec::new(),
        }
    }

    pub fn with_seeds<I>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.seeds.extend(seeds);
        self
    }
}

/// Produces argument tuples for a function under test.
///
/// Order of a draw sequence:
/// 1. explicit examples, verbatim;
/// 2. seed tuples, where tuple `i` takes `seeds[i]` for every parameter that
///    has one and a random draw for the others;
/// 3. up to `budget` randomized tuples.
///
/// Only step 3 counts against the budget. Equal seeds give equal sequences.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    params: Vec<ParamSpec>,
    examples: Vec<Inputs>,
    budget: usize,
    seed: u64,
}

impl Synthesizer {
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self {
            params,
            examples: Vec::new(),
            budget: DEFAULT_BUDGET,
            seed: 0,
        }
    }

    /// Complete argument tuples emitted before anything else.
    pub fn with_examples<I>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = Inputs>,
    {
        self.examples.extend(examples);
        self
    }

    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Number of seed tuples, the longest seed list across parameters.
    pub fn seed_rows(&self) -> usize {
        self.params.iter().map(|p| p.seeds.len()).max().unwrap_or(0)
    }

    /// Start a fresh draw sequence.
    pub fn draws(&self) -> Draws<'_> {
        let mut seed_bytes = [0u8; 32];
        seed_bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &seed_bytes);

        Draws {
            synth: self,
            compiled: self.params.iter().map(|p| p.strategy.to_proptest()).collect(),
            runner: TestRunner::new_with_rng(Config::default(), rng),
            next_example: 0,
            next_seed_row: 0,
            seed_rows: self.seed_rows(),
            randomized: 0,
        }
    }
}

/// Lazy iterator over a [`Synthesizer`]'s tuples.
pub struct Draws<'a> {
    synth: &'a Synthesizer,
    compiled: Vec<BoxedStrategy<Value>>,
    runner: TestRunner,
    next_example: usize,
    next_seed_row: usize,
    seed_rows: usize,
    randomized: usize,
}

impl Draws<'_> {
    /// Randomized draws consumed so far.
    pub fn randomized_drawn(&self) -> usize {
        self.randomized
    }

    /// True once every example, seed tuple and budgeted draw has been used.
    pub fn is_exhausted(&self) -> bool {
        self.next_example >= self.synth.examples.len()
            && self.next_seed_row >= self.seed_rows
            && self.randomized >= self.synth.budget
    }

    fn draw(&mut self, idx: usize) -> Option<Value> {
        let tree = self.compiled[idx].new_tree(&mut self.runner).ok()?;
        Some(tree.current())
    }

    fn seed_tuple(&mut self, row: usize) -> Option<Inputs> {
        let mut inputs = Inputs::with_capacity(self.synth.params.len());
        for (idx, param) in self.synth.params.iter().enumerate() {
            let value = match param.seeds.get(row) {
                Some(seed) => seed.clone(),
                None => self.draw(idx)?,
            };
            inputs.insert(param.name.clone(), value);
        }
        Some(inputs)
    }

    fn random_tuple(&mut self) -> Option<Inputs> {
        let mut inputs = Inputs::with_capacity(self.synth.params.len());
        for (idx, param) in self.synth.params.iter().enumerate() {
            let value = self.draw(idx)?;
            inputs.insert(param.name.clone(), value);
        }
        Some(inputs)
    }
}

impl Iterator for Draws<'_> {
    type Item = Inputs;

    fn next(&mut self) -> Option<Inputs> {
        if let Some(example) = self.synth.examples.get(self.next_example) {
            self.next_example += 1;
            return Some(example.clone());
        }

        while self.next_seed_row < self.seed_rows {
            let row = self.next_seed_row;
            self.next_seed_row += 1;
            if let Some(inputs) = self.seed_tuple(row) {
                return Some(inputs);
            }
        }

        // A failed draw still spends budget.
        while self.randomized < self.synth.budget {
            self.randomized += 1;
            if let Some(inputs) = self.random_tuple() {
                return Some(inputs);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.synth.examples.len().saturating_sub(self.next_example)
            + self.seed_rows.saturating_sub(self.next_seed_row)
            + self.synth.budget.saturating_sub(self.randomized);
        (0, Some(remaining))
    }
}

impl std::fmt::Debug for Draws<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draws")
            .field("next_example", &self.next_example)
            .field("next_seed_row", &self.next_seed_row)
            .field("randomized", &self.randomized)
            .finish_non_exhaustive()
    }
}
