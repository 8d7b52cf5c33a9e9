//! Capacity-bounded case accumulation.

use std::collections::HashSet;

use diffcase_value::Inputs;

use crate::TestCase;

/// Outcome of [`Corpus::accept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    Accepted,
    /// The corpus already holds `cap` cases.
    Full,
    /// Dedupe is on and these inputs were accepted before.
    Duplicate,
}

impl Accept {
    pub fn is_accepted(self) -> bool {
        matches!(self, Accept::Accepted)
    }
}

/// Ordered, bounded list of accepted cases.
///
/// Cases are kept in acceptance order and never exceed `cap`.
#[derive(Debug, Clone)]
pub struct Corpus {
    cap: usize,
    cases: Vec<TestCase>,
    seen: Option<HashSet<blake3::Hash>>,
    rejected_full: usize,
}

impl Corpus {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            cases: Vec::new(),
            seen: None,
            rejected_full: 0,
        }
    }

    /// Reject cases whose `Inputs` match an already accepted case.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.seen = dedupe.then(|| self.cases.iter().map(|c| inputs_key(&c.inputs)).collect());
        self
    }

    pub fn accept(&mut self, case: TestCase) -> Accept {
        if self.is_full() {
            self.rejected_full += 1;
            return Accept::Full;
        }
        if let Some(seen) = self.seen.as_mut() {
            if !seen.insert(inputs_key(&case.inputs)) {
                return Accept::Duplicate;
            }
        }
        self.cases.push(case);
        Accept::Accepted
    }

    pub fn is_full(&self) -> bool {
        self.cases.len() >= self.cap
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn into_cases(self) -> Vec<TestCase> {
        self.cases
    }

    /// Cases offered after the corpus filled up.
    pub fn rejected_full(&self) -> usize {
        self.rejected_full
    }
}

/// BLAKE3 of the key-sorted JSON text of `inputs`.
///
/// `serde_json::Map` is key-sorted, so rendering through it is canonical.
pub(crate) fn inputs_key(inputs: &Inputs) -> blake3::Hash {
    let canonical = serde_json::Value::Object(
        inputs
            .iter()
            .map(|(name, value)| (name.clone(), serde_json::Value::from(value)))
            .collect(),
    );
    blake3::hash(canonical.to_string().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffcase_value::Value;

    fn case(x: i64) -> TestCase {
        let inputs: Inputs = [("x".to_string(), Value::Int(x))].into_iter().collect();
        TestCase::new(inputs, Value::Int(x * 2))
    }

    #[test]
    fn never_exceeds_cap() {
        let mut corpus = Corpus::new(2);
        assert!(corpus.accept(case(1)).is_accepted());
        assert!(corpus.accept(case(2)).is_accepted());
        assert!(corpus.is_full());
        assert_eq!(corpus.accept(case(3)), Accept::Full);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.rejected_full(), 1);
    }

    #[test]
    fn keeps_acceptance_order() {
        let mut corpus = Corpus::new(10);
        for x in [3, 1, 2] {
            corpus.accept(case(x));
        }
        let xs: Vec<_> = corpus
            .cases()
            .iter()
            .map(|c| c.inputs["x"].as_i64().unwrap())
            .collect();
        assert_eq!(xs, [3, 1, 2]);
    }

    #[test]
    fn duplicates_are_kept_without_dedupe() {
        let mut corpus = Corpus::new(10);
        corpus.accept(case(1));
        assert!(corpus.accept(case(1)).is_accepted());
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn dedupe_rejects_repeated_inputs() {
        let mut corpus = Corpus::new(10).with_dedupe(true);
        corpus.accept(case(1));
        assert_eq!(corpus.accept(case(1)), Accept::Duplicate);
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn dedupe_key_ignores_key_order() {
        let ab: Inputs = [("a", 1), ("b", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::Int(v)))
            .collect();
        let ba: Inputs = [("b", 2), ("a", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::Int(v)))
            .collect();
        assert_eq!(inputs_key(&ab), inputs_key(&ba));
    }

    #[test]
    fn dedupe_key_ignores_nested_key_order() {
        let nested = |pairs: &[(&str, i64)]| -> Value {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::Int(*v)))
                .collect()
        };
        let left: Inputs = [("cfg".to_string(), nested(&[("x", 1), ("y", 2)]))]
            .into_iter()
            .collect();
        let right: Inputs = [("cfg".to_string(), nested(&[("y", 2), ("x", 1)]))]
            .into_iter()
            .collect();
        assert_eq!(inputs_key(&left), inputs_key(&right));
    }

    #[test]
    fn dedupe_key_distinguishes_int_and_float() {
        let int: Inputs = [("a".to_string(), Value::Int(1))].into_iter().collect();
        let float: Inputs = [("a".to_string(), Value::Float(1.0))].into_iter().collect();
        assert_ne!(inputs_key(&int), inputs_key(&float));
    }
}
