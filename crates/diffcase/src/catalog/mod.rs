//! Built-in benchmarks.
//!
//! Each benchmark pairs a reference function with two candidates: one that
//! should agree with it on every input and one with a deliberate defect.

mod base_n;
mod duration;
mod merge;
mod volatility;

use diffcase_strategy::{ParamSpec, Synthesizer};
use diffcase_synth::{InvocationError, arg};
use diffcase_value::{Inputs, Value};

use crate::cli::CandidateKind;

/// A function under test.
pub type SubjectFn = fn(&Inputs) -> Result<Value, InvocationError>;

/// Interestingness filter applied at synthesis time.
pub type PredicateFn = fn(&Inputs, &Value) -> bool;

pub struct Benchmark {
    pub name: &'static str,
    pub summary: &'static str,
    pub reference: SubjectFn,
    pub faithful: SubjectFn,
    pub faulty: SubjectFn,
    pub predicate: Option<PredicateFn>,
    params: fn() -> Vec<ParamSpec>,
    examples: fn() -> Vec<Inputs>,
}

impl Benchmark {
    pub fn params(&self) -> Vec<ParamSpec> {
        (self.params)()
    }

    pub fn examples(&self) -> Vec<Inputs> {
        (self.examples)()
    }

    pub fn param_names(&self) -> Vec<String> {
        self.params().into_iter().map(|p| p.name).collect()
    }

    pub fn synthesizer(&self) -> Synthesizer {
        Synthesizer::new(self.params()).with_examples(self.examples())
    }

    pub fn candidate(&self, kind: CandidateKind) -> SubjectFn {
        match kind {
            CandidateKind::Faithful => self.faithful,
            CandidateKind::Faulty => self.faulty,
            CandidateKind::Reference => self.reference,
        }
    }
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static BENCHMARKS: [Benchmark; 4] = [
    Benchmark {
        name: "base-n",
        summary: "encode an integer in base n with an optional digit table",
        reference: base_n::reference,
        faithful: base_n::faithful,
        faulty: base_n::faulty,
        predicate: None,
        params: base_n::params,
        examples: base_n::examples,
    },
    Benchmark {
        name: "duration",
        summary: "hours and minutes between two HH:MM times",
        reference: duration::reference,
        faithful: duration::faithful,
        faulty: duration::faulty,
        predicate: None,
        params: duration::params,
        examples: duration::examples,
    },
    Benchmark {
        name: "merge",
        summary: "recursively merge one object into another",
        reference: merge::reference,
        faithful: merge::faithful,
        faulty: merge::faulty,
        predicate: None,
        params: merge::params,
        examples: merge::examples,
    },
    Benchmark {
        name: "volatility",
        summary: "coefficient of variation of the positive values in a series",
        reference: volatility::reference,
        faithful: volatility::faithful,
        faulty: volatility::faulty,
        predicate: Some(volatility::long_history),
        params: volatility::params,
        examples: volatility::examples,
    },
];

pub fn all() -> &'static [Benchmark] {
    &BENCHMARKS
}

pub fn find(name: &str) -> Option<&'static Benchmark> {
    BENCHMARKS.iter().find(|b| b.name == name)
}

fn int_arg(inputs: &Inputs, name: &str) -> Result<i64, InvocationError> {
    let value = arg(inputs, name)?;
    value.as_i64().ok_or_else(|| wrong_type(name, "int", value))
}

fn str_arg<'a>(inputs: &'a Inputs, name: &str) -> Result<&'a str, InvocationError> {
    let value = arg(inputs, name)?;
    value.as_str().ok_or_else(|| wrong_type(name, "string", value))
}

fn object_arg<'a>(inputs: &'a Inputs, name: &str) -> Result<&'a diffcase_value::Map, InvocationError> {
    let value = arg(inputs, name)?;
    value.as_object().ok_or_else(|| wrong_type(name, "object", value))
}

fn float_list_arg(inputs: &Inputs, name: &str) -> Result<Vec<f64>, InvocationError> {
    let value = arg(inputs, name)?;
    let items = value.as_array().ok_or_else(|| wrong_type(name, "array", value))?;
    items
        .iter()
        .map(|item| item.as_f64().ok_or_else(|| wrong_type(name, "array of numbers", value)))
        .collect()
}

fn wrong_type(name: &str, expected: &str, got: &Value) -> InvocationError {
    InvocationError::type_error(format!(
        "'{name}' must be {expected}, got {}",
        got.type_name()
    ))
}

/// Build an input tuple from JSON-like pairs.
///
/// Parameters keep the order given; keys of nested objects come out sorted.
fn tuple<const N: usize>(pairs: [(&str, serde_json::Value); N]) -> Inputs {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::from(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffcase_compare::{DEFAULT_TOLERANCE, deep_compare};

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = all().iter().map(|b| b.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn examples_only_use_declared_params() {
        for bench in all() {
            let names = bench.param_names();
            for example in bench.examples() {
                assert!(
                    example.keys().all(|k| names.contains(k)),
                    "{}: example uses an undeclared parameter",
                    bench.name
                );
            }
        }
    }

    #[test]
    fn faithful_candidates_agree_on_every_example() {
        for bench in all() {
            for example in bench.examples() {
                match ((bench.reference)(&example), (bench.faithful)(&example)) {
                    (Ok(expected), Ok(actual)) => assert!(
                        deep_compare(&expected, &actual, DEFAULT_TOLERANCE),
                        "{}: {expected} != {actual}",
                        bench.name
                    ),
                    (Err(a), Err(b)) => assert_eq!(a.error_type, b.error_type),
                    (a, b) => panic!("{}: {a:?} vs {b:?}", bench.name),
                }
            }
        }
    }

    #[test]
    fn faulty_candidates_disagree_somewhere_in_the_examples() {
        for bench in all() {
            let disagrees = bench.examples().iter().any(|example| {
                match ((bench.reference)(example), (bench.faulty)(example)) {
                    (Ok(expected), Ok(actual)) => {
                        !deep_compare(&expected, &actual, DEFAULT_TOLERANCE)
                    }
                    (Ok(_), Err(_)) => true,
                    _ => false,
                }
            });
            assert!(disagrees, "{}: faulty candidate matches on every example", bench.name);
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(find("nope").is_none());
        assert_eq!(find("merge").map(|b| b.name), Some("merge"));
    }

    #[test]
    fn typed_args_report_wrong_types() {
        let inputs = tuple([("n", serde_json::json!("ten"))]);
        let err = int_arg(&inputs, "n").unwrap_err();
        assert_eq!(err.error_type, "TypeError");
        assert!(err.message.contains("got string"));
    }
}
