//! Replaying a corpus against a candidate.

use diffcase_compare::{deep_compare, first_difference, resolve_pointer};
use diffcase_config::{ExpectedSource, HarnessConfig};
use diffcase_corpus::{CorpusStore, StoreError, TestCase};
use diffcase_synth::{InvocationError, Subject, invoke_guarded};
use diffcase_value::Value;
use tracing::{debug, info, warn};

use crate::{DiagnosticSummary, FailureRecord};

/// Where a [`DiagnosticRunner`] is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerPhase {
    Init,
    Running,
    Done,
}

/// Compares a candidate with a reference over every case of a corpus.
///
/// Case-level problems (mismatch, candidate error or panic, reference
/// drift) are recorded and the run continues. A case missing one of the
/// declared parameters, or a corpus that cannot be loaded, stops the run
/// with a `CriticalExecutionError`; counts accumulated so far are kept.
#[derive(Debug, Clone)]
pub struct DiagnosticRunner {
    tolerance: f64,
    max_reported_failures: usize,
    expected_source: ExpectedSource,
    params: Vec<String>,
    phase: RunnerPhase,
}

impl DiagnosticRunner {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            max_reported_failures: config.max_reported_failures,
            expected_source: config.expected_source,
            params: Vec::new(),
            phase: RunnerPhase::Init,
        }
    }

    /// Parameter names every case must carry.
    pub fn with_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn phase(&self) -> RunnerPhase {
        self.phase
    }

    /// Load `store` and run every case in it.
    pub fn run_from_store<R, C>(
        &mut self,
        reference: &R,
        candidate: &C,
        store: &CorpusStore,
    ) -> DiagnosticSummary
    where
        R: Subject + ?Sized,
        C: Subject + ?Sized,
    {
        match store.load() {
            Ok(cases) => self.run(reference, candidate, &cases),
            Err(err) => {
                warn!(error = %err, "could not load corpus");
                self.phase = RunnerPhase::Done;
                DiagnosticSummary::critical(store_error_type(&err), err.to_string())
            }
        }
    }

    pub fn run<R, C>(&mut self, reference: &R, candidate: &C, cases: &[TestCase]) -> DiagnosticSummary
    where
        R: Subject + ?Sized,
        C: Subject + ?Sized,
    {
        self.phase = RunnerPhase::Running;
        let mut summary = DiagnosticSummary::default();
        if cases.is_empty() {
            info!("no test cases loaded");
        }

        for (idx, case) in cases.iter().enumerate() {
            let case_id = idx + 1;

            if let Some(missing) = self.params.iter().find(|p| !case.inputs.contains_key(*p)) {
                warn!(case_id, param = %missing, "case is missing a parameter; stopping");
                summary.execution_error = Some(FailureRecord::CriticalExecutionError {
                    error_type: "KeyError".into(),
                    error_message: format!("case {case_id} has no input named '{missing}'"),
                });
                break;
            }

            let record = match self.expected_for(reference, case) {
                Err(err) => {
                    let err = err.prefixed("Reference");
                    warn!(case_id, error_type = %err.error_type, "reference failed on a persisted case");
                    Some(execution_error(case_id, case, err))
                }
                Ok(expected) => match invoke_guarded(candidate, &case.inputs) {
                    Err(err) => {
                        warn!(case_id, error_type = %err.error_type, "candidate raised");
                        Some(execution_error(case_id, case, err))
                    }
                    Ok(actual) if deep_compare(&expected, &actual, self.tolerance) => None,
                    Ok(actual) => {
                        let difference = first_difference(&expected, &actual, self.tolerance);
                        match &difference {
                            Some(diff) => warn!(
                                case_id,
                                expected = %shown(resolve_pointer(&expected, &diff.pointer)),
                                actual = %shown(resolve_pointer(&actual, &diff.pointer)),
                                "mismatch: {diff}"
                            ),
                            None => warn!(case_id, "mismatch"),
                        }
                        Some(FailureRecord::TestFailure {
                            case_id,
                            inputs: case.inputs.clone(),
                            expected,
                            actual,
                            difference,
                        })
                    }
                },
            };

            match record {
                None => {
                    debug!(case_id, "passed");
                    summary.passed += 1;
                }
                Some(record) => {
                    summary.failed += 1;
                    if summary.failures.len() < self.max_reported_failures {
                        summary.failures.push(record);
                    }
                }
            }
        }

        summary.total = summary.passed + summary.failed;
        self.phase = RunnerPhase::Done;
        info!(
            passed = summary.passed,
            failed = summary.failed,
            total = summary.total,
            "diagnostics finished"
        );
        summary
    }

    fn expected_for<R>(&self, reference: &R, case: &TestCase) -> Result<Value, InvocationError>
    where
        R: Subject + ?Sized,
    {
        match (&self.expected_source, &case.expected) {
            (ExpectedSource::Persisted, Some(expected)) => Ok(expected.clone()),
            _ => invoke_guarded(reference, &case.inputs),
        }
    }
}

fn execution_error(case_id: usize, case: &TestCase, err: InvocationError) -> FailureRecord {
    FailureRecord::ExecutionError {
        case_id,
        inputs: case.inputs.clone(),
        error_type: err.error_type,
        error_message: err.message,
    }
}

/// Compact JSON of the value at a diverging position, or `-` when one side
/// has nothing there.
fn shown(value: Option<&Value>) -> String {
    value.map_or_else(|| "-".to_string(), Value::to_string)
}

fn store_error_type(err: &StoreError) -> &'static str {
    match err {
        StoreError::Io { .. } => "IoError",
        StoreError::Parse { .. } => "ParseError",
        StoreError::Serialize(_) => "SerializeError",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffcase_value::Inputs;

    fn case(x: i64, expected: Value) -> TestCase {
        let inputs: Inputs = [("x".to_string(), Value::Int(x))].into_iter().collect();
        TestCase::new(inputs, expected)
    }

    fn double(i: &Inputs) -> Result<Value, InvocationError> {
        Ok(Value::Int(i["x"].as_i64().unwrap_or_default() * 2))
    }

    #[test]
    fn diverging_values_are_rendered_compactly() {
        let expected: Value = serde_json::from_str(r#"{"pts": [1, {"k": "a"}]}"#).unwrap();
        let actual: Value = serde_json::from_str(r#"{"pts": [1, {"k": "b"}]}"#).unwrap();
        let diff = first_difference(&expected, &actual, 0.0).unwrap();
        assert_eq!(shown(resolve_pointer(&expected, &diff.pointer)), r#""a""#);
        assert_eq!(shown(resolve_pointer(&actual, &diff.pointer)), r#""b""#);
        assert_eq!(shown(resolve_pointer(&actual, "/missing")), "-");
    }

    #[test]
    fn phases_advance_to_done() {
        let mut runner = DiagnosticRunner::new(&HarnessConfig::default());
        assert_eq!(runner.phase(), RunnerPhase::Init);
        runner.run(&double, &double, &[case(1, Value::Int(2))]);
        assert_eq!(runner.phase(), RunnerPhase::Done);
    }

    #[test]
    fn rederive_ignores_stale_persisted_value() {
        let mut runner = DiagnosticRunner::new(&HarnessConfig::default());
        let summary = runner.run(&double, &double, &[case(2, Value::Int(999))]);
        assert_eq!(summary.passed, 1);
    }

    #[test]
    fn persisted_trusts_the_file() {
        let config = HarnessConfig {
            expected_source: ExpectedSource::Persisted,
            ..HarnessConfig::default()
        };
        let mut runner = DiagnosticRunner::new(&config);
        let summary = runner.run(&double, &double, &[case(2, Value::Int(999))]);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn persisted_without_expected_falls_back_to_reference() {
        let config = HarnessConfig {
            expected_source: ExpectedSource::Persisted,
            ..HarnessConfig::default()
        };
        let inputs_only = TestCase::inputs_only(case(3, Value::Null).inputs);
        let mut runner = DiagnosticRunner::new(&config);
        let summary = runner.run(&double, &double, &[inputs_only]);
        assert_eq!(summary.passed, 1);
    }

    #[test]
    fn store_errors_map_to_short_types() {
        let err = StoreError::Io {
            path: "x".into(),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(store_error_type(&err), "IoError");
    }
}
