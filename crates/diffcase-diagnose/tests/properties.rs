//! Classification completeness over arbitrary corpora.

use diffcase_config::HarnessConfig;
use diffcase_corpus::TestCase;
use diffcase_diagnose::DiagnosticRunner;
use diffcase_synth::InvocationError;
use diffcase_value::{Inputs, Value};
use proptest::prelude::*;

// Candidate outcome per case: 0 = correct, 1 = wrong, 2 = raises.
fn corpus_and_plan() -> impl Strategy<Value = Vec<(i64, u8)>> {
    prop::collection::vec((-50i64..50, 0u8..3), 0..40)
}

proptest! {
    #[test]
    fn every_case_is_classified(plan in corpus_and_plan()) {
        let cases: Vec<TestCase> = plan
            .iter()
            .enumerate()
            .map(|(idx, (x, mode))| {
                let inputs: Inputs = [
                    ("x".to_string(), Value::Int(*x)),
                    ("mode".to_string(), Value::Int(i64::from(*mode))),
                    ("idx".to_string(), Value::Int(idx as i64)),
                ]
                .into_iter()
                .collect();
                TestCase::new(inputs, Value::Int(*x))
            })
            .collect();
        let reference = |i: &Inputs| -> Result<Value, InvocationError> { Ok(i["x"].clone()) };
        let candidate = |i: &Inputs| -> Result<Value, InvocationError> {
            match i["mode"].as_i64() {
                Some(0) => Ok(i["x"].clone()),
                Some(1) => Ok(Value::from("wrong")),
                _ => Err(InvocationError::value_error("boom")),
            }
        };

        let summary = DiagnosticRunner::new(&HarnessConfig::default()).run(&reference, &candidate, &cases);

        let expected_passed = plan.iter().filter(|(_, mode)| *mode == 0).count();
        prop_assert_eq!(summary.passed, expected_passed);
        prop_assert_eq!(summary.passed + summary.failed, summary.total);
        prop_assert_eq!(summary.total, cases.len());
        prop_assert!(summary.failures.len() <= 10);
        prop_assert_eq!(summary.failures.len(), summary.failed.min(10));
    }
}
