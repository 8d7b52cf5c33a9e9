//! Fuzz target for pulling a diagnostic summary out of noisy output.

#![no_main]
use diffcase_diagnose::{DiagnosticSummary, extract_summary};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct NoisyOutput {
    before: String,
    after: String,
    passed: u8,
    failed: u8,
}

fuzz_target!(|input: NoisyOutput| {
    // Arbitrary text must never panic the extractor.
    let _ = extract_summary(&input.before);

    let summary = DiagnosticSummary {
        passed: input.passed.into(),
        failed: input.failed.into(),
        total: usize::from(input.passed) + usize::from(input.failed),
        ..DiagnosticSummary::default()
    };
    let block = summary.to_delimited_block().expect("summary serializes");

    // A start delimiter in the trailing noise shadows the real block.
    if input.after.contains(diffcase_diagnose::SUMMARY_START) {
        return;
    }
    let stdout = format!("{}{}{}", input.before, block, input.after);
    let extracted = extract_summary(&stdout).expect("emitted block is recoverable");
    assert_eq!(extracted, summary);
});
