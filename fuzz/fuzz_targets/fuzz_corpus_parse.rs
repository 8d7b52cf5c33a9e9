//! Fuzz target for corpus file parsing.
//!
//! Any document that parses as a corpus must serialize again and parse back
//! to the same number of cases.

#![no_main]
use diffcase_corpus::TestCase;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(cases) = serde_json::from_slice::<Vec<TestCase>>(data) else {
        return;
    };

    let rendered = serde_json::to_string_pretty(&cases).expect("parsed cases serialize");
    let reparsed: Vec<TestCase> = serde_json::from_str(&rendered).expect("rendered corpus parses");
    assert_eq!(reparsed.len(), cases.len());
    for (a, b) in cases.iter().zip(&reparsed) {
        assert_eq!(a.has_expected(), b.has_expected());
        assert_eq!(a.inputs.len(), b.inputs.len());
    }
});
