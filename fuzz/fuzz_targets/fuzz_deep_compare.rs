//! Fuzz target for the equivalence oracle.
//!
//! Checks reflexivity, symmetry and agreement with `first_difference` on
//! arbitrary JSON documents.

#![no_main]
use diffcase_compare::{DEFAULT_TOLERANCE, deep_compare, first_difference};
use diffcase_value::Value;
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Pair {
    left: Vec<u8>,
    right: Vec<u8>,
}

fn parse(bytes: &[u8]) -> Option<Value> {
    serde_json::from_slice(bytes).ok()
}

fuzz_target!(|input: Pair| {
    let Some(a) = parse(&input.left) else {
        return;
    };
    assert!(deep_compare(&a, &a, DEFAULT_TOLERANCE));
    assert!(first_difference(&a, &a, DEFAULT_TOLERANCE).is_none());

    let Some(b) = parse(&input.right) else {
        return;
    };
    let forward = deep_compare(&a, &b, DEFAULT_TOLERANCE);
    assert_eq!(forward, deep_compare(&b, &a, DEFAULT_TOLERANCE));
    assert_eq!(forward, first_difference(&a, &b, DEFAULT_TOLERANCE).is_none());
});
