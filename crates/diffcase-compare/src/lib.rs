//! # diffcase-compare
//!
//! **Tier 0 (Tolerant Equality Oracle)**
//!
//! Decides whether two [`Value`]s are "the same" for test verification,
//! tolerating floating-point error and Unicode normalization differences.
//!
//! ## What belongs here
//! * `deep_compare` and its locating counterpart `first_difference`
//! * JSON Pointer helpers used to name the diverging position
//!
//! ## Example
//! ```
//! use diffcase_compare::{DEFAULT_TOLERANCE, deep_compare};
//! use diffcase_value::Value;
//!
//! assert!(deep_compare(&Value::Float(0.5), &Value::Float(0.5000001), DEFAULT_TOLERANCE));
//! assert!(!deep_compare(&Value::Int(1), &Value::Float(1.0), DEFAULT_TOLERANCE));
//! ```

#![forbid(unsafe_code)]

mod difference;
mod pointer;

use diffcase_value::Value;
use unicode_normalization::UnicodeNormalization;

pub use difference::{DiffReason, Difference, first_difference};
pub use pointer::{escape_token, resolve_pointer};

/// Absolute tolerance used when the caller has no better figure.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Tolerant structural equality.
///
/// Rules, in priority order:
/// 1. two strings compare after NFC normalization;
/// 2. two floats are equal when `|a - b| <= tolerance`, give or take one ulp
///    of rounding (a zero tolerance is exact);
/// 3. two objects need the same key set and pairwise-equal values (order ignored);
/// 4. two arrays need the same length and pairwise-equal elements (order kept);
/// 5. anything else falls back to `==`, so `Int(1)` never equals `Float(1.0)`.
pub fn deep_compare(a: &Value, b: &Value, tolerance: f64) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => strings_equal(x, y),
        (Value::Float(x), Value::Float(y)) => floats_equal(*x, *y, tolerance),
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, xv)| {
                    y.get(k)
                        .is_some_and(|yv| deep_compare(xv, yv, tolerance))
                })
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|(xv, yv)| deep_compare(xv, yv, tolerance))
        }
        _ => a == b,
    }
}

pub(crate) fn strings_equal(a: &str, b: &str) -> bool {
    a == b || a.nfc().eq(b.nfc())
}

/// Absolute comparison. A zero tolerance is exact; otherwise the
/// difference may exceed `tolerance` by at most one ulp of the larger
/// operand, so `x` and `x + tolerance` stay equal after rounding.
pub(crate) fn floats_equal(a: f64, b: f64, tolerance: f64) -> bool {
    if a == b || (a.is_nan() && b.is_nan()) {
        return true;
    }
    if tolerance == 0.0 {
        return false;
    }
    let diff = (a - b).abs();
    diff <= tolerance || diff - tolerance <= ulp(a.abs().max(b.abs()))
}

/// Gap between `x` and the next representable float above it.
fn ulp(x: f64) -> f64 {
    if x.is_finite() { x.next_up() - x } else { 0.0 }
}
