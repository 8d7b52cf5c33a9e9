//! Locating the first position where two values diverge.

use diffcase_value::Value;
use serde::{Deserialize, Serialize};

use crate::pointer::escape_token;
use crate::{floats_equal, strings_equal};

/// Why two values were judged different at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffReason {
    /// The two sides have different variants (e.g. int vs float).
    TypeMismatch,
    /// Arrays of different length.
    LengthMismatch,
    /// A key is present on only one side.
    MissingKey,
    /// Same variant, different scalar value.
    ValueMismatch,
}

impl std::fmt::Display for DiffReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffReason::TypeMismatch => write!(f, "type mismatch"),
            DiffReason::LengthMismatch => write!(f, "length mismatch"),
            DiffReason::MissingKey => write!(f, "missing key"),
            DiffReason::ValueMismatch => write!(f, "value mismatch"),
        }
    }
}

/// First divergence between two values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// RFC 6901 pointer to the diverging position ("" is the root).
    pub pointer: String,
    pub reason: DiffReason,
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "{} at root", self.reason)
        } else {
            write!(f, "{} at {}", self.reason, self.pointer)
        }
    }
}

/// Return where `deep_compare(a, b, tolerance)` fails, or `None` when it holds.
///
/// Object keys are visited in `a`'s insertion order; keys present only in
/// `b` are reported after every shared key has been checked.
pub fn first_difference(a: &Value, b: &Value, tolerance: f64) -> Option<Difference> {
    let mut path = String::new();
    walk(a, b, tolerance, &mut path)
}

fn walk(a: &Value, b: &Value, tolerance: f64, path: &mut String) -> Option<Difference> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => {
            if strings_equal(x, y) {
                None
            } else {
                at(path, DiffReason::ValueMismatch)
            }
        }
        (Value::Float(x), Value::Float(y)) => {
            if floats_equal(*x, *y, tolerance) {
                None
            } else {
                at(path, DiffReason::ValueMismatch)
            }
        }
        (Value::Array(x), Value::Array(y)) => {
            for (idx, (xv, yv)) in x.iter().zip(y).enumerate() {
                let mark = path.len();
                path.push('/');
                path.push_str(&idx.to_string());
                if let Some(diff) = walk(xv, yv, tolerance, path) {
                    return Some(diff);
                }
                path.truncate(mark);
            }
            if x.len() != y.len() {
                return at(path, DiffReason::LengthMismatch);
            }
            None
        }
        (Value::Object(x), Value::Object(y)) => {
            for (key, xv) in x {
                let mark = path.len();
                path.push('/');
                path.push_str(&escape_token(key));
                let found = match y.get(key) {
                    Some(yv) => walk(xv, yv, tolerance, path),
                    None => at(path, DiffReason::MissingKey),
                };
                if found.is_some() {
                    return found;
                }
                path.truncate(mark);
            }
            for key in y.keys() {
                if !x.contains_key(key) {
                    path.push('/');
                    path.push_str(&escape_token(key));
                    return at(path, DiffReason::MissingKey);
                }
            }
            None
        }
        _ if a.kind() != b.kind() => at(path, DiffReason::TypeMismatch),
        _ if a == b => None,
        _ => at(path, DiffReason::ValueMismatch),
    }
}

fn at(path: &str, reason: DiffReason) -> Option<Difference> {
    Some(Difference {
        pointer: path.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: &str) -> Value {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn equal_values_have_no_difference() {
        let a = v(r#"{"a": [1, 2.0, "x"]}"#);
        assert_eq!(first_difference(&a, &a, 0.0), None);
    }

    #[test]
    fn nested_float_mismatch_is_located() {
        let diff = first_difference(
            &v(r#"{"pts": [[0.0, 1.0], [2.0, 3.0]]}"#),
            &v(r#"{"pts": [[0.0, 1.0], [2.0, 3.5]]}"#),
            1e-6,
        )
        .unwrap();
        assert_eq!(diff.pointer, "/pts/1/1");
        assert_eq!(diff.reason, DiffReason::ValueMismatch);
    }

    #[test]
    fn int_vs_float_is_type_mismatch() {
        let diff = first_difference(&v("1"), &v("1.0"), 1.0).unwrap();
        assert_eq!(diff.pointer, "");
        assert_eq!(diff.reason, DiffReason::TypeMismatch);
        assert_eq!(diff.to_string(), "type mismatch at root");
    }

    #[test]
    fn shorter_array_reports_length_after_shared_prefix() {
        let diff = first_difference(&v("[1, 2, 3]"), &v("[1, 2]"), 0.0).unwrap();
        assert_eq!(diff.reason, DiffReason::LengthMismatch);
        assert_eq!(diff.pointer, "");
    }

    #[test]
    fn key_only_on_right_is_missing() {
        let diff = first_difference(&v(r#"{"a": 1}"#), &v(r#"{"a": 1, "b/c": 2}"#), 0.0).unwrap();
        assert_eq!(diff.pointer, "/b~1c");
        assert_eq!(diff.reason, DiffReason::MissingKey);
    }

    #[test]
    fn key_only_on_left_is_missing() {
        let diff = first_difference(&v(r#"{"a": 1, "b": 2}"#), &v(r#"{"a": 1}"#), 0.0).unwrap();
        assert_eq!(diff.pointer, "/b");
        assert_eq!(diff.reason, DiffReason::MissingKey);
    }

    #[test]
    fn reason_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DiffReason::LengthMismatch).unwrap(),
            "\"length_mismatch\""
        );
    }
}
