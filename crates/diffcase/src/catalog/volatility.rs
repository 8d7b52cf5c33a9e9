//! Coefficient of variation of the positive entries in a cash-flow history.

use diffcase_strategy::{ParamSpec, Strategy};
use diffcase_synth::InvocationError;
use diffcase_value::{Inputs, Value};
use serde_json::json;

use super::{float_list_arg, tuple};

/// Returned when the history is too short to judge.
const SHORT_HISTORY: f64 = 0.5;
/// Returned when fewer than two entries are positive.
const MOSTLY_NEGATIVE: f64 = 0.8;

pub(super) fn params() -> Vec<ParamSpec> {
    vec![ParamSpec::new(
        "fcf_history",
        Strategy::list(Strategy::float(-1e3, 1e6), 0, 12),
    )]
}

pub(super) fn examples() -> Vec<Inputs> {
    vec![
        tuple([("fcf_history", json!([100.0, 120.0, 90.0, 110.0]))]),
        tuple([("fcf_history", json!([1.0, 2.0, 3.0]))]),
        tuple([("fcf_history", json!([-5.0, 10.0, -2.0]))]),
        tuple([("fcf_history", json!([5.0, 5.0, 5.0]))]),
        tuple([("fcf_history", json!([1.0, 1000.0, 0.0]))]),
    ]
}

/// Only histories long enough to reach the statistics are worth keeping.
pub(super) fn long_history(inputs: &Inputs, _output: &Value) -> bool {
    inputs
        .get("fcf_history")
        .and_then(Value::as_array)
        .is_some_and(|items| items.len() >= 3)
}

fn positives(inputs: &Inputs) -> Result<Option<Vec<f64>>, InvocationError> {
    let history = float_list_arg(inputs, "fcf_history")?;
    if history.len() < 3 {
        return Ok(None);
    }
    Ok(Some(history.into_iter().filter(|v| *v > 0.0).collect()))
}

fn ratio(stdev: f64, mean: f64) -> Value {
    Value::Float(if mean > 0.0 {
        (stdev / mean).min(1.0)
    } else {
        MOSTLY_NEGATIVE
    })
}

pub(super) fn reference(inputs: &Inputs) -> Result<Value, InvocationError> {
    let Some(values) = positives(inputs)? else {
        return Ok(Value::Float(SHORT_HISTORY));
    };
    if values.len() < 2 {
        return Ok(Value::Float(MOSTLY_NEGATIVE));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(ratio((squares / (n - 1.0)).sqrt(), mean))
}

/// Single pass using Welford's running update.
pub(super) fn faithful(inputs: &Inputs) -> Result<Value, InvocationError> {
    let Some(values) = positives(inputs)? else {
        return Ok(Value::Float(SHORT_HISTORY));
    };
    if values.len() < 2 {
        return Ok(Value::Float(MOSTLY_NEGATIVE));
    }
    let (mut count, mut mean, mut m2) = (0.0_f64, 0.0_f64, 0.0_f64);
    for v in values {
        count += 1.0;
        let delta = v - mean;
        mean += delta / count;
        m2 += delta * (v - mean);
    }
    Ok(ratio((m2 / (count - 1.0)).sqrt(), mean))
}

/// Divides by `n` instead of `n - 1`.
pub(super) fn faulty(inputs: &Inputs) -> Result<Value, InvocationError> {
    let Some(values) = positives(inputs)? else {
        return Ok(Value::Float(SHORT_HISTORY));
    };
    if values.len() < 2 {
        return Ok(Value::Float(MOSTLY_NEGATIVE));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(ratio((squares / n).sqrt(), mean))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volatility(history: serde_json::Value) -> f64 {
        reference(&tuple([("fcf_history", history)]))
            .unwrap()
            .as_f64()
            .unwrap()
    }

    #[test]
    fn short_history_is_moderate() {
        assert_eq!(volatility(json!([])), SHORT_HISTORY);
        assert_eq!(volatility(json!([10.0, 20.0])), SHORT_HISTORY);
    }

    #[test]
    fn mostly_negative_history_is_high() {
        assert_eq!(volatility(json!([-1.0, 0.0, 4.0])), MOSTLY_NEGATIVE);
    }

    #[test]
    fn sample_deviation_over_mean() {
        assert!((volatility(json!([1.0, 2.0, 3.0])) - 0.5).abs() < 1e-12);
        assert_eq!(volatility(json!([5.0, 5.0, 5.0])), 0.0);
    }

    #[test]
    fn ratio_is_capped_at_one() {
        assert_eq!(volatility(json!([1.0, 1000.0, 0.0])), 1.0);
    }

    #[test]
    fn integers_are_accepted() {
        assert!((volatility(json!([1, 2, 3])) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn welford_agrees_with_two_pass() {
        let inputs = tuple([("fcf_history", json!([812.5, 90_000.0, 4.25, 731_000.0, -3.0]))]);
        let a = reference(&inputs).unwrap().as_f64().unwrap();
        let b = faithful(&inputs).unwrap().as_f64().unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn predicate_wants_three_entries() {
        let short = tuple([("fcf_history", json!([1.0, 2.0]))]);
        let long = tuple([("fcf_history", json!([1.0, 2.0, 3.0]))]);
        assert!(!long_history(&short, &Value::Null));
        assert!(long_history(&long, &Value::Null));
    }
}
