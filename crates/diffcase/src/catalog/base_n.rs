//! Integer to base-n string with an optional digit table.

use diffcase_strategy::{Alphabet, ParamSpec, Strategy};
use diffcase_synth::{InvocationError, arg};
use diffcase_value::{Inputs, Value};
use serde_json::json;

use super::{int_arg, str_arg, tuple};

const DEFAULT_TABLE: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

pub(super) fn params() -> Vec<ParamSpec> {
    let table_chars: String = ('!'..='~').collect();
    vec![
        ParamSpec::new("num", Strategy::int(-1000, 1000)),
        ParamSpec::new("n", Strategy::int(2, 36)),
        ParamSpec::new(
            "table",
            Strategy::optional(Strategy::text(Alphabet::Chars { chars: table_chars }, 2, 36)),
        ),
    ]
}

pub(super) fn examples() -> Vec<Inputs> {
    vec![
        tuple([("num", json!(0)), ("n", json!(2)), ("table", json!(null))]),
        tuple([("num", json!(255)), ("n", json!(16)), ("table", json!(null))]),
        tuple([("num", json!(42)), ("n", json!(36)), ("table", json!(null))]),
        tuple([("num", json!(-123)), ("n", json!(10)), ("table", json!(null))]),
        tuple([("num", json!(123)), ("n", json!(10)), ("table", json!("01"))]),
        tuple([("num", json!(123)), ("n", json!(2)), ("table", json!("01"))]),
        tuple([("num", json!(123)), ("n", json!(36)), ("table", json!(DEFAULT_TABLE))]),
    ]
}

struct Args {
    num: i64,
    base: usize,
    table: Vec<char>,
}

fn parse(inputs: &Inputs) -> Result<Args, InvocationError> {
    let num = int_arg(inputs, "num")?;
    let n = int_arg(inputs, "n")?;
    let table: Vec<char> = match arg(inputs, "table")? {
        Value::Null => DEFAULT_TABLE.chars().collect(),
        _ => str_arg(inputs, "table")?.chars().collect(),
    };
    let base = usize::try_from(n)
        .ok()
        .filter(|b| (2..=table.len()).contains(b))
        .ok_or_else(|| {
            InvocationError::value_error(format!("Base must be between 2 and {}", table.len()))
        })?;
    Ok(Args { num, base, table })
}

pub(super) fn reference(inputs: &Inputs) -> Result<Value, InvocationError> {
    let Args { num, base, table } = parse(inputs)?;
    if num == 0 {
        return Ok(Value::String(table[0].to_string()));
    }

    let mut digits = Vec::new();
    let mut rest = num.unsigned_abs();
    let base = base as u64;
    while rest > 0 {
        digits.push(table[(rest % base) as usize]);
        rest /= base;
    }
    if num < 0 {
        digits.push('-');
    }
    Ok(Value::String(digits.into_iter().rev().collect()))
}

pub(super) fn faithful(inputs: &Inputs) -> Result<Value, InvocationError> {
    fn encode(rest: u64, base: u64, table: &[char], out: &mut String) {
        if rest >= base {
            encode(rest / base, base, table, out);
        }
        out.push(table[(rest % base) as usize]);
    }

    let Args { num, base, table } = parse(inputs)?;
    let mut out = String::new();
    if num < 0 {
        out.push('-');
    }
    encode(num.unsigned_abs(), base as u64, &table, &mut out);
    Ok(Value::String(out))
}

/// Forgets the sign of negative numbers.
pub(super) fn faulty(inputs: &Inputs) -> Result<Value, InvocationError> {
    let Args { num, base, table } = parse(inputs)?;
    let mut digits = Vec::new();
    let mut rest = num.unsigned_abs();
    let base = base as u64;
    loop {
        digits.push(table[(rest % base) as usize]);
        rest /= base;
        if rest == 0 {
            break;
        }
    }
    Ok(Value::String(digits.into_iter().rev().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(num: i64, n: i64, table: Option<&str>) -> Result<Value, InvocationError> {
        reference(&tuple([
            ("num", json!(num)),
            ("n", json!(n)),
            ("table", json!(table)),
        ]))
    }

    #[test]
    fn encodes_with_default_table() {
        assert_eq!(encode(255, 16, None).unwrap(), Value::from("ff"));
        assert_eq!(encode(42, 36, None).unwrap(), Value::from("16"));
        assert_eq!(encode(0, 2, None).unwrap(), Value::from("0"));
        assert_eq!(encode(-123, 10, None).unwrap(), Value::from("-123"));
    }

    #[test]
    fn custom_table_supplies_digits() {
        assert_eq!(encode(5, 2, Some("ab")).unwrap(), Value::from("bab"));
    }

    #[test]
    fn base_longer_than_table_is_a_value_error() {
        let err = encode(10, 5, Some("01")).unwrap_err();
        assert_eq!(err.error_type, "ValueError");
        assert_eq!(err.message, "Base must be between 2 and 2");
    }

    #[test]
    fn faithful_matches_on_negative_input() {
        let inputs = tuple([("num", json!(-1000)), ("n", json!(7)), ("table", json!(null))]);
        assert_eq!(faithful(&inputs).unwrap(), reference(&inputs).unwrap());
    }

    #[test]
    fn faulty_drops_the_sign() {
        let inputs = tuple([("num", json!(-8)), ("n", json!(2)), ("table", json!(null))]);
        assert_eq!(faulty(&inputs).unwrap(), Value::from("1000"));
        assert_eq!(reference(&inputs).unwrap(), Value::from("-1000"));
    }
}
