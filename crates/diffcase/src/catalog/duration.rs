//! Time elapsed between two `H:MM` clock readings.

use diffcase_strategy::{Alphabet, ParamSpec, Strategy};
use diffcase_synth::InvocationError;
use diffcase_value::{Inputs, Value};
use serde_json::json;

use super::{str_arg, tuple};

const INVALID: &str = "Invalid time format. Please use HH:MM format.";
const MINUTES_PER_DAY: i64 = 24 * 60;

fn clock_times() -> Vec<String> {
    let mut times: Vec<String> = (0..24)
        .flat_map(|h| (0..60).step_by(15).map(move |m| format!("{h:02}:{m:02}")))
        .collect();
    times.extend(["23:59", "00:01", "7:5", "24:00", "12:60"].map(String::from));
    times
}

fn time_strategy() -> Strategy {
    Strategy::union(vec![
        Strategy::one_of(clock_times()),
        Strategy::text(
            Alphabet::Chars {
                chars: "0123456789:".into(),
            },
            0,
            6,
        ),
    ])
}

pub(super) fn params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::new("start_time", time_strategy()),
        ParamSpec::new("end_time", time_strategy()),
    ]
}

pub(super) fn examples() -> Vec<Inputs> {
    [
        ("00:00", "00:00"),
        ("12:00", "12:00"),
        ("23:59", "00:00"),
        ("00:00", "23:59"),
        ("12:34", "13:35"),
        ("invalid", "12:34"),
        ("12:34", "invalid"),
        ("invalid", "invalid"),
    ]
    .into_iter()
    .map(|(start, end)| tuple([("start_time", json!(start)), ("end_time", json!(end))]))
    .collect()
}

/// Parse one or two digits, bounded above by `limit`.
fn field(raw: &str, limit: i64) -> Option<i64> {
    if raw.is_empty() || raw.len() > 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = raw.parse().ok()?;
    (value < limit).then_some(value)
}

/// Minutes since midnight.
fn parse_clock(raw: &str) -> Option<i64> {
    let (hours, minutes) = raw.split_once(':')?;
    Some(field(hours, 24)? * 60 + field(minutes, 60)?)
}

fn render(minutes: i64) -> Value {
    Value::String(format!("{} hours and {} minutes", minutes / 60, minutes % 60))
}

fn clocks(inputs: &Inputs) -> Result<Option<(i64, i64)>, InvocationError> {
    let start = str_arg(inputs, "start_time")?;
    let end = str_arg(inputs, "end_time")?;
    Ok(parse_clock(start).zip(parse_clock(end)))
}

pub(super) fn reference(inputs: &Inputs) -> Result<Value, InvocationError> {
    Ok(match clocks(inputs)? {
        Some((start, end)) => render((end - start).rem_euclid(MINUTES_PER_DAY)),
        None => Value::from(INVALID),
    })
}

pub(super) fn faithful(inputs: &Inputs) -> Result<Value, InvocationError> {
    Ok(match clocks(inputs)? {
        Some((start, end)) if end >= start => render(end - start),
        Some((start, end)) => render(MINUTES_PER_DAY - (start - end)),
        None => Value::from(INVALID),
    })
}

/// Reports the distance between the two clock readings instead of wrapping
/// past midnight.
pub(super) fn faulty(inputs: &Inputs) -> Result<Value, InvocationError> {
    Ok(match clocks(inputs)? {
        Some((start, end)) => render((end - start).abs()),
        None => Value::from(INVALID),
    })
}
