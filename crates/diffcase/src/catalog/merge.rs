//! Recursive merge of a source object into a destination object.

use diffcase_strategy::{Alphabet, ParamSpec, Strategy};
use diffcase_synth::InvocationError;
use diffcase_value::{Inputs, Map, Value};
use serde_json::json;

use super::{object_arg, tuple};

fn scalar() -> Strategy {
    Strategy::union(vec![
        Strategy::just(Value::Null),
        Strategy::Bool,
        Strategy::int(-1_000_000, 1_000_000),
        Strategy::float(-1e9, 1e9),
        Strategy::text(Alphabet::Printable, 0, 10),
    ])
}

fn key() -> Strategy {
    Strategy::text(Alphabet::Alphanumeric, 1, 3)
}

fn object() -> Strategy {
    let nested = Strategy::dict(key(), scalar(), 0, 3);
    Strategy::dict(key(), Strategy::union(vec![scalar(), nested]), 0, 5)
}

pub(super) fn params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::new("source", object()),
        ParamSpec::new("destination", object()),
    ]
}

pub(super) fn examples() -> Vec<Inputs> {
    [
        (json!({}), json!({})),
        (json!({"a": 1}), json!({"b": 2})),
        (json!({"a": {"b": 1}}), json!({"a": {"c": 2}})),
        (json!({"a": 1}), json!({"a": {"b": 2}})),
        (json!({"a": {"b": 1}}), json!({"a": 2})),
    ]
    .into_iter()
    .map(|(source, destination)| tuple([("source", source), ("destination", destination)]))
    .collect()
}

fn merge_into(source: &Map, destination: &mut Map) {
    for (key, value) in source {
        match value {
            Value::Object(child) => {
                let node = destination
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                match node {
                    Value::Object(inner) => merge_into(child, inner),
                    other => *other = value.clone(),
                }
            }
            _ => {
                destination.insert(key.clone(), value.clone());
            }
        }
    }
}

pub(super) fn reference(inputs: &Inputs) -> Result<Value, InvocationError> {
    let source = object_arg(inputs, "source")?;
    let mut destination = object_arg(inputs, "destination")?.clone();
    merge_into(source, &mut destination);
    Ok(Value::Object(destination))
}

/// Builds the result without mutating a copy in place.
pub(super) fn faithful(inputs: &Inputs) -> Result<Value, InvocationError> {
    fn merged(source: &Map, destination: &Map) -> Map {
        let mut out = destination.clone();
        for (key, value) in source {
            let next = match (value, destination.get(key)) {
                (Value::Object(child), Some(Value::Object(existing))) => {
                    Value::Object(merged(child, existing))
                }
                (Value::Object(child), None) => Value::Object(merged(child, &Map::new())),
                _ => value.clone(),
            };
            out.insert(key.clone(), next);
        }
        out
    }

    let source = object_arg(inputs, "source")?;
    let destination = object_arg(inputs, "destination")?;
    Ok(Value::Object(merged(source, destination)))
}

/// Replaces nested objects wholesale.
pub(super) fn faulty(inputs: &Inputs) -> Result<Value, InvocationError> {
    let source = object_arg(inputs, "source")?;
    let mut destination = object_arg(inputs, "destination")?.clone();
    destination.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(Value::Object(destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(source: serde_json::Value, destination: serde_json::Value) -> serde_json::Value {
        let out = reference(&tuple([("source", source), ("destination", destination)])).unwrap();
        serde_json::Value::from(out)
    }

    #[test]
    fn nested_objects_are_merged() {
        assert_eq!(
            merge(json!({"a": {"b": 1}}), json!({"a": {"c": 2}})),
            json!({"a": {"c": 2, "b": 1}})
        );
    }

    #[test]
    fn source_scalar_overwrites_destination_object() {
        assert_eq!(merge(json!({"a": 1}), json!({"a": {"b": 2}})), json!({"a": 1}));
    }

    #[test]
    fn source_object_overwrites_destination_scalar() {
        assert_eq!(merge(json!({"a": {"b": 1}}), json!({"a": 2})), json!({"a": {"b": 1}}));
    }

    #[test]
    fn existing_keys_keep_their_position() {
        let out = reference(&tuple([
            ("source", json!({"z": 0, "a": 9})),
            ("destination", json!({"a": 1, "b": 2})),
        ]))
        .unwrap();
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b", "z"]);
    }

    #[test]
    fn non_object_argument_is_a_type_error() {
        let err = reference(&tuple([("source", json!([1])), ("destination", json!({}))])).unwrap_err();
        assert_eq!(err.error_type, "TypeError");
        assert!(err.message.contains("'source' must be object"));
    }

    #[test]
    fn faulty_loses_nested_destination_keys() {
        let inputs = tuple([
            ("source", json!({"a": {"b": 1}})),
            ("destination", json!({"a": {"c": 2}})),
        ]);
        let out = serde_json::Value::from(faulty(&inputs).unwrap());
        assert_eq!(out, json!({"a": {"b": 1}}));
    }
}
