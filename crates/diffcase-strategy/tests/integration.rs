//! Loading strategy declarations from TOML and JSON.

use diffcase_strategy::{Alphabet, ParamSpec, Strategy, Synthesizer};
use diffcase_value::Value;
use serde::Deserialize;

#[derive(Deserialize)]
struct Declarations {
    params: Vec<ParamSpec>,
}

#[test]
fn toml_declarations_drive_a_synthesizer() {
    let raw = r#"
        [[params]]
        name = "count"
        strategy = { kind = "int", min = 1, max = 3 }
        seeds = [2]

        [[params]]
        name = "label"
        strategy = { kind = "text", alphabet = { kind = "alphanumeric" }, max_len = 4 }
    "#;
    let decls: Declarations = toml::from_str(raw).unwrap();
    assert_eq!(decls.params[0].strategy, Strategy::int(1, 3));
    assert_eq!(decls.params[0].seeds, vec![Value::Int(2)]);
    assert_eq!(
        decls.params[1].strategy,
        Strategy::text(Alphabet::Alphanumeric, 0, 4)
    );

    let synth = Synthesizer::new(decls.params).with_budget(30).with_seed(5);
    let tuples: Vec<_> = synth.draws().collect();
    assert_eq!(tuples.len(), 31);
    assert_eq!(tuples[0]["count"], Value::Int(2));
    for tuple in &tuples {
        let count = tuple["count"].as_i64().unwrap();
        assert!((1..=3).contains(&count));
        let label = tuple["label"].as_str().unwrap();
        assert!(label.chars().count() <= 4);
        assert!(label.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[test]
fn json_nested_declaration_parses() {
    let raw = r#"{
        "kind": "list",
        "max_len": 3,
        "element": {
            "kind": "record",
            "fields": [
                {"name": "id", "strategy": {"kind": "int", "min": 0, "max": 9}},
                {"name": "tag", "strategy": {"kind": "optional", "inner": {"kind": "one_of", "values": ["a", "b"]}}}
            ]
        }
    }"#;
    let strategy: Strategy = serde_json::from_str(raw).unwrap();
    let expected = Strategy::list(
        Strategy::record([
            ("id", Strategy::int(0, 9)),
            ("tag", Strategy::optional(Strategy::one_of(["a", "b"]))),
        ]),
        0,
        3,
    );
    assert_eq!(strategy, expected);
}

#[test]
fn float_bounds_accept_integer_literals() {
    let strategy: Strategy = toml::from_str("kind = \"float\"\nmin = 0\nmax = 1").unwrap();
    assert_eq!(strategy, Strategy::float(0.0, 1.0));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = serde_json::from_str::<Strategy>(r#"{"kind": "regex", "pattern": "a+"}"#);
    assert!(err.is_err());
}

#[test]
fn declarations_serialize_back_to_the_same_shape() {
    let strategy = Strategy::union(vec![Strategy::Bool, Strategy::just(Value::Null)]);
    let json = serde_json::to_value(&strategy).unwrap();
    assert_eq!(json["kind"], "union");
    assert_eq!(json["options"][0]["kind"], "bool");
    let back: Strategy = serde_json::from_value(json).unwrap();
    assert_eq!(back, strategy);
}
