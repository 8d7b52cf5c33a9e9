//! Declarative value strategies.

use diffcase_value::{Map, Value};
use proptest::collection::vec;
use proptest::prelude::{BoxedStrategy, Just, any};
use proptest::prop_oneof;
use proptest::sample::select;
use proptest::strategy::{Strategy as _, Union};
use serde::{Deserialize, Serialize};

/// Character pool for text strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alphabet {
    /// Printable ASCII, space through `~`.
    Ascii,
    /// `a-z`, `A-Z`, `0-9`.
    Alphanumeric,
    /// Letters, digits, punctuation, symbols and space, including non-ASCII.
    #[default]
    Printable,
    /// Exactly these characters.
    Chars { chars: String },
}

// Non-ASCII letters and symbols mixed into `Printable`.
const NON_ASCII_SAMPLE: &str = "éüñßøåçæœÉÑ΄αβγΩабвгдЖ中文字日本€£¥©°±§¶•–—\u{a0}";

impl Alphabet {
    fn pool(&self, extra: &str) -> Vec<char> {
        let mut pool: Vec<char> = match self {
            Alphabet::Ascii => (' '..='~').collect(),
            Alphabet::Alphanumeric => ('a'..='z').chain('A'..='Z').chain('0'..='9').collect(),
            Alphabet::Printable => (' '..='~').chain(NON_ASCII_SAMPLE.chars()).collect(),
            Alphabet::Chars { chars } => chars.chars().collect(),
        };
        pool.extend(extra.chars());
        pool.sort_unstable();
        pool.dedup();
        if pool.is_empty() {
            pool = (' '..='~').collect();
        }
        pool
    }
}

/// One named field of a [`Strategy::Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub strategy: Strategy,
}

/// How to draw values for one parameter.
///
/// Every variant yields values of its declared shape by construction;
/// reversed bounds are swapped instead of rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Always the same value.
    Just { value: Value },
    Bool,
    /// Integers in `min..=max`.
    Int { min: i64, max: i64 },
    /// Finite floats in `min..=max`; the bounds themselves are drawn often.
    Float { min: f64, max: f64 },
    /// Strings of `min_len..=max_len` characters from `alphabet` plus `extra`.
    Text {
        #[serde(default)]
        alphabet: Alphabet,
        #[serde(default)]
        extra: String,
        #[serde(default)]
        min_len: usize,
        max_len: usize,
    },
    /// One of a fixed list of values.
    OneOf { values: Vec<Value> },
    /// Arrays of `element` with `min_len..=max_len` items.
    List {
        element: Box<Strategy>,
        #[serde(default)]
        min_len: usize,
        max_len: usize,
    },
    /// Fixed-length array, one strategy per position.
    Tuple { elements: Vec<Strategy> },
    /// Object with one entry per field, in field order.
    Record { fields: Vec<Field> },
    /// Object with `min_len..=max_len` drawn entries. Non-string keys use
    /// their JSON text; colliding keys keep the last value, so an object
    /// can come out shorter than `min_len`.
    Dict {
        keys: Box<Strategy>,
        values: Box<Strategy>,
        #[serde(default)]
        min_len: usize,
        max_len: usize,
    },
    /// `null` or a value from `inner`.
    Optional { inner: Box<Strategy> },
    /// A value from one of `options`, picked uniformly.
    Union { options: Vec<Strategy> },
}

impl Strategy {
    pub fn just(value: impl Into<Value>) -> Self {
        Strategy::Just {
            value: value.into(),
        }
    }

    pub fn int(min: i64, max: i64) -> Self {
        Strategy::Int { min, max }
    }

    pub fn float(min: f64, max: f64) -> Self {
        Strategy::Float { min, max }
    }

    pub fn text(alphabet: Alphabet, min_len: usize, max_len: usize) -> Self {
        Strategy::Text {
            alphabet,
            extra: String::new(),
            min_len,
            max_len,
        }
    }

    /// Text from `alphabet` with `extra` characters always eligible.
    pub fn text_with(alphabet: Alphabet, extra: &str, min_len: usize, max_len: usize) -> Self {
        Strategy::Text {
            alphabet,
            extra: extra.to_string(),
            min_len,
            max_len,
        }
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Strategy::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn list(element: Strategy, min_len: usize, max_len: usize) -> Self {
        Strategy::List {
            element: Box::new(element),
            min_len,
            max_len,
        }
    }

    pub fn tuple(elements: Vec<Strategy>) -> Self {
        Strategy::Tuple { elements }
    }

    pub fn record<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Strategy)>,
        S: Into<String>,
    {
        Strategy::Record {
            fields: fields
                .into_iter()
                .map(|(name, strategy)| Field {
                    name: name.into(),
                    strategy,
                })
                .collect(),
        }
    }

    pub fn dict(keys: Strategy, values: Strategy, min_len: usize, max_len: usize) -> Self {
        Strategy::Dict {
            keys: Box::new(keys),
            values: Box::new(values),
            min_len,
            max_len,
        }
    }

    pub fn optional(inner: Strategy) -> Self {
        Strategy::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn union(options: Vec<Strategy>) -> Self {
        Strategy::Union { options }
    }

    /// Compile into a proptest strategy producing [`Value`]s.
    pub fn to_proptest(&self) -> BoxedStrategy<Value> {
        match self {
            Strategy::Just { value } => Just(value.clone()).boxed(),
            Strategy::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
            Strategy::Int { min, max } => {
                let (lo, hi) = ordered(*min, *max);
                (lo..=hi).prop_map(Value::Int).boxed()
            }
            Strategy::Float { min, max } => {
                let (lo, hi) = finite_bounds(*min, *max);
                if lo == hi {
                    return Just(Value::Float(lo)).boxed();
                }
                prop_oneof![
                    1 => Just(lo),
                    1 => Just(hi),
                    8 => lo..hi,
                ]
                .prop_map(Value::Float)
                .boxed()
            }
            Strategy::Text {
                alphabet,
                extra,
                min_len,
                max_len,
            } => {
                let (lo, hi) = ordered(*min_len, *max_len);
                vec(select(alphabet.pool(extra)), lo..=hi)
                    .prop_map(|chars| Value::String(chars.into_iter().collect()))
                    .boxed()
            }
            Strategy::OneOf { values } => {
                if values.is_empty() {
                    Just(Value::Null).boxed()
                } else {
                    select(values.clone()).boxed()
                }
            }
            Strategy::List {
                element,
                min_len,
                max_len,
            } => {
                let (lo, hi) = ordered(*min_len, *max_len);
                vec(element.to_proptest(), lo..=hi)
                    .prop_map(Value::Array)
                    .boxed()
            }
            Strategy::Tuple { elements } => {
                let mut acc: BoxedStrategy<Vec<Value>> = Just(Vec::new()).boxed();
                for element in elements {
                    acc = (acc, element.to_proptest())
                        .prop_map(|(mut items, item)| {
                            items.push(item);
                            items
                        })
                        .boxed();
                }
                acc.prop_map(Value::Array).boxed()
            }
            Strategy::Record { fields } => {
                let mut acc: BoxedStrategy<Map> = Just(Map::new()).boxed();
                for field in fields {
                    let name = field.name.clone();
                    acc = (acc, field.strategy.to_proptest())
                        .prop_map(move |(mut map, value)| {
                            map.insert(name.clone(), value);
                            map
                        })
                        .boxed();
                }
                acc.prop_map(Value::Object).boxed()
            }
            Strategy::Dict {
                keys,
                values,
                min_len,
                max_len,
            } => {
                let (lo, hi) = ordered(*min_len, *max_len);
                vec((keys.to_proptest(), values.to_proptest()), lo..=hi)
                    .prop_map(|entries| {
                        Value::Object(
                            entries
                                .into_iter()
                                .map(|(key, value)| (key_text(key), value))
                                .collect(),
                        )
                    })
                    .boxed()
            }
            Strategy::Optional { inner } => {
                prop_oneof![Just(Value::Null), inner.to_proptest()].boxed()
            }
            Strategy::Union { options } => {
                if options.is_empty() {
                    Just(Value::Null).boxed()
                } else {
                    Union::new(options.iter().map(Strategy::to_proptest)).boxed()
                }
            }
        }
    }
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

fn finite_bounds(min: f64, max: f64) -> (f64, f64) {
    let clamp = |f: f64| {
        if f.is_nan() {
            0.0
        } else {
            f.clamp(f64::MIN / 2.0, f64::MAX / 2.0)
        }
    };
    ordered(clamp(min), clamp(max))
}
