use diffcase_value::{Inputs, Value};
use serde::{Deserialize, Deserializer, Serialize};

/// One persisted input/expected-output pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "Inputs")]
    pub inputs: Inputs,

    /// `None` when the file carried no `Expected` key. An explicit JSON
    /// `null` is `Some(Value::Null)`.
    #[serde(
        rename = "Expected",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub expected: Option<Value>,
}

impl TestCase {
    pub fn new(inputs: Inputs, expected: Value) -> Self {
        Self {
            inputs,
            expected: Some(expected),
        }
    }

    /// A case whose expected value must be re-derived before use.
    pub fn inputs_only(inputs: Inputs) -> Self {
        Self {
            inputs,
            expected: None,
        }
    }

    pub fn has_expected(&self) -> bool {
        self.expected.is_some()
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
