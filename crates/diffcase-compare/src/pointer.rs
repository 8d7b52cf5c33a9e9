//! RFC 6901 JSON Pointer helpers over [`Value`].

use diffcase_value::Value;

/// Resolve a JSON Pointer against a value.
///
/// - Empty string "" refers to the whole document
/// - "/" refers to an empty key
/// - "/0" navigates to array index 0
/// - "~0" unescapes to "~", "~1" to "/"
///
/// # Examples
///
/// ```
/// use diffcase_compare::resolve_pointer;
/// use diffcase_value::Value;
///
/// let doc: Value = serde_json::from_str(r#"{"items": [1, 2, 3]}"#).unwrap();
/// assert_eq!(resolve_pointer(&doc, "/items/1"), Some(&Value::Int(2)));
/// ```
pub fn resolve_pointer<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(value);
    }
    let rest = pointer.strip_prefix('/')?;

    let mut current = value;
    for token in rest.split('/') {
        let unescaped = unescape_token(token);
        current = match current {
            Value::Object(map) => map.get(&unescaped)?,
            Value::Array(items) => {
                let idx: usize = unescaped.parse().ok()?;
                items.get(idx)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// ~1 -> /, ~0 -> ~
fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Escape an object key for use as a pointer token.
/// ~ -> ~0, / -> ~1
pub fn escape_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}
