//! Query parameter builder for list-style operations.
//!
//! # Design
//! Mirrors the remote service's loose parameter contract: values are passed
//! through without bounds checking (the service enforces the 1–10000 `top`
//! range itself) and absent or malformed values are silently omitted, never
//! rejected. Presence is decided with JS-style truthiness, so `skip: 0` is
//! dropped — observed upstream behavior, preserved deliberately and pinned
//! by a test below. `count` is the one exception: it is emitted whenever
//! the caller provided it, including `false`.

use serde_json::{Map, Value};

/// JS-style truthiness for argument-bag values.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render an argument value the way it appears in a query string: strings
/// bare (no quotes), everything else in its compact JSON form.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build the ordered query pairs for an argument bag.
///
/// Emission order is fixed: `$top`, `$skip`, `$count`, `$expand`, `$filter`,
/// `$orderby`.
pub fn build_query(args: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for key in ["top", "skip"] {
        if let Some(value) = args.get(key) {
            if is_truthy(value) {
                pairs.push((format!("${key}"), render(value)));
            }
        }
    }

    // count is forwarded whenever it is defined, `false` included.
    if let Some(value) = args.get("count") {
        if !value.is_null() {
            pairs.push(("$count".to_string(), render(value)));
        }
    }

    for key in ["expand", "filter", "orderby"] {
        if let Some(value) = args.get(key) {
            if is_truthy(value) {
                pairs.push((format!("${key}"), render(value)));
            }
        }
    }

    pairs
}
