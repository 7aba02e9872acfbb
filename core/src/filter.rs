//! Filter composer for list-style operations.
//!
//! # Design
//! Several independent filter criteria from the argument bag are merged into
//! one boolean expression, ANDed in a fixed order: active-only flag, user,
//! project, customer, from-date, to-date, then any caller-supplied raw
//! `filter` expression. Values are interpolated without escaping — the
//! remote service specifies no quoting rules, and argument values come from
//! the operator-controlled protocol client, so this layer passes them
//! through as-is. Do not feed it untrusted input.

use serde_json::{Map, Value};

use crate::query::{is_truthy, render};

/// Comparison fragments in their fixed composition order.
const FIELD_FRAGMENTS: [(&str, &str, &str); 5] = [
    ("user_id", "user/id", "eq"),
    ("project_id", "project/id", "eq"),
    ("customer_id", "customer/id", "eq"),
    ("from_date", "date", "ge"),
    ("to_date", "date", "le"),
];

/// Compose the filter expression for an argument bag.
///
/// Returns the empty string when no filter source is present.
pub fn compose_filter(args: &Map<String, Value>) -> String {
    let mut fragments: Vec<String> = Vec::new();

    if args.get("active_only").is_some_and(is_truthy) {
        fragments.push("active eq true".to_string());
    }

    for (key, field, op) in FIELD_FRAGMENTS {
        if let Some(value) = args.get(key) {
            if is_truthy(value) {
                fragments.push(format!("{field} {op} {}", render(value)));
            }
        }
    }

    if let Some(raw) = args.get("filter") {
        if is_truthy(raw) {
            fragments.push(render(raw));
        }
    }

    fragments.join(" and ")
}
