//! Error-message templating with `$placeholder` substitution.
//!
//! Templates use `$name` / `${name}` placeholders. Unknown placeholders are
//! left untouched so a partially-filled template never panics and stays
//! readable in the rendered message.

use std::collections::BTreeMap;

use serde_json::Value;

/// Render a message template, filling `$name` placeholders from `values`.
///
/// Placeholders with no matching entry are kept verbatim.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> String {
    shellexpand::env_with_context_no_errors(template, |name| values.get(name).cloned()).into_owned()
}

/// Human-readable form of a JSON value for error messages.
///
/// Strings render bare (no quotes), `null` renders as `null`, everything
/// else uses its canonical JSON notation.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_fills_placeholders() {
        let vals = values(&[("value", "aqaa"), ("comp_value", "aaa")]);
        assert_eq!(
            render("'$value' is not equal to '$comp_value'", &vals),
            "'aqaa' is not equal to 'aaa'"
        );
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let vals = values(&[("value", "x")]);
        assert_eq!(render("$value and $missing", &vals), "x and $missing");
    }

    #[test]
    fn test_render_braced_placeholder() {
        let vals = values(&[("min", "2")]);
        assert_eq!(render("limit ${min}u", &vals), "limit 2u");
    }

    #[test]
    fn test_display_value_string_is_bare() {
        assert_eq!(display_value(&json!("abc")), "abc");
    }

    #[test]
    fn test_display_value_null_and_numbers() {
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(2.5)), "2.5");
    }

    #[test]
    fn test_display_value_collections_use_json() {
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
