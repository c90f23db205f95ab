//! Validation context and structured error messages.
//!
//! A [`Context`] holds the value under validation, the errors collected so
//! far and a borrowed chain of parent contexts. Contexts marked as *steps*
//! are the anchors for field-path lookups: a conditional validator deep
//! inside an object tree can read sibling fields (`fieldName`), climb to an
//! enclosing object (`<context>.fieldName`) or jump to the root value
//! (`<root>.fieldName`).

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use serde_json::Value;

use crate::template;

/// Replacement text for masked values in error messages.
pub const HIDDEN_VALUE: &str = "***hidden***";

/// A single validation failure: error code, rendered message and the path
/// of the field it refers to (relative to the validation root).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorMessage {
    pub code: String,
    pub msg: String,
    pub field_path: Option<String>,
    /// Placeholder map the message was rendered from.
    pub ctx_values: BTreeMap<String, String>,
}

impl ValidationErrorMessage {
    /// Copy this message re-parented under `field_path`.
    ///
    /// The new prefix is joined with any existing path by `.`, so errors
    /// bubble up with the full route from the validation root.
    pub fn copy_as_child(&self, field_path: Option<&str>) -> Self {
        let field_path = match (field_path, &self.field_path) {
            (Some(prefix), Some(path)) => Some(format!("{}.{}", prefix, path)),
            (Some(prefix), None) => Some(prefix.to_string()),
            (None, path) => path.clone(),
        };

        Self {
            code: self.code.clone(),
            msg: self.msg.clone(),
            field_path,
            ctx_values: self.ctx_values.clone(),
        }
    }
}

impl Display for ValidationErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.field_path {
            Some(path) => write!(f, "{} -> {}: {}", path, self.code, self.msg),
            None => write!(f, "{}: {}", self.code, self.msg),
        }
    }
}

/// Result and state of a validation run.
///
/// Built by [`Validator::is_valid`](crate::Validator::is_valid) (or
/// manually for custom setups) and threaded through every validator.
/// A context *passes* while it has no error messages.
#[derive(Debug)]
pub struct Context<'a> {
    value: Value,
    parent: Option<&'a Context<'a>>,
    is_step: bool,
    hide_value: bool,
    hidden_value: String,
    message_values: BTreeMap<String, String>,
    errors: Vec<ValidationErrorMessage>,
}

impl Context<'static> {
    /// Create a root context for `value`. Roots are always steps.
    pub fn new(value: impl Into<Value>) -> Self {
        Context {
            value: value.into(),
            parent: None,
            is_step: true,
            hide_value: false,
            hidden_value: HIDDEN_VALUE.to_string(),
            message_values: BTreeMap::new(),
            errors: Vec::new(),
        }
    }
}

impl<'a> Context<'a> {
    /// Mask the checked value in every message produced under this context.
    pub fn hide_value(mut self) -> Self {
        self.hide_value = true;
        self
    }

    /// Use a custom replacement text for masked values.
    pub fn hidden_text(mut self, text: impl Into<String>) -> Self {
        self.hidden_value = text.into();
        self
    }

    /// Add a placeholder value inherited by every child context.
    pub fn message_value(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.message_values.insert(name.into(), value.to_string());
        self
    }

    /// Build a child context for `value`. The child inherits masking
    /// settings and placeholder values; `is_step` marks it as an anchor
    /// for field-path lookups.
    pub fn child<'s>(&'s self, value: Value, is_step: bool) -> Context<'s> {
        Context {
            value,
            parent: Some(self),
            is_step,
            hide_value: self.hide_value,
            hidden_value: self.hidden_value.clone(),
            message_values: self.message_values.clone(),
            errors: Vec::new(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_step(&self) -> bool {
        self.is_step
    }

    /// True while no error message has been recorded.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_messages(&self) -> &[ValidationErrorMessage] {
        &self.errors
    }

    pub fn message_values(&self) -> &BTreeMap<String, String> {
        &self.message_values
    }

    /// The checked value as it may appear in messages, honoring masking.
    pub(crate) fn masked_value(&self, force_hidden: bool) -> String {
        if force_hidden || self.hide_value {
            self.hidden_value.clone()
        } else {
            template::display_value(&self.value)
        }
    }

    /// Record an error, rendering `template` with the inherited placeholder
    /// values, the call-site `extras` and `$value`.
    pub fn error(&mut self, code: impl Into<String>, template: &str, extras: &[(&str, String)]) {
        let mut values = self.message_values.clone();
        for (name, value) in extras {
            values.insert((*name).to_string(), value.clone());
        }
        values.insert("value".to_string(), self.masked_value(false));

        let msg = template::render(template, &values);
        self.add_error(ValidationErrorMessage {
            code: code.into(),
            msg,
            field_path: None,
            ctx_values: values,
        });
    }

    pub fn add_error(&mut self, error: ValidationErrorMessage) {
        self.errors.push(error);
    }

    /// Append `errors` re-parented under `field_path`.
    pub fn import_errors(&mut self, errors: Vec<ValidationErrorMessage>, field_path: Option<&str>) {
        for error in errors {
            self.add_error(error.copy_as_child(field_path));
        }
    }

    /// Consume the context, keeping only its collected errors.
    pub fn into_errors(self) -> Vec<ValidationErrorMessage> {
        self.errors
    }

    /// Nearest ancestor context marked as a step.
    pub fn parent_step(&self) -> Option<&Context<'_>> {
        let mut current = self.parent;
        while let Some(ctx) = current {
            if ctx.is_step {
                return Some(ctx);
            }
            current = ctx.parent;
        }
        None
    }

    /// Resolve a field path against the context chain.
    ///
    /// Lookups anchor at the nearest step: a non-step context delegates to
    /// its parent step. Leading `<context>.` segments climb one step each;
    /// a `<root>.` prefix resolves against the topmost step. Remaining
    /// dot-separated segments navigate object keys and array indices;
    /// any miss yields `None`.
    pub fn get_field_value(&self, field_path: &str) -> Option<Value> {
        if !self.is_step {
            return self.parent_step()?.get_field_value(field_path);
        }

        if let Some(rest) = field_path.strip_prefix("<root>.") {
            return match self.parent_step() {
                Some(step) => step.get_field_value(field_path),
                None => self.resolve_segments(rest),
            };
        }

        if let Some(rest) = field_path.strip_prefix("<context>.") {
            return self.parent_step()?.get_field_value(rest);
        }

        self.resolve_segments(field_path)
    }

    fn resolve_segments(&self, path: &str) -> Option<Value> {
        let mut current = &self.value;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }
}

impl Display for Context<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "Context<passed>");
        }
        writeln!(f, "Context<failed>:")?;
        for error in &self.errors {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_is_step() {
        let ctx = Context::new(json!({"a": 1}));
        assert!(ctx.is_step());
        assert!(ctx.passed());
    }

    #[test]
    fn test_error_renders_with_value() {
        let mut ctx = Context::new(json!("abc"));
        ctx.error("bad", "'$value' failed", &[]);
        assert!(!ctx.passed());
        assert_eq!(ctx.error_messages()[0].msg, "'abc' failed");
        assert_eq!(ctx.error_messages()[0].code, "bad");
    }

    #[test]
    fn test_error_masks_hidden_value() {
        let mut ctx = Context::new(json!("secret")).hide_value();
        ctx.error("bad", "'$value' failed", &[]);
        assert_eq!(ctx.error_messages()[0].msg, "'***hidden***' failed");
    }

    #[test]
    fn test_error_custom_hidden_text() {
        let mut ctx = Context::new(json!("secret")).hide_value().hidden_text("###");
        ctx.error("bad", "$value", &[]);
        assert_eq!(ctx.error_messages()[0].msg, "###");
    }

    #[test]
    fn test_import_errors_prefixes_paths() {
        let mut inner = Context::new(json!("x"));
        inner.error("bad", "nope", &[]);
        let mut inner_errors = inner.into_errors();
        inner_errors[0].field_path = Some("leaf".to_string());

        let mut outer = Context::new(json!({}));
        outer.import_errors(inner_errors, Some("branch"));
        assert_eq!(
            outer.error_messages()[0].field_path.as_deref(),
            Some("branch.leaf")
        );
    }

    #[test]
    fn test_copy_as_child_without_prefix_keeps_path() {
        let msg = ValidationErrorMessage {
            code: "c".into(),
            msg: "m".into(),
            field_path: Some("a.b".into()),
            ctx_values: BTreeMap::new(),
        };
        assert_eq!(msg.copy_as_child(None).field_path.as_deref(), Some("a.b"));
    }
}
