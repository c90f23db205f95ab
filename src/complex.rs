//! Composite validators: chains, collection checks, conditional rules and
//! object specs.
//!
//! Validators that inspect nested values anchor a step context around the
//! value they walk, so field-path lookups (`<context>.`, `<root>.`) and
//! error paths resolve relative to it. Error paths are joined with `.` as
//! they propagate towards the root context.

use serde_json::{Map, Value};

use crate::basic::{impl_message_overrides, Messages, NotNull, Validator};
use crate::ctx::{Context, ValidationErrorMessage};
use crate::template;

/// Items of an array keyed by index, or of an object keyed by field name.
/// Scalars have no items.
pub(crate) fn iter_items(value: &Value) -> Vec<(String, Value)> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| (idx.to_string(), item.clone()))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        _ => Vec::new(),
    }
}

/// Validate `value` in a child context of `ctx`, then pull the child's
/// errors up under `path`.
fn validate_child(
    validator: &dyn Validator,
    ctx: &mut Context<'_>,
    value: Value,
    path: Option<&str>,
) -> bool {
    let (ok, errors) = {
        let mut child = ctx.child(value, false);
        let ok = validator.validate(&mut child);
        (ok, child.into_errors())
    };
    ctx.import_errors(errors, path);
    ok
}

/// Run `validator` against `value` in a throwaway child context. Used for
/// gate checks whose failures must not surface as errors.
fn passes_in_child(validator: &dyn Validator, ctx: &Context<'_>, value: Value) -> bool {
    let mut child = ctx.child(value, false);
    validator.validate(&mut child)
}

/// Applies a sequence of validators to one value.
///
/// Stops at the first failure unless [`continue_on_fail`](Chain::continue_on_fail)
/// is set, in which case every validator runs and all errors are reported.
#[derive(Default)]
pub struct Chain {
    validators: Vec<Box<dyn Validator>>,
    continue_on_fail: bool,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn continue_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }
}

impl Validator for Chain {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let mut result = true;
        for validator in &self.validators {
            if !validator.validate(ctx) {
                result = false;
                if !self.continue_on_fail {
                    return false;
                }
            }
        }
        result
    }
}

/// Passes when at least one of the validators passes. When all fail, every
/// validator's errors are reported in order.
#[derive(Default)]
pub struct Any {
    validators: Vec<Box<dyn Validator>>,
}

impl Any {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

impl Validator for Any {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let mut collected: Vec<ValidationErrorMessage> = Vec::new();
        for validator in &self.validators {
            let value = ctx.value().clone();
            let (ok, errors) = {
                let mut child = ctx.child(value, false);
                let ok = validator.validate(&mut child);
                (ok, child.into_errors())
            };
            if ok {
                return true;
            }
            collected.extend(errors);
        }
        ctx.import_errors(collected, None);
        false
    }
}

/// Applies one validator to every item of an array or object.
///
/// Item errors carry the item's index or key as field path. Stops at the
/// first failing item unless [`continue_on_fail`](AllItems::continue_on_fail)
/// is set.
pub struct AllItems {
    validator: Box<dyn Validator>,
    continue_on_fail: bool,
}

impl AllItems {
    pub fn new(validator: impl Validator + 'static) -> Self {
        Self {
            validator: Box::new(validator),
            continue_on_fail: false,
        }
    }

    pub fn continue_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    fn validate_in_step(&self, ctx: &mut Context<'_>) -> bool {
        let mut result = true;
        for (path, item) in iter_items(ctx.value()) {
            if !validate_child(self.validator.as_ref(), ctx, item, Some(&path)) {
                result = false;
                if !self.continue_on_fail {
                    return false;
                }
            }
        }
        result
    }
}

impl Validator for AllItems {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if ctx.is_step() {
            return self.validate_in_step(ctx);
        }
        let value = ctx.value().clone();
        let (ok, errors) = {
            let mut step = ctx.child(value, true);
            let ok = self.validate_in_step(&mut step);
            (ok, step.into_errors())
        };
        ctx.import_errors(errors, None);
        ok
    }
}

/// Requires that the number of items passing a validator stays within
/// bounds.
///
/// On failure the verdict error comes first, followed by the retained
/// per-item errors. When the upper bound is exceeded with stop-on-fail
/// active, scanning stops and only the verdict is reported.
pub struct SomeItems {
    validator: Box<dyn Validator>,
    min: usize,
    max: Option<usize>,
    continue_on_fail: bool,
    messages: Messages,
}

impl SomeItems {
    pub const TOO_MANY_VALID_ITEMS: &'static str = "tooManyValidItems";
    pub const TOO_FEW_VALID_ITEMS: &'static str = "tooFewValidItems";
    pub(crate) const TOO_MANY_TPL: &'static str = "Too many items pass validation";
    pub(crate) const TOO_FEW_TPL: &'static str = "Too few items pass validation";

    /// At least one item must pass by default.
    pub fn new(validator: impl Validator + 'static) -> Self {
        Self {
            validator: Box::new(validator),
            min: 1,
            max: None,
            continue_on_fail: false,
            messages: Messages::default(),
        }
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        assert!(self.min <= max, "`min` cannot be more than `max`");
        self.max = Some(max);
        self
    }

    pub fn continue_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    fn validate_in_step(&self, ctx: &mut Context<'_>) -> bool {
        let mut passed = 0usize;
        let mut kept: Vec<ValidationErrorMessage> = Vec::new();

        for (path, item) in iter_items(ctx.value()) {
            let (ok, errors) = {
                let mut child = ctx.child(item, false);
                let ok = self.validator.validate(&mut child);
                (ok, child.into_errors())
            };
            if ok {
                passed += 1;
                if !self.continue_on_fail && self.max.is_some_and(|max| passed > max) {
                    self.messages
                        .emit(ctx, Self::TOO_MANY_VALID_ITEMS, Self::TOO_MANY_TPL, &[]);
                    return false;
                }
            } else {
                kept.extend(errors.into_iter().map(|e| e.copy_as_child(Some(&path))));
            }
        }

        if self.max.is_some_and(|max| passed > max) {
            self.messages
                .emit(ctx, Self::TOO_MANY_VALID_ITEMS, Self::TOO_MANY_TPL, &[]);
            for error in kept {
                ctx.add_error(error);
            }
            return false;
        }

        if passed < self.min {
            self.messages
                .emit(ctx, Self::TOO_FEW_VALID_ITEMS, Self::TOO_FEW_TPL, &[]);
            for error in kept {
                ctx.add_error(error);
            }
            return false;
        }

        true
    }
}

impl Validator for SomeItems {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if ctx.is_step() {
            return self.validate_in_step(ctx);
        }
        let value = ctx.value().clone();
        let (ok, errors) = {
            let mut step = ctx.child(value, true);
            let ok = self.validate_in_step(&mut step);
            (ok, step.into_errors())
        };
        ctx.import_errors(errors, None);
        ok
    }
}

/// Bounds how many times each distinct item may occur in an array.
pub struct ItemLimitedOccurrences {
    min_occ: usize,
    max_occ: usize,
    messages: Messages,
}

impl ItemLimitedOccurrences {
    pub const TOO_MANY_ITEM_OCCURRENCES: &'static str = "tooManyItemOccurrences";
    pub const TOO_FEW_ITEM_OCCURRENCES: &'static str = "tooFewItemOccurrences";
    const TOO_MANY_TPL: &'static str = "Item '$item' is repeated too many times. Limit is $max_occ.";
    const TOO_FEW_TPL: &'static str = "Item '$item' is not enough repeated. Limit is $min_occ.";

    /// Each distinct item may occur exactly once.
    pub fn new() -> Self {
        Self::limits(1, 1)
    }

    pub fn limits(min_occ: usize, max_occ: usize) -> Self {
        assert!(
            min_occ <= max_occ,
            "`min_occ` cannot be more than `max_occ`"
        );
        Self {
            min_occ,
            max_occ,
            messages: Messages::default(),
        }
    }
}

impl Default for ItemLimitedOccurrences {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ItemLimitedOccurrences {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        // First-seen order, so the first offending item is the one reported.
        let mut counts: Vec<(Value, usize)> = Vec::new();

        for (_, item) in iter_items(ctx.value()) {
            let count = match counts.iter_mut().find(|(seen, _)| *seen == item) {
                Some((_, count)) => {
                    *count += 1;
                    *count
                }
                None => {
                    counts.push((item.clone(), 1));
                    1
                }
            };

            if count > self.max_occ {
                self.messages.emit(
                    ctx,
                    Self::TOO_MANY_ITEM_OCCURRENCES,
                    Self::TOO_MANY_TPL,
                    &[
                        ("item", template::display_value(&item)),
                        ("max_occ", self.max_occ.to_string()),
                    ],
                );
                return false;
            }
        }

        for (item, count) in &counts {
            if *count < self.min_occ {
                self.messages.emit(
                    ctx,
                    Self::TOO_FEW_ITEM_OCCURRENCES,
                    Self::TOO_FEW_TPL,
                    &[
                        ("item", template::display_value(item)),
                        ("min_occ", self.min_occ.to_string()),
                    ],
                );
                return false;
            }
        }

        true
    }
}

/// Runs a validator only when another field of the surrounding step passes
/// a gate check.
///
/// The field is resolved through the context chain, so paths such as
/// `<context>.other_field` reach enclosing objects. When the inner
/// validator fails, an informational error naming the gating field is
/// appended after the inner errors unless disabled.
pub struct IfField {
    field_name: String,
    validator: Box<dyn Validator>,
    field_validator: Option<Box<dyn Validator>>,
    run_if_null: bool,
    add_check_info: bool,
    messages: Messages,
}

impl IfField {
    pub const NEEDS_VALIDATE: &'static str = "needsValidate";
    pub(crate) const NEEDS_VALIDATE_TPL: &'static str =
        "Some validate error due to field '$field_name' has value '$field_value'.";

    pub fn new(field_name: impl Into<String>, validator: impl Validator + 'static) -> Self {
        Self {
            field_name: field_name.into(),
            validator: Box::new(validator),
            field_validator: None,
            run_if_null: false,
            add_check_info: true,
            messages: Messages::default(),
        }
    }

    /// Gate on the field value passing this validator.
    pub fn field_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.field_validator = Some(Box::new(validator));
        self
    }

    /// Run the inner validator even when the field is missing or null.
    pub fn run_if_null(mut self) -> Self {
        self.run_if_null = true;
        self
    }

    /// Drop the informational error about the gating field.
    pub fn no_check_info(mut self) -> Self {
        self.add_check_info = false;
        self
    }
}

impl Validator for IfField {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let field_value = match ctx.get_field_value(&self.field_name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        };

        if field_value.is_none() && !self.run_if_null {
            return true;
        }

        if let Some(gate) = &self.field_validator {
            let probe = field_value.clone().unwrap_or(Value::Null);
            if !passes_in_child(gate.as_ref(), ctx, probe) {
                return true;
            }
        }

        if self.validator.validate(ctx) {
            return true;
        }

        if self.add_check_info {
            let shown = match &field_value {
                Some(v) => template::display_value(v),
                None => "null".to_string(),
            };
            self.messages.emit(
                ctx,
                Self::NEEDS_VALIDATE,
                Self::NEEDS_VALIDATE_TPL,
                &[
                    ("field_name", self.field_name.clone()),
                    ("field_value", shown),
                ],
            );
        }
        false
    }
}

/// Rejects empty values, then applies a chain of validators.
///
/// Emptiness is decided by a configurable gate validator, [`NotNull`] by
/// default.
pub struct Required {
    chain: Chain,
    empty_validator: Box<dyn Validator>,
    messages: Messages,
}

impl Required {
    pub const REQUIRED: &'static str = "required";
    pub(crate) const REQUIRED_TPL: &'static str = "Value is required and can not be empty";

    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            empty_validator: Box::new(NotNull::new()),
            messages: Messages::default(),
        }
    }

    pub fn add(mut self, validator: impl Validator + 'static) -> Self {
        self.chain = self.chain.add(validator);
        self
    }

    pub fn empty_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.empty_validator = Box::new(validator);
        self
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Required {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let value = ctx.value().clone();
        if !passes_in_child(self.empty_validator.as_ref(), ctx, value) {
            self.messages
                .emit(ctx, Self::REQUIRED, Self::REQUIRED_TPL, &[]);
            return false;
        }
        self.chain.validate(ctx)
    }
}

/// Applies a chain of validators only to non-empty values; empty values
/// pass outright. The emptiness gate matches [`Required`]'s.
pub struct Optional {
    chain: Chain,
    empty_validator: Box<dyn Validator>,
}

impl Optional {
    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            empty_validator: Box::new(NotNull::new()),
        }
    }

    pub fn add(mut self, validator: impl Validator + 'static) -> Self {
        self.chain = self.chain.add(validator);
        self
    }

    pub fn empty_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.empty_validator = Box::new(validator);
        self
    }
}

impl Default for Optional {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Optional {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let value = ctx.value().clone();
        if !passes_in_child(self.empty_validator.as_ref(), ctx, value) {
            return true;
        }
        self.chain.validate(ctx)
    }
}

/// Validates an object against a field spec.
///
/// Runs in three phases: unknown keys against the key validator, spec
/// fields in declaration order (missing fields validate as null), then the
/// remaining non-spec entries against the value validators. Each phase
/// stops the run on failure unless [`continue_on_fail`](DictValidate::continue_on_fail)
/// is set.
#[derive(Default)]
pub struct DictValidate {
    spec: Vec<(String, Box<dyn Validator>)>,
    key_validator: Option<Box<dyn Validator>>,
    value_validators: Option<Box<dyn Validator>>,
    continue_on_fail: bool,
    messages: Messages,
}

impl DictValidate {
    pub const INVALID_TYPE: &'static str = "invalidType";
    pub const INVALID_KEY: &'static str = "invalidKey";
    pub(crate) const INVALID_TYPE_TPL: &'static str = "'$value' is not an object";
    pub(crate) const INVALID_KEY_TPL: &'static str = "'$value' is not a valid key";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.spec.push((name.into(), Box::new(validator)));
        self
    }

    /// Validate keys that are not part of the spec.
    pub fn key_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.key_validator = Some(Box::new(validator));
        self
    }

    /// Validate the object of entries that are not part of the spec.
    pub fn value_validators(mut self, validator: impl Validator + 'static) -> Self {
        self.value_validators = Some(Box::new(validator));
        self
    }

    pub fn continue_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    fn in_spec(&self, key: &str) -> bool {
        self.spec.iter().any(|(name, _)| name == key)
    }

    fn validate_keys(&self, ctx: &mut Context<'_>, map: &Map<String, Value>) -> bool {
        let Some(key_validator) = &self.key_validator else {
            return true;
        };

        let mut result = true;
        for key in map.keys() {
            if self.in_spec(key) {
                continue;
            }

            let (ok, errors) = {
                let mut child = ctx.child(Value::String(key.clone()), false);
                let ok = key_validator.validate(&mut child);
                (ok, child.into_errors())
            };
            if ok {
                continue;
            }

            self.messages.emit_for_value(
                ctx,
                Self::INVALID_KEY,
                Self::INVALID_KEY_TPL,
                &[],
                &Value::String(key.clone()),
            );
            ctx.import_errors(errors, Some(key));
            result = false;
            if !self.continue_on_fail {
                return false;
            }
        }
        result
    }

    fn validate_values(&self, ctx: &mut Context<'_>, map: &Map<String, Value>) -> bool {
        let Some(value_validators) = &self.value_validators else {
            return true;
        };

        let extras: Map<String, Value> = map
            .iter()
            .filter(|(key, _)| !self.in_spec(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        validate_child(value_validators.as_ref(), ctx, Value::Object(extras), None)
    }

    fn validate_in_step(&self, ctx: &mut Context<'_>) -> bool {
        let Some(map) = ctx.value().as_object().cloned() else {
            self.messages
                .emit(ctx, Self::INVALID_TYPE, Self::INVALID_TYPE_TPL, &[]);
            return false;
        };

        let mut result = true;

        if !self.validate_keys(ctx, &map) {
            result = false;
            if !self.continue_on_fail {
                return false;
            }
        }

        for (name, validator) in &self.spec {
            let field_value = map.get(name).cloned().unwrap_or(Value::Null);
            if !validate_child(validator.as_ref(), ctx, field_value, Some(name)) {
                result = false;
                if !self.continue_on_fail {
                    return false;
                }
            }
        }

        if !self.validate_values(ctx, &map) {
            result = false;
            if !self.continue_on_fail {
                return false;
            }
        }

        result
    }
}

impl Validator for DictValidate {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if ctx.is_step() {
            return self.validate_in_step(ctx);
        }
        let value = ctx.value().clone();
        let (ok, errors) = {
            let mut step = ctx.child(value, true);
            let ok = self.validate_in_step(&mut step);
            (ok, step.into_errors())
        };
        ctx.import_errors(errors, None);
        ok
    }
}

type ValidatorFactory = dyn for<'a, 'b> Fn(&'a Context<'b>) -> Box<dyn Validator> + Send + Sync;

/// Builds its validator at validation time, from the current context.
/// Allows recursive specs, such as a tree validator that reuses itself for
/// child nodes.
pub struct Deferred {
    factory: Box<ValidatorFactory>,
}

impl Deferred {
    pub fn new<F>(factory: F) -> Self
    where
        F: for<'a, 'b> Fn(&'a Context<'b>) -> Box<dyn Validator> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
        }
    }
}

impl Validator for Deferred {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let validator = (self.factory)(ctx);
        validator.validate(ctx)
    }
}

impl_message_overrides!(
    SomeItems => messages,
    ItemLimitedOccurrences => messages,
    IfField => messages,
    Required => messages,
    DictValidate => messages,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_iter_items_array_and_object() {
        let items = iter_items(&json!(["a", "b"]));
        assert_eq!(items[0], ("0".to_string(), json!("a")));
        assert_eq!(items[1], ("1".to_string(), json!("b")));

        let items = iter_items(&json!({"k": 1}));
        assert_eq!(items, vec![("k".to_string(), json!(1))]);

        assert!(iter_items(&json!(3)).is_empty());
    }

    #[test]
    fn test_chain_stops_at_first_failure() {
        use crate::basic::{Length, Regexp};

        let validator = Chain::new()
            .add(Length::between(14, 16))
            .add(Regexp::new("^abc").unwrap());
        let result = validator.is_valid("xy");
        assert_eq!(result.error_messages().len(), 1);
        assert_eq!(result.error_messages()[0].code, Length::TOO_SHORT);
    }

    #[test]
    fn test_any_short_circuits() {
        use crate::basic::Regexp;

        let validator = Any::new()
            .add(Regexp::new("^cba").unwrap())
            .add(Regexp::new("^abc").unwrap());
        assert!(validator.is_valid("abcdef").passed());
        assert!(validator.is_valid("cbadef").passed());

        let result = validator.is_valid("xyz");
        assert_eq!(result.error_messages().len(), 2);
    }

    #[test]
    fn test_item_limited_occurrences_reports_first_offender() {
        let result = ItemLimitedOccurrences::new().is_valid(json!(["aaa", "bbb", "ccc", "ccc"]));
        assert!(!result.passed());
        assert_eq!(result.error_messages().len(), 1);
        assert_eq!(
            result.error_messages()[0].msg,
            "Item 'ccc' is repeated too many times. Limit is 1."
        );
    }

    #[test]
    fn test_required_gate_runs_in_isolation() {
        let result = Required::new().is_valid(json!(null));
        assert_eq!(result.error_messages().len(), 1);
        assert_eq!(result.error_messages()[0].code, Required::REQUIRED);
    }
}
