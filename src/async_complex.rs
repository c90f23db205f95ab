//! Asynchronous counterparts of the composite validators.
//!
//! [`AsyncValidator`] mirrors [`Validator`] with an awaitable `validate`,
//! and every synchronous validator is usable in an async composition
//! through a blanket implementation. Semantics, error codes and error
//! ordering match the synchronous module exactly.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::basic::{Messages, NotNull, Validator};
use crate::complex;
use crate::ctx::{Context, ValidationErrorMessage};
use crate::template;

/// An awaitable validation rule over a JSON value.
#[async_trait]
pub trait AsyncValidator: Send + Sync {
    /// Check the value held by `ctx`, recording failures into it.
    async fn validate(&self, ctx: &mut Context<'_>) -> bool;

    /// Validate `value` in a fresh root context and return the result.
    async fn is_valid<V>(&self, value: V) -> Context<'static>
    where
        V: Into<Value> + Send,
        Self: Sized,
    {
        let mut ctx = Context::new(value);
        self.validate(&mut ctx).await;
        ctx
    }

    /// Validate `value` as a child of `parent`, so field-path lookups can
    /// reach the parent's value.
    async fn is_valid_in<'a, V>(&self, value: V, parent: &'a Context<'a>) -> Context<'a>
    where
        V: Into<Value> + Send,
        Self: Sized,
    {
        let mut ctx = parent.child(value.into(), false);
        self.validate(&mut ctx).await;
        ctx
    }

    /// Serialize `model` and validate the resulting value.
    async fn is_valid_model<T>(&self, model: &T) -> anyhow::Result<Context<'static>>
    where
        T: Serialize + Sync,
        Self: Sized,
    {
        Ok(self.is_valid(serde_json::to_value(model)?).await)
    }
}

/// Every synchronous validator is also an asynchronous one.
#[async_trait]
impl<V: Validator> AsyncValidator for V {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        Validator::validate(self, ctx)
    }
}

async fn validate_child(
    validator: &dyn AsyncValidator,
    ctx: &mut Context<'_>,
    value: Value,
    path: Option<&str>,
) -> bool {
    let (ok, errors) = {
        let mut child = ctx.child(value, false);
        let ok = validator.validate(&mut child).await;
        (ok, child.into_errors())
    };
    ctx.import_errors(errors, path);
    ok
}

async fn passes_in_child(
    validator: &dyn AsyncValidator,
    ctx: &Context<'_>,
    value: Value,
) -> bool {
    let mut child = ctx.child(value, false);
    validator.validate(&mut child).await
}

/// Applies a sequence of validators to one value, stopping at the first
/// failure unless configured otherwise.
#[derive(Default)]
pub struct Chain {
    validators: Vec<Box<dyn AsyncValidator>>,
    continue_on_fail: bool,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn continue_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }
}

#[async_trait]
impl AsyncValidator for Chain {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let mut result = true;
        for validator in &self.validators {
            if !validator.validate(ctx).await {
                result = false;
                if !self.continue_on_fail {
                    return false;
                }
            }
        }
        result
    }
}

/// Passes when at least one of the validators passes.
#[derive(Default)]
pub struct Any {
    validators: Vec<Box<dyn AsyncValidator>>,
}

impl Any {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

#[async_trait]
impl AsyncValidator for Any {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let mut collected: Vec<ValidationErrorMessage> = Vec::new();
        for validator in &self.validators {
            let value = ctx.value().clone();
            let (ok, errors) = {
                let mut child = ctx.child(value, false);
                let ok = validator.validate(&mut child).await;
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
pub struct AllItems {
    validator: Box<dyn AsyncValidator>,
    continue_on_fail: bool,
}

impl AllItems {
    pub fn new(validator: impl AsyncValidator + 'static) -> Self {
        Self {
            validator: Box::new(validator),
            continue_on_fail: false,
        }
    }

    pub fn continue_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    async fn validate_in_step(&self, ctx: &mut Context<'_>) -> bool {
        let mut result = true;
        for (path, item) in complex::iter_items(ctx.value()) {
            if !validate_child(self.validator.as_ref(), ctx, item, Some(&path)).await {
                result = false;
                if !self.continue_on_fail {
                    return false;
                }
            }
        }
        result
    }
}

#[async_trait]
impl AsyncValidator for AllItems {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if ctx.is_step() {
            return self.validate_in_step(ctx).await;
        }
        let value = ctx.value().clone();
        let (ok, errors) = {
            let mut step = ctx.child(value, true);
            let ok = self.validate_in_step(&mut step).await;
            (ok, step.into_errors())
        };
        ctx.import_errors(errors, None);
        ok
    }
}

/// Requires that the number of items passing a validator stays within
/// bounds, reporting the verdict before the retained per-item errors.
pub struct SomeItems {
    validator: Box<dyn AsyncValidator>,
    min: usize,
    max: Option<usize>,
    continue_on_fail: bool,
    messages: Messages,
}

impl SomeItems {
    pub const TOO_MANY_VALID_ITEMS: &'static str = complex::SomeItems::TOO_MANY_VALID_ITEMS;
    pub const TOO_FEW_VALID_ITEMS: &'static str = complex::SomeItems::TOO_FEW_VALID_ITEMS;

    pub fn new(validator: impl AsyncValidator + 'static) -> Self {
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

    async fn validate_in_step(&self, ctx: &mut Context<'_>) -> bool {
        let mut passed = 0usize;
        let mut kept: Vec<ValidationErrorMessage> = Vec::new();

        for (path, item) in complex::iter_items(ctx.value()) {
            let (ok, errors) = {
                let mut child = ctx.child(item, false);
                let ok = self.validator.validate(&mut child).await;
                (ok, child.into_errors())
            };
            if ok {
                passed += 1;
                if !self.continue_on_fail && self.max.is_some_and(|max| passed > max) {
                    self.messages.emit(
                        ctx,
                        Self::TOO_MANY_VALID_ITEMS,
                        complex::SomeItems::TOO_MANY_TPL,
                        &[],
                    );
                    return false;
                }
            } else {
                kept.extend(errors.into_iter().map(|e| e.copy_as_child(Some(&path))));
            }
        }

        if self.max.is_some_and(|max| passed > max) {
            self.messages.emit(
                ctx,
                Self::TOO_MANY_VALID_ITEMS,
                complex::SomeItems::TOO_MANY_TPL,
                &[],
            );
            for error in kept {
                ctx.add_error(error);
            }
            return false;
        }

        if passed < self.min {
            self.messages.emit(
                ctx,
                Self::TOO_FEW_VALID_ITEMS,
                complex::SomeItems::TOO_FEW_TPL,
                &[],
            );
            for error in kept {
                ctx.add_error(error);
            }
            return false;
        }

        true
    }
}

#[async_trait]
impl AsyncValidator for SomeItems {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if ctx.is_step() {
            return self.validate_in_step(ctx).await;
        }
        let value = ctx.value().clone();
        let (ok, errors) = {
            let mut step = ctx.child(value, true);
            let ok = self.validate_in_step(&mut step).await;
            (ok, step.into_errors())
        };
        ctx.import_errors(errors, None);
        ok
    }
}

/// Runs a validator only when another field of the surrounding step passes
/// a gate check.
pub struct IfField {
    field_name: String,
    validator: Box<dyn AsyncValidator>,
    field_validator: Option<Box<dyn AsyncValidator>>,
    run_if_null: bool,
    add_check_info: bool,
    messages: Messages,
}

impl IfField {
    pub const NEEDS_VALIDATE: &'static str = complex::IfField::NEEDS_VALIDATE;

    pub fn new(field_name: impl Into<String>, validator: impl AsyncValidator + 'static) -> Self {
        Self {
            field_name: field_name.into(),
            validator: Box::new(validator),
            field_validator: None,
            run_if_null: false,
            add_check_info: true,
            messages: Messages::default(),
        }
    }

    pub fn field_validator(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.field_validator = Some(Box::new(validator));
        self
    }

    pub fn run_if_null(mut self) -> Self {
        self.run_if_null = true;
        self
    }

    pub fn no_check_info(mut self) -> Self {
        self.add_check_info = false;
        self
    }
}

#[async_trait]
impl AsyncValidator for IfField {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let field_value = match ctx.get_field_value(&self.field_name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        };

        if field_value.is_none() && !self.run_if_null {
            return true;
        }

        if let Some(gate) = &self.field_validator {
            let probe = field_value.clone().unwrap_or(Value::Null);
            if !passes_in_child(gate.as_ref(), ctx, probe).await {
                return true;
            }
        }

        if self.validator.validate(ctx).await {
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
                complex::IfField::NEEDS_VALIDATE_TPL,
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
pub struct Required {
    chain: Chain,
    empty_validator: Box<dyn AsyncValidator>,
    messages: Messages,
}

impl Required {
    pub const REQUIRED: &'static str = complex::Required::REQUIRED;

    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            empty_validator: Box::new(NotNull::new()),
            messages: Messages::default(),
        }
    }

    pub fn add(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.chain = self.chain.add(validator);
        self
    }

    pub fn empty_validator(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.empty_validator = Box::new(validator);
        self
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AsyncValidator for Required {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let value = ctx.value().clone();
        if !passes_in_child(self.empty_validator.as_ref(), ctx, value).await {
            self.messages
                .emit(ctx, Self::REQUIRED, complex::Required::REQUIRED_TPL, &[]);
            return false;
        }
        self.chain.validate(ctx).await
    }
}

/// Applies a chain of validators only to non-empty values.
pub struct Optional {
    chain: Chain,
    empty_validator: Box<dyn AsyncValidator>,
}

impl Optional {
    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            empty_validator: Box::new(NotNull::new()),
        }
    }

    pub fn add(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.chain = self.chain.add(validator);
        self
    }

    pub fn empty_validator(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.empty_validator = Box::new(validator);
        self
    }
}

impl Default for Optional {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AsyncValidator for Optional {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let value = ctx.value().clone();
        if !passes_in_child(self.empty_validator.as_ref(), ctx, value).await {
            return true;
        }
        self.chain.validate(ctx).await
    }
}

/// Validates an object against a field spec: unknown keys, spec fields in
/// declaration order, then the remaining entries.
#[derive(Default)]
pub struct DictValidate {
    spec: Vec<(String, Box<dyn AsyncValidator>)>,
    key_validator: Option<Box<dyn AsyncValidator>>,
    value_validators: Option<Box<dyn AsyncValidator>>,
    continue_on_fail: bool,
    messages: Messages,
}

impl DictValidate {
    pub const INVALID_TYPE: &'static str = complex::DictValidate::INVALID_TYPE;
    pub const INVALID_KEY: &'static str = complex::DictValidate::INVALID_KEY;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        validator: impl AsyncValidator + 'static,
    ) -> Self {
        self.spec.push((name.into(), Box::new(validator)));
        self
    }

    pub fn key_validator(mut self, validator: impl AsyncValidator + 'static) -> Self {
        self.key_validator = Some(Box::new(validator));
        self
    }

    pub fn value_validators(mut self, validator: impl AsyncValidator + 'static) -> Self {
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

    async fn validate_keys(&self, ctx: &mut Context<'_>, map: &Map<String, Value>) -> bool {
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
                let ok = key_validator.validate(&mut child).await;
                (ok, child.into_errors())
            };
            if ok {
                continue;
            }

            self.messages.emit_for_value(
                ctx,
                Self::INVALID_KEY,
                complex::DictValidate::INVALID_KEY_TPL,
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

    async fn validate_values(&self, ctx: &mut Context<'_>, map: &Map<String, Value>) -> bool {
        let Some(value_validators) = &self.value_validators else {
            return true;
        };

        let extras: Map<String, Value> = map
            .iter()
            .filter(|(key, _)| !self.in_spec(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        validate_child(value_validators.as_ref(), ctx, Value::Object(extras), None).await
    }

    async fn validate_in_step(&self, ctx: &mut Context<'_>) -> bool {
        let Some(map) = ctx.value().as_object().cloned() else {
            self.messages.emit(
                ctx,
                Self::INVALID_TYPE,
                complex::DictValidate::INVALID_TYPE_TPL,
                &[],
            );
            return false;
        };

        let mut result = true;

        if !self.validate_keys(ctx, &map).await {
            result = false;
            if !self.continue_on_fail {
                return false;
            }
        }

        for (name, validator) in &self.spec {
            let field_value = map.get(name).cloned().unwrap_or(Value::Null);
            if !validate_child(validator.as_ref(), ctx, field_value, Some(name)).await {
                result = false;
                if !self.continue_on_fail {
                    return false;
                }
            }
        }

        if !self.validate_values(ctx, &map).await {
            result = false;
            if !self.continue_on_fail {
                return false;
            }
        }

        result
    }
}

#[async_trait]
impl AsyncValidator for DictValidate {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if ctx.is_step() {
            return self.validate_in_step(ctx).await;
        }
        let value = ctx.value().clone();
        let (ok, errors) = {
            let mut step = ctx.child(value, true);
            let ok = self.validate_in_step(&mut step).await;
            (ok, step.into_errors())
        };
        ctx.import_errors(errors, None);
        ok
    }
}

type AsyncValidatorFactory =
    dyn for<'a, 'b> Fn(&'a Context<'b>) -> Box<dyn AsyncValidator> + Send + Sync;

/// Builds its validator at validation time, from the current context.
pub struct Deferred {
    factory: Box<AsyncValidatorFactory>,
}

impl Deferred {
    pub fn new<F>(factory: F) -> Self
    where
        F: for<'a, 'b> Fn(&'a Context<'b>) -> Box<dyn AsyncValidator> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
        }
    }
}

#[async_trait]
impl AsyncValidator for Deferred {
    async fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let validator = (self.factory)(ctx);
        validator.validate(ctx).await
    }
}
