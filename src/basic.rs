//! Scalar validators and the [`Validator`] trait.
//!
//! Every validator checks a single [`Value`] and reports failures through a
//! [`Context`]. Built-in error codes are associated constants on each
//! validator; codes, message templates and placeholder values can all be
//! overridden per instance.

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::ctx::{Context, ValidationErrorMessage, HIDDEN_VALUE};
use crate::template;

/// A synchronous validation rule over a JSON value.
pub trait Validator: Send + Sync {
    /// Check the value held by `ctx`, recording failures into it.
    ///
    /// Returns `true` when the value passes. Implementations must leave no
    /// error behind on success.
    fn validate(&self, ctx: &mut Context<'_>) -> bool;

    /// Validate `value` in a fresh root context and return the result.
    fn is_valid<V: Into<Value>>(&self, value: V) -> Context<'static>
    where
        Self: Sized,
    {
        let mut ctx = Context::new(value);
        self.validate(&mut ctx);
        ctx
    }

    /// Validate `value` as a child of `parent`, so field-path lookups can
    /// reach the parent's value.
    fn is_valid_in<'a, V: Into<Value>>(&self, value: V, parent: &'a Context<'a>) -> Context<'a>
    where
        Self: Sized,
    {
        let mut ctx = parent.child(value.into(), false);
        self.validate(&mut ctx);
        ctx
    }

    /// Serialize `model` and validate the resulting value.
    fn is_valid_model<T: Serialize>(&self, model: &T) -> Result<Context<'static>>
    where
        Self: Sized,
    {
        Ok(self.is_valid(serde_json::to_value(model)?))
    }
}

/// Per-instance message configuration shared by every validator:
/// code remapping, template overrides, extra placeholder values and
/// value masking.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    pub(crate) code_map: BTreeMap<String, String>,
    pub(crate) templates: BTreeMap<String, String>,
    pub(crate) values: BTreeMap<String, String>,
    pub(crate) hidden: bool,
}

impl Messages {
    fn final_code<'c>(&'c self, code: &'c str) -> &'c str {
        self.code_map.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Template lookup order: override for the mapped code, override for
    /// the original code, then the built-in default.
    fn resolve_template<'t>(&'t self, code: &str, default: &'t str) -> &'t str {
        self.templates
            .get(self.final_code(code))
            .or_else(|| self.templates.get(code))
            .map(String::as_str)
            .unwrap_or(default)
    }

    /// Record an error on `ctx` with `$value` taken from the context value.
    pub(crate) fn emit(
        &self,
        ctx: &mut Context<'_>,
        code: &str,
        default_template: &str,
        extras: &[(&str, String)],
    ) {
        let value = ctx.masked_value(self.hidden);
        self.emit_rendered(ctx, code, default_template, extras, value);
    }

    /// Record an error on `ctx` with an explicit `$value` (used when the
    /// message refers to something other than the checked value, such as a
    /// rejected key).
    pub(crate) fn emit_for_value(
        &self,
        ctx: &mut Context<'_>,
        code: &str,
        default_template: &str,
        extras: &[(&str, String)],
        value: &Value,
    ) {
        let value = if self.hidden {
            HIDDEN_VALUE.to_string()
        } else {
            template::display_value(value)
        };
        self.emit_rendered(ctx, code, default_template, extras, value);
    }

    fn emit_rendered(
        &self,
        ctx: &mut Context<'_>,
        code: &str,
        default_template: &str,
        extras: &[(&str, String)],
        value: String,
    ) {
        let final_code = self.final_code(code).to_string();
        let tpl = self.resolve_template(code, default_template).to_string();

        let mut values = ctx.message_values().clone();
        for (name, val) in &self.values {
            values.insert(name.clone(), val.clone());
        }
        for (name, val) in extras {
            values.insert((*name).to_string(), val.clone());
        }
        values.insert("value".to_string(), value);

        let msg = template::render(&tpl, &values);
        ctx.add_error(ValidationErrorMessage {
            code: final_code,
            msg,
            field_path: None,
            ctx_values: values,
        });
    }
}

/// Generate the message-override builder methods for a validator type.
/// The accessor path points at its [`Messages`] field.
macro_rules! impl_message_overrides {
    ($($ty:ty => $($field:ident).+),+ $(,)?) => {$(
        impl $ty {
            /// Remap a built-in error code to a custom one.
            pub fn error_code(mut self, from: &str, to: &str) -> Self {
                self.$($field).+.code_map.insert(from.to_string(), to.to_string());
                self
            }

            /// Override the message template for an error code.
            pub fn error_message(mut self, code: &str, template: &str) -> Self {
                self.$($field).+.templates.insert(code.to_string(), template.to_string());
                self
            }

            /// Add a placeholder value available to every message template.
            pub fn message_value(mut self, name: &str, value: impl ToString) -> Self {
                self.$($field).+.values.insert(name.to_string(), value.to_string());
                self
            }

            /// Mask the checked value in error messages.
            pub fn hidden(mut self) -> Self {
                self.$($field).+.hidden = true;
                self
            }
        }
    )+};
}
pub(crate) use impl_message_overrides;

/// Emptiness follows JSON truthiness: `null`, `false`, numeric zero, `""`,
/// `[]` and `{}` are empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Compares the value with a fixed one.
#[derive(Debug, Clone, Default)]
pub struct EqualTo {
    comp_value: Value,
    messages: Messages,
}

impl EqualTo {
    pub const NOT_EQUAL: &'static str = "notEqual";
    const NOT_EQUAL_TPL: &'static str = "'$value' is not equal to '$comp_value'";

    pub fn new(comp_value: impl Into<Value>) -> Self {
        Self {
            comp_value: comp_value.into(),
            messages: Messages::default(),
        }
    }
}

impl Validator for EqualTo {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if *ctx.value() != self.comp_value {
            self.messages.emit(
                ctx,
                Self::NOT_EQUAL,
                Self::NOT_EQUAL_TPL,
                &[("comp_value", template::display_value(&self.comp_value))],
            );
            return false;
        }
        true
    }
}

/// Checks that the value differs from a fixed one.
#[derive(Debug, Clone, Default)]
pub struct NotEqualTo {
    comp_value: Value,
    messages: Messages,
}

impl NotEqualTo {
    pub const IS_EQUAL: &'static str = "isEqual";
    const IS_EQUAL_TPL: &'static str = "'$value' is equal to '$comp_value'";

    pub fn new(comp_value: impl Into<Value>) -> Self {
        Self {
            comp_value: comp_value.into(),
            messages: Messages::default(),
        }
    }
}

impl Validator for NotEqualTo {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if *ctx.value() == self.comp_value {
            self.messages.emit(
                ctx,
                Self::IS_EQUAL,
                Self::IS_EQUAL_TPL,
                &[("comp_value", template::display_value(&self.comp_value))],
            );
            return false;
        }
        true
    }
}

/// Checks that a string value does not contain a fixed token.
#[derive(Debug, Clone)]
pub struct StringNotContaining {
    token: String,
    case_sensitive: bool,
    messages: Messages,
}

impl StringNotContaining {
    pub const NOT_CONTAINS: &'static str = "notContains";
    pub const NOT_STRING: &'static str = "notString";
    const NOT_CONTAINS_TPL: &'static str = "'$value' contains '$token'";
    const NOT_STRING_TPL: &'static str = "Value must be a string";

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            case_sensitive: true,
            messages: Messages::default(),
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }
}

impl Validator for StringNotContaining {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let Some(s) = ctx.value().as_str() else {
            self.messages
                .emit(ctx, Self::NOT_STRING, Self::NOT_STRING_TPL, &[]);
            return false;
        };

        let contains = if self.case_sensitive {
            s.contains(&self.token)
        } else {
            s.to_lowercase().contains(&self.token.to_lowercase())
        };

        if contains {
            self.messages.emit(
                ctx,
                Self::NOT_CONTAINS,
                Self::NOT_CONTAINS_TPL,
                &[("token", self.token.clone())],
            );
            return false;
        }
        true
    }
}

/// Validates the length of a string (in chars), array or object.
#[derive(Debug, Clone, Default)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    messages: Messages,
}

impl Length {
    pub const TOO_SHORT: &'static str = "tooShort";
    pub const TOO_LONG: &'static str = "tooLong";
    pub const INVALID_TYPE: &'static str = "notLength";
    const TOO_SHORT_TPL: &'static str = "'$value' is less than $min unit length";
    const TOO_LONG_TPL: &'static str = "'$value' is more than $max unit length";
    const INVALID_TYPE_TPL: &'static str = "'$value' has no length";

    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn max(max: usize) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        assert!(min <= max, "`min` cannot be more than `max`");
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    fn value_length(value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }
}

impl Validator for Length {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let Some(len) = Self::value_length(ctx.value()) else {
            self.messages
                .emit(ctx, Self::INVALID_TYPE, Self::INVALID_TYPE_TPL, &[]);
            return false;
        };

        if let Some(min) = self.min {
            if len < min {
                self.messages.emit(
                    ctx,
                    Self::TOO_SHORT,
                    Self::TOO_SHORT_TPL,
                    &[("min", min.to_string())],
                );
                return false;
            }
        }
        if let Some(max) = self.max {
            if len > max {
                self.messages.emit(
                    ctx,
                    Self::TOO_LONG,
                    Self::TOO_LONG_TPL,
                    &[("max", max.to_string())],
                );
                return false;
            }
        }
        true
    }
}

/// Validates that a number falls within inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct NumberRange {
    min: Option<f64>,
    max: Option<f64>,
    messages: Messages,
}

impl NumberRange {
    pub const OUT_OF_RANGE: &'static str = "outOfRange";
    const OUT_OF_RANGE_TPL: &'static str = "'$value' is out of range ($min, $max)";

    pub fn min(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    pub fn max(max: f64) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    fn bound_display(bound: Option<f64>) -> String {
        match bound {
            Some(b) => b.to_string(),
            None => "null".to_string(),
        }
    }

    fn fail(&self, ctx: &mut Context<'_>) {
        self.messages.emit(
            ctx,
            Self::OUT_OF_RANGE,
            Self::OUT_OF_RANGE_TPL,
            &[
                ("min", Self::bound_display(self.min)),
                ("max", Self::bound_display(self.max)),
            ],
        );
    }
}

impl Validator for NumberRange {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let Some(number) = ctx.value().as_f64() else {
            self.fail(ctx);
            return false;
        };

        if self.min.is_some_and(|min| number < min) || self.max.is_some_and(|max| number > max) {
            self.fail(ctx);
            return false;
        }
        true
    }
}

/// Validates a string against a user-provided regular expression.
#[derive(Debug, Clone)]
pub struct Regexp {
    regex: Regex,
    messages: Messages,
}

impl Regexp {
    pub const NOT_MATCH: &'static str = "notMatch";
    const NOT_MATCH_TPL: &'static str = "'$value' does not match against pattern '$regex'";

    /// Compile `pattern`. Anchor it explicitly (`^...`) when a prefix or
    /// full match is intended; matching searches the whole string.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            messages: Messages::default(),
        }
    }
}

impl Validator for Regexp {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        // Null checks as the empty string; other non-strings never match.
        let matched = match ctx.value() {
            Value::String(s) => self.regex.is_match(s),
            Value::Null => self.regex.is_match(""),
            _ => false,
        };

        if !matched {
            self.messages.emit(
                ctx,
                Self::NOT_MATCH,
                Self::NOT_MATCH_TPL,
                &[("regex", self.regex.as_str().to_string())],
            );
            return false;
        }
        true
    }
}

/// Validates an email address with a deliberately loose pattern; pair it
/// with stronger checks (activation, lookup) when correctness matters.
#[derive(Debug, Clone)]
pub struct Email {
    inner: Regexp,
}

impl Email {
    pub const NOT_MAIL: &'static str = "notMail";
    const NOT_MAIL_TPL: &'static str = "'$value' is not a valid email address.";
    const PATTERN: &'static str = r"(?i)^.+@[^.].*\.[a-z]{2,10}$";

    pub fn new() -> Self {
        Self {
            inner: Regexp::new(Self::PATTERN)
                .unwrap()
                .error_code(Regexp::NOT_MATCH, Self::NOT_MAIL)
                .error_message(Self::NOT_MAIL, Self::NOT_MAIL_TPL),
        }
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Email {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        self.inner.validate(ctx)
    }
}

/// Validates an IPv4 and/or IPv6 address.
#[derive(Debug, Clone)]
pub struct IpAddress {
    ipv4: bool,
    ipv6: bool,
    messages: Messages,
}

impl IpAddress {
    pub const NOT_IP_ADDRESS: &'static str = "notIpAddress";
    pub const IPV4_NOT_ALLOWED: &'static str = "ipv4NotAllowed";
    pub const IPV6_NOT_ALLOWED: &'static str = "ipv6NotAllowed";
    const NOT_IP_ADDRESS_TPL: &'static str =
        "'$value' does not appear to be a valid IP address. Allowed $types";
    const IPV4_NOT_ALLOWED_TPL: &'static str =
        "'$value' is an ipv4 address that is not allowed. Allowed $types";
    const IPV6_NOT_ALLOWED_TPL: &'static str =
        "'$value' is an ipv6 address that is not allowed. Allowed $types";

    pub fn v4() -> Self {
        Self {
            ipv4: true,
            ipv6: false,
            messages: Messages::default(),
        }
    }

    pub fn v6() -> Self {
        Self {
            ipv4: false,
            ipv6: true,
            messages: Messages::default(),
        }
    }

    pub fn any() -> Self {
        Self {
            ipv4: true,
            ipv6: true,
            messages: Messages::default(),
        }
    }

    fn allowed_types(&self) -> String {
        match (self.ipv4, self.ipv6) {
            (true, true) => "ipv4 and ipv6".to_string(),
            (true, false) => "ipv4".to_string(),
            _ => "ipv6".to_string(),
        }
    }
}

impl Default for IpAddress {
    fn default() -> Self {
        Self::v4()
    }
}

impl Validator for IpAddress {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let types = [("types", self.allowed_types())];
        let Some(s) = ctx.value().as_str() else {
            self.messages
                .emit(ctx, Self::NOT_IP_ADDRESS, Self::NOT_IP_ADDRESS_TPL, &types);
            return false;
        };

        if s.parse::<Ipv4Addr>().is_ok() {
            if !self.ipv4 {
                self.messages.emit(
                    ctx,
                    Self::IPV4_NOT_ALLOWED,
                    Self::IPV4_NOT_ALLOWED_TPL,
                    &types,
                );
                return false;
            }
            return true;
        }

        if s.parse::<Ipv6Addr>().is_ok() {
            if !self.ipv6 {
                self.messages.emit(
                    ctx,
                    Self::IPV6_NOT_ALLOWED,
                    Self::IPV6_NOT_ALLOWED_TPL,
                    &types,
                );
                return false;
            }
            return true;
        }

        self.messages
            .emit(ctx, Self::NOT_IP_ADDRESS, Self::NOT_IP_ADDRESS_TPL, &types);
        false
    }
}

/// Validates a colon-separated MAC address.
#[derive(Debug, Clone)]
pub struct MacAddress {
    inner: Regexp,
}

impl MacAddress {
    pub const INVALID_MAC_ADDRESS: &'static str = "invalidMacAddress";
    const INVALID_MAC_ADDRESS_TPL: &'static str = "'$value' is not a valid mac address.";
    const PATTERN: &'static str = r"^(?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$";

    pub fn new() -> Self {
        Self {
            inner: Regexp::new(Self::PATTERN)
                .unwrap()
                .error_code(Regexp::NOT_MATCH, Self::INVALID_MAC_ADDRESS)
                .error_message(Self::INVALID_MAC_ADDRESS, Self::INVALID_MAC_ADDRESS_TPL),
        }
    }
}

impl Default for MacAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for MacAddress {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        self.inner.validate(ctx)
    }
}

/// Simple regexp-based URL validation; resolve the URL by other means when
/// it must actually exist.
#[derive(Debug, Clone)]
pub struct Url {
    inner: Regexp,
}

impl Url {
    pub const INVALID_URL: &'static str = "invalidUrl";
    const INVALID_URL_TPL: &'static str = "'$value' is not a valid url.";

    /// Requires a `.tld` suffix in the host part.
    pub fn new() -> Self {
        Self::build(r"\.[a-z]{2,10}")
    }

    /// Accepts hosts without a TLD, such as `localhost`.
    pub fn without_tld() -> Self {
        Self::build("")
    }

    fn build(tld_part: &str) -> Self {
        let pattern = format!(
            r"(?i)^[a-z]+://([^/:]+{}|([0-9]{{1,3}}\.){{3}}[0-9]{{1,3}})(:[0-9]+)?(/.*)?$",
            tld_part
        );
        Self {
            inner: Regexp::new(&pattern)
                .unwrap()
                .error_code(Regexp::NOT_MATCH, Self::INVALID_URL)
                .error_message(Self::INVALID_URL, Self::INVALID_URL_TPL),
        }
    }
}

impl Default for Url {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Url {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        self.inner.validate(ctx)
    }
}

/// Validates a hyphenated UUID.
#[derive(Debug, Clone)]
pub struct Uuid {
    inner: Regexp,
}

impl Uuid {
    pub const INVALID_UUID: &'static str = "invalidUuid";
    const INVALID_UUID_TPL: &'static str = "'$value' is not a valid UUID.";
    const PATTERN: &'static str = r"^[0-9a-fA-F]{8}-([0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}$";

    pub fn new() -> Self {
        Self {
            inner: Regexp::new(Self::PATTERN)
                .unwrap()
                .error_code(Regexp::NOT_MATCH, Self::INVALID_UUID)
                .error_message(Self::INVALID_UUID, Self::INVALID_UUID_TPL),
        }
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Uuid {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        self.inner.validate(ctx)
    }
}

type ValuesFormatter = dyn Fn(&[Value]) -> String + Send + Sync;

fn default_values_formatter(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => format!("'{}'", s),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compares the value against a list of valid inputs.
pub struct AnyOf {
    values: Vec<Value>,
    formatter: Box<ValuesFormatter>,
    messages: Messages,
}

impl AnyOf {
    pub const NOT_IN_LIST: &'static str = "notInList";
    const NOT_IN_LIST_TPL: &'static str = "'$value' is none of $values.";

    pub fn new(values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            formatter: Box::new(default_values_formatter),
            messages: Messages::default(),
        }
    }

    /// Custom formatter for the `$values` placeholder.
    pub fn values_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&[Value]) -> String + Send + Sync + 'static,
    {
        self.formatter = Box::new(formatter);
        self
    }
}

impl Validator for AnyOf {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if !self.values.contains(ctx.value()) {
            self.messages.emit(
                ctx,
                Self::NOT_IN_LIST,
                Self::NOT_IN_LIST_TPL,
                &[("values", (self.formatter)(&self.values))],
            );
            return false;
        }
        true
    }
}

/// Compares the value against a list of invalid inputs.
pub struct NoneOf {
    values: Vec<Value>,
    formatter: Box<ValuesFormatter>,
    messages: Messages,
}

impl NoneOf {
    pub const IN_LIST: &'static str = "inList";
    const IN_LIST_TPL: &'static str = "'$value' is one of $values.";

    pub fn new(values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            formatter: Box::new(default_values_formatter),
            messages: Messages::default(),
        }
    }

    /// Custom formatter for the `$values` placeholder.
    pub fn values_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&[Value]) -> String + Send + Sync + 'static,
    {
        self.formatter = Box::new(formatter);
        self
    }
}

impl Validator for NoneOf {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if self.values.contains(ctx.value()) {
            self.messages.emit(
                ctx,
                Self::IN_LIST,
                Self::IN_LIST_TPL,
                &[("values", (self.formatter)(&self.values))],
            );
            return false;
        }
        true
    }
}

/// Requires an empty value (see [`is_empty_value`]).
#[derive(Debug, Clone, Default)]
pub struct IsEmpty {
    messages: Messages,
}

impl IsEmpty {
    pub const EMPTY: &'static str = "empty";
    const EMPTY_TPL: &'static str = "'$value' must be empty";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for IsEmpty {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if !is_empty_value(ctx.value()) {
            self.messages.emit(ctx, Self::EMPTY, Self::EMPTY_TPL, &[]);
            return false;
        }
        true
    }
}

/// Requires a non-empty value.
#[derive(Debug, Clone, Default)]
pub struct NotEmpty {
    messages: Messages,
}

impl NotEmpty {
    pub const NOT_EMPTY: &'static str = "notEmpty";
    const NOT_EMPTY_TPL: &'static str = "Value can not be empty";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for NotEmpty {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if is_empty_value(ctx.value()) {
            self.messages
                .emit(ctx, Self::NOT_EMPTY, Self::NOT_EMPTY_TPL, &[]);
            return false;
        }
        true
    }
}

/// Requires a string that is non-empty after trimming whitespace.
#[derive(Debug, Clone, Default)]
pub struct NotEmptyString {
    messages: Messages,
}

impl NotEmptyString {
    pub const NOT_EMPTY: &'static str = "notEmpty";
    pub const NOT_STRING: &'static str = "notString";
    const NOT_EMPTY_TPL: &'static str = "Value can not be empty";
    const NOT_STRING_TPL: &'static str = "Value must be a string";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for NotEmptyString {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        let Some(s) = ctx.value().as_str() else {
            self.messages
                .emit(ctx, Self::NOT_STRING, Self::NOT_STRING_TPL, &[]);
            return false;
        };

        if s.trim().is_empty() {
            self.messages
                .emit(ctx, Self::NOT_EMPTY, Self::NOT_EMPTY_TPL, &[]);
            return false;
        }
        true
    }
}

/// Requires `null`.
#[derive(Debug, Clone, Default)]
pub struct IsNull {
    messages: Messages,
}

impl IsNull {
    pub const NULL: &'static str = "null";
    const NULL_TPL: &'static str = "'$value' must be null";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for IsNull {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if !ctx.value().is_null() {
            self.messages.emit(ctx, Self::NULL, Self::NULL_TPL, &[]);
            return false;
        }
        true
    }
}

/// Rejects `null`.
#[derive(Debug, Clone, Default)]
pub struct NotNull {
    messages: Messages,
}

impl NotNull {
    pub const NOT_NULL: &'static str = "notNull";
    const NOT_NULL_TPL: &'static str = "Value must not be null";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for NotNull {
    fn validate(&self, ctx: &mut Context<'_>) -> bool {
        if ctx.value().is_null() {
            self.messages
                .emit(ctx, Self::NOT_NULL, Self::NOT_NULL_TPL, &[]);
            return false;
        }
        true
    }
}

impl_message_overrides!(
    EqualTo => messages,
    NotEqualTo => messages,
    StringNotContaining => messages,
    Length => messages,
    NumberRange => messages,
    Regexp => messages,
    Email => inner.messages,
    IpAddress => messages,
    MacAddress => inner.messages,
    Url => inner.messages,
    Uuid => inner.messages,
    AnyOf => messages,
    NoneOf => messages,
    IsEmpty => messages,
    NotEmpty => messages,
    NotEmptyString => messages,
    IsNull => messages,
    NotNull => messages,
);
