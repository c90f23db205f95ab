//! # Dirty Validators
//!
//! A composable validation library for JSON values, with structured error
//! reporting and both synchronous and asynchronous execution.
//!
//! ## Overview
//!
//! Validators check a single [`serde_json::Value`] and report failures into
//! a [`Context`]. Composite validators chain rules, walk arrays and
//! objects, gate on sibling fields, and validate whole object specs;
//! errors carry a stable code, a rendered message and the dotted path of
//! the failing field. Typed models validate through their `Serialize`
//! implementation.
//!
//! ## Core Concepts
//!
//! - **Validator**: a rule over one value, reporting success or failure
//! - **Context**: the result of a validation call, truthy on success and
//!   carrying structured error messages on failure
//! - **Step**: a context anchor that field-path lookups (`<context>.`,
//!   `<root>.`) and error paths resolve against
//!
//! ## Modules
//!
//! - [`basic`] - Scalar validators and the [`Validator`] trait
//! - [`complex`] - Chains, collection checks, conditional rules and object specs
//! - [`async_complex`] - Awaitable counterparts of the composite validators
//! - [`ctx`] - Validation contexts and error messages
//! - [`template`] - Message template rendering
//! - [`legacy`] - Conversion to the flat message map of earlier releases
//!
//! ## Example
//!
//! ```
//! use dirty_validators::basic::{Email, Length, Validator};
//! use dirty_validators::complex::Chain;
//!
//! let validator = Chain::new()
//!     .add(Length::between(14, 16))
//!     .add(Email::new());
//!
//! let result = validator.is_valid("abcdefg@test.com");
//! assert!(result.passed());
//!
//! let result = validator.is_valid("abc@test.com");
//! assert_eq!(result.error_messages()[0].code, Length::TOO_SHORT);
//! ```

pub mod async_complex;
pub mod basic;
pub mod complex;
pub mod ctx;
pub mod legacy;
pub mod template;

pub use async_complex::AsyncValidator;
pub use basic::Validator;
pub use ctx::{Context, ValidationErrorMessage};
