//! # ferric-forms
//!
//! Form building, rule-string validation, and AdminLTE-styled rendering.
//!
//! This crate provides:
//! - A [`Field`] abstraction binding data columns to HTML controls
//! - A [`Form`] aggregator with registry-based field construction
//! - Pipe-delimited rule strings (`"required|email|max:190"`)
//! - Skip-not-fail validation with full error aggregation
//!
//! ## Quick Start
//!
//! ```rust
//! use ferric_forms::{Form, Method};
//! use serde_json::json;
//!
//! let mut form = Form::new();
//! form.action("/admin/users").method(Method::Post);
//! form.text("name").rules("required|min:3");
//! form.email("email").rules("required");
//! form.select("role", vec![("user", "User"), ("admin", "Administrator")]);
//!
//! let input = json!({"name": "Alice", "email": "alice@example.com"})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//! let outcome = form.validate(&input);
//! assert!(outcome.is_valid());
//!
//! let html = form.render();
//! assert!(html.contains("form-horizontal"));
//! ```
//!
//! ## Validation semantics
//!
//! A field whose column is absent from the submitted input is skipped,
//! never failed: partial submissions validate only what they carry.
//! When failures do occur, every field is still checked and every
//! message collected, so the form can be redisplayed with all errors
//! at once.
//!
//! ```rust
//! use ferric_forms::{Form, ValidationOutcome};
//! use serde_json::json;
//!
//! let mut form = Form::new();
//! form.text("name").rules("required");
//! form.email("email").rules("required|email");
//!
//! // Only name is submitted; the email field is skipped.
//! let input = json!({"name": "Alice"}).as_object().cloned().unwrap();
//! assert!(matches!(form.validate(&input), ValidationOutcome::Valid));
//! ```
//!
//! ## Registry
//!
//! Fields can be built by kind tag through a [`FieldRegistry`], so
//! applications can register their own kinds or replace the stock
//! ones. What happens on an unknown kind is a policy choice
//! ([`UnknownField`]): skip quietly, or error.

mod data;
mod error;
mod field;
pub mod fields;
mod form;
mod registry;
mod rules;
pub mod validation;
pub mod widgets;

pub use data::DataMap;
pub use error::{FormError, Result, ValidationErrors, ValidationOutcome};
pub use field::{Column, CustomValidator, Field, FieldValidator, Width};
pub use form::{Form, FormContext, Method};
pub use registry::{FieldConstructor, FieldRegistry, UnknownField};
pub use rules::{DeferredRules, Rules};
