//! # Rulebound
//!
//! A declarative validation engine for nested records, arrays and maps that
//! reports every violation with the path leading to it.
//!
//! ## Overview
//!
//! A schema is declared once, as a nested description of what a value must
//! look like, and is normalized eagerly into a tree of [`Schema`] nodes. Each
//! node runs its own [`Rule`]s against its value and then descends into its
//! children, treating the value as a single record, a list of records or a
//! dictionary of records. Errors come back in declaration order, each carrying
//! a reason, a status code and a [`SchemaPath`] such as
//! `contact friends #1 name`.
//!
//! ## Core Types
//!
//! - [`Schema`]: a normalized node, built from an [`Object`] declaration or
//!   with the builder methods
//! - [`Declaration`]: a raw field declaration before classification
//! - [`Rule`]: the capability shared by leaf rules and schemas
//! - [`RuleError`]: a single error record; [`SchemaErrors`] accumulates them
//! - [`CheckError`]: the failure raised by [`Schema::check`]
//!
//! ## Example
//!
//! ```rust
//! use rulebound::{rule, Object, Schema};
//! use serde_json::json;
//!
//! let contact = Schema::new(
//!     Object::new()
//!         .with("name", "contact")
//!         .with("schema", Object::new()
//!             .with("name", vec![rule::required()])
//!             .with("friends", Object::new()
//!                 .with("arrayRules", rule::max_len(5))
//!                 .with("schema", Object::new()
//!                     .with("name", vec![rule::required(), rule::min_len(10)])))),
//! );
//!
//! let friends: Vec<_> = (0..6).map(|_| json!({"name": "short"})).collect();
//! let errors = contact.errors(&json!({"name": "Joe", "friends": friends}));
//!
//! assert_eq!(errors[0].message(), "contact friends may be a maximum of 5 long");
//! assert_eq!(errors[1].message(), "contact friends #1 name must be a minimum of 10 long");
//! assert!(!contact.matches(&json!({"friends": []})));
//! ```

pub mod error;
pub mod path;
pub mod rule;
pub mod schema;
pub mod value;

pub use error::{CheckError, RuleError, SchemaErrors, DEFAULT_STATUS};
pub use path::{PathSegment, SchemaPath};
pub use rule::{predicate, FnRule, Predicate, Rule, RuleSet};
pub use schema::{Declaration, Discipline, EvalOptions, NodeRule, Object, Schema};

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
