//! Schema nodes: normalized, composable descriptions of nested values.
//!
//! A [`Schema`] is built once from a declaration and reused for any number of
//! evaluations. Each node runs its own rules against its value and then, if
//! the value is present, descends into its children using one of three
//! container disciplines: a single record ([`Discipline::Item`]), a list of
//! records ([`Discipline::Array`]) or a dictionary of records
//! ([`Discipline::Map`]).
//!
//! # Example
//!
//! ```rust
//! use rulebound::{rule, Schema};
//! use serde_json::json;
//!
//! let contact = Schema::item()
//!     .named("contact")
//!     .field("name", vec![rule::required(), rule::min_len(10)])
//!     .field(
//!         "friends",
//!         Schema::array()
//!             .array_rule(rule::max_len(2))
//!             .field("name", rule::required()),
//!     );
//!
//! let errors = contact.errors(&json!({
//!     "name": "Joe",
//!     "friends": [{"name": "Sam"}, {}, {"name": "Al"}]
//! }));
//!
//! let messages: Vec<_> = errors.iter().map(|e| e.message()).collect();
//! assert_eq!(messages, vec![
//!     "contact name must be a minimum of 10 long",
//!     "contact friends may be a maximum of 2 long",
//!     "contact friends #2 name is required",
//! ]);
//! ```

mod declaration;
mod evaluate;
mod normalize;

pub use declaration::{Declaration, Object};
pub use evaluate::EvalOptions;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{CheckError, RuleError, SchemaErrors};
use crate::path::SchemaPath;
use crate::rule::{Predicate, Rule};
use crate::ValidationResult;

/// How a node treats a present value when descending into its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Discipline {
    /// The value is a single record; children are its fields.
    #[default]
    Item,
    /// The value is a list; children apply to each element.
    Array,
    /// The value is a dictionary; children apply to each entry's value.
    Map,
}

/// One of a node's own checks.
///
/// Shared rules report their own reasons. Bare predicates are reported with
/// the owning node's message and status (by default `is invalid`, 400).
#[derive(Clone)]
pub enum NodeRule {
    /// A rule object, including nested schemas.
    Shared(Arc<dyn Rule>),
    /// A bare predicate.
    Predicate(Predicate),
}

impl fmt::Debug for NodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRule::Shared(rule) => match rule.as_schema() {
                Some(schema) => write!(f, "Shared({:?})", schema),
                None => f.write_str("Shared(..)"),
            },
            NodeRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A normalized schema node.
///
/// Every child is fully normalized at construction time, so evaluation never
/// has to classify declarations. A node is immutable once built: builder
/// methods consume and return it, and the shape conversions return new nodes.
///
/// `Schema` implements [`Rule`], so a built schema can be spliced into another
/// declaration as-is. The inherent [`errors`](Schema::errors) method seeds the
/// path from the node's name; call `Rule::errors` to supply every argument
/// explicitly.
#[derive(Clone, Default)]
pub struct Schema {
    name: Option<String>,
    rules: Vec<NodeRule>,
    children: IndexMap<String, Arc<dyn Rule>>,
    discipline: Discipline,
    array_rules: Vec<NodeRule>,
    dict_rules: Vec<NodeRule>,
    invalid: Option<Value>,
    message: Option<String>,
    status_code: Option<u16>,
    inherit_context: bool,
    extensions: IndexMap<String, Declaration>,
}

impl Schema {
    /// Builds a schema from a declaration object.
    ///
    /// Recognized keys are `name`, `rules`, `schema`, `arrayRules`,
    /// `dictRules`, `isArray`, `isDict`, `message`, `statusCode` and
    /// `inheritContext`. Any other key is kept as an extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rulebound::{predicate, Object, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::new(
    ///     Object::new()
    ///         .with("name", "contact")
    ///         .with("schema", Object::new()
    ///             .with("child", Object::new()
    ///                 .with("name", predicate(|v| !v.is_null())))),
    /// );
    ///
    /// assert_eq!(
    ///     schema.errors(&json!({"child": {}}))[0].message(),
    ///     "contact child name is invalid"
    /// );
    /// ```
    pub fn new(declaration: Object) -> Self {
        normalize::from_options(declaration)
    }

    /// Creates an empty item schema.
    pub fn item() -> Self {
        Self::default()
    }

    /// Creates an empty array schema.
    pub fn array() -> Self {
        Self {
            discipline: Discipline::Array,
            ..Self::default()
        }
    }

    /// Creates an empty dictionary schema.
    pub fn dict() -> Self {
        Self {
            discipline: Discipline::Map,
            ..Self::default()
        }
    }

    pub(crate) fn invalid(note: Value) -> Self {
        Self {
            invalid: Some(note),
            ..Self::default()
        }
    }

    /// Sets the name used as the first path segment.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds rules to run against the node's own value.
    ///
    /// Accepts a rule, a predicate, a list of either, or a nested declaration.
    pub fn rule(mut self, declaration: impl Into<Declaration>) -> Self {
        normalize::push_rules(&mut self.rules, declaration.into());
        self
    }

    /// Adds a child field, normalizing its declaration.
    pub fn field(mut self, key: impl Into<String>, declaration: impl Into<Declaration>) -> Self {
        let key = key.into();
        let child = normalize::field(&key, declaration.into());
        self.children.insert(key, child);
        self
    }

    /// Adds rules for the array as a whole and switches to the array discipline.
    pub fn array_rule(mut self, declaration: impl Into<Declaration>) -> Self {
        normalize::push_rules(&mut self.array_rules, declaration.into());
        self.discipline = Discipline::Array;
        self
    }

    /// Adds rules for the dictionary as a whole and switches to the map discipline.
    pub fn dict_rule(mut self, declaration: impl Into<Declaration>) -> Self {
        normalize::push_rules(&mut self.dict_rules, declaration.into());
        self.discipline = Discipline::Map;
        self
    }

    /// Sets the reason reported when one of this node's bare predicates fails.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the status reported when one of this node's bare predicates fails.
    pub fn status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Passes this node's value to its children as context when none was given.
    pub fn inherit_context(mut self, inherit: bool) -> Self {
        self.inherit_context = inherit;
        self
    }

    /// Returns the node's name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the node's discipline.
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Returns the rules run against the node's own value.
    pub fn rules(&self) -> &[NodeRule] {
        &self.rules
    }

    /// Returns the children in declaration order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Arc<dyn Rule>)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the child declared under `key`.
    pub fn child(&self, key: &str) -> Option<&Arc<dyn Rule>> {
        self.children.get(key)
    }

    /// Returns the container rules for the current discipline.
    ///
    /// Item nodes have none.
    pub fn container_rules(&self) -> &[NodeRule] {
        match self.discipline {
            Discipline::Item => &[],
            Discipline::Array => &self.array_rules,
            Discipline::Map => &self.dict_rules,
        }
    }

    /// Returns the original value of a declaration that could not be classified.
    pub fn invalid_declaration(&self) -> Option<&Value> {
        self.invalid.as_ref()
    }

    /// Returns true if this node was built from an unclassifiable declaration.
    pub fn is_invalid(&self) -> bool {
        self.invalid.is_some()
    }

    /// Returns a pass-through key from the declaration object.
    pub fn extension(&self, key: &str) -> Option<&Declaration> {
        self.extensions.get(key)
    }

    /// Returns an equivalent schema validating a list of this node's values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rulebound::{predicate, Schema};
    /// use serde_json::json;
    ///
    /// let person = Schema::item().field("name", predicate(|v| v.is_string()));
    /// let people = person.to_array_schema();
    ///
    /// assert!(person.matches(&json!({"name": "Joe"})));
    /// assert!(people.matches(&json!([{"name": "Joe"}])));
    /// assert!(!people.matches(&json!({"name": "Joe"})));
    /// ```
    pub fn to_array_schema(&self) -> Schema {
        self.with_discipline(Discipline::Array)
    }

    /// Returns an equivalent schema validating a dictionary of this node's values.
    pub fn to_dict_schema(&self) -> Schema {
        self.with_discipline(Discipline::Map)
    }

    /// Returns an equivalent schema validating a single value.
    pub fn to_item_schema(&self) -> Schema {
        self.with_discipline(Discipline::Item)
    }

    fn with_discipline(&self, discipline: Discipline) -> Schema {
        Schema {
            discipline,
            ..self.clone()
        }
    }

    /// Returns every error for `value`, seeding the path with the node's name.
    pub fn errors(&self, value: &Value) -> Vec<RuleError> {
        self.errors_with(value, &EvalOptions::default())
    }

    /// Returns every error for `value` using explicit context, path and
    /// short-circuit settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rulebound::{rule, EvalOptions, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::item()
    ///     .named("contact")
    ///     .field("name", rule::required())
    ///     .field("email", rule::required());
    ///
    /// let all = schema.errors(&json!({}));
    /// assert_eq!(all.len(), 2);
    ///
    /// let first = schema.errors_with(&json!({}), &EvalOptions::new().path("your").short_circuit(true));
    /// assert_eq!(first.len(), 1);
    /// assert_eq!(first[0].message(), "your name is required");
    /// ```
    pub fn errors_with(&self, value: &Value, options: &EvalOptions<'_>) -> Vec<RuleError> {
        let path = options.path.clone().unwrap_or_else(|| self.root_path());
        Rule::errors(self, value, options.context, &path, options.short_circuit)
    }

    /// Returns true if `value` produces no errors.
    pub fn matches(&self, value: &Value) -> bool {
        self.errors_with(value, &EvalOptions::new().short_circuit(true))
            .is_empty()
    }

    /// Fails with the first error if `value` does not match.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] carrying the first error's reason, status and path.
    pub fn check(&self, value: &Value) -> Result<(), CheckError> {
        let errors = self.errors_with(value, &EvalOptions::new().short_circuit(true));
        match errors.into_iter().next() {
            None => Ok(()),
            Some(error) => {
                tracing::trace!(path = %error.path, reason = %error.reason, "schema check failed");
                Err(error.into())
            }
        }
    }

    /// Validates `value`, accumulating every error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rulebound::{rule, Schema};
    /// use serde_json::json;
    /// use stillwater::Validation;
    ///
    /// let schema = Schema::item().named("user").field("name", rule::required());
    ///
    /// assert!(schema.validate(&json!({"name": "Joe"})).is_success());
    ///
    /// match schema.validate(&json!({})) {
    ///     Validation::Failure(errors) => {
    ///         assert_eq!(errors.first().message(), "user name is required");
    ///     }
    ///     Validation::Success(_) => unreachable!(),
    /// }
    /// ```
    pub fn validate(&self, value: &Value) -> ValidationResult<()> {
        match SchemaErrors::from_vec(self.errors(value)) {
            None => Validation::Success(()),
            Some(errors) => Validation::Failure(errors),
        }
    }

    /// Evaluates many independent values against this schema in parallel.
    ///
    /// Results are returned in input order.
    pub fn par_errors(&self, values: &[Value]) -> Vec<Vec<RuleError>> {
        use rayon::prelude::*;

        values.par_iter().map(|value| self.errors(value)).collect()
    }

    fn root_path(&self) -> SchemaPath {
        match &self.name {
            Some(name) => SchemaPath::from_field(name.clone()),
            None => SchemaPath::root(),
        }
    }
}

impl Rule for Schema {
    fn errors(
        &self,
        value: &Value,
        context: Option<&Value>,
        path: &SchemaPath,
        short_circuit: bool,
    ) -> Vec<RuleError> {
        match self.discipline {
            Discipline::Item => self.item_errors(value, context, path, short_circuit),
            Discipline::Array => self.array_errors(value, context, path, short_circuit),
            Discipline::Map => self.map_errors(value, context, path, short_circuit),
        }
    }

    fn as_schema(&self) -> Option<&Schema> {
        Some(self)
    }
}

impl From<Object> for Schema {
    fn from(declaration: Object) -> Self {
        Schema::new(declaration)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Schema");
        s.field("name", &self.name)
            .field("discipline", &self.discipline)
            .field("rules", &self.rules.len())
            .field("children", &self.children.keys().collect::<Vec<_>>());
        if let Some(note) = &self.invalid {
            s.field("invalid", note);
        }
        s.finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};
