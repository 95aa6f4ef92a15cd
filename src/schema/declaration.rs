//! Raw schema declarations.
//!
//! A [`Declaration`] is whatever a caller wrote for a field before it has been
//! classified: a rule, a list of rules, a nested object, a bare predicate or a
//! plain scalar. [`Object`] is the insertion-ordered key/declaration map used
//! both for schema options and for nested field maps.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::rule::{FnRule, Predicate, Rule, RuleSet};

use super::Schema;

/// An unclassified field declaration.
///
/// Variants mirror the shapes a declaration can take. An [`Object`] may be
/// either a full child-schema declaration (when it carries option keys such
/// as `schema`, `rules` or `isArray`) or a raw nested field map; which one is
/// decided when the schema is built.
#[derive(Clone)]
pub enum Declaration {
    /// Something already implementing [`Rule`], including built schemas.
    Rule(Arc<dyn Rule>),
    /// An ordered list of rules for the field's own value.
    List(Vec<Declaration>),
    /// A nested object: schema options or a raw field map.
    Object(Object),
    /// A bare pass/fail callable.
    Predicate(Predicate),
    /// Any other value. Only meaningful as an option (a name, a flag).
    Scalar(Value),
}

impl Declaration {
    /// Returns the boolean held by a scalar declaration.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Declaration::Scalar(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string held by a scalar declaration.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Declaration::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the scalar value, if this is a scalar declaration.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Declaration::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested object, if this is an object declaration.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Declaration::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns true for scalar declarations.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Declaration::Scalar(_))
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Rule(rule) => match rule.as_schema() {
                Some(schema) => write!(f, "Rule({:?})", schema),
                None => f.write_str("Rule(..)"),
            },
            Declaration::List(items) => f.debug_tuple("List").field(items).finish(),
            Declaration::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Declaration::Predicate(p) => write!(f, "{:?}", p),
            Declaration::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
        }
    }
}

/// An insertion-ordered map of keys to declarations.
///
/// Entry order is declaration order, which is the order children are
/// evaluated in and therefore the order errors are reported in.
///
/// # Example
///
/// ```rust
/// use rulebound::{rule, Object, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new(
///     Object::new()
///         .with("name", "contact")
///         .with("schema", Object::new()
///             .with("name", vec![rule::required(), rule::min_len(3)])
///             .with("friends", Object::new()
///                 .with("isArray", true)
///                 .with("schema", Object::new().with("name", rule::required())))),
/// );
///
/// let errors = schema.errors(&json!({"name": "Al", "friends": [{}]}));
/// assert_eq!(errors[0].message(), "contact name must be a minimum of 3 long");
/// assert_eq!(errors[1].message(), "contact friends #1 name is required");
/// ```
#[derive(Clone, Default)]
pub struct Object {
    entries: IndexMap<String, Declaration>,
}

impl Object {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and returns self for chaining.
    ///
    /// Re-using a key replaces the earlier declaration in place.
    pub fn with(mut self, key: impl Into<String>, declaration: impl Into<Declaration>) -> Self {
        self.insert(key, declaration);
        self
    }

    /// Adds an entry, returning the declaration it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        declaration: impl Into<Declaration>,
    ) -> Option<Declaration> {
        self.entries.insert(key.into(), declaration.into())
    }

    /// Returns the declaration stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Declaration> {
        self.entries.get(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Declaration)> {
        self.entries.iter()
    }
}

impl IntoIterator for Object {
    type Item = (String, Declaration);
    type IntoIter = indexmap::map::IntoIter<String, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Declaration)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Declaration)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl From<Schema> for Declaration {
    fn from(schema: Schema) -> Self {
        Declaration::Rule(Arc::new(schema))
    }
}

impl From<FnRule> for Declaration {
    fn from(rule: FnRule) -> Self {
        Declaration::Rule(Arc::new(rule))
    }
}

impl From<RuleSet> for Declaration {
    fn from(rules: RuleSet) -> Self {
        Declaration::Rule(Arc::new(rules))
    }
}

impl From<Arc<dyn Rule>> for Declaration {
    fn from(rule: Arc<dyn Rule>) -> Self {
        Declaration::Rule(rule)
    }
}

impl From<Predicate> for Declaration {
    fn from(predicate: Predicate) -> Self {
        Declaration::Predicate(predicate)
    }
}

impl From<Object> for Declaration {
    fn from(object: Object) -> Self {
        Declaration::Object(object)
    }
}

impl<T: Into<Declaration>> From<Vec<T>> for Declaration {
    fn from(items: Vec<T>) -> Self {
        Declaration::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for Declaration {
    fn from(value: Value) -> Self {
        Declaration::Scalar(value)
    }
}

impl From<&str> for Declaration {
    fn from(s: &str) -> Self {
        Declaration::Scalar(Value::String(s.to_string()))
    }
}

impl From<String> for Declaration {
    fn from(s: String) -> Self {
        Declaration::Scalar(Value::String(s))
    }
}

impl From<bool> for Declaration {
    fn from(b: bool) -> Self {
        Declaration::Scalar(Value::Bool(b))
    }
}

impl From<i32> for Declaration {
    fn from(n: i32) -> Self {
        Declaration::Scalar(Value::from(n))
    }
}

impl From<u16> for Declaration {
    fn from(n: u16) -> Self {
        Declaration::Scalar(Value::from(n))
    }
}

impl From<i64> for Declaration {
    fn from(n: i64) -> Self {
        Declaration::Scalar(Value::from(n))
    }
}

impl From<f64> for Declaration {
    fn from(n: f64) -> Self {
        Declaration::Scalar(Value::from(n))
    }
}
