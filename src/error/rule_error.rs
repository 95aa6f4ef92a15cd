//! Validation error types.
//!
//! This module provides [`RuleError`] for single validation failures,
//! [`SchemaErrors`] for accumulating multiple errors and [`CheckError`] for
//! the fail-fast `check` entry point.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::SchemaPath;

/// Status code attached to errors when a rule does not choose its own.
pub const DEFAULT_STATUS: u16 = 400;

/// A single validation error with full context.
///
/// `RuleError` captures all relevant information about a validation failure:
/// - **reason**: Human-readable description of the failure (e.g. `is required`)
/// - **status_code**: Numeric classification of the failure (defaults to 400)
/// - **path**: Where in the data structure the error occurred
///
/// The rendered [`message`](RuleError::message) is the path labels followed by
/// the reason, space-joined.
///
/// # Example
///
/// ```rust
/// use rulebound::{RuleError, SchemaPath};
///
/// let error = RuleError::new(
///     SchemaPath::from_field("contact").push_field("name"),
///     "is required",
/// )
/// .with_status(422);
///
/// assert_eq!(error.status_code, 422);
/// assert_eq!(error.message(), "contact name is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    /// Human-readable reason for the failure.
    pub reason: String,
    /// Status classification of the failure.
    pub status_code: u16,
    /// The path to the value that failed validation.
    pub path: SchemaPath,
}

impl RuleError {
    /// Creates a new error with the given path and reason.
    ///
    /// The status code defaults to [`DEFAULT_STATUS`]. Use `with_status` to
    /// set a more specific one.
    pub fn new(path: SchemaPath, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            status_code: DEFAULT_STATUS,
            path,
        }
    }

    /// Sets the status code and returns self for chaining.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Renders the path labels followed by the reason, space-joined.
    pub fn message(&self) -> String {
        if self.path.is_root() {
            self.reason.clone()
        } else {
            format!("{} {}", self.path, self.reason)
        }
    }
}

impl Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for RuleError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<RuleError>();
    assert_sync::<RuleError>();
};

/// A non-empty collection of validation errors.
///
/// `SchemaErrors` wraps a `NonEmptyVec<RuleError>` to guarantee that at least
/// one error is present, which is what a `Validation` failure needs.
///
/// # Combining Errors
///
/// `SchemaErrors` implements `Semigroup`, allowing errors from multiple
/// validations to be combined in order:
///
/// ```rust
/// use rulebound::{RuleError, SchemaErrors, SchemaPath};
/// use stillwater::prelude::*;
///
/// let errors1 = SchemaErrors::single(
///     RuleError::new(SchemaPath::from_field("name"), "is required")
/// );
/// let errors2 = SchemaErrors::single(
///     RuleError::new(SchemaPath::from_field("age"), "must be a number")
/// );
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<RuleError>);

impl SchemaErrors {
    /// Creates a `SchemaErrors` containing a single error.
    pub fn single(error: RuleError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `SchemaErrors` from a `Vec<RuleError>`.
    ///
    /// Returns `None` if the vec is empty.
    pub fn from_vec(errors: Vec<RuleError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API consistency.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &RuleError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &RuleError {
        self.0.head()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &SchemaPath) -> Vec<&RuleError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors with the specified status code.
    pub fn with_status(&self, status_code: u16) -> Vec<&RuleError> {
        self.0
            .iter()
            .filter(|e| e.status_code == status_code)
            .collect()
    }

    /// Returns the rendered message of every error, in order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(RuleError::message).collect()
    }

    /// Converts this collection into a `Vec<RuleError>`.
    pub fn into_vec(self) -> Vec<RuleError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = RuleError;
    type IntoIter = std::vec::IntoIter<RuleError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a SchemaErrors {
    type Item = &'a RuleError;
    type IntoIter = Box<dyn Iterator<Item = &'a RuleError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

/// The failure raised by `check` when a value does not match.
///
/// Carries the reason and status of the first error, so callers who only
/// want fail-fast semantics can use `?` on the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .error.message())]
pub struct CheckError {
    error: RuleError,
}

impl CheckError {
    /// Returns the reason of the first failing rule.
    pub fn reason(&self) -> &str {
        &self.error.reason
    }

    /// Returns the status code of the first failing rule.
    pub fn status_code(&self) -> u16 {
        self.error.status_code
    }

    /// Returns the path of the first failing rule.
    pub fn path(&self) -> &SchemaPath {
        &self.error.path
    }

    /// Returns the underlying error record.
    pub fn into_inner(self) -> RuleError {
        self.error
    }
}

impl From<RuleError> for CheckError {
    fn from(error: RuleError) -> Self {
        Self { error }
    }
}
