//! Error path representation for locating values in nested structures.
//!
//! This module provides [`SchemaPath`] and [`PathSegment`] types for building
//! the trail of field names, element positions and dictionary keys that leads
//! from a schema's root to the value that produced an error.

use std::fmt::{self, Display};

/// A segment of an error path.
///
/// Paths are built from segments that represent field access, array element
/// access or dictionary entry access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `name`, `friends`)
    Field(String),
    /// An array element, stored 0-based and rendered 1-based (`#1` is the first element)
    Index(usize),
    /// A dictionary entry, rendered as `#<key>`
    Key(String),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Creates a new dictionary key segment.
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }

    /// Returns the human-facing label of this segment.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "#{}", idx + 1),
            PathSegment::Key(key) => write!(f, "#{}", key),
        }
    }
}

/// A path to a value in a nested structure, as reported in errors.
///
/// `SchemaPath` represents locations like `contact friends #1 name` and
/// provides methods for building paths incrementally. Paths are never mutated
/// in place, so sibling branches of a recursive evaluation never observe each
/// other's extensions.
///
/// # Example
///
/// ```rust
/// use rulebound::SchemaPath;
///
/// let path = SchemaPath::from_field("contact")
///     .push_field("friends")
///     .push_index(0)
///     .push_field("name");
///
/// assert_eq!(path.to_string(), "contact friends #1 name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SchemaPath {
    segments: Vec<PathSegment>,
}

impl SchemaPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an array element segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with a dictionary key segment appended.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        self.push(PathSegment::Key(key.into()))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the rendered label of every segment, in order.
    pub fn labels(&self) -> Vec<String> {
        self.segments.iter().map(PathSegment::label).collect()
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for SchemaPath {
    fn from(name: &str) -> Self {
        Self::from_field(name)
    }
}

impl From<String> for SchemaPath {
    fn from(name: String) -> Self {
        Self::from_field(name)
    }
}

impl FromIterator<PathSegment> for SchemaPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
