//! Addressing of nested containers.
//!
//! A [`Path`] records how a decoder or encoder descended from the document
//! root to the container currently being processed. It is only used for
//! diagnostics: every error that concerns a specific container carries the
//! path to it.
//!
//! ```rust
//! use serde_csvxml::{Path, PathSegment};
//!
//! let path = Path::root().child(PathSegment::Index(1)).child("name".into());
//! assert_eq!(path.to_string(), "$[1].name");
//! assert_eq!(path.len(), 2);
//! ```

use std::fmt;

/// One step of a [`Path`]: a field name or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// An immutable, ordered list of [`PathSegment`]s.
///
/// Descending never mutates a path in place: [`Path::child`] returns a new
/// path, so siblings never observe each other's segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path of the document root.
    #[must_use]
    pub fn root() -> Self {
        Path::default()
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Path { segments }
    }

    /// Shorthand for `child(PathSegment::Field(..))`.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        self.child(PathSegment::from(name))
    }

    /// Shorthand for `child(PathSegment::Index(..))`.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(Path::root().to_string(), "$");
        assert!(Path::root().is_empty());
    }

    #[test]
    fn test_child_does_not_touch_parent() {
        let parent = Path::root().field("items");
        let first = parent.index(0);
        let second = parent.index(1);

        assert_eq!(parent.len(), 1);
        assert_eq!(first.to_string(), "$.items[0]");
        assert_eq!(second.to_string(), "$.items[1]");
        assert_eq!(second.last(), Some(&PathSegment::Index(1)));
    }
}
