//! Error types for CSV and XML encoding and decoding.
//!
//! Every failure is surfaced to the caller unchanged: the codec performs no
//! recovery or retries, and an error aborts the subtree that was being
//! processed. Errors that concern a particular container carry the [`Path`]
//! to it.
//!
//! ## Error Categories
//!
//! - **Input errors**: invalid UTF-8 or structurally malformed text
//! - **Key errors**: a keyed lookup outside the KeySet, or a row that is
//!   shorter than its KeySet
//! - **Scalar errors**: text that does not parse as the requested primitive
//! - **Sequence errors**: no header row, or a cursor advanced past the end
//! - **Shape errors**: compositions a format cannot represent, such as a
//!   record inside a table field
//!
//! ## Examples
//!
//! ```rust
//! use serde_csvxml::{csv, Error};
//!
//! let result: Result<u8, Error> = csv::from_str("abc");
//! assert!(matches!(result, Err(Error::ScalarDecodeFailure { .. })));
//! ```

use crate::path::Path;
use crate::scalar::ScalarKind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input bytes are not text, or a span is structurally malformed.
    #[error("Wrong input format: {0}")]
    WrongInputFormat(String),

    /// A keyed lookup for a key absent from the container's KeySet.
    #[error("Key \"{key}\" not found at {path}")]
    KeyNotFound { path: Path, key: String },

    /// The KeySet is longer than the fields available in the row or element set.
    #[error("Missing item at {path}: expected {expected} fields, found {found}")]
    MissingItem {
        path: Path,
        expected: usize,
        found: usize,
    },

    /// A primitive could not be parsed from its text.
    #[error("Unable to decode {kind} at {path} from {text:?}")]
    ScalarDecodeFailure {
        path: Path,
        kind: ScalarKind,
        text: String,
    },

    /// A sequence was requested over an empty span where a key row was expected.
    #[error("No keys found at {path}")]
    NoKeysFound { path: Path },

    /// A sequence cursor was advanced past its last element.
    #[error("Index exhausted at {path}: sequence has {count} elements")]
    IndexExhausted { path: Path, count: usize },

    /// A keyed or sequence container was requested inside a keyed container.
    #[error("Unsupported composition at {path}: {what} cannot be nested in a keyed container")]
    UnsupportedComposition { path: Path, what: &'static str },

    /// Descent went deeper than the configured limit.
    #[error("Depth limit of {limit} exceeded at {path}")]
    DepthLimitExceeded { path: Path, limit: usize },

    /// A serde shape with no representation in either format.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a wrong-input-format error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvxml::Error;
    ///
    /// let err = Error::wrong_input("tag without closing delimiter");
    /// assert!(err.to_string().contains("closing delimiter"));
    /// ```
    pub fn wrong_input<T: fmt::Display>(msg: T) -> Self {
        Error::WrongInputFormat(msg.to_string())
    }

    pub fn key_not_found(path: &Path, key: &str) -> Self {
        Error::KeyNotFound {
            path: path.clone(),
            key: key.to_string(),
        }
    }

    pub fn missing_item(path: &Path, expected: usize, found: usize) -> Self {
        Error::MissingItem {
            path: path.clone(),
            expected,
            found,
        }
    }

    /// Creates a scalar decoding error for `text` that is not a valid `kind`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvxml::{Error, Path, ScalarKind};
    ///
    /// let err = Error::scalar(&Path::root().field("age"), ScalarKind::U32, "abc");
    /// assert_eq!(err.to_string(), "Unable to decode u32 at $.age from \"abc\"");
    /// ```
    pub fn scalar(path: &Path, kind: ScalarKind, text: &str) -> Self {
        Error::ScalarDecodeFailure {
            path: path.clone(),
            kind,
            text: text.to_string(),
        }
    }

    pub fn no_keys(path: &Path) -> Self {
        Error::NoKeysFound { path: path.clone() }
    }

    pub fn exhausted(path: &Path, count: usize) -> Self {
        Error::IndexExhausted {
            path: path.clone(),
            count,
        }
    }

    pub fn unsupported_composition(path: &Path, what: &'static str) -> Self {
        Error::UnsupportedComposition {
            path: path.clone(),
            what,
        }
    }

    pub fn depth_exceeded(path: &Path, limit: usize) -> Self {
        Error::DepthLimitExceeded {
            path: path.clone(),
            limit,
        }
    }

    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The path of the container the error occurred in, if it is known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::KeyNotFound { path, .. }
            | Error::MissingItem { path, .. }
            | Error::ScalarDecodeFailure { path, .. }
            | Error::NoKeysFound { path }
            | Error::IndexExhausted { path, .. }
            | Error::UnsupportedComposition { path, .. }
            | Error::DepthLimitExceeded { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_include_path() {
        let path = Path::root().index(2).field("name");
        let err = Error::key_not_found(&path, "name");
        assert_eq!(err.to_string(), "Key \"name\" not found at $[2].name");
        assert_eq!(err.path(), Some(&path));

        let err = Error::exhausted(&Path::root(), 3);
        assert!(err.to_string().contains("3 elements"));
    }

    #[test]
    fn test_custom_has_no_path() {
        let err = <Error as serde::de::Error>::custom("boom");
        assert_eq!(err, Error::Custom("boom".to_string()));
        assert!(err.path().is_none());
    }
}
