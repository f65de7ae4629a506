//! Primitive text conversion shared by both formats.
//!
//! Spans carry no type information. A primitive is only given a type when the
//! traversal asks for one, at which point the span text is parsed here. The
//! reverse direction renders primitives verbatim; floating point output uses
//! Rust's shortest round-trippable representation.

use crate::error::{Error, Result};
use crate::path::Path;
use std::fmt;
use std::str::FromStr;

/// The primitive a single-value container was asked to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Char,
    String,
    Nil,
}

impl ScalarKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
            ScalarKind::Nil => "nil",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `text` as `T`, reporting `kind` and `path` on failure.
pub(crate) fn parse<T: FromStr>(text: &str, kind: ScalarKind, path: &Path) -> Result<T> {
    text.parse::<T>().map_err(|_| Error::scalar(path, kind, text))
}

/// Booleans are the literal words `true` and `false`.
pub(crate) fn parse_bool(text: &str, path: &Path) -> Result<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::scalar(path, ScalarKind::Bool, text)),
    }
}

pub(crate) fn parse_char(text: &str, path: &Path) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(Error::scalar(path, ScalarKind::Char, text)),
    }
}

#[inline]
pub(crate) fn bool_to_string(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

/// Renders a float so that parsing the text yields the same value.
///
/// Integral values keep a trailing `.0`, so `1.0` is written as `1.0` rather
/// than `1`; both parse back to the same float.
pub(crate) fn float_to_string(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

pub(crate) fn f32_to_string(v: f32) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e7 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}
