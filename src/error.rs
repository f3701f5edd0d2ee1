//! Error taxonomy for pipeline operations.
//!
//! Every failure an operation can produce collapses into one of five
//! [`ErrorKind`]s. Alongside the kind, each [`Error`] carries a low-level
//! [`Condition`] tag describing what actually went wrong at the point of
//! failure. The condition is what the per-operation error normalizers match
//! on when rewriting raw errors into the fixed, operation-appropriate
//! messages; callers should branch on [`ErrorKind`] and treat the message as
//! display-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The public failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The operation name is not present in the registry.
    UnknownOperation,
    /// An argument (or the current collection) cannot be coerced to the
    /// shape an operation requires, e.g. a non-pair-shaped value where a
    /// mapping conversion was attempted.
    InvalidStructure,
    /// Index or key access attempted on a kind that does not support it.
    NotSubscriptable,
    /// The subscript target exists but the requested key or index is
    /// absent, or the container is empty where an element was required.
    KeyOrIndexMissing,
    /// The argument's type is fundamentally incompatible with the
    /// operation, e.g. a non-iterable passed to a set-algebra operation.
    TypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::UnknownOperation => "unknown operation",
            ErrorKind::InvalidStructure => "invalid structure",
            ErrorKind::NotSubscriptable => "not subscriptable",
            ErrorKind::KeyOrIndexMissing => "key or index missing",
            ErrorKind::TypeMismatch => "type mismatch",
        };
        f.write_str(s)
    }
}

/// Low-level failure condition, recorded where the error is raised.
///
/// Normalizers whitelist conditions, not kinds: two errors of the same kind
/// (say a missing key and an out-of-range index) rewrite to different
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Mapping lookup found no such key.
    MissingKey,
    /// Positional index past either end of a sequence.
    IndexOutOfRange,
    /// The value's kind has no positional or keyed access at all.
    NotIndexable,
    /// The value's kind does not support subscript assignment.
    NotAssignable,
    /// An element was not a two-field pair where one was required.
    NotPairShaped,
    /// The value cannot be iterated.
    NotIterable,
    /// The value's kind is not accepted by this operation.
    WrongKind,
    /// The collection was empty where at least one element was required.
    Empty,
    /// A single-pass iterator had no further elements.
    Exhausted,
    /// Anything else.
    Other,
}

/// A single pipeline failure: public kind, raising condition, message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    kind: ErrorKind,
    condition: Condition,
    message: String,
}

impl Error {
    pub fn new<M: Into<String>>(kind: ErrorKind, condition: Condition, message: M) -> Self {
        Self { kind, condition, message: message.into() }
    }

    /// The operation name was not found in the registry.
    pub fn unknown_operation(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownOperation,
            Condition::Other,
            format!("unknown operation '{name}'"),
        )
    }

    pub fn invalid_structure<M: Into<String>>(condition: Condition, message: M) -> Self {
        Self::new(ErrorKind::InvalidStructure, condition, message)
    }

    pub fn not_subscriptable<M: Into<String>>(condition: Condition, message: M) -> Self {
        Self::new(ErrorKind::NotSubscriptable, condition, message)
    }

    pub fn missing<M: Into<String>>(condition: Condition, message: M) -> Self {
        Self::new(ErrorKind::KeyOrIndexMissing, condition, message)
    }

    pub fn type_mismatch<M: Into<String>>(condition: Condition, message: M) -> Self {
        Self::new(ErrorKind::TypeMismatch, condition, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rebuild this error with a new kind and message, keeping the
    /// condition. Used by the error normalizers.
    pub(crate) fn rewrite<M: Into<String>>(self, kind: ErrorKind, message: M) -> Self {
        Self { kind, condition: self.condition, message: message.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let e = Error::missing(Condition::MissingKey, "iterable contains no key or index 0");
        assert_eq!(e.to_string(), "key or index missing: iterable contains no key or index 0");
    }

    #[test]
    fn rewrite_keeps_condition() {
        let e = Error::type_mismatch(Condition::NotIndexable, "raw").rewrite(
            ErrorKind::NotSubscriptable,
            "iterable is not of a subscriptable type",
        );
        assert_eq!(e.kind(), ErrorKind::NotSubscriptable);
        assert_eq!(e.condition(), Condition::NotIndexable);
    }
}
