use thiserror::Error;

use crate::tree::NodeKind;

/// Errors produced while building or navigating a form tree.
///
/// Build errors (`MalformedKey`, `KindConflict`, `EmptyValues`,
/// `LimitExceeded`) never abort a build; they are collected as diagnostics
/// on [`crate::ParseResult`] and the offending pair is skipped.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// An opening bracket without a matching close, or stray text between segments.
    #[error("malformed key \"{key}\": {reason}")]
    MalformedKey { key: String, reason: &'static str },

    /// A node already committed to one kind was asked to become another.
    #[error("{label}: cannot use {found} value as {expected}")]
    KindConflict {
        label: String,
        expected: NodeKind,
        found: NodeKind,
    },

    /// The key was supplied without any value.
    #[error("key \"{key}\" has no values")]
    EmptyValues { key: String },

    /// The key exceeds a configured index or depth cap.
    #[error("key \"{key}\": {reason}")]
    LimitExceeded { key: String, reason: String },

    #[error("{path} invalid key at pos:{position}, value is not a map")]
    NotAMap { path: String, position: usize },

    #[error("{path} invalid key at pos:{position}, value is not a list")]
    NotAList { path: String, position: usize },

    #[error("{label}: {kind} value is not a map or list")]
    NotAContainer { label: String, kind: NodeKind },

    #[error("{path} invalid key at pos:{position}, unknown key:{key}")]
    UnknownKey {
        path: String,
        position: usize,
        key: String,
    },

    #[error("{path} invalid key at pos:{position}, out of range:{index} (length {len})")]
    IndexOutOfRange {
        path: String,
        position: usize,
        index: usize,
        len: usize,
    },

    /// A dynamic path element was neither a string nor a non-negative integer.
    #[error("invalid key type at pos:{position}: {found}")]
    InvalidKeyType { position: usize, found: String },
}

impl FormError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            FormError::MalformedKey { .. } => "malformed-key",
            FormError::KindConflict { .. } => "kind-conflict",
            FormError::EmptyValues { .. } => "empty-values",
            FormError::LimitExceeded { .. } => "limit-exceeded",
            FormError::NotAMap { .. } => "not-a-map",
            FormError::NotAList { .. } => "not-a-list",
            FormError::NotAContainer { .. } => "not-a-container",
            FormError::UnknownKey { .. } => "unknown-key",
            FormError::IndexOutOfRange { .. } => "index-out-of-range",
            FormError::InvalidKeyType { .. } => "invalid-key-type",
        }
    }

    /// True for errors that cause a pair to be dropped during a build.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            FormError::MalformedKey { .. }
                | FormError::KindConflict { .. }
                | FormError::EmptyValues { .. }
                | FormError::LimitExceeded { .. }
        )
    }

    /// True for errors returned by path navigation and traversal.
    pub fn is_navigation_error(&self) -> bool {
        !self.is_build_error()
    }
}
