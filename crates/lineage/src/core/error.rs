//! Error types for family tree layout and tree editing
//!
//! Hard failures are split from soft ones: a [`LayoutError`] means the caller
//! must fix the input (or the configuration) and retry, while a
//! [`LayoutWarning`] records a malformed entry that was skipped so the rest of
//! the tree could still be laid out.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MAX_DOCUMENT_DEPTH;

/// Failures that abort a layout run
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Tree too deep: person '{id}' sits at generation {depth}, limit is {max}")]
    DepthExceeded { id: String, depth: usize, max: usize },

    #[error("Invalid layout config: {message}")]
    InvalidConfig { message: String },

    #[error(
        "Tree too deep: family document nests past generation {max} at line {line}, column {column}"
    )]
    DocumentTooDeep {
        line: usize,
        column: usize,
        max: usize,
    },

    #[error("JSON error: {source}")]
    Json { source: serde_json::Error },
}

impl From<serde_json::Error> for LayoutError {
    /// The parser's nesting limit is reported as a depth failure, not a syntax error
    fn from(source: serde_json::Error) -> Self {
        if source.to_string().starts_with("recursion limit exceeded") {
            Self::DocumentTooDeep {
                line: source.line(),
                column: source.column(),
                max: MAX_DOCUMENT_DEPTH,
            }
        } else {
            Self::Json { source }
        }
    }
}

impl LayoutError {
    /// Create a new depth error
    pub fn depth_exceeded(id: impl Into<String>, depth: usize, max: usize) -> Self {
        Self::DepthExceeded {
            id: id.into(),
            depth,
            max,
        }
    }

    /// Create a new config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Failures of the tree editing operations in [`crate::family`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Person not found: {id}")]
    NotFound { id: String },

    #[error("Cannot remove the root person '{id}'")]
    CannotRemoveRoot { id: String },

    #[error("Duplicate person id: {id}")]
    DuplicateId { id: String },

    #[error("Person has no id")]
    MissingId,
}

impl TreeError {
    /// Create a new not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// A malformed entry that was skipped during layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LayoutWarning {
    /// `children[index]` of `parent_id` was `null`
    #[serde(rename_all = "camelCase")]
    NullChild { parent_id: String, index: usize },
    /// `children[index]` of `parent_id` had no id
    #[serde(rename_all = "camelCase")]
    MissingId { parent_id: String, index: usize },
    /// The same id was laid out more than once
    DuplicateId { id: String },
    /// The root itself had no id, nothing was drawn
    MalformedRoot,
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::NullChild { parent_id, index } => {
                write!(f, "null child at index {} of '{}'", index, parent_id)
            }
            LayoutWarning::MissingId { parent_id, index } => {
                write!(f, "child at index {} of '{}' has no id", index, parent_id)
            }
            LayoutWarning::DuplicateId { id } => write!(f, "duplicate person id '{}'", id),
            LayoutWarning::MalformedRoot => write!(f, "root person has no id"),
        }
    }
}
