use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error category, used by callers to tell a broken fixture apart from a
/// broken document producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// The annotation or expectation text itself is unusable.
    Annotation,
    /// A declared property path could not be turned into a flat value.
    Resolution,
    /// The external document producer failed.
    Producer,
    /// The test harness was driven incorrectly or could not do I/O.
    Harness,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annotation => write!(f, "annotation"),
            Self::Resolution => write!(f, "resolution"),
            Self::Producer => write!(f, "producer"),
            Self::Harness => write!(f, "harness"),
        }
    }
}

/// Every failure aborts the whole property run.
///
/// A value mismatch is not an error: it is reported as a diff by the
/// comparison step instead.
#[derive(Debug, Error)]
pub enum PropError {
    /// A `key: value` line broke the one-colon, printable-field grammar.
    #[error("malformed annotation at line {line}: {reason}: {text:?}")]
    MalformedAnnotation {
        line: usize,
        text: String,
        reason: String,
    },

    /// An annotation container was present but held no text.
    #[error("empty annotation on node {node}")]
    EmptyAnnotation { node: String },

    /// The declared path does not exist below the annotated node.
    #[error("could not find property `{path}` for test `{test_id}`")]
    PropertyNotFound { test_id: String, path: String },

    /// The declared path leads to an object or array.
    #[error("property `{path}` for test `{test_id}` is a composite {kind} node")]
    PropertyIsComposite {
        test_id: String,
        path: String,
        kind: String,
    },

    /// The document producer could not build a document.
    #[error("document producer failed: {0}")]
    ProducerFailure(String),

    #[error("invalid test file {name:?}: {reason}")]
    InvalidTestFile { name: String, reason: String },

    #[error("test `{test_id}` is listed more than once in the expectations")]
    DuplicateExpectation { test_id: String },

    #[error("test `{test_id}` is annotated on more than one node")]
    DuplicateAnnotation { test_id: String },

    /// A run step was invoked out of order.
    #[error("cannot run step in phase {found}, expected phase {expected}")]
    PhaseViolation { expected: String, found: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

impl PropError {
    /// Create a [`PropError::MalformedAnnotation`].
    pub fn malformed(line: usize, text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAnnotation {
            line,
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Get the category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedAnnotation { .. }
            | Self::EmptyAnnotation { .. }
            | Self::DuplicateExpectation { .. }
            | Self::DuplicateAnnotation { .. } => ErrorCategory::Annotation,
            Self::PropertyNotFound { .. } | Self::PropertyIsComposite { .. } => {
                ErrorCategory::Resolution
            }
            Self::ProducerFailure(_) => ErrorCategory::Producer,
            Self::InvalidTestFile { .. }
            | Self::PhaseViolation { .. }
            | Self::Config(_)
            | Self::Io(_) => ErrorCategory::Harness,
        }
    }
}
