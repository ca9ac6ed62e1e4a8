//! Shared types for astprop.
//!
//! This crate defines the document node model, the annotation source
//! union and the error taxonomy used by every astprop stage.

mod error;
mod node;

pub use error::{ErrorCategory, PropError};
pub use node::{node_kind, scalar_text, AnnotationSource, Document, NodeKind};

/// Result type used throughout astprop.
pub type Result<T> = std::result::Result<T, PropError>;
