//! Document producers.
//!
//! A producer turns the source part of a test file into the document that
//! gets scanned, e.g. by compiling it and serializing the AST.

use astprop_types::{Document, PropError, Result};
use std::fmt;

/// Builds a document from test input.
pub trait DocumentProducer {
    /// Produce a document for `source`, read from the file called `name`.
    ///
    /// Any failure is fatal for the run and must be reported as
    /// [`PropError::ProducerFailure`].
    fn produce(&self, name: &str, source: &str) -> Result<Document>;
}

/// Treats the source as an already serialized JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProducer;

impl DocumentProducer for JsonProducer {
    fn produce(&self, name: &str, source: &str) -> Result<Document> {
        serde_json::from_str(source)
            .map_err(|e| PropError::ProducerFailure(format!("{name}: invalid JSON: {e}")))
    }
}

impl<F, E> DocumentProducer for F
where
    F: Fn(&str, &str) -> std::result::Result<Document, E>,
    E: fmt::Display,
{
    fn produce(&self, name: &str, source: &str) -> Result<Document> {
        self(name, source).map_err(|e| PropError::ProducerFailure(format!("{name}: {e}")))
    }
}
