//! Scan configuration.

use astprop_parser::TestFileFormat;
use astprop_types::{PropError, Result};
use serde::{Deserialize, Serialize};

/// Where annotations live in a document and how test files are laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Member name of the annotation container on a node.
    pub annotation_member: String,
    /// Text member used when the container is itself an object.
    pub text_field: String,
    /// Test file layout.
    pub file_format: TestFileFormat,
}

impl ScanConfig {
    /// Configuration for documentation-style annotations:
    /// `{"documentation": "t1: path"}` or
    /// `{"documentation": {"text": "t1: path"}}`.
    pub fn standard() -> Self {
        Self {
            annotation_member: "documentation".into(),
            text_field: "text".into(),
            file_format: TestFileFormat::default(),
        }
    }

    /// Load a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PropError::Config(e.to_string()))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::standard()
    }
}
