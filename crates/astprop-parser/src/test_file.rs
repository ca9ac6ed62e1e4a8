//! Property test files.
//!
//! A test file holds the input for the document producer followed by a
//! delimiter line and the expected values, each on a commented line:
//!
//! ```text
//! contract C {
//!     /// t1: literals.value
//!     uint x = 5;
//! }
//! // ----
//! // t1: 5
//! ```

use astprop_types::{PropError, Result};
use serde::{Deserialize, Serialize};

/// Layout of a property test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestFileFormat {
    /// Line separating the source from the expectations.
    pub delimiter: String,
    /// Prefix carried by every expectation line.
    pub comment_prefix: String,
    /// Required file name suffix, if any.
    pub extension: Option<String>,
}

impl Default for TestFileFormat {
    fn default() -> Self {
        Self {
            delimiter: "// ----".into(),
            comment_prefix: "//".into(),
            extension: None,
        }
    }
}

/// A test file split into its source and expectation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
    name: String,
    source: String,
    expectations: String,
    format: TestFileFormat,
}

impl TestFile {
    /// Split `content` into source and expectations.
    ///
    /// A file without a delimiter has an empty expectation block.
    pub fn parse(
        name: impl Into<String>,
        content: &str,
        format: &TestFileFormat,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(ext) = &format.extension {
            if !name.ends_with(ext.as_str()) {
                return Err(PropError::InvalidTestFile {
                    name,
                    reason: format!("file name must end with {ext:?}"),
                });
            }
        }

        let mut offset = 0;
        let mut split = None;
        for line in content.split_inclusive('\n') {
            if line.trim_end() == format.delimiter {
                split = Some((offset, offset + line.len()));
                break;
            }
            offset += line.len();
        }

        let Some((source_end, expectations_start)) = split else {
            return Ok(Self {
                name,
                source: content.to_string(),
                expectations: String::new(),
                format: format.clone(),
            });
        };

        let mut expectations = String::new();
        for (idx, line) in content[expectations_start..].lines().enumerate() {
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                expectations.push('\n');
                continue;
            }
            let Some(rest) = trimmed.strip_prefix(format.comment_prefix.as_str()) else {
                return Err(PropError::InvalidTestFile {
                    name,
                    reason: format!(
                        "expectation line {} does not start with {:?}",
                        idx + 1,
                        format.comment_prefix
                    ),
                });
            };
            expectations.push_str(rest.strip_prefix(' ').unwrap_or(rest));
            expectations.push('\n');
        }

        Ok(Self {
            name,
            source: content[..source_end].to_string(),
            expectations,
            format: format.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input for the document producer.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The expectation block with comment prefixes removed.
    pub fn expectations(&self) -> &str {
        &self.expectations
    }

    /// Render the file with `expectations` replacing the current block.
    pub fn with_expectations(&self, expectations: &str) -> String {
        let mut out = self.source.clone();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&self.format.delimiter);
        out.push('\n');
        for line in expectations.lines() {
            out.push_str(&self.format.comment_prefix);
            if !line.is_empty() {
                out.push(' ');
                out.push_str(line);
            }
            out.push('\n');
        }
        out
    }
}
