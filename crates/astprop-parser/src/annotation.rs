//! `key: value` line parsing.
//!
//! Used for both sides of a property test: the expectation block
//! (`testId: expectedValue`) and the annotation text embedded in a
//! document node (`testId: property.path`).

use astprop_types::{PropError, Result};

/// A single `key: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationPair {
    pub key: String,
    pub value: String,
    /// 1-based line number within the parsed text.
    pub line: usize,
}

impl AnnotationPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>, line: usize) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line,
        }
    }
}

/// Parse a block of `key: value` lines.
///
/// Lines are separated by `\n`. Empty lines are skipped; a line holding
/// only whitespace is not empty and fails for lack of a `:`. Every other
/// line must contain exactly one `:`, and both trimmed fields must consist
/// of printable ASCII only. Output order follows input order.
pub fn parse_pairs(text: &str) -> Result<Vec<AnnotationPair>> {
    let mut pairs = Vec::new();

    for (idx, raw) in text.split('\n').enumerate() {
        let line = idx + 1;
        if raw.is_empty() {
            continue;
        }

        let Some((key, value)) = raw.split_once(':') else {
            return Err(PropError::malformed(line, raw, "expected exactly one ':', found none"));
        };
        if value.contains(':') {
            return Err(PropError::malformed(
                line,
                raw,
                "expected exactly one ':', found more",
            ));
        }
        let key = key.trim();
        let value = value.trim();

        for field in [key, value] {
            if let Some(c) = field.chars().find(|c| !is_printable(*c)) {
                return Err(PropError::malformed(
                    line,
                    raw,
                    format!("non-printable character {c:?}"),
                ));
            }
        }

        pairs.push(AnnotationPair::new(key, value, line));
    }

    Ok(pairs)
}

/// Printable ASCII, space included.
fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}
