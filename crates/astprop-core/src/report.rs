//! Result rendering and comparison.
//!
//! Both sides of a property test are rendered as `testId: value` lines in
//! the store's recorded order. The run passes when the two renderings are
//! byte-for-byte identical.

use crate::store::ExpectationStore;
use astprop_parser::TestFile;
use astprop_types::Result;
use std::fmt;
use std::io::Write;

const BOLD_CYAN: &str = "\x1b[1;36m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Which value of each test case to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Obtained,
}

/// Render one side of the store in expectation order.
///
/// Ids never bound render an empty obtained value. Ids discovered only
/// while scanning are not rendered on either side.
pub fn render(store: &ExpectationStore, side: Side) -> String {
    let mut out = String::new();
    for case in store.iter() {
        let value = match side {
            Side::Expected => case.expected.as_deref(),
            Side::Obtained => case.obtained.as_deref(),
        }
        .unwrap_or("");
        out.push_str(&case.test_id);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Outcome of comparing expected and obtained renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Success,
    Failure,
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// Expected and obtained renderings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    expected: String,
    obtained: String,
    /// Expected ids no annotation was found for.
    unbound: Vec<String>,
}

impl Report {
    pub fn new(store: &ExpectationStore) -> Self {
        Self {
            expected: render(store, Side::Expected),
            obtained: render(store, Side::Obtained),
            unbound: store.unbound().into_iter().map(String::from).collect(),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn obtained(&self) -> &str {
        &self.obtained
    }

    pub fn unbound(&self) -> &[String] {
        &self.unbound
    }

    /// Identical renderings pass, unless some expectation was never bound.
    pub fn outcome(&self) -> TestOutcome {
        if self.unbound.is_empty() && self.expected == self.obtained {
            TestOutcome::Success
        } else {
            TestOutcome::Failure
        }
    }

    /// Compare both renderings and, on mismatch, write them to `stream`.
    ///
    /// Every written line starts with `line_prefix`. With `formatted` set,
    /// headers are bold and obtained lines that differ from the expected
    /// line at the same position are red. Unbound ids follow the obtained
    /// block.
    pub fn check<W: Write>(
        &self,
        stream: &mut W,
        line_prefix: &str,
        formatted: bool,
    ) -> Result<TestOutcome> {
        let outcome = self.outcome();
        if outcome == TestOutcome::Success {
            return Ok(outcome);
        }

        let indent = format!("{line_prefix}  ");
        write_header(stream, line_prefix, "Expected result:", formatted)?;
        for line in self.expected.lines() {
            writeln!(stream, "{indent}{line}")?;
        }

        write_header(stream, line_prefix, "Obtained result:", formatted)?;
        let expected: Vec<&str> = self.expected.lines().collect();
        for (idx, line) in self.obtained.lines().enumerate() {
            if formatted && expected.get(idx) != Some(&line) {
                writeln!(stream, "{indent}{RED}{line}{RESET}")?;
            } else {
                writeln!(stream, "{indent}{line}")?;
            }
        }

        if !self.unbound.is_empty() {
            write_header(stream, line_prefix, "Missing annotations:", formatted)?;
            for test_id in &self.unbound {
                writeln!(stream, "{indent}{test_id}")?;
            }
        }
        Ok(outcome)
    }

    /// The test file with the obtained values accepted as expectations.
    pub fn updated_test_file(&self, file: &TestFile) -> String {
        file.with_expectations(&self.obtained)
    }
}

fn write_header<W: Write>(
    stream: &mut W,
    line_prefix: &str,
    title: &str,
    formatted: bool,
) -> Result<()> {
    if formatted {
        writeln!(stream, "{line_prefix}{BOLD_CYAN}{title}{RESET}")?;
    } else {
        writeln!(stream, "{line_prefix}{title}")?;
    }
    Ok(())
}
