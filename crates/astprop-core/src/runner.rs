//! Property test runs.
//!
//! A run moves through a fixed sequence of phases:
//!
//! ```text
//! Uninitialized → ExpectationsLoaded → DocumentProduced → Scanned → Reported
//! ```
//!
//! Each step checks the current phase, so no step can be skipped. Any
//! error aborts the run before a report exists.

use crate::config::ScanConfig;
use crate::producer::DocumentProducer;
use crate::report::{Report, TestOutcome};
use crate::scanner::DocumentScanner;
use crate::store::ExpectationStore;
use astprop_parser::TestFile;
use astprop_types::{Document, PropError, Result};
use std::fmt;
use std::io::Write;
use tracing::info;

/// Phase of a property test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Uninitialized,
    ExpectationsLoaded,
    DocumentProduced,
    Scanned,
    Reported,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::ExpectationsLoaded => write!(f, "expectations-loaded"),
            Self::DocumentProduced => write!(f, "document-produced"),
            Self::Scanned => write!(f, "scanned"),
            Self::Reported => write!(f, "reported"),
        }
    }
}

/// One property test: input source, expectations, and the run state.
pub struct PropertyTest {
    name: String,
    source: String,
    test_file: Option<TestFile>,
    config: ScanConfig,
    phase: RunPhase,
    store: ExpectationStore,
    document: Option<Document>,
    report: Option<Report>,
}

impl PropertyTest {
    /// Create a run for `source` with no expectations loaded yet.
    pub fn new(name: impl Into<String>, source: impl Into<String>, config: ScanConfig) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            test_file: None,
            config,
            phase: RunPhase::Uninitialized,
            store: ExpectationStore::new(),
            document: None,
            report: None,
        }
    }

    /// Parse a test file and load its expectation block.
    pub fn from_test_file(name: &str, content: &str, config: ScanConfig) -> Result<Self> {
        let file = TestFile::parse(name, content, &config.file_format)?;
        let mut test = Self::new(file.name(), file.source(), config);
        test.load_expectations(file.expectations())?;
        test.test_file = Some(file);
        Ok(test)
    }

    /// Load `testId: expectedValue` lines.
    pub fn load_expectations(&mut self, text: &str) -> Result<()> {
        self.expect_phase(RunPhase::Uninitialized)?;
        self.store = ExpectationStore::from_expectations(text)?;
        self.phase = RunPhase::ExpectationsLoaded;
        Ok(())
    }

    /// Build the document with `producer`.
    pub fn produce<P: DocumentProducer + ?Sized>(&mut self, producer: &P) -> Result<()> {
        self.expect_phase(RunPhase::ExpectationsLoaded)?;
        self.document = Some(producer.produce(&self.name, &self.source)?);
        self.phase = RunPhase::DocumentProduced;
        Ok(())
    }

    /// Scan the produced document for annotations.
    pub fn scan(&mut self) -> Result<()> {
        self.expect_phase(RunPhase::DocumentProduced)?;
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| self.violation(RunPhase::DocumentProduced))?;
        DocumentScanner::new(&self.config).scan(document, &mut self.store)?;
        self.phase = RunPhase::Scanned;
        Ok(())
    }

    /// Render both sides of the scanned store.
    pub fn report(&mut self) -> Result<&Report> {
        self.expect_phase(RunPhase::Scanned)?;
        self.phase = RunPhase::Reported;
        Ok(self.report.insert(Report::new(&self.store)))
    }

    /// Run every remaining step and compare the results.
    ///
    /// On mismatch the expected and obtained blocks are written to
    /// `stream`, see [`Report::check`].
    pub fn run<P, W>(
        &mut self,
        producer: &P,
        stream: &mut W,
        line_prefix: &str,
        formatted: bool,
    ) -> Result<TestOutcome>
    where
        P: DocumentProducer + ?Sized,
        W: Write,
    {
        self.produce(producer)?;
        self.scan()?;
        let outcome = self.report()?.check(stream, line_prefix, formatted)?;
        info!("Property test {} finished: {}", self.name, outcome);
        Ok(outcome)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn store(&self) -> &ExpectationStore {
        &self.store
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The test file with obtained values accepted, once reported.
    ///
    /// `None` for runs not created from a test file.
    pub fn accepted_test_file(&self) -> Option<String> {
        let report = self.report.as_ref()?;
        let file = self.test_file.as_ref()?;
        Some(report.updated_test_file(file))
    }

    fn expect_phase(&self, expected: RunPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.violation(expected))
        }
    }

    fn violation(&self, expected: RunPhase) -> PropError {
        PropError::PhaseViolation {
            expected: expected.to_string(),
            found: self.phase.to_string(),
        }
    }
}
