//! Expectation store.
//!
//! Holds one [`TestCase`] per test id, plus the order in which ids appear
//! in the expectation block. Only that order is rendered.

use astprop_parser::parse_pairs;
use astprop_types::{PropError, Result};
use std::collections::HashMap;
use tracing::warn;

/// Correlates a test id with its declared path and both values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCase {
    pub test_id: String,
    /// Dotted path declared by the annotation, once one was seen.
    pub property: Option<String>,
    /// Value from the expectation block. `None` for ids only found while
    /// scanning.
    pub expected: Option<String>,
    /// Value resolved from the document.
    pub obtained: Option<String>,
}

impl TestCase {
    fn new(test_id: &str) -> Self {
        Self {
            test_id: test_id.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpectationStore {
    cases: HashMap<String, TestCase>,
    order: Vec<String>,
}

impl ExpectationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `testId: expectedValue` lines.
    pub fn from_expectations(text: &str) -> Result<Self> {
        let mut store = Self::new();
        for pair in parse_pairs(text)? {
            store.insert_expectation(&pair.key, pair.value)?;
        }
        Ok(store)
    }

    /// Register an expected value. Each id may be listed only once.
    pub fn insert_expectation(&mut self, test_id: &str, expected: impl Into<String>) -> Result<()> {
        if self.cases.contains_key(test_id) {
            return Err(PropError::DuplicateExpectation {
                test_id: test_id.to_string(),
            });
        }
        let mut case = TestCase::new(test_id);
        case.expected = Some(expected.into());
        self.cases.insert(test_id.to_string(), case);
        self.order.push(test_id.to_string());
        Ok(())
    }

    /// Record the property path declared for `test_id`.
    ///
    /// Ids without an expectation are registered on first sight but never
    /// rendered; [`ExpectationStore::unexpected`] lists them.
    pub fn declare(&mut self, test_id: &str, property: &str) -> Result<()> {
        if !self.cases.contains_key(test_id) {
            warn!("Annotation {} ({}) has no recorded expectation", test_id, property);
        }
        let case = self
            .cases
            .entry(test_id.to_string())
            .or_insert_with(|| TestCase::new(test_id));
        if case.property.is_some() {
            return Err(PropError::DuplicateAnnotation {
                test_id: test_id.to_string(),
            });
        }
        case.property = Some(property.to_string());
        Ok(())
    }

    /// Store the value obtained for a declared test id.
    pub fn record(&mut self, test_id: &str, obtained: impl Into<String>) {
        if let Some(case) = self.cases.get_mut(test_id) {
            case.obtained = Some(obtained.into());
        }
    }

    /// Forget declared paths, obtained values and scan-discovered ids so
    /// the document can be scanned again.
    pub fn reset_obtained(&mut self) {
        self.cases.retain(|_, case| case.expected.is_some());
        for case in self.cases.values_mut() {
            case.property = None;
            case.obtained = None;
        }
    }

    pub fn get(&self, test_id: &str) -> Option<&TestCase> {
        self.cases.get(test_id)
    }

    /// Expected test cases in expectation order.
    pub fn iter(&self) -> impl Iterator<Item = &TestCase> + '_ {
        self.order.iter().filter_map(|id| self.cases.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids found while scanning that have no expectation, sorted.
    pub fn unexpected(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .cases
            .values()
            .filter(|c| c.expected.is_none())
            .map(|c| c.test_id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Expected ids no annotation was found for.
    pub fn unbound(&self) -> Vec<&str> {
        self.iter()
            .filter(|c| c.property.is_none())
            .map(|c| c.test_id.as_str())
            .collect()
    }
}
