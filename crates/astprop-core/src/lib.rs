//! astprop engine: checks annotated properties of a tree-shaped document.
//!
//! ```text
//! expectations → ExpectationStore ─┐
//! source → DocumentProducer → Document → DocumentScanner → Report → check
//! ```
//!
//! Nodes of the document carry annotations such as
//! `"documentation": "t1: literals.value"`. The scanner resolves each
//! annotated path relative to the node it decorates and records the value;
//! the report renders expected and obtained values side by side.

pub mod config;
pub mod path;
pub mod producer;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod store;

pub use config::ScanConfig;
pub use path::resolve;
pub use producer::{DocumentProducer, JsonProducer};
pub use report::{render, Report, Side, TestOutcome};
pub use runner::{PropertyTest, RunPhase};
pub use scanner::{DocumentScanner, ScanSummary};
pub use store::{ExpectationStore, TestCase};
