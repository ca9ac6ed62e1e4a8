//! End-to-end property runs: test file → document → scan → report.
//!
//! Documents are JSON fixtures shaped like a serialized compiler AST, with
//! `documentation` members carrying the annotations.

use astprop_core::{
    render, DocumentScanner, ExpectationStore, JsonProducer, PropertyTest, RunPhase, ScanConfig,
    Side, TestOutcome,
};
use astprop_types::{Document, ErrorCategory, PropError};
use pretty_assertions::assert_eq;
use serde_json::json;

// ══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ══════════════════════════════════════════════════════════════════════════════

fn literal_document(value: &str) -> Document {
    json!({
        "nodeType": "SourceUnit",
        "nodes": [{
            "nodeType": "ContractDefinition",
            "name": "C",
            "documentation": {"nodeType": "StructuredDocumentation", "text": "contract: name"},
            "nodes": [{
                "nodeType": "VariableDeclaration",
                "documentation": "t1: literals.value",
                "literals": {"value": value},
                "typeDescriptions": {"typeString": "uint256"}
            }]
        }]
    })
}

fn test_file(document: &Document, expectations: &[&str]) -> String {
    let mut content = serde_json::to_string_pretty(document).unwrap();
    content.push_str("\n// ----\n");
    for line in expectations {
        content.push_str("// ");
        content.push_str(line);
        content.push('\n');
    }
    content
}

fn run(content: &str) -> (Result<TestOutcome, PropError>, String, PropertyTest) {
    let mut test = PropertyTest::from_test_file("literal.json", content, ScanConfig::default())
        .expect("test file should load");
    let mut out = Vec::new();
    let result = test.run(&JsonProducer, &mut out, "", false);
    (result, String::from_utf8(out).unwrap(), test)
}

// ══════════════════════════════════════════════════════════════════════════════
// Pass / mismatch
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn matching_value_passes() {
    let content = test_file(&literal_document("5"), &["t1: 5", "contract: C"]);
    let (result, output, test) = run(&content);
    assert_eq!(result.unwrap(), TestOutcome::Success);
    assert_eq!(output, "");
    assert_eq!(test.phase(), RunPhase::Reported);
}

#[test]
fn mismatching_value_is_a_diff_not_an_error() {
    let content = test_file(&literal_document("6"), &["t1: 5", "contract: C"]);
    let (result, output, _) = run(&content);
    assert_eq!(result.unwrap(), TestOutcome::Failure);
    assert_eq!(
        output,
        "Expected result:\n  t1: 5\n  contract: C\nObtained result:\n  t1: 6\n  contract: C\n"
    );
}

#[test]
fn renderings_differ_only_at_mismatching_line() {
    let config = ScanConfig::default();
    let mut store = ExpectationStore::from_expectations("t1: 5\ncontract: C\n").unwrap();
    DocumentScanner::new(&config)
        .scan(&literal_document("6"), &mut store)
        .unwrap();
    let expected = render(&store, Side::Expected);
    let obtained = render(&store, Side::Obtained);
    let diff: Vec<_> = expected
        .lines()
        .zip(obtained.lines())
        .filter(|(e, o)| e != o)
        .collect();
    assert_eq!(diff, vec![("t1: 5", "t1: 6")]);
}

#[test]
fn missing_annotation_renders_empty_obtained_value() {
    let content = test_file(&literal_document("5"), &["t1: 5", "contract: C", "t2: 7"]);
    let (result, output, test) = run(&content);
    assert_eq!(result.unwrap(), TestOutcome::Failure);
    assert!(output.contains("Obtained result:\n  t1: 5\n  contract: C\n  t2: \n"));
    assert!(output.ends_with("Missing annotations:\n  t2\n"));
    assert_eq!(test.store().unbound(), vec!["t2"]);
}

#[test]
fn missing_annotation_with_empty_expectation_fails() {
    let doc = json!({"documentation": "t1: a", "a": "1"});
    let (result, output, test) = run(&test_file(&doc, &["t1: 1", "t2:"]));
    assert_eq!(result.unwrap(), TestOutcome::Failure);
    assert_eq!(
        output,
        "Expected result:\n  t1: 1\n  t2: \nObtained result:\n  t1: 1\n  t2: \nMissing annotations:\n  t2\n"
    );
    assert_eq!(test.store().unbound(), vec!["t2"]);
}

#[test]
fn null_leaf_with_empty_expectation_passes() {
    let doc = json!({"documentation": "t1: value", "value": null});
    let (result, output, _) = run(&test_file(&doc, &["t1:"]));
    assert_eq!(result.unwrap(), TestOutcome::Success);
    assert_eq!(output, "");
}

#[test]
fn unexpected_annotation_is_registered_but_not_rendered() {
    let doc = json!({
        "documentation": "t1: a",
        "a": "1",
        "body": {"documentation": "extra: n", "n": "x"}
    });
    let (result, output, test) = run(&test_file(&doc, &["t1: 1"]));
    assert_eq!(result.unwrap(), TestOutcome::Success);
    assert_eq!(output, "");
    assert_eq!(test.store().unexpected(), vec!["extra"]);
    assert_eq!(
        test.store().get("extra").unwrap().obtained.as_deref(),
        Some("x")
    );
}

#[test]
fn numeric_and_boolean_scalars_render_as_text() {
    let doc = json!({
        "documentation": "id: id\nignored: this line",
        "id": 42,
        "children": [{"documentation": "constant: constant", "constant": false}]
    });
    let content = test_file(&doc, &["id: 42", "constant: false"]);
    let (result, _, _) = run(&content);
    assert_eq!(result.unwrap(), TestOutcome::Success);
}

// ══════════════════════════════════════════════════════════════════════════════
// Fatal errors
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn composite_property_aborts_without_report() {
    let doc = json!({"documentation": "t1: literals", "literals": {"value": "5"}});
    let content = test_file(&doc, &["t1: 5"]);
    let (result, output, test) = run(&content);
    let err = result.unwrap_err();
    assert!(matches!(err, PropError::PropertyIsComposite { .. }));
    assert_eq!(err.category(), ErrorCategory::Resolution);
    assert_eq!(output, "");
    assert_eq!(test.phase(), RunPhase::DocumentProduced);
    assert!(test.accepted_test_file().is_none());
}

#[test]
fn unresolved_property_aborts() {
    let doc = json!({"documentation": "t1: literals.kind", "literals": {"value": "5"}});
    let (result, output, _) = run(&test_file(&doc, &["t1: 5"]));
    assert!(matches!(result.unwrap_err(), PropError::PropertyNotFound { .. }));
    assert_eq!(output, "");
}

#[test]
fn producer_failure_aborts_before_scanning() {
    let (result, output, test) = run("contract C {}\n// ----\n// t1: 5\n");
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Producer);
    assert_eq!(output, "");
    assert_eq!(test.phase(), RunPhase::ExpectationsLoaded);
    assert!(test.document().is_none());
}

#[test]
fn malformed_expectations_fail_at_load() {
    let err = PropertyTest::from_test_file("a.json", "{}\n// ----\n// t1 5\n", ScanConfig::default())
        .err()
        .expect("load should fail");
    assert!(matches!(err, PropError::MalformedAnnotation { line: 1, .. }));
}

#[test]
fn duplicate_annotation_aborts() {
    let doc = json!([
        {"documentation": "t1: a", "a": 1},
        {"documentation": "t1: a", "a": 2}
    ]);
    let (result, _, _) = run(&test_file(&doc, &["t1: 1"]));
    assert!(matches!(result.unwrap_err(), PropError::DuplicateAnnotation { .. }));
}

// ══════════════════════════════════════════════════════════════════════════════
// Phases
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn steps_cannot_be_skipped() {
    let mut test = PropertyTest::new("a.json", "{}", ScanConfig::default());
    assert_eq!(test.phase(), RunPhase::Uninitialized);
    assert!(matches!(test.produce(&JsonProducer), Err(PropError::PhaseViolation { .. })));

    test.load_expectations("").unwrap();
    assert!(matches!(test.scan(), Err(PropError::PhaseViolation { .. })));
    assert!(matches!(test.report(), Err(PropError::PhaseViolation { .. })));

    test.produce(&JsonProducer).unwrap();
    assert_eq!(test.phase(), RunPhase::DocumentProduced);
    test.scan().unwrap();
    assert_eq!(test.phase(), RunPhase::Scanned);
    assert_eq!(test.report().unwrap().outcome(), TestOutcome::Success);
    assert!(matches!(test.load_expectations(""), Err(PropError::PhaseViolation { .. })));
}

#[test]
fn phase_violation_names_both_phases() {
    let mut test = PropertyTest::new("a.json", "{}", ScanConfig::default());
    let err = test.scan().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot run step in phase uninitialized, expected phase document-produced"
    );
}

#[test]
fn closure_producer_drives_a_run() {
    let mut test = PropertyTest::new("C.sol", "contract C {}", ScanConfig::default());
    test.load_expectations("name: C").unwrap();
    let compile = |_: &str, source: &str| -> Result<Document, String> {
        let name = source
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| "Parsing contract failed".to_string())?;
        Ok(json!({"nodeType": "ContractDefinition", "documentation": "name: name", "name": name}))
    };
    let mut out = Vec::new();
    assert_eq!(test.run(&compile, &mut out, "", true).unwrap(), TestOutcome::Success);
}

// ══════════════════════════════════════════════════════════════════════════════
// Accepting results & determinism
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn accepted_test_file_carries_obtained_values() {
    let content = test_file(&literal_document("6"), &["t1: 5", "contract: C"]);
    let (result, _, test) = run(&content);
    assert_eq!(result.unwrap(), TestOutcome::Failure);

    let accepted = test.accepted_test_file().unwrap();
    assert!(accepted.ends_with("// ----\n// t1: 6\n// contract: C\n"));

    let (result, output, _) = run(&accepted);
    assert_eq!(result.unwrap(), TestOutcome::Success);
    assert_eq!(output, "");
}

#[test]
fn rescanning_is_idempotent() {
    let config = ScanConfig::default();
    let scanner = DocumentScanner::new(&config);
    let doc = literal_document("5");
    let mut store = ExpectationStore::from_expectations("t1: 5\n").unwrap();

    scanner.scan(&doc, &mut store).unwrap();
    let first = render(&store, Side::Obtained);
    for i in 0..100 {
        scanner.scan(&doc, &mut store).unwrap();
        assert_eq!(first, render(&store, Side::Obtained), "Determinism failure at iteration {i}");
    }
    assert_eq!(first, "t1: 5\n");
    assert_eq!(store.unexpected(), vec!["contract"]);
}
