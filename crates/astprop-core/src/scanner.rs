//! Whole-document traversal.
//!
//! Walks the document breadth-first, finds every node carrying an
//! annotation container, and binds the first `testId: path` pair of that
//! annotation to a value resolved relative to the annotated node.

use crate::config::ScanConfig;
use crate::path::resolve;
use crate::store::ExpectationStore;
use astprop_parser::parse_pairs;
use astprop_types::{node_kind, scalar_text, AnnotationSource, Document, PropError, Result};
use serde_json::Value;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Members that identify a node in error messages.
const NODE_TYPE_MEMBER: &str = "nodeType";
const NODE_ID_MEMBER: &str = "id";

/// Counters from one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub nodes_visited: usize,
    pub annotations: usize,
}

/// Binds annotations found in a document to values in an
/// [`ExpectationStore`].
pub struct DocumentScanner<'cfg> {
    config: &'cfg ScanConfig,
}

impl<'cfg> DocumentScanner<'cfg> {
    pub fn new(config: &'cfg ScanConfig) -> Self {
        Self { config }
    }

    /// Scan `document` and record an obtained value for every annotation.
    ///
    /// Values from a previous scan are discarded first, so scanning the
    /// same document twice yields the same store. The first failure aborts
    /// the scan.
    pub fn scan(&self, document: &Document, store: &mut ExpectationStore) -> Result<ScanSummary> {
        store.reset_obtained();

        let mut summary = ScanSummary::default();
        let mut queue: VecDeque<&Value> = VecDeque::new();
        queue.push_back(document);

        while let Some(node) = queue.pop_front() {
            summary.nodes_visited += 1;
            match node {
                Value::Object(members) => {
                    for (name, member) in members {
                        if *name == self.config.annotation_member {
                            self.bind_annotation(node, member, store)?;
                            summary.annotations += 1;
                        } else {
                            queue.push_back(member);
                        }
                    }
                }
                Value::Array(elements) => queue.extend(elements),
                _ => {}
            }
        }

        info!(
            "Scanned {} nodes, bound {} annotations",
            summary.nodes_visited, summary.annotations
        );
        Ok(summary)
    }

    /// Parse the annotation held by `container` and resolve its path
    /// relative to `node`, the node carrying the annotation.
    fn bind_annotation(
        &self,
        node: &Value,
        container: &Value,
        store: &mut ExpectationStore,
    ) -> Result<()> {
        let text = AnnotationSource::from_node(container, &self.config.text_field).into_text();
        let mut pairs = parse_pairs(&text)?.into_iter();
        let Some(first) = pairs.next() else {
            return Err(PropError::EmptyAnnotation {
                node: node_label(node),
            });
        };
        if pairs.len() > 0 {
            debug!(
                "Ignoring {} extra annotation lines after {}",
                pairs.len(),
                first.key
            );
        }

        let (test_id, property) = (first.key, first.value);
        store.declare(&test_id, &property)?;

        let resolved = resolve(node, &property).ok_or_else(|| PropError::PropertyNotFound {
            test_id: test_id.clone(),
            path: property.clone(),
        })?;
        let value = scalar_text(resolved).ok_or_else(|| PropError::PropertyIsComposite {
            test_id: test_id.clone(),
            path: property.clone(),
            kind: node_kind(resolved).to_string(),
        })?;

        debug!("Resolved {} ({}) to {:?}", test_id, property, value);
        store.record(&test_id, value);
        Ok(())
    }
}

/// Short label for a node in error messages, e.g. `VariableDeclaration#12`.
///
/// Built from the node's type and id members only, so large subtrees are
/// never serialized. Nodes carrying neither fall back to their kind.
fn node_label(node: &Value) -> String {
    let node_type = node.get(NODE_TYPE_MEMBER).and_then(Value::as_str);
    let id = node.get(NODE_ID_MEMBER).and_then(scalar_text);
    match (node_type, id) {
        (Some(node_type), Some(id)) => format!("{node_type}#{id}"),
        (Some(node_type), None) => node_type.to_string(),
        (None, Some(id)) => format!("#{id}"),
        (None, None) => format!("<{}>", node_kind(node)),
    }
}
