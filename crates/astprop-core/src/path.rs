//! Dotted property path resolution.

use serde_json::Value;

/// Resolve a dotted identifier path such as `literals.value` below `node`.
///
/// Each segment names an object member. The last segment is matched before
/// any attempt to descend, so `a.a` against `{"a": {"a": "leaf"}}` yields
/// `"leaf"`. An empty path, an empty segment, a missing member or a
/// non-object on the way all yield `None`.
pub fn resolve<'a>(node: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = node;
    let mut rest = path;
    loop {
        match rest.split_once('.') {
            None => return current.as_object()?.get(rest),
            Some((segment, tail)) => {
                current = current.as_object()?.get(segment)?;
                rest = tail;
                if rest.is_empty() {
                    return None;
                }
            }
        }
    }
}
