//! Helper-node discovery for the retained set.

use std::collections::{HashSet, VecDeque};
use turnstile_core::Mapping;

/// How many levels below a retained node the helper search descends.
pub const MAX_HELPER_DEPTH: usize = 3;

/// Find helper nodes (tool calls, image parts, attachment carriers)
/// hanging under the retained set.
///
/// A node qualifies when it is a helper itself and every ancestor
/// between it and the nearest retained node is also a helper. Retained
/// ids are never part of the result. The result is a set: callers must
/// not depend on any visitation order.
pub fn collect_helpers(mapping: &Mapping, kept: &[String]) -> HashSet<String> {
    let kept_set: HashSet<&str> = kept.iter().map(String::as_str).collect();
    let mut helpers: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(&str, usize)> =
        kept.iter().map(|id| (id.as_str(), 0)).collect();

    while let Some((id, depth)) = queue.pop_front() {
        if depth >= MAX_HELPER_DEPTH {
            continue;
        }
        let Some(node) = mapping.get(id) else { continue };
        for child_id in &node.children {
            if kept_set.contains(child_id.as_str()) || helpers.contains(child_id.as_str()) {
                continue;
            }
            let Some(child) = mapping.get(child_id) else { continue };
            if !child.is_helper() {
                continue;
            }
            helpers.insert(child_id.clone());
            queue.push_back((child_id.as_str(), depth + 1));
        }
    }

    helpers
}
