//! Active-path resolution.

use std::collections::HashSet;
use turnstile_core::Mapping;

/// Walk parent links from `start` to the tree root and return the node
/// ids in chronological (root-first) order.
///
/// A missing start node yields an empty path; the caller treats that as
/// "nothing to do". A repeated id ends the walk immediately, so a
/// malformed mapping with a parent cycle terminates within `mapping`
/// size steps instead of hanging the interception.
pub fn resolve_active_path(mapping: &Mapping, start: &str) -> Vec<String> {
    let mut path: Vec<&str> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut cursor = Some(start);

    while let Some(id) = cursor {
        let Some(node) = mapping.get(id) else { break };
        if !visited.insert(id) {
            break;
        }
        path.push(id);
        cursor = node.parent.as_deref();
    }

    path.reverse();
    path.into_iter().map(String::from).collect()
}
