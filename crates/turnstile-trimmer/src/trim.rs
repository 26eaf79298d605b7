//! Trim orchestration: boundary selection and tree reconstruction.

use crate::{attach, path, turns};
use std::collections::{HashMap, HashSet};
use turnstile_core::Mapping;

/// A reduced conversation tree plus the counters a status report needs.
#[derive(Debug, Clone)]
pub struct TrimOutcome {
    /// The rebuilt mapping: preserved root, retained chain, helpers.
    pub mapping: Mapping,
    /// Tip of the retained chain.
    pub current_node: String,
    /// Always the chronologically first node id of the original path,
    /// so the root identifier stays stable across repeated trims.
    pub root: String,
    /// Nodes on the retained raw sequence.
    pub kept_count: usize,
    /// Nodes on the full active path.
    pub total_count: usize,
    /// Visible turns in the retained sequence.
    pub visible_kept: usize,
    /// Visible turns on the full active path.
    pub visible_total: usize,
    /// Whether turns were cut away and can be requested back.
    pub has_older_messages: bool,
}

/// Reduce `mapping` to the last `turn_budget` turns of the active path
/// ending at `current_node`.
///
/// Returns `None` when there is nothing to safely trim: unknown current
/// node, empty path, or an empty retained sequence. The caller passes
/// the original payload through in that case. A budget below one is
/// treated as one. When the budget covers every turn nothing is cut but
/// the tree is still rebuilt, which normalizes side branches away.
pub fn trim(mapping: &Mapping, current_node: &str, turn_budget: u32) -> Option<TrimOutcome> {
    let full_path = path::resolve_active_path(mapping, current_node);
    if full_path.is_empty() {
        return None;
    }

    let index = turns::segment_turns(mapping, &full_path);
    let visible_total = index.total();
    let cut = index.cut_for_last(turn_budget.max(1) as usize);

    let kept = &full_path[cut..];
    if kept.is_empty() {
        return None;
    }
    let kept_set: HashSet<&str> = kept.iter().map(String::as_str).collect();

    let root_id = full_path[0].clone();
    let first_kept = kept[0].as_str();

    let helpers = attach::collect_helpers(mapping, kept);

    // Helpers grouped under the parent they re-attach to. The parent
    // must be in the retained-or-helper set; sorting makes the child
    // order independent of traversal and set iteration order.
    let mut attachments: HashMap<&str, Vec<&str>> = HashMap::new();
    for id in &helpers {
        let Some(node) = mapping.get(id) else { continue };
        let Some(parent_id) = node.parent.as_deref() else { continue };
        if !kept_set.contains(parent_id) && !helpers.contains(parent_id) {
            continue;
        }
        attachments.entry(parent_id).or_default().push(id.as_str());
    }
    for list in attachments.values_mut() {
        list.sort_unstable();
    }

    let mut reduced: Mapping = HashMap::with_capacity(kept.len() + helpers.len() + 1);

    // The pre-cut root survives as a synthetic ancestor: parent
    // cleared, single child pointing at the first retained node. When
    // nothing was cut it is simply the head of the chain.
    if root_id != first_kept {
        let mut root_node = mapping.get(&root_id)?.clone();
        root_node.parent = None;
        root_node.children = vec![first_kept.to_string()];
        reduced.insert(root_id.clone(), root_node);
    }

    // Retained nodes become a strict linear chain, with their helper
    // children appended after the chain edge.
    for (i, id) in kept.iter().enumerate() {
        let Some(original) = mapping.get(id) else { continue };
        let mut node = original.clone();

        node.parent = if i == 0 {
            (root_id != *id).then(|| root_id.clone())
        } else {
            Some(kept[i - 1].clone())
        };

        let mut children: Vec<String> = Vec::new();
        if let Some(next) = kept.get(i + 1) {
            children.push(next.clone());
        }
        if let Some(extra) = attachments.get(id.as_str()) {
            children.extend(extra.iter().map(|h| h.to_string()));
        }
        node.children = children;

        reduced.insert(id.clone(), node);
    }

    // Helpers keep their original parent link; their own children are
    // filtered down to the helper set. Insertion runs in rounds so a
    // helper never lands in the tree before its parent.
    for _ in 0..attach::MAX_HELPER_DEPTH {
        for (parent_id, ids) in &attachments {
            if !reduced.contains_key(*parent_id) {
                continue;
            }
            for id in ids {
                if reduced.contains_key(*id) {
                    continue;
                }
                let Some(original) = mapping.get(*id) else { continue };
                let mut node = original.clone();
                node.children.retain(|c| helpers.contains(c));
                reduced.insert((*id).to_string(), node);
            }
        }
    }

    let visible_kept = turns::count_visible_turns(mapping, kept);

    Some(TrimOutcome {
        current_node: kept[kept.len() - 1].clone(),
        root: root_id,
        kept_count: kept.len(),
        total_count: full_path.len(),
        visible_kept,
        visible_total,
        has_older_messages: visible_kept < visible_total,
        mapping: reduced,
    })
}
