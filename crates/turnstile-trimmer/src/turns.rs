//! Turn segmentation over the chronological active path.
//!
//! A turn is a maximal run of consecutive visible nodes sharing the
//! same author role. Multiple nodes from one role render as a single
//! bubble, so turns are the unit the budget counts.

use turnstile_core::Mapping;

/// Positions in the chronological sequence where turns begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnIndex {
    starts: Vec<usize>,
}

/// Scan the path once and record every index where a visible node's
/// role differs from the previous visible role.
pub fn segment_turns(mapping: &Mapping, path: &[String]) -> TurnIndex {
    let mut starts = Vec::new();
    let mut last_role: Option<&str> = None;

    for (i, id) in path.iter().enumerate() {
        let Some(node) = mapping.get(id) else { continue };
        if !node.is_visible() {
            continue;
        }
        let role = node.role().unwrap_or_default();
        if last_role != Some(role) {
            starts.push(i);
            last_role = Some(role);
        }
    }

    TurnIndex { starts }
}

impl TurnIndex {
    /// Total number of visible turns.
    pub fn total(&self) -> usize {
        self.starts.len()
    }

    /// Index in the chronological sequence where the last `n` turns
    /// begin. Returns 0 when `n` covers every turn (nothing to cut).
    /// `n` is treated as at least one turn.
    pub fn cut_for_last(&self, n: usize) -> usize {
        let n = n.max(1);
        if self.total() <= n {
            0
        } else {
            self.starts[self.total() - n]
        }
    }

    /// The raw turn-start positions.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }
}

/// Count visible turns over an id sequence. Used to recompute the kept
/// count after reconstruction so the reported number matches what a
/// renderer will actually show.
pub fn count_visible_turns(mapping: &Mapping, ids: &[String]) -> usize {
    let mut count = 0;
    let mut last_role: Option<&str> = None;

    for id in ids {
        let Some(node) = mapping.get(id) else { continue };
        if !node.is_visible() {
            continue;
        }
        let role = node.role().unwrap_or_default();
        if last_role != Some(role) {
            count += 1;
            last_role = Some(role);
        }
    }

    count
}
