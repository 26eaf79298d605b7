//! Turnstile trimmer: reduces a conversation tree to its trailing turns.
//!
//! Stages:
//! 1. Active-path resolution (current node up to the root, cycle-safe)
//! 2. Turn segmentation (maximal same-role runs of visible nodes)
//! 3. Boundary selection under the turn budget
//! 4. Linear-chain reconstruction with the original root preserved
//! 5. Helper-node re-attachment (tool calls, attachments)

pub mod attach;
pub mod path;
pub mod trim;
pub mod turns;

pub use attach::{collect_helpers, MAX_HELPER_DEPTH};
pub use path::resolve_active_path;
pub use trim::{trim, TrimOutcome};
pub use turns::{count_visible_turns, segment_turns, TurnIndex};
