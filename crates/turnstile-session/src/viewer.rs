//! Mutable state one viewer accumulates across interceptions.
//!
//! This is the only state shared between interceptions: the active
//! conversation identifier and the extra-turn budget, plus the
//! baseline accounting behind the "conversation grew past the limit"
//! warning. Every transition is an explicit method so the reset rules
//! live in one place.

use tracing::debug;
use turnstile_core::TrimSettings;

/// Emitted at most once per conversation, when the turns added since
/// the baseline reach the configured limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceWarning {
    pub new_turns: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    conversation_id: Option<String>,
    extra_turns: u32,
    baseline_turns: Option<u32>,
    turns_since_baseline: u32,
    warned: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn extra_turns(&self) -> u32 {
        self.extra_turns
    }

    /// Track which conversation an interception belongs to. Switching
    /// away from a previously seen conversation drops the extra budget
    /// and the baseline. Returns true when a switch happened.
    pub fn observe_conversation(&mut self, id: Option<&str>) -> bool {
        let Some(id) = id else { return false };
        if self.conversation_id.as_deref() == Some(id) {
            return false;
        }
        let switched = self.conversation_id.is_some();
        if switched {
            debug!(
                from = self.conversation_id.as_deref(),
                to = id,
                "conversation changed, resetting viewer state"
            );
            self.extra_turns = 0;
        }
        self.conversation_id = Some(id.to_string());
        self.baseline_turns = None;
        self.turns_since_baseline = 0;
        self.warned = false;
        switched
    }

    /// The turn budget the next trim should run with.
    pub fn effective_budget(&self, settings: &TrimSettings) -> u32 {
        settings.effective_budget(self.extra_turns)
    }

    /// A "load older" request. The budget grows by one limit's worth
    /// plus the turns that arrived since the baseline, so the widened
    /// window reaches past the new messages that pushed old ones out.
    /// Capped at the configured ceiling; returns the new extra amount.
    pub fn request_older(&mut self, settings: &TrimSettings) -> u32 {
        let grown = self.extra_turns + settings.message_limit + self.turns_since_baseline;
        self.extra_turns = settings.clamp_extra(grown);
        debug!(extra = self.extra_turns, "extra-turn budget increased");
        self.extra_turns
    }

    /// Record the visible-turn total an interception observed. The
    /// first observation of a conversation becomes the baseline; after
    /// that, growth past the limit produces a one-shot warning. Skipped
    /// entirely while an extra budget is active, since the viewer has
    /// already opted into a larger window.
    pub fn record_total(
        &mut self,
        total_turns: u32,
        settings: &TrimSettings,
    ) -> Option<PerformanceWarning> {
        if self.extra_turns > 0 {
            return None;
        }
        let Some(baseline) = self.baseline_turns else {
            self.baseline_turns = Some(total_turns);
            self.turns_since_baseline = 0;
            return None;
        };
        let new_turns = total_turns.saturating_sub(baseline);
        if new_turns > self.turns_since_baseline {
            self.turns_since_baseline = new_turns;
            if new_turns >= settings.message_limit && !self.warned {
                self.warned = true;
                debug!(new_turns, limit = settings.message_limit, "performance warning");
                return Some(PerformanceWarning {
                    new_turns,
                    limit: settings.message_limit,
                });
            }
        }
        None
    }

    /// Manual-refresh signal: back to a clean slate without changing
    /// conversations.
    pub fn manual_refresh(&mut self) {
        self.extra_turns = 0;
        self.baseline_turns = None;
        self.turns_since_baseline = 0;
        self.warned = false;
    }
}
