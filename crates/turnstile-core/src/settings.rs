//! Viewer-facing trim settings.

use serde::{Deserialize, Serialize};

const MIN_MESSAGE_LIMIT: u32 = 1;
const MAX_MESSAGE_LIMIT: u32 = 100;

/// How much history a viewer wants rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimSettings {
    /// Master switch; when off every intercepted call passes through.
    pub enabled: bool,
    /// Trailing turns to keep.
    pub message_limit: u32,
    /// Ceiling on the extra turns a viewer can accumulate via
    /// "load older" requests.
    pub max_extra_messages: u32,
    /// Verbose decision logging.
    pub debug: bool,
}

impl Default for TrimSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            message_limit: 15,
            max_extra_messages: 300,
            debug: false,
        }
    }
}

impl TrimSettings {
    /// Clamp fields into their allowed ranges.
    pub fn normalized(mut self) -> Self {
        self.message_limit = self.message_limit.clamp(MIN_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT);
        self
    }

    /// Cap a requested extra-turn amount at the configured ceiling.
    pub fn clamp_extra(&self, extra: u32) -> u32 {
        extra.min(self.max_extra_messages)
    }

    /// The turn budget an interception should run with: the configured
    /// limit plus the capped extra amount, never below one.
    pub fn effective_budget(&self, extra: u32) -> u32 {
        (self.message_limit + self.clamp_extra(extra)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = TrimSettings::default();
        assert!(s.enabled);
        assert_eq!(s.message_limit, 15);
        assert_eq!(s.max_extra_messages, 300);
        assert!(!s.debug);
    }

    #[test]
    fn test_normalize_clamps_limit() {
        let s = TrimSettings {
            message_limit: 0,
            ..Default::default()
        };
        assert_eq!(s.normalized().message_limit, 1);

        let s = TrimSettings {
            message_limit: 5000,
            ..Default::default()
        };
        assert_eq!(s.normalized().message_limit, 100);
    }

    #[test]
    fn test_clamp_extra() {
        let s = TrimSettings {
            max_extra_messages: 30,
            ..Default::default()
        };
        assert_eq!(s.clamp_extra(10), 10);
        assert_eq!(s.clamp_extra(500), 30);
    }

    #[test]
    fn test_effective_budget() {
        let s = TrimSettings {
            message_limit: 15,
            max_extra_messages: 300,
            ..Default::default()
        };
        assert_eq!(s.effective_budget(0), 15);
        assert_eq!(s.effective_budget(30), 45);
        assert_eq!(s.effective_budget(1000), 315);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let s: TrimSettings = serde_json::from_str(r#"{"message_limit": 7}"#).unwrap();
        assert_eq!(s.message_limit, 7);
        assert!(s.enabled);
        assert_eq!(s.max_extra_messages, 300);
    }
}
