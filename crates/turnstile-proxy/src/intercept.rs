//! The interception state machine: observe → parse → trim → rewrite.

use crate::rewrite;
use crate::state::AppState;
use crate::upstream::UpstreamResponse;
use axum::http::{header, Method};
use serde_json::Value;
use tracing::{debug, warn};
use turnstile_core::{ConversationPayload, PayloadProbe};
use turnstile_session::TrimStatus;
use turnstile_trimmer::trim;

pub const DEFAULT_WATCH_PREFIX: &str = "/backend-api/";

/// Which outbound calls are interception candidates: reads under the
/// watched API namespace.
#[derive(Debug, Clone)]
pub struct WatchRule {
    prefix: String,
}

impl WatchRule {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        method == Method::GET && path.starts_with(&self.prefix)
    }
}

impl Default for WatchRule {
    fn default() -> Self {
        Self::new(DEFAULT_WATCH_PREFIX)
    }
}

fn is_json(response: &UpstreamResponse) -> bool {
    response
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}

/// Run one intercepted call through the state machine.
///
/// Every branch that cannot proceed hands the original response back
/// unmodified; the feature declines silently rather than risking a
/// broken conversation view.
pub fn process(
    state: &AppState,
    method: &Method,
    path: &str,
    response: UpstreamResponse,
) -> UpstreamResponse {
    let settings = state.settings_snapshot();
    if !settings.enabled || !state.watch.matches(method, path) {
        return response;
    }
    if !is_json(&response) {
        return response;
    }
    let Ok(value) = serde_json::from_slice::<Value>(&response.body) else {
        return response;
    };
    let payload = match ConversationPayload::probe(value) {
        PayloadProbe::Conversation(payload) => *payload,
        PayloadProbe::NotApplicable(_) => return response,
    };

    // A conversation switch must reset the extra budget before the
    // budget for this call is read.
    let (budget, extra) = {
        let mut viewer = state.viewer.lock().unwrap();
        viewer.observe_conversation(payload.conversation_ref());
        (viewer.effective_budget(&settings), viewer.extra_turns())
    };

    let Some(outcome) = trim(&payload.mapping, &payload.current_node, budget) else {
        return response;
    };
    let visible_total = outcome.visible_total;
    let visible_kept = outcome.visible_kept;
    let has_older = outcome.has_older_messages;

    match rewrite::rewrite_response(&response, payload, outcome) {
        Ok(rewritten) => {
            debug!(
                kept = visible_kept,
                total = visible_total,
                budget,
                extra,
                has_older,
                "rewrote conversation payload"
            );
            let warning = {
                let mut viewer = state.viewer.lock().unwrap();
                viewer.record_total(visible_total as u32, &settings)
            };
            if let Some(warning) = warning {
                warn!(
                    new_turns = warning.new_turns,
                    limit = warning.limit,
                    "conversation grew past the configured limit since baseline"
                );
            }
            state.reporter.publish(
                path,
                TrimStatus {
                    total_messages: visible_total,
                    rendered_messages: visible_kept,
                    extra_messages: extra,
                    has_older_messages: has_older,
                },
            );
            rewritten
        }
        Err(err) => {
            debug!(%err, "payload rewrite failed, passing original response through");
            response
        }
    }
}
