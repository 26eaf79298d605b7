//! The conversation payload envelope and its validated decode step.

use crate::node::Mapping;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded conversation payload: the node mapping plus the pointer to
/// the tip of the active branch. All fields the upstream sent beyond
/// the ones named here ride along in `rest` and re-serialize untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationPayload {
    pub mapping: Mapping,
    pub current_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Outcome of probing an arbitrary JSON body for a conversation payload.
///
/// `NotApplicable` is not an error: it is the signal to hand the
/// original body back to the caller unmodified.
#[derive(Debug, Clone)]
pub enum PayloadProbe {
    Conversation(Box<ConversationPayload>),
    NotApplicable(Value),
}

impl ConversationPayload {
    /// Decide whether a JSON value is a conversation payload.
    ///
    /// Requires an object carrying a `mapping` object and a string
    /// current-node pointer (either spelling); anything else, including
    /// a value that has the fields but fails the typed decode, comes
    /// back as `NotApplicable` with the original value intact.
    pub fn probe(value: Value) -> PayloadProbe {
        let has_mapping = value.get("mapping").is_some_and(Value::is_object);
        let has_pointer = ["current_node", "currentNode"]
            .iter()
            .any(|key| value.get(*key).is_some_and(Value::is_string));
        if !has_mapping || !has_pointer {
            return PayloadProbe::NotApplicable(value);
        }

        // The pointer is one of the fields the rewrite overwrites, so
        // the camel spelling can be canonicalized up front.
        let mut value = value;
        if value.get("current_node").is_none() {
            if let Some(object) = value.as_object_mut() {
                if let Some(pointer) = object.remove("currentNode") {
                    object.insert("current_node".into(), pointer);
                }
            }
        }

        match ConversationPayload::deserialize(&value) {
            Ok(payload) => PayloadProbe::Conversation(Box::new(payload)),
            Err(_) => PayloadProbe::NotApplicable(value),
        }
    }

    /// The conversation identifier, under either spelling.
    pub fn conversation_ref(&self) -> Option<&str> {
        self.conversation_id.as_deref().or_else(|| {
            self.rest
                .get("conversationId")
                .and_then(Value::as_str)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probe_conversation() {
        let value = json!({
            "title": "A chat",
            "conversation_id": "conv-1",
            "current_node": "n2",
            "mapping": {
                "n1": {"message": null, "parent": null, "children": ["n2"]},
                "n2": {"message": {"author": {"role": "user"}}, "parent": "n1", "children": []}
            }
        });
        match ConversationPayload::probe(value) {
            PayloadProbe::Conversation(p) => {
                assert_eq!(p.current_node, "n2");
                assert_eq!(p.conversation_ref(), Some("conv-1"));
                assert_eq!(p.mapping.len(), 2);
                assert_eq!(p.rest["title"], "A chat");
            }
            PayloadProbe::NotApplicable(_) => panic!("expected conversation"),
        }
    }

    #[test]
    fn test_probe_camel_case_pointer() {
        let value = json!({
            "currentNode": "n1",
            "conversationId": "conv-9",
            "mapping": {"n1": {"message": null, "parent": null, "children": []}}
        });
        match ConversationPayload::probe(value) {
            PayloadProbe::Conversation(p) => {
                assert_eq!(p.current_node, "n1");
                assert_eq!(p.conversation_ref(), Some("conv-9"));
            }
            PayloadProbe::NotApplicable(_) => panic!("expected conversation"),
        }
    }

    #[test]
    fn test_probe_missing_current_node() {
        let value = json!({"mapping": {}});
        assert!(matches!(
            ConversationPayload::probe(value),
            PayloadProbe::NotApplicable(_)
        ));
    }

    #[test]
    fn test_probe_missing_mapping() {
        let value = json!({"current_node": "n1", "items": []});
        assert!(matches!(
            ConversationPayload::probe(value),
            PayloadProbe::NotApplicable(_)
        ));
    }

    #[test]
    fn test_probe_non_object() {
        assert!(matches!(
            ConversationPayload::probe(json!([1, 2, 3])),
            PayloadProbe::NotApplicable(_)
        ));
        assert!(matches!(
            ConversationPayload::probe(json!("text")),
            PayloadProbe::NotApplicable(_)
        ));
    }

    #[test]
    fn test_not_applicable_returns_value_unchanged() {
        let value = json!({"items": [1, 2, 3]});
        match ConversationPayload::probe(value.clone()) {
            PayloadProbe::NotApplicable(v) => assert_eq!(v, value),
            PayloadProbe::Conversation(_) => panic!("expected not-applicable"),
        }
    }

    #[test]
    fn test_foreign_fields_survive_round_trip() {
        let value = json!({
            "current_node": "n1",
            "mapping": {"n1": {"message": null, "parent": null, "children": []}},
            "moderation_results": [],
            "is_archived": false
        });
        let PayloadProbe::Conversation(payload) = ConversationPayload::probe(value) else {
            panic!("expected conversation");
        };
        let back = serde_json::to_value(&payload).unwrap();
        assert_eq!(back["moderation_results"], json!([]));
        assert_eq!(back["is_archived"], json!(false));
    }
}
