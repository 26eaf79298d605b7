//! Conversation tree nodes and the predicates the trimmer relies on.
//!
//! Nodes arrive as JSON from an upstream we do not control, so every
//! struct keeps unrecognized fields in a flattened map and writes them
//! back out unchanged on re-serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Roles that never appear in the rendered conversation. Nodes carrying
/// one of these do not start turns and do not count toward turn totals.
pub const HIDDEN_ROLES: &[&str] = &["system", "tool", "thinking"];

/// Metadata keys that mark a node as carrying an attachment.
const ATTACHMENT_KEYS: &[&str] = &["attachments", "files", "image", "image_id"];

/// The full node set of one conversation, keyed by node id.
pub type Mapping = HashMap<String, Node>;

/// Author of a message. Only `role` matters here; everything else is
/// carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Message content. Only the content type classification is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// The message attached to a node, or absent for structural nodes
/// (the tree root typically has `message: null`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMessage {
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub content: Option<MessageContent>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// One unit in the conversation tree.
///
/// `children` is the full outgoing edge list; only one child is on the
/// active branch, the rest belong to edited/regenerated alternatives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub message: Option<NodeMessage>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Node {
    /// The author role, if one is resolvable.
    pub fn role(&self) -> Option<&str> {
        self.message.as_ref()?.author.as_ref()?.role.as_deref()
    }

    /// Whether this node shows up as a conversation message. Nodes
    /// without a resolvable role are never visible.
    pub fn is_visible(&self) -> bool {
        match self.role() {
            Some(role) => !HIDDEN_ROLES.contains(&role),
            None => false,
        }
    }

    /// Whether this node is a non-conversational helper: a tool
    /// invocation, an image part, or an attachment carrier.
    pub fn is_helper(&self) -> bool {
        if self.role() == Some("tool") {
            return true;
        }
        let Some(message) = self.message.as_ref() else {
            return false;
        };
        if let Some(content_type) = message.content.as_ref().and_then(|c| c.content_type.as_deref())
        {
            if content_type.contains("image") {
                return true;
            }
        }
        if let Some(metadata) = message.metadata.as_ref() {
            return ATTACHMENT_KEYS
                .iter()
                .any(|key| metadata.get(*key).is_some_and(|v| !v.is_null()));
        }
        false
    }
}
