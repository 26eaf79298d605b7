//! Core types for Turnstile: the conversation tree model, the payload
//! envelope with its validated decode step, viewer settings, and errors.

pub mod error;
pub mod node;
pub mod payload;
pub mod settings;

pub use error::{Result, TurnstileError};
pub use node::{Author, Mapping, MessageContent, Node, NodeMessage, HIDDEN_ROLES};
pub use payload::{ConversationPayload, PayloadProbe};
pub use settings::TrimSettings;
