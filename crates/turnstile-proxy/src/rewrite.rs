//! Replacement-response construction.

use crate::upstream::UpstreamResponse;
use axum::http::{header, HeaderValue};
use bytes::Bytes;
use turnstile_core::{ConversationPayload, Result};
use turnstile_trimmer::TrimOutcome;

/// Fold a trim outcome back into the payload and wrap it in a response
/// shaped like the original.
///
/// Only `mapping`, the current-node pointer, and `root` change; every
/// other payload field re-serializes as received. Headers are copied
/// minus `content-length` and `content-encoding` (the body changed)
/// and with the content type pinned to JSON.
pub fn rewrite_response(
    original: &UpstreamResponse,
    mut payload: ConversationPayload,
    outcome: TrimOutcome,
) -> Result<UpstreamResponse> {
    payload.mapping = outcome.mapping;
    payload.current_node = outcome.current_node;
    payload.root = Some(outcome.root);

    let body = serde_json::to_vec(&payload)?;

    let mut headers = original.headers.clone();
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::CONTENT_ENCODING);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );

    Ok(UpstreamResponse {
        status: original.status,
        headers,
        body: Bytes::from(body),
    })
}
