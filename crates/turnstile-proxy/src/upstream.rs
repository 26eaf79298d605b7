//! The seam between the interceptor and the real network.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use turnstile_core::{Result, TurnstileError};

/// A fully buffered upstream response. Conversation payloads are
/// single JSON documents, so buffering the body is the model here;
/// there is no streaming path through the interceptor.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Where intercepted calls actually go. One awaited request, no retry;
/// a transport failure surfaces as an error the proxy maps to 502.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(
        &self,
        method: Method,
        path_and_query: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse>;
}

/// Production upstream over reqwest.
pub struct HttpUpstream {
    client: reqwest::Client,
    base: String,
}

impl HttpUpstream {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into(),
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(
        &self,
        method: Method,
        path_and_query: &str,
        mut headers: HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse> {
        // The host belongs to the upstream URL, and bodies must arrive
        // unencoded for the interceptor to read them.
        headers.remove(header::HOST);
        headers.remove(header::ACCEPT_ENCODING);

        let url = format!("{}{}", self.base.trim_end_matches('/'), path_and_query);
        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|err| TurnstileError::Upstream(err.to_string()))?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| TurnstileError::Upstream(err.to_string()))?;

        Ok(UpstreamResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}
