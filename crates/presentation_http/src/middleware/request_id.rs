//! Request correlation middleware
//!
//! Every request runs inside an `http_request` span carrying a request id.
//! A caller supplied `X-Request-Id` is kept when it is a UUID, otherwise a
//! fresh v7 UUID is generated. The id is echoed on the response.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{body::Body, extract::Request, http::header::HeaderValue, response::Response};
use tower::{Layer, Service};
use tracing::{Instrument, field};
use uuid::Uuid;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Layer that tags requests with a correlation id
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`]
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let request_id = RequestId::from_header(request.headers().get(REQUEST_ID_HEADER));
        request.extensions_mut().insert(request_id);

        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
            status = field::Empty,
        );

        // Take the service that was driven to readiness, leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                tracing::Span::current().record("status", response.status().as_u16());
                if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Correlation id of the current request
///
/// Available to handlers as a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Reuse a UUID header value or generate a new id
    fn from_header(value: Option<&HeaderValue>) -> Self {
        let id = value
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .unwrap_or_else(Uuid::now_v7);
        Self(id)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
