//! Transport abstraction.
//!
//! Allows swapping the HTTP stack (or a scripted fake in tests) without
//! changing envelope and error handling.

use std::time::Duration;

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::{Request, Response};

use crate::TransportError;

/// An outgoing request with a fully buffered body.
pub type HttpRequest = Request<Bytes>;

/// A received response with a fully buffered body.
pub type HttpResponse = Response<Bytes>;

/// Moves one request over the wire.
///
/// Implementations return any HTTP status as `Ok`; status classification is
/// the caller's job. Implementations must be `Send + Sync` so one client can
/// serve concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and buffer the full response.
    ///
    /// # Errors
    /// Returns [`TransportError::Timeout`] if no complete response arrives
    /// within `timeout`, and [`TransportError::Network`] on connection
    /// failures.
    async fn execute(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        (**self).execute(request, timeout).await
    }
}
