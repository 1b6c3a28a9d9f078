//! Error types for the client crate.

use std::path::PathBuf;
use std::time::Duration;

use hyper::body::Bytes;
use hyper::{HeaderMap, Response, StatusCode};
use railbook_core::{Body, CoreError, Envelope};

/// Message for HTTP 401.
pub const SESSION_EXPIRED: &str = "登录已过期，请重新登录";
/// Message for HTTP 403.
pub const FORBIDDEN: &str = "无权访问 (403)";
/// Message for HTTP 404.
pub const NOT_FOUND: &str = "请求接口不存在 (404)";
/// Message for HTTP 500.
pub const SERVER_ERROR: &str = "后端服务器报错 (500)";

/// Failures below HTTP semantics: connecting, timing out, building the request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// No complete response arrived within the configured timeout.
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// Connection refused, reset, DNS failure and similar.
    #[error("Network Error: {0}")]
    Network(String),

    /// The request could not be assembled (bad header value, bad URI).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors from reading or writing the stored session token.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The token file could not be read, written or removed.
    #[error("session store I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A thread panicked while holding the in-memory store lock.
    #[error("session store lock poisoned")]
    Poisoned,
}

/// A non-2xx response, kept whole for programmatic inspection.
#[derive(Debug, Clone)]
pub struct FailedResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
}

impl FailedResponse {
    /// The body decoded as an envelope, if the server sent one.
    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        match Body::parse(&self.body) {
            Ok(Body::Envelope(env)) => Some(env),
            _ => None,
        }
    }

    /// The body as lossy UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl From<Response<Bytes>> for FailedResponse {
    fn from(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self { status: parts.status, headers: parts.headers, body }
    }
}

/// Everything [`RequestClient`](crate::RequestClient) can reject a call with.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// HTTP 401. The stored token has been cleared.
    #[error("{}", SESSION_EXPIRED)]
    SessionExpired(FailedResponse),

    /// HTTP 403.
    #[error("{}", FORBIDDEN)]
    Forbidden(FailedResponse),

    /// HTTP 404.
    #[error("{}", NOT_FOUND)]
    NotFound(FailedResponse),

    /// HTTP 500.
    #[error("{}", SERVER_ERROR)]
    ServerError(FailedResponse),

    /// Any other non-2xx status.
    #[error("Request failed with status code {}", .0.status.as_u16())]
    Status(FailedResponse),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// HTTP 2xx, but the envelope code signals an application failure.
    #[error("{message}")]
    Business {
        code: i64,
        message: String,
        envelope: Envelope,
    },

    /// The response body was not the JSON the caller expected.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The session store failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The descriptor was rejected before sending.
    #[error(transparent)]
    Request(#[from] CoreError),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Classifies a non-2xx response by status.
    #[must_use]
    pub fn from_status(response: FailedResponse) -> Self {
        match response.status {
            StatusCode::UNAUTHORIZED => Self::SessionExpired(response),
            StatusCode::FORBIDDEN => Self::Forbidden(response),
            StatusCode::NOT_FOUND => Self::NotFound(response),
            StatusCode::INTERNAL_SERVER_ERROR => Self::ServerError(response),
            _ => Self::Status(response),
        }
    }

    /// The failed HTTP response, for status-classified errors.
    #[must_use]
    pub fn response(&self) -> Option<&FailedResponse> {
        match self {
            Self::SessionExpired(r)
            | Self::Forbidden(r)
            | Self::NotFound(r)
            | Self::ServerError(r)
            | Self::Status(r) => Some(r),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Returns `true` for HTTP 401.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }
}
