//! The shared request client.
//!
//! Every service call goes through [`RequestClient::send`] (or its typed
//! variants), which:
//! 1. attaches the stored session token as `Authorization: Bearer <token>`
//! 2. classifies non-2xx statuses, clearing the token on 401
//! 3. unwraps the `{ code, message, data }` envelope of structured responses
//! 4. reports every rejection to the [`Notifier`] exactly once
//!
//! Business failures (2xx with a non-success envelope code) are rejected as
//! [`ClientError::Business`], which still carries the whole envelope.
//! Nothing is retried.

use std::fmt;
use std::sync::Arc;

use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Request, StatusCode};
use railbook_core::{Body, Method, RequestDescriptor};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{
    ClientConfig, ClientError, FailedResponse, HyperTransport, Notifier, SessionStore,
    TransportError,
};

/// Outcome of a successful [`RequestClient::send`].
#[derive(Debug)]
pub enum Reply {
    /// Unwrapped envelope payload, or a non-envelope JSON body as received.
    Data(Value),
    /// Untouched response of a blob request.
    Raw(HttpResponse),
}

impl Reply {
    /// The structured payload, if this is not a blob reply.
    #[must_use]
    pub fn into_data(self) -> Option<Value> {
        match self {
            Reply::Data(value) => Some(value),
            Reply::Raw(_) => None,
        }
    }

    /// The raw response, if this is a blob reply.
    #[must_use]
    pub fn into_raw(self) -> Option<HttpResponse> {
        match self {
            Reply::Raw(response) => Some(response),
            Reply::Data(_) => None,
        }
    }
}

/// Booking API client.
///
/// Stateless per call; the only shared state is the injected session store.
/// Safe to share behind an `Arc` across tasks.
pub struct RequestClient<T = HyperTransport> {
    transport: T,
    config: ClientConfig,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl RequestClient<HyperTransport> {
    /// Create a client over a fresh [`HyperTransport`].
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if `config.base_url` is not an absolute URL.
    pub fn connect(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        Self::new(HyperTransport::new(), config, session, notifier)
    }
}

impl<T: Transport> RequestClient<T> {
    /// Create a client over `transport`.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if `config.base_url` is not an absolute URL.
    pub fn new(
        transport: T,
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("base URL {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL {:?} cannot carry paths",
                config.base_url
            )));
        }
        Ok(Self { transport, config, base_url, session, notifier })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The injected session store.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Perform one call.
    ///
    /// Resolves with the unwrapped payload for structured responses and with
    /// the untouched response for blob requests.
    ///
    /// # Errors
    /// Any [`ClientError`]; the user has already been notified of it.
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<Reply, ClientError> {
        let result = match self.exchange(descriptor).await {
            Ok(response) if descriptor.is_blob() => Ok(Reply::Raw(response)),
            Ok(response) => self.unwrap_body(response.body()).map(Reply::Data),
            Err(err) => Err(err),
        };
        self.observe(descriptor, result)
    }

    /// Perform a structured call and deserialize the payload into `R`.
    ///
    /// The descriptor's response kind is ignored.
    ///
    /// # Errors
    /// Any [`ClientError`]; [`ClientError::Decode`] if the payload does not
    /// fit `R`. The user has already been notified.
    pub async fn fetch<R: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<R, ClientError> {
        let result = self
            .exchange(descriptor)
            .await
            .and_then(|response| self.unwrap_body(response.body()))
            .and_then(|payload| serde_json::from_value(payload).map_err(ClientError::from));
        self.observe(descriptor, result)
    }

    /// Perform a call as a blob request and return the raw response.
    ///
    /// # Errors
    /// Transport and status errors as for [`send`](Self::send).
    pub async fn download(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, ClientError> {
        let descriptor = descriptor.clone().blob();
        let result = self.exchange(&descriptor).await;
        self.observe(&descriptor, result)
    }

    /// Absolute URL a descriptor is sent to.
    ///
    /// Extra segments are percent-encoded one by one, query values are
    /// form-encoded.
    ///
    /// # Errors
    /// Returns [`ClientError::Request`] if the descriptor path is not rooted.
    pub fn url_for(&self, descriptor: &RequestDescriptor) -> Result<Url, ClientError> {
        descriptor.validate()?;
        let mut url = self.base_url.clone();
        let path = format!("{}{}", self.base_url.path().trim_end_matches('/'), descriptor.path);
        url.set_path(&path);
        if !descriptor.segments.is_empty() {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ClientError::Config(format!("base URL {:?} cannot carry paths", self.config.base_url))
            })?;
            segments.pop_if_empty().extend(&descriptor.segments);
        }
        if !descriptor.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &descriptor.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn exchange(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, ClientError> {
        let request = self.build_request(descriptor)?;
        debug!(method = %descriptor.method, uri = %request.uri(), "sending request");

        let response = self.transport.execute(request, self.config.timeout).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
        }
        Err(ClientError::from_status(FailedResponse::from(response)))
    }

    fn build_request(&self, descriptor: &RequestDescriptor) -> Result<HttpRequest, ClientError> {
        let url = self.url_for(descriptor)?;
        let accept = if descriptor.is_blob() { "*/*" } else { "application/json" };
        let mut builder = Request::builder()
            .method(http_method(descriptor.method))
            .uri(url.as_str())
            .header(ACCEPT, accept);

        if let Some(token) = self.session.get()? {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                TransportError::InvalidRequest(format!("session token is not a valid header: {e}"))
            })?;
            builder = builder.header(AUTHORIZATION, value);
        }

        let body = match &descriptor.body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Bytes::from(serde_json::to_vec(json)?)
            }
            None => Bytes::new(),
        };

        builder
            .body(body)
            .map_err(|e| ClientError::from(TransportError::InvalidRequest(e.to_string())))
    }

    fn unwrap_body(&self, body: &[u8]) -> Result<Value, ClientError> {
        match Body::parse(body)? {
            Body::Envelope(envelope) if envelope.is_success(&self.config.success_codes) => {
                Ok(envelope.into_data())
            }
            Body::Envelope(envelope) => Err(ClientError::Business {
                code: envelope.code,
                message: envelope.message_or_default().to_owned(),
                envelope,
            }),
            Body::Bare(value) => Ok(value),
        }
    }

    /// Clear the token after a 401. Idempotent; other in-flight calls keep
    /// the headers they were built with.
    fn expire_session(&self) {
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "failed to clear session token after 401");
        }
    }

    fn observe<V>(
        &self,
        descriptor: &RequestDescriptor,
        result: Result<V, ClientError>,
    ) -> Result<V, ClientError> {
        if let Err(err) = &result {
            warn!(
                method = %descriptor.method,
                path = %descriptor.path,
                status = ?err.status(),
                error = %err,
                "request rejected"
            );
            self.notifier.notify_error(&err.to_string());
            if err.is_session_expired() {
                if let Some(login_url) = &self.config.login_url {
                    self.notifier.login_required(login_url);
                }
            }
        }
        result
    }
}

impl<T> fmt::Debug for RequestClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

fn http_method(method: Method) -> hyper::Method {
    match method {
        Method::Get => hyper::Method::GET,
        Method::Post => hyper::Method::POST,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use hyper::Response;
    use serde_json::json;

    use super::*;
    use crate::error::{FORBIDDEN, NOT_FOUND, SERVER_ERROR, SESSION_EXPIRED};
    use crate::{MemorySessionStore, SessionError};

    #[derive(Debug, Clone)]
    struct Seen {
        method: hyper::Method,
        uri: String,
        authorization: Option<String>,
        content_type: Option<String>,
        body: Bytes,
    }

    type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

    struct Scripted {
        respond: Box<Responder>,
        seen: Mutex<Vec<Seen>>,
    }

    impl Scripted {
        fn new(
            respond: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
        ) -> Self {
            Self { respond: Box::new(respond), seen: Mutex::new(Vec::new()) }
        }

        fn json(status: u16, body: &'static str) -> Self {
            Self::new(move |_| Ok(response(status, body)))
        }

        fn seen(&self) -> Vec<Seen> {
            match self.seen.lock() {
                Ok(seen) => seen.clone(),
                Err(e) => panic!("seen lock poisoned: {e}"),
            }
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn execute(
            &self,
            request: HttpRequest,
            _timeout: Duration,
        ) -> Result<HttpResponse, TransportError> {
            let header = |name: hyper::header::HeaderName| {
                request.headers().get(name).and_then(|v: &HeaderValue| v.to_str().ok()).map(str::to_owned)
            };
            let seen = Seen {
                method: request.method().clone(),
                uri: request.uri().to_string(),
                authorization: header(AUTHORIZATION),
                content_type: header(CONTENT_TYPE),
                body: request.body().clone(),
            };
            match self.seen.lock() {
                Ok(mut all) => all.push(seen),
                Err(e) => panic!("seen lock poisoned: {e}"),
            }
            (self.respond)(&request)
        }
    }

    #[derive(Default)]
    struct Recording {
        errors: Mutex<Vec<String>>,
        logins: Mutex<Vec<String>>,
    }

    impl Recording {
        fn errors(&self) -> Vec<String> {
            match self.errors.lock() {
                Ok(e) => e.clone(),
                Err(e) => panic!("lock poisoned: {e}"),
            }
        }

        fn logins(&self) -> Vec<String> {
            match self.logins.lock() {
                Ok(l) => l.clone(),
                Err(e) => panic!("lock poisoned: {e}"),
            }
        }
    }

    impl Notifier for Recording {
        fn notify_error(&self, message: &str) {
            if let Ok(mut errors) = self.errors.lock() {
                errors.push(message.to_owned());
            }
        }

        fn login_required(&self, login_url: &str) {
            if let Ok(mut logins) = self.logins.lock() {
                logins.push(login_url.to_owned());
            }
        }
    }

    /// Memory store that counts `clear` calls.
    #[derive(Default)]
    struct CountingStore {
        inner: MemorySessionStore,
        clears: AtomicUsize,
    }

    impl SessionStore for CountingStore {
        fn get(&self) -> Result<Option<String>, SessionError> {
            self.inner.get()
        }

        fn set(&self, token: &str) -> Result<(), SessionError> {
            self.inner.set(token)
        }

        fn clear(&self) -> Result<(), SessionError> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            self.inner.clear()
        }
    }

    fn response(status: u16, body: &'static str) -> HttpResponse {
        match Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from_static(body.as_bytes()))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build response: {e}"),
        }
    }

    struct Harness {
        transport: Arc<Scripted>,
        store: Arc<CountingStore>,
        notifier: Arc<Recording>,
        client: RequestClient<Arc<Scripted>>,
    }

    fn harness_with(transport: Scripted, token: Option<&str>, config: ClientConfig) -> Harness {
        let transport = Arc::new(transport);
        let store = Arc::new(CountingStore::default());
        if let Some(token) = token {
            if let Err(e) = store.set(token) {
                panic!("set token failed: {e}");
            }
        }
        let notifier = Arc::new(Recording::default());
        let client = match RequestClient::new(
            Arc::clone(&transport),
            config,
            store.clone(),
            notifier.clone(),
        ) {
            Ok(c) => c,
            Err(e) => panic!("client construction failed: {e}"),
        };
        Harness { transport, store, notifier, client }
    }

    fn harness(transport: Scripted, token: Option<&str>) -> Harness {
        harness_with(transport, token, ClientConfig::default())
    }

    fn passengers() -> RequestDescriptor {
        RequestDescriptor::get("/passengers/list").query("userId", 7)
    }

    #[tokio::test]
    async fn success_envelope_resolves_with_data() {
        let h = harness(
            Scripted::json(200, r#"{"code":200,"message":"ok","data":[{"id":1,"name":"A"}]}"#),
            None,
        );
        let reply = h.client.send(&passengers()).await;
        let data = match reply {
            Ok(r) => r.into_data(),
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(data, Some(json!([{"id": 1, "name": "A"}])));
        assert!(h.notifier.errors().is_empty(), "success must not notify");

        let seen = h.transport.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, hyper::Method::GET);
        assert_eq!(seen[0].uri, "http://localhost:8081/api/passengers/list?userId=7");
    }

    #[tokio::test]
    async fn stored_token_is_sent_as_bearer() {
        let h = harness(Scripted::json(200, r#"{"code":200,"data":null}"#), Some("tok-42"));
        if let Err(e) = h.client.send(&passengers()).await {
            panic!("unexpected error: {e}");
        }
        assert_eq!(h.transport.seen()[0].authorization.as_deref(), Some("Bearer tok-42"));
    }

    #[tokio::test]
    async fn missing_token_omits_header() {
        let h = harness(Scripted::json(200, r#"{"code":200,"data":null}"#), None);
        if let Err(e) = h.client.send(&passengers()).await {
            panic!("unexpected error: {e}");
        }
        assert!(h.transport.seen()[0].authorization.is_none(), "header must be omitted");
    }

    #[tokio::test]
    async fn business_failure_rejects_and_notifies() {
        let h = harness(Scripted::json(200, r#"{"code":1001,"message":"余票不足"}"#), None);
        let result = h.client.send(&passengers()).await;
        match result {
            Err(ClientError::Business { code, message, envelope }) => {
                assert_eq!(code, 1001);
                assert_eq!(message, "余票不足");
                assert_eq!(envelope.code, 1001, "full envelope must be preserved");
            }
            other => panic!("expected business error, got {other:?}"),
        }
        assert_eq!(h.notifier.errors(), vec!["余票不足".to_owned()]);
        assert_eq!(h.store.clears.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn business_failure_without_message_uses_default() {
        let h = harness(Scripted::json(200, r#"{"code":500}"#), None);
        assert!(h.client.send(&passengers()).await.is_err());
        assert_eq!(h.notifier.errors(), vec![railbook_core::DEFAULT_FAILURE_MESSAGE.to_owned()]);
    }

    #[tokio::test]
    async fn blob_request_returns_raw_response() {
        let body = r#"{"code":500,"message":"looks like an envelope"}"#;
        let h = harness(Scripted::json(200, body), None);
        let reply = h.client.send(&RequestDescriptor::get("/order/ticket").blob()).await;
        let raw = match reply {
            Ok(Reply::Raw(r)) => r,
            other => panic!("expected raw reply, got {other:?}"),
        };
        assert_eq!(raw.body().as_ref(), body.as_bytes());
        assert!(h.notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_clears_token_once_and_reports_login() {
        let config = ClientConfig::default().with_login_url("http://localhost:3000/login");
        let h = harness_with(Scripted::json(401, ""), Some("stale"), config);
        let result = h.client.send(&passengers()).await;
        let err = match result {
            Err(e) => e,
            Ok(r) => panic!("expected rejection, got {r:?}"),
        };
        assert!(err.is_session_expired());
        assert_eq!(err.to_string(), SESSION_EXPIRED);
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(h.store.clears.load(Ordering::SeqCst), 1, "token must be cleared exactly once");
        assert!(matches!(h.store.get(), Ok(None)));
        assert_eq!(h.notifier.errors(), vec![SESSION_EXPIRED.to_owned()]);
        assert_eq!(h.notifier.logins(), vec!["http://localhost:3000/login".to_owned()]);
    }

    #[tokio::test]
    async fn classified_statuses_do_not_touch_session() {
        for (status, expected) in [(403, FORBIDDEN), (404, NOT_FOUND), (500, SERVER_ERROR)] {
            let h = harness(Scripted::json(status, "{}"), Some("tok"));
            let err = match h.client.send(&passengers()).await {
                Err(e) => e,
                Ok(r) => panic!("expected rejection for {status}, got {r:?}"),
            };
            assert_eq!(err.to_string(), expected);
            assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
            assert_eq!(h.store.clears.load(Ordering::SeqCst), 0);
            assert!(matches!(h.store.get(), Ok(Some(_))), "token must survive {status}");
            assert_eq!(h.notifier.errors(), vec![expected.to_owned()]);
            assert!(h.notifier.logins().is_empty());
        }
    }

    #[tokio::test]
    async fn unclassified_status_uses_transport_message() {
        let h = harness(Scripted::json(502, "bad gateway"), None);
        let err = match h.client.send(&passengers()).await {
            Err(e) => e,
            Ok(r) => panic!("expected rejection, got {r:?}"),
        };
        assert_eq!(err.to_string(), "Request failed with status code 502");
        assert_eq!(err.response().map(FailedResponse::text).as_deref(), Some("bad gateway"));
    }

    #[tokio::test]
    async fn transport_timeout_is_notified_and_rejected() {
        let h = harness(Scripted::new(|_| Err(TransportError::Timeout(Duration::from_secs(10)))), None);
        let result = h.client.send(&passengers()).await;
        assert!(matches!(result, Err(ClientError::Transport(TransportError::Timeout(_)))));
        assert_eq!(h.notifier.errors(), vec!["timeout of 10000ms exceeded".to_owned()]);
    }

    #[tokio::test]
    async fn post_body_is_json_encoded() {
        let h = harness(Scripted::json(200, r#"{"code":200,"data":{"id":9}}"#), None);
        let descriptor = RequestDescriptor::post("/passengers/add").body(json!({"name": "李四"}));
        let data = match h.client.fetch::<Value>(&descriptor).await {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(data, json!({"id": 9}));
        let seen = &h.transport.seen()[0];
        assert_eq!(seen.method, hyper::Method::POST);
        assert_eq!(seen.content_type.as_deref(), Some("application/json"));
        let sent: Value = match serde_json::from_slice(&seen.body) {
            Ok(v) => v,
            Err(e) => panic!("request body is not JSON: {e}"),
        };
        assert_eq!(sent, json!({"name": "李四"}));
    }

    #[tokio::test]
    async fn bare_json_body_passes_through() {
        let h = harness(Scripted::json(200, r#"{"payUrl":"https://pay.example/1"}"#), None);
        let data = match h.client.send(&RequestDescriptor::get("/order/pay-url")).await {
            Ok(r) => r.into_data(),
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(data, Some(json!({"payUrl": "https://pay.example/1"})));
    }

    #[tokio::test]
    async fn zero_code_is_success_only_when_enabled() {
        let body = r#"{"code":0,"message":"ok","data":5}"#;
        let strict = harness(Scripted::json(200, body), None);
        assert!(matches!(
            strict.client.send(&passengers()).await,
            Err(ClientError::Business { code: 0, .. })
        ));

        let lenient = harness_with(Scripted::json(200, body), None, ClientConfig::default().accept_zero_code());
        let data = match lenient.client.send(&passengers()).await {
            Ok(r) => r.into_data(),
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(data, Some(json!(5)));
    }

    #[tokio::test]
    async fn fetch_reports_payload_type_mismatch() {
        let h = harness(Scripted::json(200, r#"{"code":200,"data":"not a list"}"#), None);
        let result = h.client.fetch::<Vec<u32>>(&passengers()).await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
        assert_eq!(h.notifier.errors().len(), 1, "decode failure must notify once");
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let h = harness(Scripted::json(200, "<html>oops</html>"), None);
        assert!(matches!(h.client.send(&passengers()).await, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn relative_path_is_rejected_before_sending() {
        let h = harness(Scripted::json(200, "{}"), None);
        let result = h.client.send(&RequestDescriptor::get("passengers/list")).await;
        assert!(matches!(result, Err(ClientError::Request(_))));
        assert!(h.transport.seen().is_empty(), "nothing may be sent");
    }

    #[tokio::test]
    async fn repeated_get_yields_equal_payloads() {
        let h = harness(Scripted::json(200, r#"{"code":200,"data":{"seats":12}}"#), None);
        let first = h.client.fetch::<Value>(&passengers()).await;
        let second = h.client.fetch::<Value>(&passengers()).await;
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            other => panic!("unexpected results: {other:?}"),
        }
    }

    #[tokio::test]
    async fn download_forces_blob_kind() {
        let h = harness(Scripted::json(200, "%PDF-1.7"), None);
        let raw = match h.client.download(&RequestDescriptor::get("/order/ticket")).await {
            Ok(r) => r,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(raw.body().as_ref(), b"%PDF-1.7");
    }

    #[test]
    fn base_url_must_be_absolute() {
        let result = RequestClient::new(
            Scripted::json(200, "{}"),
            ClientConfig::new("localhost/api"),
            Arc::new(MemorySessionStore::new()),
            Arc::new(Recording::default()),
        );
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn base_path_trailing_slash_is_ignored() {
        let h = harness_with(
            Scripted::json(200, "{}"),
            None,
            ClientConfig::new("http://rail.example/api/"),
        );
        let url = match h.client.url_for(&RequestDescriptor::get("/order/pnr/E12")) {
            Ok(u) => u,
            Err(e) => panic!("url_for failed: {e}"),
        };
        assert_eq!(url.as_str(), "http://rail.example/api/order/pnr/E12");
    }

    #[test]
    fn segments_are_percent_encoded_for_paths() {
        let h = harness(Scripted::json(200, "{}"), None);
        let descriptor = RequestDescriptor::get("/order/pnr").segment("AB 12+X/7");
        let url = match h.client.url_for(&descriptor) {
            Ok(u) => u,
            Err(e) => panic!("url_for failed: {e}"),
        };
        assert_eq!(url.path(), "/api/order/pnr/AB%2012+X%2F7");
        let last = url.path_segments().and_then(Iterator::last);
        assert_eq!(last, Some("AB%2012+X%2F7"));
    }

    proptest::proptest! {
        #[test]
        fn proptest_query_values_survive_encoding(
            key in "[a-zA-Z]{1,12}",
            value in "\\PC{0,24}",
        ) {
            let h = harness(Scripted::json(200, "{}"), None);
            let descriptor = RequestDescriptor::get("/order/list").query(key.clone(), &value);
            let url = match h.client.url_for(&descriptor) {
                Ok(u) => u,
                Err(e) => panic!("url_for failed: {e}"),
            };
            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
            proptest::prop_assert_eq!(pairs, vec![(key, value)]);
        }

        #[test]
        fn proptest_envelope_policy_depends_only_on_code(
            code in proptest::prelude::any::<i64>(),
            payload in proptest::prelude::any::<i32>(),
        ) {
            let h = harness(Scripted::json(200, "{}"), None);
            let body = json!({"code": code, "message": "m", "data": payload}).to_string();
            match h.client.unwrap_body(body.as_bytes()) {
                Ok(data) => {
                    proptest::prop_assert_eq!(code, railbook_core::SUCCESS_CODE);
                    proptest::prop_assert_eq!(data, json!(payload));
                }
                Err(ClientError::Business { code: rejected, .. }) => {
                    proptest::prop_assert_ne!(code, railbook_core::SUCCESS_CODE);
                    proptest::prop_assert_eq!(rejected, code);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}
