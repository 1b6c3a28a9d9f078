//! Request client for the railbook ticket-booking API.
//!
//! [`RequestClient`] attaches the session token, unwraps the response
//! envelope and classifies failures; [`services`] builds the passenger and
//! order calls on top of it. Token storage and user notifications are
//! injected through [`SessionStore`] and [`Notifier`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod config;
pub mod error;
pub mod http_transport;
pub mod notify;
pub mod services;
pub mod session;
pub mod transport;

pub use client::{Reply, RequestClient};
pub use config::ClientConfig;
pub use error::{ClientError, FailedResponse, SessionError, TransportError};
pub use http_transport::HyperTransport;
pub use notify::{Notifier, TracingNotifier};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Transport};
