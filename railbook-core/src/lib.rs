//! Wire and domain types for the railbook ticket-booking client.
//!
//! Defines the response envelope, request descriptors, passenger and order
//! records, and the static page route table.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod envelope;
pub mod error;
pub mod id;
pub mod models;
pub mod request;
pub mod routes;

pub use envelope::{Body, Envelope, DEFAULT_FAILURE_MESSAGE, SUCCESS_CODE, UNRECOGNISED_CODE};
pub use error::CoreError;
pub use id::{OrderId, PassengerId, PnrNumber, UserId};
pub use models::{Order, Passenger};
pub use request::{Method, RequestDescriptor, ResponseKind};
pub use routes::{Redirect, Resolved, Route, RouteTable, ROUTES};
