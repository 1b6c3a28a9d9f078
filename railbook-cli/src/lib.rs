//! Command-line front end for the railbook booking API.
//!
//! Parses a [`command::Command`], runs it against a
//! [`railbook_client::RequestClient`] and hands back the JSON to print.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod command;
pub mod error;
pub mod notify;

pub use command::{run, Command, OrderCommand, PassengerCommand, USAGE};
pub use error::CliError;
pub use notify::StderrNotifier;
