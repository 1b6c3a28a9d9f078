//! Argument parsing and command dispatch.

use std::path::PathBuf;

use railbook_client::{RequestClient, Transport};
use railbook_core::{OrderId, Passenger, PassengerId, PnrNumber, UserId, ROUTES};
use serde_json::{json, Value};

use crate::error::CliError;

/// Help text printed by `railbook help` and on usage errors.
pub const USAGE: &str = "\
usage: railbook <command> [args]

session:
  login <token>                store the session token
  logout                       forget the session token

passengers:
  passengers list <userId>
  passengers add <json>
  passengers update <json>
  passengers remove <id>

orders:
  orders create <json>
  orders list <userId>
  orders detail <orderId>
  orders pnr <pnr>
  orders pay-url <pnr>
  orders sync <pnr>
  orders cancel <orderId>
  orders delete <orderId>
  orders ticket <orderId> <file>

pages:
  routes                       print the page route table
  route <path>                 resolve a page path

environment:
  RAILBOOK_API_BASE_URL  RAILBOOK_TIMEOUT_MS  RAILBOOK_LOGIN_URL
  RAILBOOK_ACCEPT_ZERO_CODE  RAILBOOK_TOKEN_FILE  RUST_LOG";

/// Passenger subcommands.
#[derive(Debug, Clone, PartialEq)]
pub enum PassengerCommand {
    List(UserId),
    Add(Passenger),
    Update(Passenger),
    Remove(PassengerId),
}

/// Order subcommands.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    Create(Value),
    List(UserId),
    Detail(OrderId),
    Pnr(PnrNumber),
    PayUrl(PnrNumber),
    Sync(PnrNumber),
    Cancel(OrderId),
    Delete(OrderId),
    Ticket { order: OrderId, output: PathBuf },
}

/// One `railbook` invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Login { token: String },
    Logout,
    Passengers(PassengerCommand),
    Orders(OrderCommand),
    Routes,
    Route { path: String },
}

impl Command {
    /// Parse arguments, excluding the program name.
    ///
    /// # Errors
    /// Returns [`CliError::Usage`] for unknown or incomplete commands and
    /// [`CliError::Json`] for malformed JSON arguments.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let words: Vec<&str> = args.iter().map(String::as_str).collect();

        let command = match words.as_slice() {
            [] | ["help" | "-h" | "--help"] => Command::Help,
            ["login", token] => Command::Login { token: (*token).to_owned() },
            ["logout"] => Command::Logout,
            ["routes"] => Command::Routes,
            ["route", path] => Command::Route { path: (*path).to_owned() },
            ["passengers", rest @ ..] => Command::Passengers(parse_passengers(rest)?),
            ["orders", rest @ ..] => Command::Orders(parse_orders(rest)?),
            _ => return Err(usage(&format!("unrecognised command: {}", words.join(" ")))),
        };
        Ok(command)
    }
}

fn parse_passengers(words: &[&str]) -> Result<PassengerCommand, CliError> {
    Ok(match words {
        ["list", user] => PassengerCommand::List(UserId(number(user, "userId")?)),
        ["add", body] => PassengerCommand::Add(serde_json::from_str(body)?),
        ["update", body] => PassengerCommand::Update(serde_json::from_str(body)?),
        ["remove", id] => PassengerCommand::Remove(PassengerId(number(id, "id")?)),
        _ => return Err(usage("expected: passengers list|add|update|remove <arg>")),
    })
}

fn parse_orders(words: &[&str]) -> Result<OrderCommand, CliError> {
    Ok(match words {
        ["create", body] => OrderCommand::Create(serde_json::from_str(body)?),
        ["list", user] => OrderCommand::List(UserId(number(user, "userId")?)),
        ["detail", id] => OrderCommand::Detail(OrderId(number(id, "orderId")?)),
        ["pnr", pnr] => OrderCommand::Pnr(PnrNumber::new(*pnr)),
        ["pay-url", pnr] => OrderCommand::PayUrl(PnrNumber::new(*pnr)),
        ["sync", pnr] => OrderCommand::Sync(PnrNumber::new(*pnr)),
        ["cancel", id] => OrderCommand::Cancel(OrderId(number(id, "orderId")?)),
        ["delete", id] => OrderCommand::Delete(OrderId(number(id, "orderId")?)),
        ["ticket", id, output] => OrderCommand::Ticket {
            order: OrderId(number(id, "orderId")?),
            output: PathBuf::from(output),
        },
        _ => return Err(usage("expected: orders create|list|detail|pnr|pay-url|sync|cancel|delete|ticket <arg>")),
    })
}

fn number(raw: &str, name: &str) -> Result<i64, CliError> {
    raw.parse()
        .map_err(|e| usage(&format!("{name} must be an integer, got {raw:?}: {e}")))
}

fn usage(message: &str) -> CliError {
    CliError::Usage(format!("{message}\n\n{USAGE}"))
}

/// Execute `command`, returning the JSON to print.
///
/// # Errors
/// Any [`CliError`]; API rejections arrive as [`CliError::Client`].
pub async fn run<T: Transport>(command: Command, client: &RequestClient<T>) -> Result<Value, CliError> {
    match command {
        Command::Help => Ok(Value::String(USAGE.to_owned())),
        Command::Login { token } => {
            client.session().set(&token)?;
            tracing::info!("session token stored");
            Ok(json!({"session": "stored"}))
        }
        Command::Logout => {
            client.session().clear()?;
            Ok(json!({"session": "cleared"}))
        }
        Command::Routes => Ok(json!({
            "redirects": ROUTES.redirects(),
            "routes": ROUTES.routes(),
        })),
        Command::Route { path } => {
            let resolved = ROUTES.resolve(&path)?;
            Ok(json!({
                "path": path,
                "view": resolved.route.view,
                "title": resolved.route.document_title(),
                "requiresAuth": resolved.route.requires_auth,
                "redirects": resolved.redirects,
            }))
        }
        Command::Passengers(cmd) => run_passengers(cmd, client).await,
        Command::Orders(cmd) => run_orders(cmd, client).await,
    }
}

async fn run_passengers<T: Transport>(
    command: PassengerCommand,
    client: &RequestClient<T>,
) -> Result<Value, CliError> {
    let passengers = client.passengers();
    let value = match command {
        PassengerCommand::List(user) => serde_json::to_value(passengers.list(user).await?)?,
        PassengerCommand::Add(p) => passengers.create(&p).await?,
        PassengerCommand::Update(p) => passengers.update(&p).await?,
        PassengerCommand::Remove(id) => passengers.remove(id).await?,
    };
    Ok(value)
}

async fn run_orders<T: Transport>(
    command: OrderCommand,
    client: &RequestClient<T>,
) -> Result<Value, CliError> {
    let orders = client.orders();
    let value = match command {
        OrderCommand::Create(body) => orders.create(&body).await?,
        OrderCommand::List(user) => serde_json::to_value(orders.list(user).await?)?,
        OrderCommand::Detail(id) => serde_json::to_value(orders.detail(id).await?)?,
        OrderCommand::Pnr(pnr) => serde_json::to_value(orders.by_pnr(&pnr).await?)?,
        OrderCommand::PayUrl(pnr) => json!({"payUrl": orders.pay_url(&pnr).await?}),
        OrderCommand::Sync(pnr) => orders.sync_payment_status(&pnr).await?,
        OrderCommand::Cancel(id) => orders.cancel(id).await?,
        OrderCommand::Delete(id) => orders.delete(id).await?,
        OrderCommand::Ticket { order, output } => {
            let response = orders.download_ticket(order).await?;
            let bytes = response.body();
            tokio::fs::write(&output, bytes)
                .await
                .map_err(|source| CliError::Write { path: output.clone(), source })?;
            tracing::info!(path = %output.display(), bytes = bytes.len(), "ticket saved");
            json!({"saved": output, "bytes": bytes.len()})
        }
    };
    Ok(value)
}
