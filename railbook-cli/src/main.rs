//! Entry point for the `railbook` command.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use railbook_cli::{run, CliError, Command, StderrNotifier};
use railbook_client::{ClientConfig, FileSessionStore, RequestClient};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

const DEFAULT_TOKEN_FILE: &str = ".railbook/token";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .init();

    match execute().await {
        Ok(Value::String(text)) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            if e.needs_report() {
                eprintln!("error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn execute() -> Result<Value, CliError> {
    let command = Command::parse(std::env::args().skip(1))?;

    let config = ClientConfig::from_env().map_err(CliError::Client)?;
    let token_file = std::env::var_os("RAILBOOK_TOKEN_FILE")
        .map_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE), PathBuf::from);
    tracing::debug!(base_url = %config.base_url, token_file = %token_file.display(), "starting");

    let client = RequestClient::connect(
        config,
        Arc::new(FileSessionStore::new(token_file)),
        Arc::new(StderrNotifier),
    )?;
    run(command, &client).await
}
