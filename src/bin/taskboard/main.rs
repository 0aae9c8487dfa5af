//! Command-line front end for the taskboard backend.
//!
//! Usage:
//!
//! ```text
//! taskboard migrate
//! taskboard task create --name <NAME> --description <TEXT> --due-date <RFC3339>
//! taskboard task edit <TASK_ID> --status todo
//! taskboard project assign <PROJECT_ID> <TASK_ID>
//! taskboard project move <CURRENT_PROJECT_ID> <TASK_ID> <NEXT_PROJECT_ID>
//! ```
//!
//! Every command prints one JSON envelope on stdout:
//! `{"status":"success","data":...}` on success, `{"status":"fail",...}` when
//! the request was rejected, and `{"status":"error",...}` when the database
//! failed. Configuration comes from `taskboard.toml`, `.env`, and
//! `TASKBOARD_*` environment variables.

mod cli;
mod dispatch;
mod output;

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use taskboard::{config::TaskboardConfig, database, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            writeln!(io::stderr().lock(), "taskboard: {error:#}").ok();
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    let config = TaskboardConfig::load_with_dotenv().context("failed to load configuration")?;
    telemetry::init(&config.logging).context("failed to initialise logging")?;

    let pool = database::build_pool(&config.database).context("failed to connect to database")?;
    let calendar = config
        .calendar
        .calendar()
        .context("invalid calendar configuration")?;

    let app = dispatch::App::new(pool, calendar);
    let outcome = app.dispatch(cli.command).await;
    let code = output::exit_code(&outcome);
    output::write_envelope(&mut io::stdout().lock(), &outcome)
        .context("failed to write command output")?;
    Ok(code)
}
