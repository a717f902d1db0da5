mod cli;
mod client;
mod commands;
mod config;
mod error;
mod logger;
mod output;
mod responses;
mod types;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use cli::Cli;
use client::ReportClient;
use config::ReportConfig;
use error::{render_message, ReportError, Result};

const DEFAULT_ERROR_CREATING_REQUEST: &str = "Error creating request: %v";
const DEFAULT_ERROR_REQUEST: &str = "Error calling team service: %v";
const DEFAULT_ERROR_FILE: &str = "Error writing report file: %v";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(config_path) = cli.config_file else {
        // A missing argument is reported as usage, not as a failure.
        let _ = cli::write_usage(&mut io::stdout(), &cli::program_name());
        return ExitCode::SUCCESS;
    };

    let config = match ReportConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::init(&config.log_level) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    if !cli.ignored.is_empty() {
        debug!(ignored = ?cli.ignored, "ignoring extra arguments");
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", fatal_message(&config, &e));
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &ReportConfig) -> Result<()> {
    let client = ReportClient::new(config.timeout_secs)?;
    commands::teams::report(&client, config).await?;
    Ok(())
}

/// Render the configured message for the stage that failed.
fn fatal_message(config: &ReportConfig, err: &ReportError) -> String {
    let (template, fallback, cause) = match err {
        ReportError::RequestBuild(cause) => (
            config.error_creating_request.as_str(),
            DEFAULT_ERROR_CREATING_REQUEST,
            cause.clone(),
        ),
        ReportError::Request(e) => (
            config.error_request.as_str(),
            DEFAULT_ERROR_REQUEST,
            error_chain(e),
        ),
        ReportError::MissingScheme(url) => (
            config.error_request.as_str(),
            DEFAULT_ERROR_REQUEST,
            format!("no scheme in URL {url:?}"),
        ),
        ReportError::File { source, .. } => (
            config.error_file.as_str(),
            DEFAULT_ERROR_FILE,
            source.to_string(),
        ),
        other => return format!("Error: {other}"),
    };

    render_message(template, fallback, &cause)
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
