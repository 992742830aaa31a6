use crate::config_path;
use crate::error::{CliError, Result, ResultExt};
use crate::progress::ProgressTracker;
use crate::render;
use crate::ui;
use dialoguer::{Confirm, theme::ColorfulTheme};
use overpass_response::{
    DefaultResponseClassifier, OverpassClient, OverpassConfig, QueryLanguage, QueryReport,
    QuerySession, RawResponse, ResponseClassifier, SessionOutcome, config::validate,
    format_data_amount, prepare_query,
};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub query_file: Option<String>,
    pub query: Option<String>,
    pub server: Option<String>,
    pub config: Option<String>,
    pub json: bool,
    pub yes: bool,
    pub output: Option<String>,
    pub verbose: bool,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(execute_async(args))
}

async fn execute_async(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.server.as_deref())?;
    let query = read_query(args.query_file.as_deref(), args.query.as_deref())?;
    let language = QueryLanguage::detect(&query);
    let prepared = prepare_query(&query, language);

    let mut progress = if args.json {
        ProgressTracker::quiet("Overpass query")
    } else {
        ProgressTracker::new("Overpass query")
    };

    if args.verbose && !args.json {
        ui::info_message(&format!("Server: {}", config.server_url()?));
        ui::info_message(&format!("Query language: {language}"));
    }

    let client = OverpassClient::new(&config)?;
    let session = QuerySession::new(client, config.kill_on_abort);

    progress.start_spinner("Waiting for the Overpass API");
    let outcome = tokio::select! {
        outcome = session.submit(&prepared) => outcome,
        _ = tokio::signal::ctrl_c() => {
            let aborted = session.cancel().await;
            tracing::debug!(aborted, "query cancelled by user");
            progress.fail_step("Query aborted");
            return Ok(());
        }
    };

    let raw = match outcome.with_context(|| "Query failed")? {
        SessionOutcome::Completed(raw) => raw,
        SessionOutcome::Superseded => {
            progress.fail_step("Query was superseded before it finished");
            return Ok(());
        }
    };
    progress.complete_step(&format!(
        "Received {} (HTTP {})",
        format_data_amount(raw.size()),
        raw.http_status
    ));

    if let Some(output) = &args.output {
        save_body(&raw, Path::new(output))?;
        if !args.json {
            ui::info_message(&format!("Response saved to {output}"));
        }
    }

    let classification = DefaultResponseClassifier::new().classify(&raw);
    let report = QueryReport::with_threshold(&raw, classification, config.large_response_threshold);

    if report.is_large && !args.yes && !args.json && !confirm_large(&report)? {
        ui::info_message("Skipped processing the response");
        return Ok(());
    }

    progress.complete();
    render::print_report(&report, args.json)
}

/// Load the configuration file (or the defaults) and apply a `--server` override
fn load_config(explicit: Option<&str>, server: Option<&str>) -> Result<OverpassConfig> {
    let path = config_path::resolve(explicit);

    // An explicitly named file must exist
    let config = if explicit.is_some() {
        OverpassConfig::load_with_validation(&path)?
    } else {
        OverpassConfig::load_or_default(&path)?
    };

    match server {
        Some(server) => {
            let config = config.with_server(server);
            validate(&config, "--server")?;
            Ok(config)
        }
        None => Ok(config),
    }
}

fn read_query(query_file: Option<&str>, inline: Option<&str>) -> Result<String> {
    let query = match (query_file, inline) {
        (_, Some(inline)) => inline.to_string(),
        (Some(file), None) => {
            let path = PathBuf::from(file);
            if !path.exists() {
                return Err(CliError::QueryNotFound(path));
            }
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        (None, None) => return Err(CliError::NoQuery),
    };

    if query.trim().is_empty() {
        return Err(CliError::NoQuery);
    }
    Ok(query)
}

fn save_body(raw: &RawResponse, path: &Path) -> Result<()> {
    fs::write(path, &raw.body_text)
        .with_context(|| format!("Failed to save response to {}", path.display()))
}

fn confirm_large(report: &QueryReport) -> Result<bool> {
    ui::warning_message(&format!(
        "This query returned a lot of data ({}). Processing it may make your terminal unresponsive",
        report.size_text
    ));

    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Continue anyway?")
        .default(false)
        .interact()?)
}
