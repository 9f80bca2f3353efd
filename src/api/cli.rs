//! # Command Line Interface
//!
//! Argument parsing, query acquisition and result reporting for the
//! `savvy-shopper` binary.
//!
//! # Usage
//!
//! ```text
//! savvy-shopper "usb c cable"
//! savvy-shopper --fixtures mock_data.json "usb c cable"
//! savvy-shopper --timeout-ms 1500          # prompts for the product
//! ```

use crate::api::table::render_table;
use crate::application::services::OfferAggregationEngine;
use crate::domain::context::SearchContext;
use crate::domain::errors::{ErrorKind, SearchError};
use crate::infrastructure::config::{ApiKey, AppConfig};
use crate::infrastructure::retailers::{FixtureSearcher, RetailerRegistry, default_registry};
use anyhow::{Context, bail};
use clap::Parser;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "savvy-shopper")]
#[command(about = "Compare product prices across retailers", version)]
pub struct Args {
    /// Product to search for; prompted for when omitted
    pub query: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Overall search timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Serve offers from a JSON fixture file instead of the search API
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Runs one search and writes the outcome to `out`.
///
/// `registry` replaces the searchers that would otherwise be built from the
/// arguments and configuration.
///
/// # Errors
///
/// Returns an error if the query cannot be read, configuration, fixtures or
/// credentials are invalid, the search fails, or `out` cannot be written.
/// Every failure is reported on `out` before being returned.
pub async fn run<R: BufRead, W: Write>(
    args: Args,
    input: R,
    out: &mut W,
    ctx: &SearchContext,
    registry: Option<RetailerRegistry>,
) -> anyhow::Result<()> {
    let result = execute(args, input, out, ctx, registry).await;
    if let Err(error) = &result {
        report(out, error)?;
    }
    result
}

async fn execute<R: BufRead, W: Write>(
    args: Args,
    input: R,
    out: &mut W,
    ctx: &SearchContext,
    registry: Option<RetailerRegistry>,
) -> anyhow::Result<()> {
    let query = acquire_query(&args, input, out)?;

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(timeout_ms) = args.timeout_ms {
        config.aggregation.timeout_ms = timeout_ms;
        config.validate()?;
    }

    let registry = match registry {
        Some(registry) => registry,
        None => build_registry(&args, &config)?,
    };

    let engine = OfferAggregationEngine::new(registry, config.aggregation);
    let offers = engine.aggregate_with_context(&query, ctx).await?;
    render_table(out, &offers)?;
    Ok(())
}

/// Takes the query from the arguments, or prompts for it on `out` and reads it from `input`.
fn acquire_query<R: BufRead, W: Write>(args: &Args, mut input: R, out: &mut W) -> anyhow::Result<String> {
    if !args.query.is_empty() {
        return Ok(args.query.join(" "));
    }

    write!(out, "Enter product: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read input")?;
    let query = line.trim();
    if query.is_empty() {
        bail!("failed to read input: no product entered");
    }
    Ok(query.to_string())
}

/// Builds the searchers for this run.
fn build_registry(args: &Args, config: &AppConfig) -> anyhow::Result<RetailerRegistry> {
    if let Some(path) = &args.fixtures {
        return Ok(FixtureSearcher::registry_from_file(path)?);
    }

    let api_key = ApiKey::from_env()?;
    Ok(default_registry(&config.zinc, config.retry, api_key)?)
}

/// Returns the line shown to the user for `error`.
#[must_use]
pub fn user_message(error: &SearchError) -> String {
    match error.kind() {
        ErrorKind::NoResults => "No results found.".to_string(),
        ErrorKind::Network => format!("Network error: {}", error),
        ErrorKind::Auth | ErrorKind::Other => format!("Error: {}", error),
    }
}

fn report<W: Write>(out: &mut W, error: &anyhow::Error) -> std::io::Result<()> {
    match error.downcast_ref::<SearchError>() {
        Some(error) if error.kind() == ErrorKind::NoResults => {
            writeln!(out, "{}", user_message(error).yellow())
        }
        Some(error) => writeln!(out, "{}", user_message(error).red()),
        None => writeln!(out, "{}", format!("Error: {error:#}").red()),
    }
}
