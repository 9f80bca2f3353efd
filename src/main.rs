//! `savvy-shopper` command line entry point.

use clap::Parser;
use savvy_shopper::api::cli::{self, Args};
use savvy_shopper::domain::context::SearchContext;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_json);

    let ctx = SearchContext::background();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, cancelling search");
                interrupt.cancel();
            }
            Err(error) => debug!(%error, "failed to listen for Ctrl+C"),
        }
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match cli::run(args, stdin.lock(), &mut stdout, &ctx, None).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(error = %error, "search run failed");
            ExitCode::FAILURE
        }
    }
}
