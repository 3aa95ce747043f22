//! goupdate - Go toolchain version checker
//!
//! Reads the pinned Go version from a file (go.mod, Dockerfile, JSON, ...)
//! or the command line, compares it with the latest go.dev release and
//! offers to download the newer archive.

use clap::Parser;
use colored::Colorize;
use goupdate::checker::GoDevChecker;
use goupdate::cli::CliArgs;
use goupdate::orchestrator::{Orchestrator, RunOutcome};
use goupdate::registry::HttpClient;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Handle version flag
    if args.print_version {
        println!("goupdate {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_tracing(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        os = %args.os,
        arch = %args.arch,
        "starting goupdate"
    );

    let show_progress = !args.quiet && io::stderr().is_terminal();
    let checker = GoDevChecker::new(HttpClient::new()?).with_progress(show_progress);
    let orchestrator = Orchestrator::new(&checker, args.run_options());

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let outcome = orchestrator.run(&mut input, &mut output).await?;

    if let RunOutcome::Downloaded(path) = &outcome {
        if !args.quiet {
            eprintln!("{} {}", "Saved".green().bold(), path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
