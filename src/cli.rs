//! CLI argument parsing module for goupdate

use crate::orchestrator::RunOptions;
use clap::Parser;
use std::path::PathBuf;

/// Host operating system in Go naming
pub fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// Host architecture in Go naming
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "arm" => "armv6l",
        "powerpc64" => "ppc64le",
        "loongarch64" => "loong64",
        other => other,
    }
}

/// Check a pinned Go version against the latest release
#[derive(Parser, Debug, Clone)]
#[command(
    name = "goupdate",
    about = "Check a pinned Go version against the latest release and download updates",
    disable_version_flag = true
)]
pub struct CliArgs {
    /// File containing the current Go version (go.mod, Dockerfile, JSON, ...)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Current Go version; takes precedence over --file
    #[arg(short = 'v', long = "current-version", value_name = "VERSION")]
    pub current_version: Option<String>,

    /// Target operating system for the download
    #[arg(long, env = "GOOS", default_value = host_os())]
    pub os: String,

    /// Target architecture for the download
    #[arg(long, env = "GOARCH", default_value = host_arch())]
    pub arch: String,

    /// Download directory used when the current directory is declined
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - no progress bar or summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Print goupdate's own version
    #[arg(short = 'V', long = "print-version")]
    pub print_version: bool,
}

impl CliArgs {
    /// Build the orchestrator inputs from the parsed arguments
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            version_file: self.file.clone(),
            current_version: self.current_version.clone(),
            target_os: self.os.clone(),
            target_arch: self.arch.clone(),
            alternate_destination: self.dest.clone(),
        }
    }
}
