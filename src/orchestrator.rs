//! Update orchestrator for coordinating the check-and-download workflow
//!
//! Workflow: resolve current → fetch latest → compare → confirm → download.
//!
//! Prompts are read from and written to injected streams so the flow can be
//! driven by a terminal or by scripted input. Every checker failure aborts the
//! run and is returned unchanged; declining a prompt is a successful outcome.

use crate::checker::{DownloadRequest, VersionChecker};
use crate::error::AppError;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const DOWNLOAD_PROMPT: &str = "Do you want to download the latest version? (yes/no): ";
const CWD_PROMPT: &str =
    "Do you want to download it to the current working directory? (yes/no): ";
const PATH_PROMPT: &str = "Enter the path where you want to download: ";
const ABORTED: &str = "Download aborted by user";

/// Inputs for a single run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// File to extract the current version from
    pub version_file: Option<PathBuf>,
    /// Current version supplied directly; takes precedence over the file
    pub current_version: Option<String>,
    /// Target operating system in Go naming
    pub target_os: String,
    /// Target architecture in Go naming
    pub target_arch: String,
    /// Where to download when the user declines the current directory.
    /// When unset the user is asked for a path.
    pub alternate_destination: Option<PathBuf>,
}

impl RunOptions {
    fn version_file(&self) -> Option<&Path> {
        self.version_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    fn current_version(&self) -> Option<&str> {
        self.current_version.as_deref().filter(|v| !v.is_empty())
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The current version is the latest
    UpToDate,
    /// A newer version exists but the user did not download it
    Declined,
    /// The archive was saved at this path
    Downloaded(PathBuf),
}

/// Orchestrator for the update workflow
pub struct Orchestrator<'a, C: VersionChecker + ?Sized> {
    checker: &'a C,
    options: RunOptions,
}

impl<'a, C: VersionChecker + ?Sized> Orchestrator<'a, C> {
    /// Create a new orchestrator over `checker`
    pub fn new(checker: &'a C, options: RunOptions) -> Self {
        Self { checker, options }
    }

    /// Run the workflow, reading answers from `input` and writing prompts to `output`
    pub async fn run<R, W>(&self, input: &mut R, output: &mut W) -> Result<RunOutcome, AppError>
    where
        R: BufRead,
        W: Write,
    {
        let version_file = self.options.version_file();
        let current_override = self.options.current_version();
        if version_file.is_none() && current_override.is_none() {
            return Err(AppError::missing_source());
        }

        // Step 1: Resolve both versions before writing anything
        let current = self
            .checker
            .current_version(version_file, current_override)?;
        let latest = self.checker.latest_version().await?;
        tracing::debug!(%current, %latest, "resolved versions");

        writeln!(output, "Current version: {}", current)?;
        writeln!(output, "Latest version: {}", latest)?;

        // Step 2: Compare
        if !self.checker.is_newer(&latest, &current) {
            writeln!(output, "You have the latest version")?;
            return Ok(RunOutcome::UpToDate);
        }
        writeln!(output, "A newer version is available")?;

        // Step 3: Confirm
        if !is_affirmative(&prompt(input, output, DOWNLOAD_PROMPT)?) {
            writeln!(output, "{}", ABORTED)?;
            return Ok(RunOutcome::Declined);
        }

        let destination = match self.destination(input, output)? {
            Some(path) => path,
            None => {
                writeln!(output, "{}", ABORTED)?;
                return Ok(RunOutcome::Declined);
            }
        };

        // Step 4: Download
        let request = DownloadRequest {
            version: latest,
            os: self.options.target_os.clone(),
            arch: self.options.target_arch.clone(),
            destination,
        };
        tracing::debug!(?request, "dispatching download");
        let path = self.checker.download(&request).await?;

        Ok(RunOutcome::Downloaded(path))
    }

    /// Ask where to download. `None` means the user gave no usable path.
    fn destination<R, W>(&self, input: &mut R, output: &mut W) -> Result<Option<PathBuf>, AppError>
    where
        R: BufRead,
        W: Write,
    {
        if is_affirmative(&prompt(input, output, CWD_PROMPT)?) {
            let cwd = std::env::current_dir().map_err(AppError::CurrentDir)?;
            return Ok(Some(cwd));
        }

        if let Some(path) = &self.options.alternate_destination {
            return Ok(Some(path.clone()));
        }

        let answer = prompt(input, output, PATH_PROMPT)?;
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(answer)))
        }
    }
}

/// Write `question` and read one trimmed line; a closed input reads as empty
fn prompt<R, W>(input: &mut R, output: &mut W, question: &str) -> Result<String, AppError>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Check whether a prompt answer means yes
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
