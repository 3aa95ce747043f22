//! Version checker capability set
//!
//! The orchestrator drives the update flow through [`VersionChecker`]:
//! resolving the current version, looking up the latest release,
//! comparing the two and downloading an archive. [`GoDevChecker`] is the
//! production implementation backed by go.dev.

mod go_dev;

pub use go_dev::GoDevChecker;

use crate::error::AppError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Parameters for a single toolchain download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Version to download, without the `go` prefix
    pub version: String,
    /// Target operating system in Go naming (`linux`, `darwin`, `windows`)
    pub os: String,
    /// Target architecture in Go naming (`amd64`, `arm64`)
    pub arch: String,
    /// Directory the archive is saved into
    pub destination: PathBuf,
}

/// Capabilities the update flow depends on
#[async_trait]
pub trait VersionChecker: Send + Sync {
    /// Resolve the currently pinned version from a file or a direct value
    fn current_version(
        &self,
        version_file: Option<&Path>,
        version: Option<&str>,
    ) -> Result<String, AppError>;

    /// Look up the latest published version
    async fn latest_version(&self) -> Result<String, AppError>;

    /// Check if `latest` is newer than `current`
    fn is_newer(&self, latest: &str, current: &str) -> bool;

    /// Download the toolchain described by `request`, returning the saved archive path
    async fn download(&self, request: &DownloadRequest) -> Result<PathBuf, AppError>;
}
