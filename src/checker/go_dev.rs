//! go.dev backed version checker

use crate::checker::{DownloadRequest, VersionChecker};
use crate::download::Downloader;
use crate::error::{AppError, DownloadError};
use crate::registry::{GoDevRegistry, HttpClient};
use crate::resolver;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Version checker using the go.dev release index and download server
pub struct GoDevChecker {
    registry: GoDevRegistry,
    show_progress: bool,
}

impl GoDevChecker {
    /// Create a checker talking to go.dev
    pub fn new(client: HttpClient) -> Self {
        Self::with_registry(GoDevRegistry::new(client))
    }

    /// Create a checker talking to a go.dev mirror
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self::with_registry(GoDevRegistry::with_base_url(client, base_url))
    }

    fn with_registry(registry: GoDevRegistry) -> Self {
        Self {
            registry,
            show_progress: true,
        }
    }

    /// Enable or disable the download progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

#[async_trait]
impl VersionChecker for GoDevChecker {
    fn current_version(
        &self,
        version_file: Option<&Path>,
        version: Option<&str>,
    ) -> Result<String, AppError> {
        Ok(resolver::get_current_version(version_file, version)?)
    }

    async fn latest_version(&self) -> Result<String, AppError> {
        let release = self.registry.latest_stable().await?;
        tracing::debug!(version = %release.version, "latest stable release");
        Ok(release.version_number().to_string())
    }

    fn is_newer(&self, latest: &str, current: &str) -> bool {
        crate::version::is_newer(latest, current)
    }

    async fn download(&self, request: &DownloadRequest) -> Result<PathBuf, AppError> {
        let wanted = format!("go{}", request.version);
        let releases = self.registry.fetch_releases().await?;
        let file = releases
            .iter()
            .find(|r| r.version == wanted)
            .and_then(|r| r.archive_for(&request.os, &request.arch))
            .ok_or_else(|| DownloadError::UnsupportedPlatform {
                version: request.version.clone(),
                os: request.os.clone(),
                arch: request.arch.clone(),
            })?;

        let downloader = Downloader::new(self.registry.clone(), self.show_progress);
        Ok(downloader.download(file, &request.destination).await?)
    }
}
