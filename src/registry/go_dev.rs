//! go.dev release index adapter
//!
//! Fetches the list of published Go releases.
//! API endpoint:
//! - Release index: https://go.dev/dl/?mode=json
//!
//! Each release lists its downloadable files with platform and SHA-256 digest.
//! Archives themselves are served from https://go.dev/dl/{filename}.

use crate::error::RegistryError;
use crate::registry::HttpClient;
use serde::Deserialize;

/// go.dev download base URL
pub const GO_DEV_URL: &str = "https://go.dev/dl/";

/// A published Go release
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release name, e.g. `go1.22.3`
    pub version: String,
    /// Whether this is a stable release
    pub stable: bool,
    /// Downloadable files for this release
    #[serde(default)]
    pub files: Vec<ReleaseFile>,
}

/// A single downloadable file of a release
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseFile {
    pub filename: String,
    pub os: String,
    pub arch: String,
    /// Hex-encoded SHA-256 digest
    pub sha256: String,
    pub size: u64,
    /// `archive`, `installer` or `source`
    pub kind: String,
}

impl Release {
    /// Version without the `go` prefix (`go1.22.3` -> `1.22.3`)
    pub fn version_number(&self) -> &str {
        self.version
            .strip_prefix("go")
            .unwrap_or(self.version.as_str())
    }

    /// Find the archive for the given platform
    pub fn archive_for(&self, os: &str, arch: &str) -> Option<&ReleaseFile> {
        self.files
            .iter()
            .find(|f| f.kind == "archive" && f.os == os && f.arch == arch)
    }
}

/// Client for the go.dev release index
#[derive(Clone)]
pub struct GoDevRegistry {
    client: HttpClient,
    base_url: String,
}

impl GoDevRegistry {
    /// Create a registry client pointing at go.dev
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GO_DEV_URL)
    }

    /// Create a registry client pointing at another mirror of the download page
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    /// Build the URL of the JSON release index
    pub fn index_url(&self) -> String {
        format!("{}?mode=json", self.base_url)
    }

    /// Build the URL of a downloadable file
    pub fn file_url(&self, filename: &str) -> String {
        format!("{}{}", self.base_url, filename)
    }

    /// Underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch the release index, newest release first
    pub async fn fetch_releases(&self) -> Result<Vec<Release>, RegistryError> {
        let url = self.index_url();
        tracing::debug!(%url, "fetching Go release index");
        self.client.get_json::<Vec<Release>>(&url).await
    }

    /// Fetch the newest stable release
    pub async fn latest_stable(&self) -> Result<Release, RegistryError> {
        let releases = self.fetch_releases().await?;
        latest_stable_release(releases).ok_or_else(|| RegistryError::NoStableRelease {
            url: self.index_url(),
        })
    }
}

/// Pick the first stable release of an index ordered newest first
fn latest_stable_release(releases: Vec<Release>) -> Option<Release> {
    releases.into_iter().find(|r| r.stable)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"[
        {
            "version": "go1.23rc1",
            "stable": false,
            "files": []
        },
        {
            "version": "go1.22.3",
            "stable": true,
            "files": [
                {
                    "filename": "go1.22.3.src.tar.gz",
                    "os": "",
                    "arch": "",
                    "version": "go1.22.3",
                    "sha256": "80648ef34f903193d72a59c0dff019f5f98ae0c9aa13ade0b0ecbff991a76f68",
                    "size": 27571422,
                    "kind": "source"
                },
                {
                    "filename": "go1.22.3.linux-amd64.tar.gz",
                    "os": "linux",
                    "arch": "amd64",
                    "version": "go1.22.3",
                    "sha256": "8920ea521bad8f6b7bc377b4824982e011c19af27df88a815e3586ea895f1b36",
                    "size": 68958945,
                    "kind": "archive"
                },
                {
                    "filename": "go1.22.3.windows-amd64.msi",
                    "os": "windows",
                    "arch": "amd64",
                    "version": "go1.22.3",
                    "sha256": "b2b6d8a5a0f2d5c7e1e1c1e0a1d4f4e6f8a9b2c3d4e5f6a7b8c9d0e1f2a3b4c5",
                    "size": 62000000,
                    "kind": "installer"
                }
            ]
        }
    ]"#;

    fn releases() -> Vec<Release> {
        serde_json::from_str(INDEX).unwrap()
    }

    #[test]
    fn test_parse_index() {
        let releases = releases();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[1].files.len(), 3);
    }

    #[test]
    fn test_latest_stable_skips_prereleases() {
        let latest = latest_stable_release(releases()).unwrap();
        assert_eq!(latest.version, "go1.22.3");
        assert_eq!(latest.version_number(), "1.22.3");
    }

    #[test]
    fn test_latest_stable_none() {
        let releases: Vec<Release> =
            serde_json::from_str(r#"[{"version": "go1.23rc1", "stable": false}]"#).unwrap();
        assert!(latest_stable_release(releases).is_none());
    }

    #[test]
    fn test_archive_for() {
        let latest = latest_stable_release(releases()).unwrap();
        let file = latest.archive_for("linux", "amd64").unwrap();
        assert_eq!(file.filename, "go1.22.3.linux-amd64.tar.gz");

        // Installers are not archives
        assert!(latest.archive_for("windows", "amd64").is_none());
        assert!(latest.archive_for("plan9", "mips").is_none());
    }

    #[test]
    fn test_urls() {
        let registry = GoDevRegistry::new(HttpClient::new().unwrap());
        assert_eq!(registry.index_url(), "https://go.dev/dl/?mode=json");
        assert_eq!(
            registry.file_url("go1.22.3.linux-amd64.tar.gz"),
            "https://go.dev/dl/go1.22.3.linux-amd64.tar.gz"
        );
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let registry =
            GoDevRegistry::with_base_url(HttpClient::new().unwrap(), "https://mirror.local/dl");
        assert_eq!(registry.index_url(), "https://mirror.local/dl/?mode=json");
    }
}
