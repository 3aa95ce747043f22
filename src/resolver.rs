//! Current version resolution
//!
//! The current version comes either from a value supplied directly on the
//! command line or from a file whose content is handed to the extractor.

use crate::error::ResolveError;
use crate::extract::extract_version;
use std::path::{Path, PathBuf};

/// Where the current version comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Version supplied verbatim by the caller
    Direct(String),
    /// File to read and extract the version from
    File(PathBuf),
}

impl VersionSource {
    /// Build a source from the two optional inputs.
    ///
    /// Empty strings count as absent. A direct version takes precedence over a file.
    pub fn from_inputs(file: Option<&Path>, direct: Option<&str>) -> Result<Self, ResolveError> {
        if let Some(version) = direct.filter(|v| !v.is_empty()) {
            return Ok(VersionSource::Direct(version.to_string()));
        }
        match file.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Ok(VersionSource::File(path.to_path_buf())),
            None => Err(ResolveError::MissingInput),
        }
    }

    /// Produce the version string for this source
    pub fn resolve(&self) -> Result<String, ResolveError> {
        match self {
            VersionSource::Direct(version) => Ok(version.clone()),
            VersionSource::File(path) => read_version_from_file(path),
        }
    }
}

/// Resolve the current version from a direct value or a version file
pub fn get_current_version(
    file: Option<&Path>,
    direct: Option<&str>,
) -> Result<String, ResolveError> {
    VersionSource::from_inputs(file, direct)?.resolve()
}

/// Read `path` in full and extract the Go version from its content
pub fn read_version_from_file(path: &Path) -> Result<String, ResolveError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ResolveError::read_error(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read version file");

    extract_version(&content).ok_or_else(|| ResolveError::extraction_error(path))
}
