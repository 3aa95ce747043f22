//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ResolveError: Issues obtaining the current version (input, read, extraction)
//! - RegistryError: Issues looking up the latest release
//! - DownloadError: Issues downloading a toolchain archive
//! - Usage / Terminal / CurrentDir: caller configuration, prompt I/O and
//!   working directory failures

use std::path::PathBuf;
use thiserror::Error;

/// Message reported when neither a version file nor a version value is given
pub const USAGE_MESSAGE: &str = "Either a version file or a version value must be specified";

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller configuration error
    #[error("{0}")]
    Usage(String),

    /// Current version resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Latest version lookup errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Toolchain download errors
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Reading a prompt answer or writing a status line failed
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    /// The current working directory chosen as destination is unavailable
    #[error("failed to determine the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

impl AppError {
    /// Creates the usage error raised when no version source was supplied
    pub fn missing_source() -> Self {
        AppError::Usage(USAGE_MESSAGE.to_string())
    }
}

/// Errors related to obtaining the current version
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Neither a file path nor a direct version was supplied
    #[error("no version file or version value supplied")]
    MissingInput,

    /// Failed to read the version file
    #[error("failed to read version file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but contained no recognizable version token
    #[error("unable to extract Go version from file {path}")]
    Extraction { path: PathBuf },
}

/// Errors related to looking up the latest published release
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed
    #[error("failed to fetch {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },

    /// Invalid response from the release index
    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// The release index lists no stable release
    #[error("no stable Go release found in {url}")]
    NoStableRelease { url: String },
}

/// Errors related to downloading a toolchain archive
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The release has no archive for the requested platform
    #[error("no archive for go{version} on {os}/{arch}")]
    UnsupportedPlatform {
        version: String,
        os: String,
        arch: String,
    },

    /// Download request failed
    #[error("failed to download {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Writing the archive to disk failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The downloaded bytes do not match the published digest
    #[error("checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

impl ResolveError {
    /// Creates a new Read error
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResolveError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Extraction error
    pub fn extraction_error(path: impl Into<PathBuf>) -> Self {
        ResolveError::Extraction { path: path.into() }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        RegistryError::Timeout { url: url.into() }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl DownloadError {
    /// Creates a new Io error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Io {
            path: path.into(),
            source,
        }
    }
}
