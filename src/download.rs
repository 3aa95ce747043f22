//! Toolchain archive download
//!
//! Streams a release archive from go.dev into the destination directory:
//! - bytes go to a `.part` file next to the final path
//! - a SHA-256 digest is computed while writing
//! - the digest is checked against the release index before the rename
//! - any failure removes the `.part` file

use crate::error::DownloadError;
use crate::progress::Progress;
use crate::registry::{GoDevRegistry, ReleaseFile};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Downloads archives listed in the go.dev release index
pub struct Downloader {
    registry: GoDevRegistry,
    show_progress: bool,
}

impl Downloader {
    /// Create a downloader using the given registry for URLs and the HTTP client
    pub fn new(registry: GoDevRegistry, show_progress: bool) -> Self {
        Self {
            registry,
            show_progress,
        }
    }

    /// Download `file` into `destination`, returning the path of the saved archive.
    ///
    /// The transfer has no overall deadline; it fails only when the server
    /// stops sending data for longer than the client's read timeout.
    pub async fn download(
        &self,
        file: &ReleaseFile,
        destination: &Path,
    ) -> Result<PathBuf, DownloadError> {
        let url = self.registry.file_url(&file.filename);
        tracing::info!(%url, destination = %destination.display(), "downloading archive");

        tokio::fs::create_dir_all(destination)
            .await
            .map_err(|e| DownloadError::io(destination, e))?;

        let read_timeout = self.registry.client().timeout();
        let response = self
            .registry
            .client()
            .inner()
            .get(&url)
            .send()
            .await
            .map_err(|e| transfer_error(&url, &e, read_timeout))?;

        if !response.status().is_success() {
            return Err(DownloadError::NetworkError {
                url,
                message: format!("HTTP {}", response.status()),
            });
        }

        let total = response.content_length().unwrap_or(file.size);
        let mut progress = Progress::new(self.show_progress);
        progress.start(total, &file.filename);

        let writer = ArchiveWriter::create(destination, &file.filename).await?;
        let mut body = ResponseBody {
            response,
            url,
            read_timeout,
        };
        let saved = save(&mut body, writer, &progress, &file.sha256).await;
        progress.finish_and_clear();
        saved
    }
}

fn transfer_error(url: &str, err: &reqwest::Error, read_timeout: Duration) -> DownloadError {
    let message = if err.is_timeout() {
        format!(
            "transfer stalled: no data received for {}s",
            read_timeout.as_secs()
        )
    } else {
        err.to_string()
    };
    DownloadError::NetworkError {
        url: url.to_string(),
        message,
    }
}

/// Source of archive bytes, read one chunk at a time
#[async_trait]
trait ChunkSource: Send {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, DownloadError>;
}

struct ResponseBody {
    response: reqwest::Response,
    url: String,
    read_timeout: Duration,
}

#[async_trait]
impl ChunkSource for ResponseBody {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, DownloadError> {
        match self.response.chunk().await {
            Ok(chunk) => Ok(chunk.map(|c| c.to_vec())),
            Err(e) => Err(transfer_error(&self.url, &e, self.read_timeout)),
        }
    }
}

/// Copy every chunk into `writer`, then verify and move the archive into place.
///
/// Any failure removes the partial file.
async fn save<S: ChunkSource>(
    source: &mut S,
    mut writer: ArchiveWriter,
    progress: &Progress,
    expected_sha256: &str,
) -> Result<PathBuf, DownloadError> {
    loop {
        let chunk = match source.next_chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                writer.discard().await;
                return Err(e);
            }
        };
        if let Err(e) = writer.write(&chunk).await {
            writer.discard().await;
            return Err(e);
        }
        progress.inc(chunk.len() as u64);
    }

    writer.finish(expected_sha256).await
}

/// Writes an archive to a temporary file while hashing it
pub struct ArchiveWriter {
    file: File,
    hasher: Sha256,
    part_path: PathBuf,
    final_path: PathBuf,
    filename: String,
}

impl ArchiveWriter {
    /// Create `<destination>/<filename>.part` for writing
    pub async fn create(destination: &Path, filename: &str) -> Result<Self, DownloadError> {
        let final_path = destination.join(filename);
        let part_path = destination.join(format!("{}.part", filename));
        let file = File::create(&part_path)
            .await
            .map_err(|e| DownloadError::io(&part_path, e))?;

        Ok(Self {
            file,
            hasher: Sha256::new(),
            part_path,
            final_path,
            filename: filename.to_string(),
        })
    }

    /// Append a chunk of the archive
    pub async fn write(&mut self, chunk: &[u8]) -> Result<(), DownloadError> {
        self.hasher.update(chunk);
        self.file
            .write_all(chunk)
            .await
            .map_err(|e| DownloadError::io(&self.part_path, e))
    }

    /// Verify the digest and move the archive into place.
    ///
    /// An empty `expected_sha256` skips verification.
    pub async fn finish(self, expected_sha256: &str) -> Result<PathBuf, DownloadError> {
        let Self {
            mut file,
            hasher,
            part_path,
            final_path,
            filename,
        } = self;

        let flushed = file.flush().await;
        drop(file);
        if let Err(e) = flushed {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(DownloadError::io(&part_path, e));
        }

        let actual = hex::encode(hasher.finalize());
        if !expected_sha256.is_empty() && !actual.eq_ignore_ascii_case(expected_sha256) {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(DownloadError::ChecksumMismatch {
                file: filename,
                expected: expected_sha256.to_string(),
                actual,
            });
        }
        tracing::debug!(file = %filename, sha256 = %actual, "checksum verified");

        if let Err(e) = tokio::fs::rename(&part_path, &final_path).await {
            let _ = tokio::fs::remove_file(&part_path).await;
            return Err(DownloadError::io(&final_path, e));
        }
        Ok(final_path)
    }

    /// Remove the partial file after a failed transfer
    pub async fn discard(self) {
        drop(self.file);
        let _ = tokio::fs::remove_file(&self.part_path).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    struct ScriptedChunks(VecDeque<Result<Vec<u8>, DownloadError>>);

    impl ScriptedChunks {
        fn new(chunks: Vec<Result<Vec<u8>, DownloadError>>) -> Self {
            Self(chunks.into())
        }
    }

    #[async_trait]
    impl ChunkSource for ScriptedChunks {
        async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, DownloadError> {
            self.0.pop_front().transpose()
        }
    }

    // sha256("hello world")
    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[tokio::test]
    async fn test_archive_writer_verifies_and_renames() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArchiveWriter::create(dir.path(), "go.tar.gz").await.unwrap();
        writer.write(b"hello ").await.unwrap();
        writer.write(b"world").await.unwrap();

        let path = writer.finish(HELLO_SHA256).await.unwrap();
        assert_eq!(path, dir.path().join("go.tar.gz"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
        assert!(!dir.path().join("go.tar.gz.part").exists());
    }

    #[tokio::test]
    async fn test_archive_writer_accepts_uppercase_digest() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArchiveWriter::create(dir.path(), "go.zip").await.unwrap();
        writer.write(b"hello world").await.unwrap();
        assert!(writer.finish(&HELLO_SHA256.to_uppercase()).await.is_ok());
    }

    #[tokio::test]
    async fn test_archive_writer_checksum_mismatch() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArchiveWriter::create(dir.path(), "go.tar.gz").await.unwrap();
        writer.write(b"tampered").await.unwrap();

        let err = writer.finish(HELLO_SHA256).await.unwrap_err();
        assert!(matches!(err, DownloadError::ChecksumMismatch { .. }));
        assert!(!dir.path().join("go.tar.gz").exists());
        assert!(!dir.path().join("go.tar.gz.part").exists());
    }

    #[tokio::test]
    async fn test_archive_writer_discard() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArchiveWriter::create(dir.path(), "go.tar.gz").await.unwrap();
        writer.write(b"partial").await.unwrap();
        writer.discard().await;
        assert!(!dir.path().join("go.tar.gz.part").exists());
    }

    #[tokio::test]
    async fn test_archive_writer_missing_destination() {
        let err = ArchiveWriter::create(Path::new("/non/existent/dir"), "go.tar.gz")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DownloadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_save_streams_all_chunks() {
        let dir = TempDir::new().unwrap();
        let writer = ArchiveWriter::create(dir.path(), "go.tar.gz").await.unwrap();
        let mut source = ScriptedChunks::new(vec![Ok(b"hello ".to_vec()), Ok(b"world".to_vec())]);

        let path = save(&mut source, writer, &Progress::new(false), HELLO_SHA256)
            .await
            .unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn test_save_discards_part_file_on_transfer_error() {
        let dir = TempDir::new().unwrap();
        let writer = ArchiveWriter::create(dir.path(), "go.tar.gz").await.unwrap();
        let mut source = ScriptedChunks::new(vec![
            Ok(b"hello ".to_vec()),
            Err(DownloadError::NetworkError {
                url: "http://localhost/go.tar.gz".to_string(),
                message: "connection reset".to_string(),
            }),
        ]);

        let err = save(&mut source, writer, &Progress::new(false), HELLO_SHA256)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::NetworkError { .. }));
        assert!(!dir.path().join("go.tar.gz.part").exists());
        assert!(!dir.path().join("go.tar.gz").exists());
    }

    // /dev/full accepts the open but fails every write with ENOSPC. tokio
    // reports the failure on the next write or on flush, so both paths must
    // clean up.
    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_save_discards_part_file_on_disk_write_error() {
        let dir = TempDir::new().unwrap();
        let part_path = dir.path().join("go.tar.gz.part");
        std::fs::write(&part_path, b"").unwrap();
        let full = std::fs::OpenOptions::new()
            .write(true)
            .open("/dev/full")
            .unwrap();
        let writer = ArchiveWriter {
            file: File::from_std(full),
            hasher: Sha256::new(),
            part_path: part_path.clone(),
            final_path: dir.path().join("go.tar.gz"),
            filename: "go.tar.gz".to_string(),
        };
        let mut source = ScriptedChunks::new((0..4).map(|_| Ok(vec![0u8; 4096])).collect());

        let err = save(&mut source, writer, &Progress::new(false), "")
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::Io { .. }));
        assert!(!part_path.exists());
        assert!(!dir.path().join("go.tar.gz").exists());
    }
}
