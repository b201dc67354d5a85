use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Destination for generated summaries
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn write(&self, path: &Path, content: &str) -> Result<(), PersistError>;
}

/// Writes to the local filesystem, creating parent directories as needed
#[derive(Debug, Clone, Default)]
pub struct FileSink;

impl FileSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PersistenceSink for FileSink {
    async fn write(&self, path: &Path, content: &str) -> Result<(), PersistError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| PersistError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|source| PersistError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path.display(), bytes = content.len(), "Summary written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AINews").join("daily_summary.md");

        FileSink::new().write(&path, "# Summary").await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "# Summary");
    }

    #[tokio::test]
    async fn test_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("AINews");
        tokio::fs::write(&blocker, "not a directory").await.unwrap();

        let err = FileSink::new()
            .write(&blocker.join("weekly_summary.md"), "x")
            .await
            .unwrap_err();

        assert!(matches!(err, PersistError::CreateDir { .. }));
    }
}
