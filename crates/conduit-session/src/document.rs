use std::path::{Path, PathBuf};

pub const SUMMARY_FILE_NAME: &str = "ai_news_summary.md";
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Standalone downloadable rendering of a result
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    pub mime: String,
    pub body: String,
}

impl Document {
    pub fn markdown(file_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: MARKDOWN_MIME.to_string(),
            body: body.into(),
        }
    }

    pub fn news_summary(summary: impl Into<String>) -> Self {
        Self::markdown(SUMMARY_FILE_NAME, summary)
    }

    /// Write into `dir` under the document's file name
    pub async fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.body).await?;
        Ok(path)
    }
}
