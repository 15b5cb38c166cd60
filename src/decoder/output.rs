use super::DecodedItem;
use std::fs;
use std::path::{Path, PathBuf};

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Output-specific error types
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}

impl From<OutputError> for crate::errors::AppError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::Io(e) => crate::errors::AppError::Io(e),
            OutputError::InvalidPath(p) => crate::errors::AppError::Config(p),
        }
    }
}

/// Files written for one decoded item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPayload {
    pub raw: PathBuf,
    pub decoded: PathBuf,
}

/// Output manager for decoded payloads and export documents
///
/// Layout:
/// - `<base_dir>/raw/<raw_filename>` - bytes exactly as base64-decoded
/// - `<base_dir>/decoded/<decoded_filename>` - bytes after optional gunzip
/// - `<base_dir>/exports/<name>` - CSV/JSON/XML exports
pub struct OutputManager {
    base_dir: PathBuf,
}

impl OutputManager {
    /// Create a new OutputManager with the specified base directory
    pub fn new(base_dir: PathBuf) -> OutputResult<Self> {
        Ok(Self { base_dir })
    }

    /// Get the output directory path
    pub fn output_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Write raw and decoded bytes of an item; failed items are skipped
    pub fn write_item(&self, item: &DecodedItem) -> OutputResult<Option<WrittenPayload>> {
        let Some(payload) = item.payload() else {
            return Ok(None);
        };

        let raw = self.write_file("raw", &payload.raw_filename, &payload.raw_bytes)?;
        let decoded = self.write_file("decoded", &payload.decoded_filename, &payload.decoded_bytes)?;
        Ok(Some(WrittenPayload { raw, decoded }))
    }

    /// Write an export document to the exports subdirectory
    /// Creates: <base_dir>/exports/<filename>
    pub fn write_export(&self, filename: &str, contents: &str) -> OutputResult<PathBuf> {
        self.write_file("exports", filename, contents.as_bytes())
    }

    fn write_file(&self, subdir: &str, filename: &str, data: &[u8]) -> OutputResult<PathBuf> {
        if filename.is_empty() || filename.contains(&['/', '\\'][..]) || filename.starts_with("..") {
            return Err(OutputError::InvalidPath(filename.to_string()));
        }

        let dir = self.base_dir.join(subdir);
        self.ensure_directory_exists(&dir)?;

        let filepath = dir.join(filename);
        fs::write(&filepath, data)?;
        Ok(filepath)
    }

    /// Ensure a directory exists, creating it if necessary
    fn ensure_directory_exists(&self, dir: &Path) -> OutputResult<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
