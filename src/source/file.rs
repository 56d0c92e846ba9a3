//! JSON file record source.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{parse_records, RecordSource};
use crate::error::{Result, TypeaheadError};

/// Loads records from a local JSON file holding an array.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads synchronously; used by scripted collection swaps.
    pub fn load_blocking(&self) -> Result<Vec<Value>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            TypeaheadError::source(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        self.parse(&content)
    }

    fn parse(&self, content: &str) -> Result<Vec<Value>> {
        let document: Value = serde_json::from_str(content).map_err(|e| {
            TypeaheadError::source(format!("Invalid JSON in {}: {}", self.path.display(), e))
        })?;
        parse_records(document)
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Value>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            TypeaheadError::source(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        self.parse(&content)
    }
}
