use crate::domain::ports::Storage;
use crate::utils::error::{FixtureError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    /// Replaces any existing file. The base directory must already exist.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|source| FixtureError::FileWriteError {
                path: full_path.display().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("out.json", b"[1,2,3]").await.unwrap();
        storage.write_file("out.json", b"[]").await.unwrap();

        let data = storage.read_file("out.json").await.unwrap();
        assert_eq!(data, b"[]");
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_is_file_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let storage = LocalStorage::new(missing.to_str().unwrap().to_string());

        let err = storage.write_file("out.json", b"[]").await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::FileWrite);
        assert!(err.to_string().contains("out.json"));
    }
}
