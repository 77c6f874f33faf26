//! Input manager: reads resume files from disk and extracts normalized text

use crate::config::ExtractionConfig;
use crate::error::{AtsError, Result};
use crate::input::text_extractor::{ResumeExtractor, ResumeFile};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    extractor: ResumeExtractor,
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            extractor: ResumeExtractor::default(),
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            extractor: ResumeExtractor::new(config.structured_pdf),
            cache: HashMap::new(),
            enable_cache: config.enable_cache,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read `path` once and return its normalized text.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(AtsError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path_str.clone());

        // detect before reading so unsupported files are rejected cheaply
        let file_type = ResumeFile::new(Vec::new(), name.clone()).file_type()?;
        info!("Extracting {:?} text from: {}", file_type, path.display());

        let bytes = fs::read(path).await?;
        let text = self.extractor.extract(&ResumeFile::new(bytes, name))?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract from an in-memory upload; never cached.
    pub fn extract_file(&self, file: &ResumeFile) -> Result<String> {
        self.extractor.extract(file)
    }

    /// Read a file as-is (job descriptions, record JSON).
    pub async fn read_raw(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(AtsError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        Ok(fs::read_to_string(path).await?)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_extract_and_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Jane   Doe\n\nEngineer").unwrap();

        let mut manager = InputManager::new();
        let text = manager.extract_text(&path).await.unwrap();
        assert_eq!(text, "Jane Doe Engineer");
        assert_eq!(manager.cache_size(), 1);

        // served from cache even after the file changes
        std::fs::write(&path, "changed").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Jane Doe Engineer");

        manager.clear_cache();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "changed");
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "text").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        manager.extract_text(&path).await.unwrap();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let mut manager = InputManager::new();
        let result = manager.extract_text(Path::new("/definitely/not/here.txt")).await;
        assert!(matches!(result, Err(AtsError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.odt");
        std::fs::write(&path, "text").unwrap();

        let mut manager = InputManager::new();
        let result = manager.extract_text(&path).await;
        assert!(matches!(result, Err(AtsError::UnsupportedFileType(_))));
    }
}
