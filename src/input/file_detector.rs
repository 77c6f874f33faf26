//! Resume file type detection

use crate::error::{AtsError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Pdf,
    LegacyWord,
    WordXml,
}

impl FileType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "text/plain" => Some(FileType::PlainText),
            "application/pdf" => Some(FileType::Pdf),
            "application/msword" => Some(FileType::LegacyWord),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(FileType::WordXml)
            }
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(FileType::PlainText),
            "pdf" => Some(FileType::Pdf),
            "doc" => Some(FileType::LegacyWord),
            "docx" => Some(FileType::WordXml),
            _ => None,
        }
    }

    /// Declared MIME type wins; the file name's extension is the fallback.
    pub fn detect(declared_type: Option<&str>, name: &str) -> Result<Self> {
        declared_type
            .and_then(Self::from_mime)
            .or_else(|| {
                Path::new(name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(Self::from_extension)
            })
            .ok_or_else(|| AtsError::UnsupportedFileType(name.to_string()))
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileType::PlainText => "text/plain",
            FileType::Pdf => "application/pdf",
            FileType::LegacyWord => "application/msword",
            FileType::WordXml => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(FileType::detect(None, "cv.TXT").unwrap(), FileType::PlainText);
        assert_eq!(FileType::detect(None, "cv.pdf").unwrap(), FileType::Pdf);
        assert_eq!(FileType::detect(None, "cv.doc").unwrap(), FileType::LegacyWord);
        assert_eq!(FileType::detect(None, "cv.Docx").unwrap(), FileType::WordXml);
    }

    #[test]
    fn test_mime_takes_precedence() {
        let detected = FileType::detect(Some("application/pdf"), "resume.txt").unwrap();
        assert_eq!(detected, FileType::Pdf);

        // unknown MIME falls back to the extension
        let detected = FileType::detect(Some("application/octet-stream"), "resume.docx").unwrap();
        assert_eq!(detected, FileType::WordXml);
    }

    #[test]
    fn test_unsupported_types() {
        assert!(matches!(
            FileType::detect(None, "resume.md"),
            Err(AtsError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            FileType::detect(Some("image/png"), "resume"),
            Err(AtsError::UnsupportedFileType(_))
        ));
    }
}
