//! Content-format detection
//!
//! Detectors return either a MIME type (`text/plain`) or a PRONOM URI
//! (`info:pronom/fmt/276`). Directories never have a format.

use std::collections::BTreeMap;

use crate::{FileKind, NormalizedPath, Result};

/// Prefix for PRONOM identifiers rendered as URIs.
pub const PRONOM_URI_PREFIX: &str = "info:pronom/";

/// Identifies the format of a file-system entry.
pub trait FormatDetector: Send + Sync {
    fn detect(&self, path: &NormalizedPath, kind: FileKind) -> Result<Option<String>>;
}

/// Extension-based MIME detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct MimeDetector;

impl FormatDetector for MimeDetector {
    fn detect(&self, path: &NormalizedPath, kind: FileKind) -> Result<Option<String>> {
        if kind != FileKind::File {
            return Ok(None);
        }
        let guess = mime_guess::from_path(path.as_str()).first_or_octet_stream();
        Ok(Some(guess.essence_str().to_string()))
    }
}

/// PRONOM detection from a configured extension table.
///
/// Extensions missing from the table fall back to MIME detection unless
/// the fallback is disabled.
#[derive(Debug, Clone, Default)]
pub struct PronomDetector {
    /// Lower-case extension -> PUID (`fmt/276`)
    table: BTreeMap<String, String>,
    mime_fallback: bool,
}

impl PronomDetector {
    pub fn new(table: BTreeMap<String, String>) -> Self {
        let table = table
            .into_iter()
            .map(|(ext, puid)| (ext.trim_start_matches('.').to_lowercase(), puid))
            .collect();
        Self {
            table,
            mime_fallback: true,
        }
    }

    pub fn without_fallback(mut self) -> Self {
        self.mime_fallback = false;
        self
    }
}

impl FormatDetector for PronomDetector {
    fn detect(&self, path: &NormalizedPath, kind: FileKind) -> Result<Option<String>> {
        if kind != FileKind::File {
            return Ok(None);
        }
        let puid = path
            .extension()
            .and_then(|ext| self.table.get(&ext.to_lowercase()));
        match puid {
            Some(puid) => Ok(Some(format!("{}{}", PRONOM_URI_PREFIX, puid))),
            None if self.mime_fallback => MimeDetector.detect(path, kind),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_text_file() {
        let format = MimeDetector
            .detect(&NormalizedPath::new("/a/notes.txt"), FileKind::File)
            .unwrap();
        assert_eq!(format.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_directories_have_no_format() {
        let format = MimeDetector
            .detect(&NormalizedPath::new("/a/dir"), FileKind::Directory)
            .unwrap();
        assert_eq!(format, None);
    }

    #[test]
    fn test_pronom_table_lookup_is_case_insensitive() {
        let detector =
            PronomDetector::new(BTreeMap::from([(".PDF".to_string(), "fmt/276".to_string())]));
        let format = detector
            .detect(&NormalizedPath::new("/a/report.Pdf"), FileKind::File)
            .unwrap();
        assert_eq!(format.as_deref(), Some("info:pronom/fmt/276"));
    }

    #[test]
    fn test_pronom_without_fallback() {
        let detector = PronomDetector::new(BTreeMap::new()).without_fallback();
        let format = detector
            .detect(&NormalizedPath::new("/a/x.txt"), FileKind::File)
            .unwrap();
        assert_eq!(format, None);
    }
}
