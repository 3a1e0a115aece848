//! Attributes of one entry as seen by `file-metadata`

use ipm_fs::metadata::iso8601;
use ipm_fs::FileMetadata;
use serde::{Deserialize, Serialize};

use crate::FileAttribute;

/// File metadata plus the detected content format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub metadata: FileMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FileRecord {
    pub fn new(metadata: FileMetadata, format: Option<String>) -> Self {
        Self { metadata, format }
    }

    /// String form of one attribute, `None` when the platform or detector
    /// does not provide it.
    pub fn attribute(&self, attribute: FileAttribute) -> Option<String> {
        match attribute {
            FileAttribute::Name => Some(self.metadata.name().to_string()),
            FileAttribute::Size => Some(self.metadata.size.to_string()),
            FileAttribute::Created => self.metadata.created.as_ref().map(iso8601),
            FileAttribute::Modified => self.metadata.modified.as_ref().map(iso8601),
            FileAttribute::Type => Some(self.metadata.kind.label().to_string()),
            FileAttribute::Format => self.format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ipm_fs::{FileKind, NormalizedPath};

    fn record() -> FileRecord {
        FileRecord::new(
            FileMetadata {
                path: NormalizedPath::new("/data/report.pdf"),
                kind: FileKind::File,
                size: 2048,
                created: None,
                modified: Some(Utc.with_ymd_and_hms(2023, 11, 5, 8, 0, 0).unwrap()),
            },
            Some("application/pdf".to_string()),
        )
    }

    #[test]
    fn test_attributes() {
        let record = record();
        assert_eq!(record.attribute(FileAttribute::Name).as_deref(), Some("report.pdf"));
        assert_eq!(record.attribute(FileAttribute::Size).as_deref(), Some("2048"));
        assert_eq!(record.attribute(FileAttribute::Type).as_deref(), Some("File"));
        assert_eq!(
            record.attribute(FileAttribute::Modified).as_deref(),
            Some("2023-11-05T08:00:00Z")
        );
        assert_eq!(record.attribute(FileAttribute::Created), None);
        assert_eq!(
            record.attribute(FileAttribute::Format).as_deref(),
            Some("application/pdf")
        );
    }
}
