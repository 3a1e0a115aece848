//! Basic file attributes as read from the file system

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::SystemTime;

use crate::NormalizedPath;

/// Kind of a file-system entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
    /// Symlinks that are not followed, sockets, devices, ...
    Other,
}

impl FileKind {
    /// Type label used by the rule engine's `type` attribute.
    pub fn label(&self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Directory => "Directory",
            Self::Other => "Other",
        }
    }

    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Attributes of a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub path: NormalizedPath,
    pub kind: FileKind,
    /// Byte size; zero for directories
    pub size: u64,
    /// Not every platform records creation time
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl FileMetadata {
    /// Build from `std::fs::Metadata`, truncating timestamps to whole seconds.
    pub fn from_std(path: NormalizedPath, meta: &fs::Metadata) -> Self {
        let kind = FileKind::from_file_type(meta.file_type());
        Self {
            path,
            kind,
            size: if kind == FileKind::Directory { 0 } else { meta.len() },
            created: meta.created().ok().and_then(to_utc),
            modified: meta.modified().ok().and_then(to_utc),
        }
    }

    pub fn name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

fn to_utc(time: SystemTime) -> Option<DateTime<Utc>> {
    let secs = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()?
        .as_secs();
    DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)
}

/// ISO-8601 without fractional seconds, e.g. `2024-03-01T12:00:00Z`.
pub fn iso8601(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
