use serde::{Deserialize, Serialize};

use super::FileOperation;
use crate::Param;

/// File attribute extracted by `file-metadata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAttribute {
    Name,
    /// Byte size
    Size,
    Created,
    Modified,
    /// `Directory`, `File` or `Other`
    Type,
    /// Detected format identifier
    Format,
}

impl std::str::FromStr for FileAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "size" => Ok(Self::Size),
            "created" | "creation-date" => Ok(Self::Created),
            "modified" | "modification-date" => Ok(Self::Modified),
            "type" => Ok(Self::Type),
            "format" => Ok(Self::Format),
            other => Err(format!("unknown file attribute '{}'", other)),
        }
    }
}

impl std::fmt::Display for FileAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Type => "type",
            Self::Format => "format",
        };
        write!(f, "{}", name)
    }
}

/// Produces zero or more strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum ValueOperation {
    Literal { value: Param },
    /// Host property (`os.name`, `user.dir`, ...) or environment variable
    SystemProperty { name: Param },
    /// One value per input file; the context entry when `files` is empty
    FileMetadata {
        attribute: Param,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        files: Vec<FileOperation>,
    },
}

impl ValueOperation {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: Param::literal(value),
        }
    }

    pub fn system_property(name: impl Into<String>) -> Self {
        Self::SystemProperty {
            name: Param::literal(name),
        }
    }

    /// Attribute of the context entry.
    pub fn metadata(attribute: FileAttribute) -> Self {
        Self::FileMetadata {
            attribute: Param::literal(attribute.to_string()),
            files: Vec::new(),
        }
    }

    /// Attribute of every entry selected by `files`.
    pub fn metadata_of(attribute: FileAttribute, files: Vec<FileOperation>) -> Self {
        Self::FileMetadata {
            attribute: Param::literal(attribute.to_string()),
            files,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::SystemProperty { .. } => "system-property",
            Self::FileMetadata { .. } => "file-metadata",
        }
    }
}
