//! Slash-separated path identity
//!
//! Tree correlation, rule evaluation and snapshot files all compare paths
//! as strings, so every path entering the engine is normalized once:
//! backslashes become `/`, empty and `.` segments vanish, and there is no
//! trailing separator. `..` is kept as written; paths are never resolved
//! against the file system here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::from_raw(&path.as_ref().to_string_lossy())
    }

    fn from_raw(raw: &str) -> Self {
        let raw = raw.replace('\\', "/");
        let segments: Vec<&str> = raw
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let prefix = if raw.starts_with('/') { "/" } else { "" };
        Self {
            inner: format!("{}{}", prefix, segments.join("/")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform path for I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append one or more `/`-separated segments.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            Self::from_raw(segment)
        } else {
            Self::from_raw(&format!("{}/{}", self.inner, segment))
        }
    }

    /// Enclosing directory; `None` for `/` and for a single relative segment.
    pub fn parent(&self) -> Option<Self> {
        let idx = self.inner.rfind('/')?;
        match &self.inner[..idx] {
            "" if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            "" => None,
            dir => Some(Self {
                inner: dir.to_string(),
            }),
        }
    }

    /// Last segment; `None` for `/` and the empty path.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Text after the last dot of the file name. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Segment-wise prefix test: `/a/b` is under `/a`, `/a/bc` is not.
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        self.relative_to(base).is_some()
    }

    /// `self` relative to `base`; empty when equal, `None` when `base` is
    /// not a segment-wise prefix.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<String> {
        let rest = self.inner.strip_prefix(base.inner.as_str())?;
        if rest.is_empty() {
            return Some(String::new());
        }
        if base.inner.ends_with('/') {
            return Some(rest.to_string());
        }
        rest.strip_prefix('/').map(str::to_string)
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::from_raw(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::from_raw(&s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}
