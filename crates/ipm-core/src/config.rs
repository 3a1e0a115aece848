//! Session configuration
//!
//! A session names the profiles to load, an optional rule set, and how
//! the file system is scanned:
//!
//! ```toml
//! profile = "profiles/archive.toml"
//! secondary_profiles = ["profiles/photo.toml"]
//! rules = "rules.toml"
//!
//! [scan]
//! include_hidden = false
//! max_depth = 8
//!
//! [detection]
//! method = "pronom"
//! extensions = { pdf = "fmt/276", tif = "fmt/353" }
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use std::collections::BTreeMap;

use ipm_fs::{ConfigStore, FormatDetector, MimeDetector, NormalizedPath, PronomDetector};
use serde::{Deserialize, Serialize};

use crate::{Result, ScanOptions};

/// How content formats are identified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum FormatDetection {
    /// MIME types guessed from the extension
    #[default]
    Mime,
    /// PRONOM URIs from an extension table
    Pronom {
        #[serde(default)]
        extensions: BTreeMap<String, String>,
        #[serde(default = "default_true")]
        mime_fallback: bool,
    },
}

fn default_true() -> bool {
    true
}

impl FormatDetection {
    pub fn detector(&self) -> Box<dyn FormatDetector> {
        match self {
            Self::Mime => Box::new(MimeDetector),
            Self::Pronom {
                extensions,
                mime_fallback,
            } => {
                let detector = PronomDetector::new(extensions.clone());
                if *mime_fallback {
                    Box::new(detector)
                } else {
                    Box::new(detector.without_fallback())
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Primary domain profile
    pub profile: NormalizedPath,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_profiles: Vec<NormalizedPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<NormalizedPath>,
    /// Follow symbolic links while scanning
    #[serde(default)]
    pub follow_links: bool,
    #[serde(default)]
    pub scan: ScanOptions,
    #[serde(default)]
    pub detection: FormatDetection,
}

impl SessionConfig {
    pub fn new(profile: impl Into<NormalizedPath>) -> Self {
        Self {
            profile: profile.into(),
            secondary_profiles: Vec::new(),
            rules: None,
            follow_links: false,
            scan: ScanOptions::default(),
            detection: FormatDetection::default(),
        }
    }

    pub fn with_secondary(mut self, profile: impl Into<NormalizedPath>) -> Self {
        self.secondary_profiles.push(profile.into());
        self
    }

    pub fn with_rules(mut self, rules: impl Into<NormalizedPath>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    pub fn with_scan(mut self, scan: ScanOptions) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_detection(mut self, detection: FormatDetection) -> Self {
        self.detection = detection;
        self
    }

    /// Load from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: SessionConfig = ConfigStore::new().load(path)?;
        let base = path.parent().unwrap_or_else(|| NormalizedPath::new("."));
        Ok(config.resolved_against(&base))
    }

    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    fn resolved_against(mut self, base: &NormalizedPath) -> Self {
        let resolve = |path: &NormalizedPath| {
            if path.to_native().is_absolute() {
                path.clone()
            } else {
                base.join(path.as_str())
            }
        };
        self.profile = resolve(&self.profile);
        self.secondary_profiles = self.secondary_profiles.iter().map(resolve).collect();
        self.rules = self.rules.as_ref().map(resolve);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: SessionConfig = toml::from_str(r#"profile = "/p/archive.toml""#).unwrap();
        assert_eq!(config, SessionConfig::new("/p/archive.toml"));
        assert!(config.scan.include_hidden);
        assert_eq!(config.scan.max_depth, None);
        assert_eq!(config.detection, FormatDetection::Mime);
    }

    #[test]
    fn test_pronom_detection_table() {
        let config: SessionConfig = toml::from_str(
            r#"
profile = "/p/archive.toml"

[detection]
method = "pronom"
extensions = { pdf = "fmt/276" }
"#,
        )
        .unwrap();
        let detector = config.detection.detector();
        let format = detector
            .detect(&NormalizedPath::new("/x/report.PDF"), ipm_fs::FileKind::File)
            .unwrap();
        assert_eq!(format.as_deref(), Some("info:pronom/fmt/276"));
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let config = SessionConfig::new("profiles/archive.toml")
            .with_secondary("/abs/photo.toml")
            .with_rules("rules.toml")
            .resolved_against(&NormalizedPath::new("/work/session"));

        assert_eq!(config.profile.as_str(), "/work/session/profiles/archive.toml");
        assert_eq!(config.secondary_profiles[0].as_str(), "/abs/photo.toml");
        assert_eq!(
            config.rules.as_ref().map(NormalizedPath::as_str),
            Some("/work/session/rules.toml")
        );
    }
}
