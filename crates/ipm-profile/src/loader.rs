//! Loader for domain profile documents
//!
//! Profiles are single documents (TOML, JSON or YAML). A session names one
//! primary profile and optionally secondaries, either as explicit paths or
//! as a directory of profile documents:
//!
//! ```text
//! profiles/
//!   archive-basic.toml
//!   photo-extension.toml
//! ```

use std::fs;

use ipm_fs::{ConfigStore, NormalizedPath};

use crate::schema::DomainProfile;
use crate::{Error, ProfileCatalog, Result};

/// Loads domain profiles and assembles them into a catalog
#[derive(Debug, Default)]
pub struct ProfileLoader {
    store: ConfigStore,
}

impl ProfileLoader {
    pub fn new() -> Self {
        Self {
            store: ConfigStore::new(),
        }
    }

    /// Load a single profile document.
    pub fn load(&self, path: &NormalizedPath) -> Result<DomainProfile> {
        if !path.exists() {
            return Err(Error::ProfileNotFound {
                path: path.to_native(),
            });
        }
        let profile: DomainProfile = self.store.load(path)?;
        tracing::debug!(
            id = %profile.meta.id,
            version = %profile.meta.version,
            node_types = profile.node_types.len(),
            "loaded profile"
        );
        Ok(profile)
    }

    /// Load every profile document in a directory, sorted by profile id.
    ///
    /// Files that fail to parse are skipped with a warning so one broken
    /// secondary does not block a session.
    pub fn load_dir(&self, dir: &NormalizedPath) -> Result<Vec<DomainProfile>> {
        let mut profiles = Vec::new();

        if !dir.exists() {
            return Ok(profiles);
        }

        let entries = fs::read_dir(dir.to_native())
            .map_err(|e| Error::Fs(ipm_fs::Error::io(dir.to_native(), e)))?;

        for entry in entries.flatten() {
            let path = NormalizedPath::new(entry.path());
            let supported = matches!(
                path.extension().map(str::to_lowercase).as_deref(),
                Some("toml" | "json" | "yaml" | "yml")
            );
            if !supported {
                continue;
            }
            match self.load(&path) {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    tracing::warn!("Failed to load profile {}: {}", path, e);
                }
            }
        }

        profiles.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));
        Ok(profiles)
    }

    /// Load the primary and secondary profiles and validate the result.
    pub fn load_catalog(
        &self,
        primary: &NormalizedPath,
        secondaries: &[NormalizedPath],
    ) -> Result<ProfileCatalog> {
        let mut catalog = ProfileCatalog::new(self.load(primary)?);
        for path in secondaries {
            catalog = catalog.with_secondary(self.load(path)?);
        }
        for issue in catalog.validate() {
            tracing::debug!(level = %issue.level, profile = %issue.profile, "{}", issue.message);
        }
        catalog.ensure_valid()?;
        Ok(catalog)
    }
}
