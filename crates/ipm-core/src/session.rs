//! Session wiring
//!
//! A [`Session`] owns everything that stays fixed while a user curates
//! packages: the validated profile catalog, the rule set and the file
//! system. Services borrow from it, so there is no global state.

use ipm_fs::{FileSystem, LocalFileSystem, NormalizedPath};
use ipm_profile::{ProfileCatalog, ProfileLoader};
use ipm_rules::RuleSet;

use crate::{DomainProfileService, IpmService, Result, SessionConfig};

pub struct Session {
    config: SessionConfig,
    catalog: ProfileCatalog,
    rules: RuleSet,
    fs: LocalFileSystem,
}

impl Session {
    /// Load and validate profiles, load rules, and set up the file system.
    pub fn open(config: SessionConfig) -> Result<Self> {
        let catalog =
            ProfileLoader::new().load_catalog(&config.profile, &config.secondary_profiles)?;
        let rules = match &config.rules {
            Some(path) => RuleSet::load(path)?,
            None => RuleSet::new(),
        };
        let fs = LocalFileSystem::with_detector(config.detection.detector())
            .follow_links(config.follow_links);

        tracing::debug!(
            profile = %catalog.primary().id(),
            profiles = catalog.profiles().len(),
            type_rules = rules.type_rules.len(),
            "opened session"
        );
        Ok(Self {
            config,
            catalog,
            rules,
            fs,
        })
    }

    /// Open from a session config file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Self::open(SessionConfig::load(path)?)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        &self.fs
    }

    /// Canonical absolute form of a location to scan.
    pub fn resolve(&self, path: &NormalizedPath) -> Result<NormalizedPath> {
        Ok(self.fs.canonicalize(path)?)
    }

    pub fn profile_service(&self) -> DomainProfileService<'_> {
        DomainProfileService::new(&self.catalog, &self.fs).with_rules(&self.rules)
    }

    pub fn ipm_service(&self) -> IpmService<'_> {
        IpmService::new(&self.fs)
            .with_options(self.config.scan.clone())
            .with_catalog(&self.catalog)
    }
}
