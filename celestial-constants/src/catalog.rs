//! Registered epochs and release bundles.
//!
//! The catalog answers two questions for the registry: which epochs exist
//! for a domain, and what a user-supplied id refers to. An id is either an
//! epoch id (`codata2010`) or a release name (`release-2013`) pairing one
//! epoch of each domain.

use crate::epoch::{ConstantSet, Domain};
use crate::errors::{ConstantsError, ConstantsResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub physical: String,
    pub astronomical: String,
}

impl Release {
    pub fn epoch_for(&self, domain: Domain) -> &str {
        match domain {
            Domain::Physical => &self.physical,
            Domain::Astronomical => &self.astronomical,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EpochCatalog {
    sets: Vec<ConstantSet>,
    releases: Vec<Release>,
}

impl EpochCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an epoch. Ids must be unique across domains and releases.
    pub fn insert(&mut self, set: ConstantSet) -> ConstantsResult<&mut Self> {
        if self.get(set.id()).is_some() || self.release_named(set.id()).is_some() {
            return Err(ConstantsError::invalid_config(format!(
                "epoch '{}' registered twice",
                set.id()
            )));
        }
        self.sets.push(set);
        Ok(self)
    }

    /// Registers a release bundle naming one epoch per domain.
    pub fn release(
        &mut self,
        name: &str,
        physical: &str,
        astronomical: &str,
    ) -> ConstantsResult<&mut Self> {
        if self.get(name).is_some() || self.release_named(name).is_some() {
            return Err(ConstantsError::invalid_config(format!(
                "release '{}' registered twice",
                name
            )));
        }
        self.epoch_in(Domain::Physical, physical)?;
        self.epoch_in(Domain::Astronomical, astronomical)?;
        self.releases.push(Release {
            name: name.to_string(),
            physical: physical.to_string(),
            astronomical: astronomical.to_string(),
        });
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<&ConstantSet> {
        self.sets.iter().find(|s| s.id() == id)
    }

    pub fn release_named(&self, name: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.name == name)
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn sets(&self) -> impl Iterator<Item = &ConstantSet> {
        self.sets.iter()
    }

    /// Epoch ids of `domain`, in registration order.
    pub fn ids(&self, domain: Domain) -> Vec<&str> {
        self.sets
            .iter()
            .filter(|s| s.domain() == domain)
            .map(ConstantSet::id)
            .collect()
    }

    fn epoch_in(&self, domain: Domain, id: &str) -> ConstantsResult<&ConstantSet> {
        self.get(id)
            .filter(|s| s.domain() == domain)
            .ok_or_else(|| ConstantsError::unknown_epoch(Some(domain), id))
    }

    /// Canonical epoch id for `id` within `domain`, following release names.
    pub fn resolve(&self, domain: Domain, id: &str) -> ConstantsResult<&str> {
        if let Some(release) = self.release_named(id) {
            return Ok(release.epoch_for(domain));
        }
        self.epoch_in(domain, id).map(ConstantSet::id)
    }

    /// The epochs an override with `id` applies, physical first.
    pub fn resolve_any(&self, id: &str) -> ConstantsResult<Vec<&ConstantSet>> {
        if let Some(release) = self.release_named(id) {
            return Ok(vec![
                self.epoch_in(Domain::Physical, &release.physical)?,
                self.epoch_in(Domain::Astronomical, &release.astronomical)?,
            ]);
        }
        self.get(id)
            .map(|set| vec![set])
            .ok_or_else(|| ConstantsError::unknown_epoch(None, id))
    }
}
