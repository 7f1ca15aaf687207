//! Default epoch configuration.
//!
//! The registry starts each domain at a configured default. Sources are
//! layered, later wins:
//!
//! 1. built-in defaults (`codata2014`, `iau2015`)
//! 2. the `[constants]` table of a TOML file, located by
//!    `CELESTIAL_CONSTANTS_CONFIG` or passed explicitly
//! 3. `CELESTIAL_PHYSICAL_CONSTANTS` / `CELESTIAL_ASTRONOMICAL_CONSTANTS`
//!
//! ```toml
//! [constants]
//! physical_constants = "codata2010"
//! astronomical_constants = "release-2013"
//! ```
//!
//! Values may be epoch ids or release names. They are checked against the
//! catalog when a registry is built, not when the file is parsed.

use crate::catalog::EpochCatalog;
use crate::data::{DEFAULT_ASTRONOMICAL, DEFAULT_PHYSICAL};
use crate::epoch::Domain;
use crate::errors::{ConstantsError, ConstantsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "CELESTIAL_CONSTANTS_CONFIG";
pub const PHYSICAL_ENV: &str = "CELESTIAL_PHYSICAL_CONSTANTS";
pub const ASTRONOMICAL_ENV: &str = "CELESTIAL_ASTRONOMICAL_CONSTANTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstantsConfig {
    pub physical_constants: String,
    pub astronomical_constants: String,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            physical_constants: DEFAULT_PHYSICAL.to_string(),
            astronomical_constants: DEFAULT_ASTRONOMICAL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    constants: ConstantsConfig,
}

impl ConstantsConfig {
    pub fn new(physical: impl Into<String>, astronomical: impl Into<String>) -> Self {
        Self {
            physical_constants: physical.into(),
            astronomical_constants: astronomical.into(),
        }
    }

    /// Parses a TOML document. Missing keys fall back to the defaults and
    /// other top-level tables are ignored.
    pub fn from_toml_str(content: &str) -> ConstantsResult<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConstantsError::invalid_config(e.to_string()))?;
        Ok(file.constants)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ConstantsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConstantsError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies per-domain overrides from `lookup` (normally the process
    /// environment). Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(PHYSICAL_ENV).filter(|v| !v.trim().is_empty()) {
            self.physical_constants = value.trim().to_string();
        }
        if let Some(value) = lookup(ASTRONOMICAL_ENV).filter(|v| !v.trim().is_empty()) {
            self.astronomical_constants = value.trim().to_string();
        }
        self
    }

    /// Full layered load from the process environment.
    pub fn from_env() -> ConstantsResult<Self> {
        Self::load(std::env::var_os(CONFIG_PATH_ENV).as_deref().map(Path::new))
    }

    /// Layered load with an explicit file. Environment overrides still apply.
    pub fn load(path: Option<&Path>) -> ConstantsResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn default_for(&self, domain: Domain) -> &str {
        match domain {
            Domain::Physical => &self.physical_constants,
            Domain::Astronomical => &self.astronomical_constants,
        }
    }

    /// Canonical epoch id per domain, rejecting unknown values.
    pub fn resolve(&self, catalog: &EpochCatalog) -> ConstantsResult<[String; 2]> {
        Ok([
            catalog
                .resolve(Domain::Physical, &self.physical_constants)?
                .to_string(),
            catalog
                .resolve(Domain::Astronomical, &self.astronomical_constants)?
                .to_string(),
        ])
    }
}
