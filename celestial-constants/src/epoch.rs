//! Epochs: immutable, versioned sets of constants.
//!
//! A [`ConstantSet`] holds every constant published by one standard (e.g.
//! CODATA 2014) for one [`Domain`]. Sets are assembled with
//! [`ConstantSetBuilder`], which rejects duplicate `(abbrev, system)` keys and
//! runs the cgs variant derivation, and are never modified afterwards.
//!
//! Iteration follows insertion order, which is the order the binder uses.

use crate::constant::{Constant, ConstantKey, ConstantKind, UnitSystem};
use crate::errors::{ConstantsError, ConstantsResult};
use crate::variants;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The two independent axes of constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Physical,
    Astronomical,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Physical, Domain::Astronomical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Physical => "physical",
            Domain::Astronomical => "astronomical",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = ConstantsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" | "phys" => Ok(Domain::Physical),
            "astronomical" | "astro" => Ok(Domain::Astronomical),
            other => Err(ConstantsError::invalid_config(format!(
                "unknown constants domain '{}'",
                other
            ))),
        }
    }
}

/// An immutable, uniquely-keyed collection of constants from one standard.
#[derive(Debug, Clone)]
pub struct ConstantSet {
    id: String,
    domain: Domain,
    reference: String,
    constants: Vec<Constant>,
    index: HashMap<ConstantKey, usize>,
}

impl ConstantSet {
    pub fn builder(
        id: impl Into<String>,
        domain: Domain,
        reference: impl Into<String>,
    ) -> ConstantSetBuilder {
        ConstantSetBuilder {
            id: id.into(),
            domain,
            reference: reference.into(),
            constants: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Default provenance string for records in this set.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Constants in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.constants.iter()
    }

    /// The primary record for `abbrev`: the first one inserted, normally the
    /// SI definition.
    pub fn get(&self, abbrev: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.abbrev() == abbrev)
    }

    pub fn get_in(&self, abbrev: &str, system: UnitSystem) -> Option<&Constant> {
        self.index
            .get(&ConstantKey::new(abbrev, system))
            .map(|&i| &self.constants[i])
    }

    pub fn contains_key(&self, key: &ConstantKey) -> bool {
        self.index.contains_key(key)
    }
}

impl<'a> IntoIterator for &'a ConstantSet {
    type Item = &'a Constant;
    type IntoIter = std::slice::Iter<'a, Constant>;

    fn into_iter(self) -> Self::IntoIter {
        self.constants.iter()
    }
}

/// Incremental construction of a [`ConstantSet`].
///
/// Records default to the set's reference string; use
/// [`ConstantSetBuilder::push`] with a prebuilt [`Constant`] to override it.
pub struct ConstantSetBuilder {
    id: String,
    domain: Domain,
    reference: String,
    constants: Vec<Constant>,
    index: HashMap<ConstantKey, usize>,
}

impl ConstantSetBuilder {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// A record tagged with this builder's epoch and domain.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        abbrev: &str,
        name: &str,
        value: f64,
        unit: &str,
        uncertainty: f64,
        reference: &str,
        system: UnitSystem,
        kind: ConstantKind,
    ) -> Constant {
        Constant::new(
            abbrev,
            name,
            value,
            unit,
            uncertainty,
            reference,
            system,
            kind,
            self.id.clone(),
            self.domain,
        )
    }

    pub fn push(&mut self, constant: Constant) -> ConstantsResult<&mut Self> {
        let key = constant.key();
        if self.index.contains_key(&key) {
            return Err(ConstantsError::duplicate_abbreviation(
                &self.id,
                key.abbrev,
                key.system,
            ));
        }
        self.index.insert(key, self.constants.len());
        self.constants.push(constant);
        Ok(self)
    }

    /// Adds a plain SI constant carrying the set's reference.
    pub fn si(
        &mut self,
        abbrev: &str,
        name: &str,
        value: f64,
        unit: &str,
        uncertainty: f64,
    ) -> ConstantsResult<&mut Self> {
        let reference = self.reference.clone();
        let record = self.record(
            abbrev,
            name,
            value,
            unit,
            uncertainty,
            &reference,
            UnitSystem::Si,
            ConstantKind::Plain,
        );
        self.push(record)
    }

    /// Adds a plain SI constant with its own provenance string.
    pub fn si_cited(
        &mut self,
        abbrev: &str,
        name: &str,
        value: f64,
        unit: &str,
        uncertainty: f64,
        reference: &str,
    ) -> ConstantsResult<&mut Self> {
        let record = self.record(
            abbrev,
            name,
            value,
            unit,
            uncertainty,
            reference,
            UnitSystem::Si,
            ConstantKind::Plain,
        );
        self.push(record)
    }

    /// Adds an electromagnetic SI constant carrying the set's reference.
    pub fn em(
        &mut self,
        abbrev: &str,
        name: &str,
        value: f64,
        unit: &str,
        uncertainty: f64,
    ) -> ConstantsResult<&mut Self> {
        let reference = self.reference.clone();
        let record = self.record(
            abbrev,
            name,
            value,
            unit,
            uncertainty,
            &reference,
            UnitSystem::Si,
            ConstantKind::Electromagnetic,
        );
        self.push(record)
    }

    /// Derives the cgs-subsystem records of an SI electromagnetic constant
    /// already in the set. `units` pairs each subsystem with its unit string.
    pub fn cgs_variants(
        &mut self,
        abbrev: &str,
        units: &[(UnitSystem, &str)],
    ) -> ConstantsResult<&mut Self> {
        let si = self
            .get_in(abbrev, UnitSystem::Si)
            .ok_or_else(|| ConstantsError::missing_constant(&self.id, abbrev))?;
        let c = self
            .get_in("c", UnitSystem::Si)
            .ok_or_else(|| ConstantsError::missing_constant(&self.id, "c"))?;
        let derived = variants::derive_variants(si, c.value(), units)?;
        for record in derived {
            self.push(record)?;
        }
        Ok(self)
    }

    pub fn get_in(&self, abbrev: &str, system: UnitSystem) -> Option<&Constant> {
        self.index
            .get(&ConstantKey::new(abbrev, system))
            .map(|&i| &self.constants[i])
    }

    pub fn build(self) -> ConstantSet {
        ConstantSet {
            id: self.id,
            domain: self.domain,
            reference: self.reference,
            constants: self.constants,
            index: self.index,
        }
    }
}
