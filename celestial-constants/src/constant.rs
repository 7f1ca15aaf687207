//! The constant record.
//!
//! A [`Constant`] is an immutable value object: abbreviation, descriptive
//! name, value, uncertainty, unit string, provenance and the unit system it
//! is expressed in. Records are authored once in the static epoch tables and
//! cloned out of the registry on lookup.
//!
//! Electromagnetic constants carry [`ConstantKind::Electromagnetic`]. Their
//! generic cgs form is ambiguous (esu, emu and gaussian units disagree), so
//! [`Constant::cgs`] refuses them and callers must look up the explicit
//! subsystem record instead.

use crate::epoch::Domain;
use crate::errors::{ConstantsError, ConstantsResult};
use crate::quantity::Quantity;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unit system a record is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Dimensionless or system-independent.
    None,
    Si,
    Cgs,
    /// Electrostatic cgs.
    Esu,
    /// Electromagnetic cgs.
    Emu,
    Gauss,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 6] = [
        UnitSystem::None,
        UnitSystem::Si,
        UnitSystem::Cgs,
        UnitSystem::Esu,
        UnitSystem::Emu,
        UnitSystem::Gauss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::None => "none",
            UnitSystem::Si => "si",
            UnitSystem::Cgs => "cgs",
            UnitSystem::Esu => "esu",
            UnitSystem::Emu => "emu",
            UnitSystem::Gauss => "gauss",
        }
    }

    /// True for the electromagnetic cgs subsystems.
    pub fn is_cgs_subsystem(&self) -> bool {
        matches!(self, UnitSystem::Esu | UnitSystem::Emu | UnitSystem::Gauss)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = ConstantsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        UnitSystem::ALL
            .into_iter()
            .find(|system| system.as_str() == lowered)
            .ok_or_else(|| ConstantsError::invalid_config(format!("unknown unit system '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantKind {
    #[default]
    Plain,
    /// Charge-like constants whose cgs form depends on the subsystem.
    Electromagnetic,
}

/// Lookup key inside an epoch or namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstantKey {
    pub abbrev: String,
    pub system: UnitSystem,
}

impl ConstantKey {
    pub fn new(abbrev: impl Into<String>, system: UnitSystem) -> Self {
        Self {
            abbrev: abbrev.into(),
            system,
        }
    }
}

impl fmt::Display for ConstantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.abbrev, self.system)
    }
}

/// One physical or astronomical constant.
///
/// Equality and hashing use `(abbrev, system, epoch)`. Two records from the
/// same table compare equal even if one was cloned. Use
/// [`Constant::same_definition`] to compare values, and
/// [`Constant::identical`] for a full field-by-field comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Constant {
    abbrev: String,
    name: String,
    value: f64,
    uncertainty: f64,
    unit: String,
    reference: String,
    system: UnitSystem,
    kind: ConstantKind,
    epoch: String,
    domain: Domain,
}

impl Constant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        abbrev: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        uncertainty: f64,
        reference: impl Into<String>,
        system: UnitSystem,
        kind: ConstantKind,
        epoch: impl Into<String>,
        domain: Domain,
    ) -> Self {
        Self {
            abbrev: abbrev.into(),
            name: name.into(),
            value,
            uncertainty,
            unit: unit.into(),
            reference: reference.into(),
            system,
            kind,
            epoch: epoch.into(),
            domain,
        }
    }

    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    pub fn kind(&self) -> ConstantKind {
        self.kind
    }

    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn is_electromagnetic(&self) -> bool {
        self.kind == ConstantKind::Electromagnetic
    }

    pub fn key(&self) -> ConstantKey {
        ConstantKey::new(self.abbrev.clone(), self.system)
    }

    /// The value as a unit-carrying magnitude in the record's own system.
    pub fn quantity(&self) -> Quantity {
        Quantity::new(self.value, self.unit.clone(), self.system)
    }

    /// The value in SI units.
    ///
    /// Records authored in SI (or dimensionless) are returned as-is; cgs
    /// records are converted back.
    pub fn si(&self) -> ConstantsResult<Quantity> {
        self.quantity().to_si()
    }

    /// The value in generic cgs units.
    ///
    /// Fails with [`ConstantsError::AmbiguousSystemConversion`] for
    /// electromagnetic constants; fetch the `esu`, `emu` or `gauss` record
    /// explicitly instead.
    pub fn cgs(&self) -> ConstantsResult<Quantity> {
        match self.kind {
            ConstantKind::Electromagnetic => Err(ConstantsError::ambiguous_system(&self.abbrev)),
            ConstantKind::Plain => self.quantity().to_cgs(),
        }
    }

    /// True when value, unit and uncertainty all match.
    ///
    /// This is the comparison the binder uses to decide whether a name
    /// collision is a genuine redefinition.
    pub fn same_definition(&self, other: &Constant) -> bool {
        self.value.to_bits() == other.value.to_bits()
            && self.uncertainty.to_bits() == other.uncertainty.to_bits()
            && self.unit == other.unit
    }

    /// Field-by-field comparison including provenance, with floats compared
    /// bitwise.
    pub fn identical(&self, other: &Constant) -> bool {
        self.same_definition(other)
            && self.abbrev == other.abbrev
            && self.name == other.name
            && self.reference == other.reference
            && self.system == other.system
            && self.kind == other.kind
            && self.epoch == other.epoch
            && self.domain == other.domain
    }

    /// Copy of this record re-expressed in another subsystem.
    pub(crate) fn with_system(
        &self,
        system: UnitSystem,
        value: f64,
        uncertainty: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            abbrev: self.abbrev.clone(),
            name: self.name.clone(),
            value,
            uncertainty,
            unit: unit.into(),
            reference: self.reference.clone(),
            system,
            kind: self.kind,
            epoch: self.epoch.clone(),
            domain: self.domain,
        }
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.abbrev == other.abbrev && self.system == other.system && self.epoch == other.epoch
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.abbrev.hash(state);
        self.system.hash(state);
        self.epoch.hash(state);
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Name   = {}", self.name)?;
        writeln!(f, "  Value  = {}", self.value)?;
        writeln!(f, "  Uncertainty  = {}", self.uncertainty)?;
        writeln!(f, "  Unit  = {}", self.unit)?;
        write!(f, "  Reference = {}", self.reference)
    }
}
