//! Unit-carrying magnitudes.
//!
//! Constants hand out their values as [`Quantity`]: a number, the unit string
//! it is expressed in, and the unit system. Conversion is table driven and
//! covers the units that appear in the epoch tables; this is not a general
//! unit algebra.
//!
//! | SI unit | cgs unit | factor |
//! |---------|----------|--------|
//! | `J s` | `erg s` | 1e7 |
//! | `kg` | `g` | 1e3 |
//! | `m` | `cm` | 1e2 |
//! | `m3 / (kg s2)` | `cm3 / (g s2)` | 1e3 |
//! | `Pa` | `Ba` | 10 |
//! | ... | ... | ... |
//!
//! Unit strings are matched with whitespace removed, so `J / (K)` and
//! `J/(K)` are the same key.

use crate::constant::UnitSystem;
use crate::errors::{ConstantsError, ConstantsResult};
use serde::Serialize;
use std::fmt;

struct CgsRule {
    si: &'static str,
    cgs: &'static str,
    factor: f64,
}

const fn rule(si: &'static str, cgs: &'static str, factor: f64) -> CgsRule {
    CgsRule { si, cgs, factor }
}

const CGS_RULES: &[CgsRule] = &[
    rule("J s", "erg s", 1e7),
    rule("J / (K)", "erg / K", 1e7),
    rule("J / K", "erg / K", 1e7),
    rule("J / (K mol)", "erg / (K mol)", 1e7),
    rule("J/T", "erg / G", 1e3),
    rule("m / (s)", "cm / s", 1e2),
    rule("m / s", "cm / s", 1e2),
    rule("m / s2", "cm / s2", 1e2),
    rule("m3 / (kg s2)", "cm3 / (g s2)", 1e3),
    rule("m3 / (s2)", "cm3 / s2", 1e6),
    rule("m3 / s2", "cm3 / s2", 1e6),
    rule("kg", "g", 1e3),
    rule("m", "cm", 1e2),
    rule("m2", "cm2", 1e4),
    rule("m K", "cm K", 1e2),
    rule("1 / (m)", "1 / cm", 1e-2),
    rule("1 / (mol)", "1 / mol", 1.0),
    rule("W", "erg / s", 1e7),
    rule("W / (K4 m2)", "erg / (cm2 K4 s)", 1e3),
    rule("Pa", "Ba", 10.0),
    rule("", "", 1.0),
];

fn squash(unit: &str) -> String {
    unit.chars().filter(|c| !c.is_whitespace()).collect()
}

fn rule_for_si(unit: &str) -> Option<&'static CgsRule> {
    let key = squash(unit);
    CGS_RULES.iter().find(|rule| squash(rule.si) == key)
}

fn rule_for_cgs(unit: &str) -> Option<&'static CgsRule> {
    let key = squash(unit);
    CGS_RULES.iter().find(|rule| squash(rule.cgs) == key)
}

/// A value with its unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    value: f64,
    unit: String,
    system: UnitSystem,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>, system: UnitSystem) -> Self {
        Self {
            value,
            unit: unit.into(),
            system,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    pub fn to_cgs(&self) -> ConstantsResult<Quantity> {
        match self.system {
            UnitSystem::Cgs => Ok(self.clone()),
            UnitSystem::Si | UnitSystem::None => {
                let rule = rule_for_si(&self.unit)
                    .ok_or_else(|| ConstantsError::unit_conversion(&self.unit, UnitSystem::Cgs))?;
                Ok(Quantity::new(
                    self.value * rule.factor,
                    rule.cgs,
                    UnitSystem::Cgs,
                ))
            }
            _ => Err(ConstantsError::unit_conversion(&self.unit, UnitSystem::Cgs)),
        }
    }

    pub fn to_si(&self) -> ConstantsResult<Quantity> {
        match self.system {
            UnitSystem::Si | UnitSystem::None => Ok(self.clone()),
            UnitSystem::Cgs => {
                let rule = rule_for_cgs(&self.unit)
                    .ok_or_else(|| ConstantsError::unit_conversion(&self.unit, UnitSystem::Si))?;
                Ok(Quantity::new(
                    self.value / rule.factor,
                    rule.si,
                    UnitSystem::Si,
                ))
            }
            _ => Err(ConstantsError::unit_conversion(&self.unit, UnitSystem::Si)),
        }
    }

    /// Ratio of two quantities expressed in the same unit.
    ///
    /// Used to express one constant in units of another (e.g. a mass in
    /// solar masses). Units are compared with whitespace ignored.
    pub fn ratio(&self, other: &Quantity) -> ConstantsResult<f64> {
        if squash(&self.unit) != squash(&other.unit) {
            return Err(ConstantsError::unit_conversion(&self.unit, other.system));
        }
        Ok(self.value / other.value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn si_to_cgs_uses_table_factor() {
        let g = Quantity::new(6.67384e-11, "m3 / (kg s2)", UnitSystem::Si);
        let cgs = g.to_cgs().unwrap();
        assert_relative_eq!(cgs.value(), 6.67384e-8, max_relative = 1e-15);
        assert_eq!(cgs.unit(), "cm3 / (g s2)");
    }

    #[test]
    fn whitespace_is_ignored_in_unit_keys() {
        let k = Quantity::new(1.0, "J/(K)", UnitSystem::Si);
        assert_eq!(k.to_cgs().unwrap().unit(), "erg / K");
    }

    #[test]
    fn cgs_round_trips_back_to_si() {
        let m = Quantity::new(9.10938291e-31, "kg", UnitSystem::Si);
        let back = m.to_cgs().unwrap().to_si().unwrap();
        assert_relative_eq!(back.value(), 9.10938291e-31, max_relative = 1e-15);
        assert_eq!(back.unit(), "kg");
    }

    #[test]
    fn unknown_unit_fails() {
        let mu0 = Quantity::new(1.2566e-6, "N/A2", UnitSystem::Si);
        assert_eq!(
            mu0.to_cgs().unwrap_err(),
            ConstantsError::unit_conversion("N/A2", UnitSystem::Cgs)
        );
    }

    #[test]
    fn subsystem_quantities_do_not_convert() {
        let q = Quantity::new(4.8e-10, "statC", UnitSystem::Esu);
        assert!(q.to_cgs().is_err());
        assert!(q.to_si().is_err());
    }

    #[test]
    fn ratio_requires_matching_units() {
        let a = Quantity::new(4.0, "kg", UnitSystem::Si);
        let b = Quantity::new(2.0, "kg", UnitSystem::Si);
        assert_eq!(a.ratio(&b).unwrap(), 2.0);
        let c = Quantity::new(2.0, "m", UnitSystem::Si);
        assert!(a.ratio(&c).is_err());
    }

    #[test]
    fn display_omits_empty_unit() {
        assert_eq!(Quantity::new(2.0, "", UnitSystem::None).to_string(), "2");
        assert_eq!(Quantity::new(2.0, "kg", UnitSystem::Si).to_string(), "2 kg");
    }
}
