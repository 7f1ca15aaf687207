//! cgs-subsystem variants of electromagnetic constants.
//!
//! The electrostatic, electromagnetic and gaussian extensions of cgs each
//! express charge-like quantities differently, so an SI electromagnetic
//! constant has no single cgs value. The variants are fixed by convention:
//!
//! | System | Value | Example unit |
//! |--------|-------|--------------|
//! | esu | `si × c × 10` | statC |
//! | emu | `si ÷ 10` | abC |
//! | gauss | `si × c × 10` | Fr |
//!
//! `c` is the numeric SI speed of light (m/s) from the same epoch. The
//! uncertainty is scaled by the same factor as the value.
//!
//! Gauss shares the esu formula. This holds for charge, the only quantity
//! derived here, and is not a general rule for gaussian units.

use crate::constant::{Constant, UnitSystem};
use crate::errors::{ConstantsError, ConstantsResult};

/// Converts an SI magnitude to `system`. `None` for systems that have no
/// electromagnetic variant.
fn scale(system: UnitSystem, x: f64, c_value: f64) -> Option<f64> {
    match system {
        UnitSystem::Esu | UnitSystem::Gauss => Some(x * c_value * 10.0),
        UnitSystem::Emu => Some(x / 10.0),
        _ => None,
    }
}

/// Multiplicative factor from SI to `system` for a charge-like constant.
///
/// Returns `None` for systems that have no electromagnetic variant.
pub fn cgs_factor(system: UnitSystem, c_value: f64) -> Option<f64> {
    scale(system, 1.0, c_value)
}

/// Derives one subsystem record from an SI electromagnetic constant.
pub fn derive_variant(
    si: &Constant,
    system: UnitSystem,
    unit: &str,
    c_value: f64,
) -> ConstantsResult<Constant> {
    if !si.is_electromagnetic() || si.system() != UnitSystem::Si {
        return Err(ConstantsError::unit_conversion(si.unit(), system));
    }
    let convert = |x: f64| {
        scale(system, x, c_value)
            .ok_or_else(|| ConstantsError::unit_conversion(si.unit(), system))
    };
    Ok(si.with_system(
        system,
        convert(si.value())?,
        convert(si.uncertainty())?,
        unit,
    ))
}

/// Derives every requested subsystem record, in the order given.
pub fn derive_variants(
    si: &Constant,
    c_value: f64,
    units: &[(UnitSystem, &str)],
) -> ConstantsResult<Vec<Constant>> {
    units
        .iter()
        .map(|&(system, unit)| derive_variant(si, system, unit, c_value))
        .collect()
}
