//! IAU 2015 nominal solar and planetary values.
//!
//! IAU 2015 Resolution B3 fixes the gravitational parameters GM rather than
//! the masses; masses here are GM / G using the CODATA 2014 gravitational
//! constant, with uncertainty carried over from G. Resolution B2 fixes the
//! zero point of the bolometric magnitude scale.

use super::{parsecs, AU_M, AU_REFERENCE};
use crate::constant::UnitSystem;
use crate::epoch::{ConstantSet, ConstantSetBuilder, Domain};
use crate::errors::{ConstantsError, ConstantsResult};

pub const ID: &str = "iau2015";
pub const REFERENCE: &str = "IAU 2015 Resolution B 3";

const B2: &str = "IAU 2015 Resolution B 2";
const MASS_REFERENCE: &str = "IAU 2015 Resolution B 3 + CODATA 2014";

/// Builds the table; `codata` supplies the gravitational constant used to
/// turn GM into masses.
pub fn build(codata: &ConstantSet) -> ConstantsResult<ConstantSet> {
    let g = codata
        .get_in("G", UnitSystem::Si)
        .ok_or_else(|| ConstantsError::missing_constant(codata.id(), "G"))?;
    let (g_value, g_uncertainty) = (g.value(), g.uncertainty());

    let mut set = ConstantSet::builder(ID, Domain::Astronomical, REFERENCE);
    set.si_cited(
        "L_bol0",
        "Luminosity for absolute bolometric magnitude 0",
        3.0128e28,
        "W",
        0.0,
        B2,
    )?
    .si("L_sun", "Nominal solar luminosity", 3.828e26, "W", 0.0)?
    .si(
        "GM_sun",
        "Nominal solar mass parameter",
        1.3271244e20,
        "m3 / (s2)",
        0.0,
    )?;
    mass_from_gm(&mut set, "M_sun", "Solar mass", "GM_sun", g_value, g_uncertainty)?;
    set.si("R_sun", "Nominal solar radius", 6.957e8, "m", 0.0)?
        .si(
            "GM_jup",
            "Nominal Jupiter mass parameter",
            1.2668653e17,
            "m3 / (s2)",
            0.0,
        )?;
    mass_from_gm(&mut set, "M_jup", "Jupiter mass", "GM_jup", g_value, g_uncertainty)?;
    set.si(
        "R_jup",
        "Nominal Jupiter equatorial radius",
        7.1492e7,
        "m",
        0.0,
    )?
    .si(
        "GM_earth",
        "Nominal Earth mass parameter",
        3.986004e14,
        "m3 / (s2)",
        0.0,
    )?;
    mass_from_gm(&mut set, "M_earth", "Earth mass", "GM_earth", g_value, g_uncertainty)?;
    set.si(
        "R_earth",
        "Nominal Earth equatorial radius",
        6.3781e6,
        "m",
        0.0,
    )?
    .si_cited("au", "Astronomical Unit", AU_M, "m", 0.0, AU_REFERENCE)?;
    parsecs(&mut set)?;
    Ok(set.build())
}

fn mass_from_gm(
    set: &mut ConstantSetBuilder,
    abbrev: &str,
    name: &str,
    gm_abbrev: &str,
    g_value: f64,
    g_uncertainty: f64,
) -> ConstantsResult<()> {
    let gm = set
        .get_in(gm_abbrev, UnitSystem::Si)
        .ok_or_else(|| ConstantsError::missing_constant(ID, gm_abbrev))?
        .value();
    let mass = gm / g_value;
    set.si_cited(
        abbrev,
        name,
        mass,
        "kg",
        mass * g_uncertainty / g_value,
        MASS_REFERENCE,
    )?;
    Ok(())
}
