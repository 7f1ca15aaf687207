//! Static epoch tables.
//!
//! | Epoch | Domain | Module |
//! |-------|--------|--------|
//! | `codata2010` | physical | [`codata2010`] |
//! | `codata2014` | physical | [`codata2014`] |
//! | `iau2012` | astronomical | [`iau2012`] |
//! | `iau2015` | astronomical | [`iau2015`] |
//!
//! Release bundles pair one epoch of each domain:
//!
//! | Release | Physical | Astronomical |
//! |---------|----------|--------------|
//! | `release-2013` | `codata2010` | `iau2012` |
//! | `release-2020` | `codata2014` | `iau2015` |
//!
//! Tables are built once, on first access to [`standard_catalog`].

pub mod codata2010;
pub mod codata2014;
pub mod iau2012;
pub mod iau2015;

use crate::catalog::EpochCatalog;
use crate::constant::UnitSystem;
use crate::epoch::ConstantSetBuilder;
use crate::errors::{ConstantsError, ConstantsResult};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Astronomical Unit in meters (IAU 2012 definition, exact)
pub const AU_M: f64 = 149_597_870_700.0;

pub(crate) const AU_REFERENCE: &str = "IAU 2012 Resolution B2";

pub(crate) const EPS0_UNIT: &str = "F/m";

pub(crate) const CHARGE_VARIANTS: &[(UnitSystem, &str)] = &[
    (UnitSystem::Esu, "statC"),
    (UnitSystem::Emu, "abC"),
    (UnitSystem::Gauss, "Fr"),
];

pub const RELEASE_2013: &str = "release-2013";
pub const RELEASE_2020: &str = "release-2020";

pub const DEFAULT_PHYSICAL: &str = codata2014::ID;
pub const DEFAULT_ASTRONOMICAL: &str = iau2015::ID;

/// Adds `pc` and `kpc` derived from the set's `au`.
pub(crate) fn parsecs(set: &mut ConstantSetBuilder) -> ConstantsResult<()> {
    let au = set
        .get_in("au", UnitSystem::Si)
        .ok_or_else(|| ConstantsError::missing_constant(set.id(), "au"))?;
    let (value, uncertainty) = (au.value(), au.uncertainty());
    let tan_arcsec = (1.0_f64 / 3600.0).to_radians().tan();

    set.si_cited(
        "pc",
        "Parsec",
        value / tan_arcsec,
        "m",
        uncertainty / tan_arcsec,
        "Derived from au",
    )?
    .si_cited(
        "kpc",
        "Kiloparsec",
        1000.0 * value / tan_arcsec,
        "m",
        1000.0 * uncertainty / tan_arcsec,
        "Derived from au",
    )?;
    Ok(())
}

fn build_standard() -> ConstantsResult<EpochCatalog> {
    let codata2010 = codata2010::build()?;
    let codata2014 = codata2014::build()?;
    let iau2012 = iau2012::build()?;
    let iau2015 = iau2015::build(&codata2014)?;

    let mut catalog = EpochCatalog::new();
    catalog
        .insert(codata2010)?
        .insert(codata2014)?
        .insert(iau2012)?
        .insert(iau2015)?
        .release(RELEASE_2013, codata2010::ID, iau2012::ID)?
        .release(RELEASE_2020, codata2014::ID, iau2015::ID)?;
    Ok(catalog)
}

static STANDARD: Lazy<Arc<EpochCatalog>> = Lazy::new(|| {
    Arc::new(build_standard().expect("static constant tables are well-formed"))
});

/// The catalog of built-in epochs and releases.
pub fn standard_catalog() -> Arc<EpochCatalog> {
    Arc::clone(&STANDARD)
}
