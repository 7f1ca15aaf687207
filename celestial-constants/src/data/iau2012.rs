//! IAU 2012 astronomical constants.
//!
//! Solar and planetary values predate the IAU nominal values and are taken
//! from Allen's Astrophysical Quantities; the astronomical unit is the exact
//! IAU 2012 Resolution B2 definition.

use super::{parsecs, AU_M, AU_REFERENCE};
use crate::epoch::{ConstantSet, Domain};
use crate::errors::ConstantsResult;

pub const ID: &str = "iau2012";
pub const REFERENCE: &str = "IAU 2012";

const ALLEN: &str = "Allen's Astrophysical Quantities 4th Ed.";

pub fn build() -> ConstantsResult<ConstantSet> {
    let mut set = ConstantSet::builder(ID, Domain::Astronomical, REFERENCE);
    set.si_cited("L_sun", "Solar luminosity", 3.846e26, "W", 0.0005e26, ALLEN)?
        .si_cited("M_sun", "Solar mass", 1.9891e30, "kg", 0.00005e30, ALLEN)?
        .si_cited("R_sun", "Solar radius", 6.95508e8, "m", 0.00026e8, ALLEN)?
        .si_cited("M_jup", "Jupiter mass", 1.8987e27, "kg", 0.00005e27, ALLEN)?
        .si_cited(
            "R_jup",
            "Jupiter equatorial radius",
            7.1492e7,
            "m",
            0.00005e7,
            ALLEN,
        )?
        .si_cited("M_earth", "Earth mass", 5.9742e24, "kg", 0.00005e24, ALLEN)?
        .si_cited(
            "R_earth",
            "Earth equatorial radius",
            6.378136e6,
            "m",
            0.0000005e6,
            ALLEN,
        )?
        .si_cited("au", "Astronomical Unit", AU_M, "m", 0.0, AU_REFERENCE)?;
    parsecs(&mut set)?;
    Ok(set.build())
}
