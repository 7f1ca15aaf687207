//! CODATA 2014 recommended values.

use super::{CHARGE_VARIANTS, EPS0_UNIT};
use crate::epoch::{ConstantSet, Domain};
use crate::errors::ConstantsResult;
use std::f64::consts::PI;

pub const ID: &str = "codata2014";
pub const REFERENCE: &str = "CODATA 2014";

const H: f64 = 6.626070040e-34;
const H_UNCERTAINTY: f64 = 0.000000081e-34;

pub fn build() -> ConstantsResult<ConstantSet> {
    let mut set = ConstantSet::builder(ID, Domain::Physical, REFERENCE);
    set.si("h", "Planck constant", H, "J s", H_UNCERTAINTY)?
        .si(
            "hbar",
            "Reduced Planck constant",
            H * 0.5 / PI,
            "J s",
            H_UNCERTAINTY * 0.5 / PI,
        )?
        .si("k_B", "Boltzmann constant", 1.38064852e-23, "J / (K)", 0.00000079e-23)?
        .si("c", "Speed of light in vacuum", 2.99792458e8, "m / (s)", 0.0)?
        .si("G", "Gravitational constant", 6.67408e-11, "m3 / (kg s2)", 0.00031e-11)?
        .si("g0", "Standard acceleration of gravity", 9.80665, "m / s2", 0.0)?
        .si("m_p", "Proton mass", 1.672621898e-27, "kg", 0.000000021e-27)?
        .si("m_n", "Neutron mass", 1.674927471e-27, "kg", 0.000000021e-27)?
        .si("m_e", "Electron mass", 9.10938356e-31, "kg", 0.00000011e-31)?
        .si("u", "Atomic mass", 1.660539040e-27, "kg", 0.000000020e-27)?
        .si(
            "sigma_sb",
            "Stefan-Boltzmann constant",
            5.670367e-8,
            "W / (K4 m2)",
            0.000013e-8,
        )?
        .em("e", "Electron charge", 1.6021766208e-19, "C", 0.0000000098e-19)?
        .em("eps0", "Electric constant", 8.854187817e-12, EPS0_UNIT, 0.0)?
        .si("N_A", "Avogadro's number", 6.022140857e23, "1 / (mol)", 0.000000074e23)?
        .si("R", "Gas constant", 8.3144598, "J / (K mol)", 0.0000048)?
        .si("Ryd", "Rydberg constant", 10973731.568508, "1 / (m)", 0.000065)?
        .si("a0", "Bohr radius", 0.52917721067e-10, "m", 0.00000000012e-10)?
        .si("muB", "Bohr magneton", 927.4009994e-26, "J/T", 0.0000057e-26)?
        .si("alpha", "Fine-structure constant", 7.2973525664e-3, "", 0.0000000017e-3)?
        .si("atm", "Standard atmosphere", 101325.0, "Pa", 0.0)?
        .si("mu0", "Magnetic constant", 4.0e-7 * PI, "N/A2", 0.0)?
        .si(
            "sigma_T",
            "Thomson scattering cross-section",
            0.66524587158e-28,
            "m2",
            0.00000000091e-28,
        )?
        .si(
            "b_wien",
            "Wien wavelength displacement law constant",
            2.8977729e-3,
            "m K",
            0.0000017e-3,
        )?
        .cgs_variants("e", CHARGE_VARIANTS)?;
    Ok(set.build())
}
