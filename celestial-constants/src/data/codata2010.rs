//! CODATA 2010 recommended values.

use super::{CHARGE_VARIANTS, EPS0_UNIT};
use crate::epoch::{ConstantSet, Domain};
use crate::errors::ConstantsResult;
use std::f64::consts::PI;

pub const ID: &str = "codata2010";
pub const REFERENCE: &str = "CODATA 2010";

const H: f64 = 6.62606957e-34;
const H_UNCERTAINTY: f64 = 0.00000029e-34;

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
        .si("k_B", "Boltzmann constant", 1.3806488e-23, "J / (K)", 0.0000013e-23)?
        .si("c", "Speed of light in vacuum", 2.99792458e8, "m / (s)", 0.0)?
        .si("G", "Gravitational constant", 6.67384e-11, "m3 / (kg s2)", 0.00080e-11)?
        .si("g0", "Standard acceleration of gravity", 9.80665, "m / s2", 0.0)?
        .si("m_p", "Proton mass", 1.672621777e-27, "kg", 0.000000074e-27)?
        .si("m_n", "Neutron mass", 1.674927351e-27, "kg", 0.000000074e-27)?
        .si("m_e", "Electron mass", 9.10938291e-31, "kg", 0.00000040e-31)?
        .si("u", "Atomic mass", 1.660538921e-27, "kg", 0.000000073e-27)?
        .si(
            "sigma_sb",
            "Stefan-Boltzmann constant",
            5.670373e-8,
            "W / (K4 m2)",
            0.000021e-8,
        )?
        .em("e", "Electron charge", 1.602176565e-19, "C", 0.000000035e-19)?
        .em("eps0", "Electric constant", 8.854187817e-12, EPS0_UNIT, 0.0)?
        .si("N_A", "Avogadro's number", 6.02214129e23, "1 / (mol)", 0.00000027e23)?
        .si("R", "Gas constant", 8.3144621, "J / (K mol)", 0.0000075)?
        .si("Ryd", "Rydberg constant", 10973731.568539, "1 / (m)", 0.000055)?
        .si("a0", "Bohr radius", 0.52917721092e-10, "m", 0.00000000017e-10)?
        .si("muB", "Bohr magneton", 927.400968e-26, "J/T", 0.00002e-26)?
        .si("alpha", "Fine-structure constant", 7.2973525698e-3, "", 0.0000000024e-3)?
        .si("atm", "Atmosphere", 101325.0, "Pa", 0.0)?
        .si("mu0", "Magnetic constant", 4.0e-7 * PI, "N/A2", 0.0)?
        .si(
            "sigma_T",
            "Thomson scattering cross-section",
            0.6652458734e-28,
            "m2",
            0.0000000013e-28,
        )?
        .si(
            "b_wien",
            "Wien wavelength displacement law constant",
            2.8977721e-3,
            "m K",
            0.0000026e-3,
        )?
        .cgs_variants("e", CHARGE_VARIANTS)?;
    Ok(set.build())
}
