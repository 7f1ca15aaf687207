//! Process-wide registry.
//!
//! The first call to any function here builds the registry from the config
//! file and environment (see [`crate::config`]). A bad configuration is
//! reported by every call until the process restarts.
//!
//! ```no_run
//! use celestial_constants::{global, Domain};
//!
//! global::select(Domain::Physical, "codata2010")?;
//! let h = global::lookup("h")?;
//! println!("{} ({})", h.value(), h.reference());
//! # Ok::<(), celestial_constants::ConstantsError>(())
//! ```

use crate::constant::{Constant, UnitSystem};
use crate::docs::DocRow;
use crate::epoch::Domain;
use crate::errors::ConstantsResult;
use crate::registry::Registry;
use crate::scoped::ScopedOverride;
use once_cell::sync::OnceCell;

static GLOBAL: OnceCell<Registry> = OnceCell::new();

pub fn registry() -> ConstantsResult<&'static Registry> {
    GLOBAL.get_or_try_init(Registry::from_env)
}

pub fn get_active(domain: Domain) -> ConstantsResult<String> {
    Ok(registry()?.get_active(domain))
}

pub fn select(domain: Domain, id: &str) -> ConstantsResult<()> {
    registry()?.select(domain, id)
}

pub fn lookup(abbrev: &str) -> ConstantsResult<Constant> {
    registry()?.lookup(abbrev)
}

pub fn lookup_in(abbrev: &str, system: UnitSystem) -> ConstantsResult<Constant> {
    registry()?.lookup_in(abbrev, system)
}

pub fn documentation_rows() -> ConstantsResult<Vec<DocRow>> {
    Ok(registry()?.documentation_rows())
}

pub fn with_temporary_epoch(id: &str) -> ConstantsResult<ScopedOverride<'static>> {
    registry()?.with_temporary_epoch(id)
}

pub fn with_epoch<R>(id: &str, f: impl FnOnce(&Registry) -> R) -> ConstantsResult<R> {
    registry()?.with_epoch(id, f)
}
