//! The registry: selection, lock-in and the active namespace behind one lock.
//!
//! A [`Registry`] owns one [`VersionSelector`] per domain, the
//! [`ActiveNamespace`] consumers read from, and the stack of snapshots that
//! backs scoped overrides. Every state transition (lock-in, selection,
//! override enter and exit) runs under a single mutex.
//!
//! Reading anything (a lookup, documentation rows, a snapshot, or
//! [`Registry::get_active`]) counts as consumption and locks the domains
//! involved. Selections must therefore happen first:
//!
//! ```
//! use celestial_constants::{Domain, Registry};
//!
//! let registry = Registry::standard().unwrap();
//! registry.select(Domain::Physical, "codata2010").unwrap();
//! let g = registry.lookup("G").unwrap();
//! assert_eq!(g.reference(), "CODATA 2010");
//! assert!(registry.select(Domain::Physical, "codata2014").is_err());
//! ```

use crate::catalog::EpochCatalog;
use crate::config::ConstantsConfig;
use crate::constant::{Constant, UnitSystem};
use crate::data::standard_catalog;
use crate::docs::DocRow;
use crate::epoch::Domain;
use crate::errors::{ConstantsError, ConstantsResult};
use crate::namespace::{bind, ActiveNamespace};
use crate::scoped::ScopedOverride;
use crate::selector::{SelectionState, VersionSelector};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct OverrideFrame {
    token: u64,
    snapshot: ActiveNamespace,
}

struct RegistryState {
    physical: VersionSelector,
    astronomical: VersionSelector,
    namespace: ActiveNamespace,
    overrides: Vec<OverrideFrame>,
    next_token: u64,
}

impl RegistryState {
    fn selector(&self, domain: Domain) -> &VersionSelector {
        match domain {
            Domain::Physical => &self.physical,
            Domain::Astronomical => &self.astronomical,
        }
    }

    fn selector_mut(&mut self, domain: Domain) -> &mut VersionSelector {
        match domain {
            Domain::Physical => &mut self.physical,
            Domain::Astronomical => &mut self.astronomical,
        }
    }

    /// Locks `domain` if needed and binds its epoch on the locking call.
    ///
    /// Lock-in during an active override also binds into every saved
    /// snapshot so that unwinding the overrides keeps the new domain.
    fn consume(&mut self, catalog: &EpochCatalog, domain: Domain) -> String {
        let selection = self.selector_mut(domain).get();
        if selection.newly_locked {
            if let Some(set) = catalog.get(&selection.epoch) {
                bind([set], &mut self.namespace, true);
                for frame in &mut self.overrides {
                    bind([set], &mut frame.snapshot, true);
                }
                tracing::debug!(
                    domain = %domain,
                    epoch = %selection.epoch,
                    constants = set.len(),
                    "bound constants"
                );
            }
        }
        selection.epoch
    }

    fn consume_all(&mut self, catalog: &EpochCatalog) {
        for domain in Domain::ALL {
            self.consume(catalog, domain);
        }
    }
}

/// Versioned constant registry.
///
/// Most programs use the process-wide instance through the free functions in
/// [`crate::global`]. Separate instances are independent and useful for
/// tests and embedding.
pub struct Registry {
    catalog: Arc<EpochCatalog>,
    state: Mutex<RegistryState>,
}

impl Registry {
    /// Builds a registry over `catalog`, starting each domain at the
    /// configured default.
    pub fn new(catalog: Arc<EpochCatalog>, config: &ConstantsConfig) -> ConstantsResult<Self> {
        let [physical, astronomical] = config.resolve(&catalog)?;
        let state = RegistryState {
            physical: VersionSelector::new(
                Domain::Physical,
                physical,
                catalog.ids(Domain::Physical),
            )?,
            astronomical: VersionSelector::new(
                Domain::Astronomical,
                astronomical,
                catalog.ids(Domain::Astronomical),
            )?,
            namespace: ActiveNamespace::new(),
            overrides: Vec::new(),
            next_token: 0,
        };
        Ok(Self {
            catalog,
            state: Mutex::new(state),
        })
    }

    /// Built-in epochs with built-in defaults.
    pub fn standard() -> ConstantsResult<Self> {
        Self::new(standard_catalog(), &ConstantsConfig::default())
    }

    /// Built-in epochs with defaults from the config file and environment.
    pub fn from_env() -> ConstantsResult<Self> {
        Self::new(standard_catalog(), &ConstantsConfig::from_env()?)
    }

    pub fn catalog(&self) -> &EpochCatalog {
        &self.catalog
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        // State is only mutated through non-panicking paths; a poisoned lock
        // still holds consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The active epoch of `domain`, locking the domain on first call.
    pub fn get_active(&self, domain: Domain) -> String {
        let mut state = self.state();
        state.consume(&self.catalog, domain)
    }

    /// Chooses the epoch (or release) for `domain`. Only valid before the
    /// domain's first read.
    pub fn select(&self, domain: Domain, id: &str) -> ConstantsResult<()> {
        let epoch = self.catalog.resolve(domain, id)?.to_string();
        let mut state = self.state();
        state.selector_mut(domain).set(&epoch)
    }

    pub fn selection_state(&self, domain: Domain) -> SelectionState {
        self.state().selector(domain).state().clone()
    }

    pub fn is_locked(&self, domain: Domain) -> bool {
        self.state().selector(domain).is_locked()
    }

    /// The primary (normally SI) record bound under `abbrev`.
    pub fn lookup(&self, abbrev: &str) -> ConstantsResult<Constant> {
        let mut state = self.state();
        state.consume_all(&self.catalog);
        state
            .namespace
            .get(abbrev)
            .cloned()
            .ok_or_else(|| ConstantsError::unknown_constant(abbrev, None))
    }

    /// The record bound under `abbrev` in an explicit unit system.
    pub fn lookup_in(&self, abbrev: &str, system: UnitSystem) -> ConstantsResult<Constant> {
        let mut state = self.state();
        state.consume_all(&self.catalog);
        state
            .namespace
            .get_in(abbrev, system)
            .cloned()
            .ok_or_else(|| ConstantsError::unknown_constant(abbrev, Some(system)))
    }

    /// A copy of the active namespace.
    pub fn snapshot(&self) -> ActiveNamespace {
        let mut state = self.state();
        state.consume_all(&self.catalog);
        state.namespace.clone()
    }

    /// One row per bound abbreviation, in binding order.
    pub fn documentation_rows(&self) -> Vec<DocRow> {
        let mut state = self.state();
        state.consume_all(&self.catalog);
        state.namespace.documentation_rows()
    }

    pub fn override_depth(&self) -> usize {
        self.state().overrides.len()
    }

    /// Temporarily rebinds the namespace to the epoch (or both epochs of the
    /// release) named by `id`, until the returned guard is dropped.
    ///
    /// The affected domains are locked first. Inside the scope every record
    /// of an affected domain comes from the override epoch. The recorded
    /// selection is not changed, and redefinitions are not reported.
    pub fn with_temporary_epoch(&self, id: &str) -> ConstantsResult<ScopedOverride<'_>> {
        let sets = self.catalog.resolve_any(id)?;
        let mut state = self.state();

        for set in &sets {
            state.consume(&self.catalog, set.domain());
        }

        let snapshot = state.namespace.clone();
        for set in &sets {
            state.namespace.replace_domain(set);
        }

        let token = state.next_token;
        state.next_token += 1;
        state.overrides.push(OverrideFrame { token, snapshot });

        let epochs: Vec<String> = sets.iter().map(|s| s.id().to_string()).collect();
        tracing::debug!(
            epochs = ?epochs,
            depth = state.overrides.len(),
            "entered constants override"
        );
        Ok(ScopedOverride::new(self, token, epochs))
    }

    /// Runs `f` with the override for `id` in place. The previous namespace
    /// is restored however `f` exits.
    pub fn with_epoch<R>(&self, id: &str, f: impl FnOnce(&Registry) -> R) -> ConstantsResult<R> {
        let guard = self.with_temporary_epoch(id)?;
        let result = f(self);
        drop(guard);
        Ok(result)
    }

    /// Restores the snapshot saved for `token`.
    ///
    /// Releasing the innermost override restores its snapshot. Releasing an
    /// outer one first hands its snapshot to the override above it, so the
    /// final restoration is still the state before the outer override.
    pub(crate) fn release_override(&self, token: u64) {
        let mut state = self.state();
        let Some(pos) = state.overrides.iter().position(|f| f.token == token) else {
            return;
        };
        let frame = state.overrides.remove(pos);
        if pos == state.overrides.len() {
            state.namespace = frame.snapshot;
        } else {
            state.overrides[pos].snapshot = frame.snapshot;
        }
        tracing::debug!(depth = state.overrides.len(), "left constants override");
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Registry")
            .field("physical", state.physical.state())
            .field("astronomical", state.astronomical.state())
            .field("bound", &state.namespace.len())
            .field("overrides", &state.overrides.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn registry() -> Registry {
        Registry::standard().unwrap()
    }

    fn assert_same(a: &ActiveNamespace, b: &ActiveNamespace) {
        assert!(a.identical(b), "namespaces differ");
        for constant in a.iter() {
            let other = b.get_in(constant.abbrev(), constant.system()).unwrap();
            assert_eq!(constant.value().to_bits(), other.value().to_bits());
            assert_eq!(constant.unit(), other.unit());
            assert_eq!(constant.uncertainty().to_bits(), other.uncertainty().to_bits());
            assert_eq!(constant.reference(), other.reference());
        }
    }

    #[test]
    fn select_then_get_returns_selection_for_every_epoch() {
        for domain in Domain::ALL {
            let ids: Vec<String> = registry()
                .catalog()
                .ids(domain)
                .into_iter()
                .map(String::from)
                .collect();
            for id in ids {
                let registry = registry();
                registry.select(domain, &id).unwrap();
                assert_eq!(registry.get_active(domain), id);
            }
        }
    }

    #[test]
    fn get_then_select_fails() {
        let registry = registry();
        assert_eq!(registry.get_active(Domain::Physical), "codata2014");
        let err = registry.select(Domain::Physical, "codata2010").unwrap_err();
        assert_eq!(
            err,
            ConstantsError::already_locked(Domain::Physical, "codata2014")
        );
    }

    #[test]
    fn domains_lock_independently() {
        let registry = registry();
        registry.get_active(Domain::Physical);
        assert!(registry.is_locked(Domain::Physical));
        assert!(!registry.is_locked(Domain::Astronomical));
        registry.select(Domain::Astronomical, "iau2012").unwrap();
        assert_eq!(registry.get_active(Domain::Astronomical), "iau2012");
    }

    #[test]
    fn lookup_locks_both_domains() {
        let registry = registry();
        registry.lookup("c").unwrap();
        assert!(registry.is_locked(Domain::Physical));
        assert!(registry.is_locked(Domain::Astronomical));
        assert!(registry.select(Domain::Astronomical, "iau2012").is_err());
    }

    #[test]
    fn unknown_epoch_on_select() {
        let registry = registry();
        let err = registry.select(Domain::Physical, "codata2012").unwrap_err();
        assert_eq!(
            err,
            ConstantsError::unknown_epoch(Some(Domain::Physical), "codata2012")
        );
        assert_eq!(registry.selection_state(Domain::Physical), SelectionState::Unset);
    }

    #[test]
    fn select_accepts_release_names() {
        let registry = registry();
        registry.select(Domain::Physical, "release-2013").unwrap();
        registry.select(Domain::Astronomical, "release-2013").unwrap();
        assert_eq!(registry.get_active(Domain::Physical), "codata2010");
        assert_eq!(registry.get_active(Domain::Astronomical), "iau2012");
    }

    #[test]
    fn scenario_codata2010_gravitational_constant() {
        let registry = registry();
        registry.select(Domain::Physical, "codata2010").unwrap();
        let g = registry.lookup("G").unwrap();
        assert_eq!(g.value(), 6.67384e-11);
        assert_eq!(g.unit(), "m3 / (kg s2)");
        assert_eq!(g.uncertainty(), 0.00080e-11);
        assert_eq!(g.reference(), "CODATA 2010");
    }

    #[test]
    fn scenario_codata2014_planck() {
        let registry = registry();
        registry.select(Domain::Physical, "codata2014").unwrap();
        let h = registry.lookup("h").unwrap();
        assert!(h.reference().ends_with("CODATA 2014"));
        let hbar = registry.lookup("hbar").unwrap();
        assert_relative_eq!(hbar.value(), h.value() * 0.5 / PI, max_relative = 1e-9);
    }

    #[test]
    fn prior_values_through_config() {
        let config = ConstantsConfig::new("codata2010", "iau2012");
        let registry = Registry::new(standard_catalog(), &config).unwrap();
        let h = registry.lookup("h").unwrap();
        assert!((h.value() - 6.62606957e-34).abs() < 1e-43);
        assert!((h.si().unwrap().value() - 6.62606957e-34).abs() < 1e-43);
        assert!((h.cgs().unwrap().value() - 6.62606957e-27).abs() < 1e-36);
        assert_eq!(registry.lookup("R_earth").unwrap().value(), 6.378136e6);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ConstantsConfig::new("cooldata2014", "iau2012");
        let err = Registry::new(standard_catalog(), &config).unwrap_err();
        assert!(matches!(err, ConstantsError::UnknownEpoch { .. }));
    }

    #[test]
    fn em_constants_need_explicit_system() {
        let registry = registry();
        let e = registry.lookup("e").unwrap();
        assert_eq!(e.cgs().unwrap_err(), ConstantsError::ambiguous_system("e"));

        let c = registry.lookup("c").unwrap().value();
        let esu = registry.lookup_in("e", UnitSystem::Esu).unwrap();
        let emu = registry.lookup_in("e", UnitSystem::Emu).unwrap();
        let gauss = registry.lookup_in("e", UnitSystem::Gauss).unwrap();
        assert_relative_eq!(esu.value(), e.value() * c * 10.0, max_relative = 1e-12);
        assert_relative_eq!(emu.value(), e.value() / 10.0, max_relative = 1e-12);
        assert_relative_eq!(gauss.value(), esu.value(), max_relative = 1e-12);
        assert_relative_eq!(
            esu.uncertainty(),
            e.uncertainty() * c * 10.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(emu.uncertainty(), e.uncertainty() / 10.0, max_relative = 1e-12);
        assert!(registry.lookup_in("e", UnitSystem::Cgs).is_err());
    }

    #[test]
    fn unknown_constant_lookup() {
        let registry = registry();
        assert_eq!(
            registry.lookup("M_moon").unwrap_err(),
            ConstantsError::unknown_constant("M_moon", None)
        );
    }

    #[test]
    fn override_rebinds_and_restores() {
        let registry = registry();
        let before = registry.snapshot();
        {
            let guard = registry.with_temporary_epoch("codata2010").unwrap();
            assert_eq!(guard.epochs(), ["codata2010".to_string()]);
            let g = registry.lookup("G").unwrap();
            assert_eq!(g.value(), 6.67384e-11);
            assert_eq!(g.reference(), "CODATA 2010");
            assert_eq!(registry.get_active(Domain::Physical), "codata2014");
        }
        assert_same(&before, &registry.snapshot());
        assert_eq!(registry.override_depth(), 0);
    }

    #[test]
    fn override_is_allowed_after_lock_and_keeps_selection() {
        let registry = registry();
        registry.select(Domain::Physical, "codata2014").unwrap();
        registry.get_active(Domain::Physical);
        let guard = registry.with_temporary_epoch("codata2010").unwrap();
        assert_eq!(
            registry.selection_state(Domain::Physical),
            SelectionState::Locked("codata2014".into())
        );
        guard.release();
        assert_eq!(registry.lookup("G").unwrap().value(), 6.67408e-11);
    }

    #[test]
    fn override_locks_unconsumed_domain() {
        let registry = registry();
        registry.select(Domain::Physical, "codata2010").unwrap();
        let _guard = registry.with_temporary_epoch("codata2014").unwrap();
        assert!(registry.is_locked(Domain::Physical));
        assert!(registry.select(Domain::Physical, "codata2014").is_err());
    }

    #[test]
    fn override_with_unknown_epoch_fails_without_side_effects() {
        let registry = registry();
        let err = registry.with_temporary_epoch("astropyconst99").unwrap_err();
        assert_eq!(err, ConstantsError::unknown_epoch(None, "astropyconst99"));
        assert_eq!(registry.override_depth(), 0);
        assert!(!registry.is_locked(Domain::Physical));
    }

    #[test]
    fn astronomical_override_hides_newer_only_constants() {
        let registry = registry();
        assert!(registry.lookup("GM_sun").is_ok());
        {
            let _guard = registry.with_temporary_epoch("iau2012").unwrap();
            assert!(registry.lookup("GM_sun").is_err());
            assert_eq!(registry.lookup("R_earth").unwrap().value(), 6.378136e6);
            assert_eq!(registry.lookup("R_earth").unwrap().epoch(), "iau2012");
            assert!(!registry
                .snapshot()
                .epochs_for(Domain::Physical)
                .is_empty());
        }
        assert!(registry.lookup("GM_sun").is_ok());
    }

    #[test]
    fn override_replaces_provenance_of_unchanged_records() {
        let registry = registry();
        assert_eq!(registry.lookup("c").unwrap().reference(), "CODATA 2014");
        {
            let _guard = registry.with_temporary_epoch("codata2010").unwrap();
            let c = registry.lookup("c").unwrap();
            assert_eq!(c.epoch(), "codata2010");
            assert_eq!(c.reference(), "CODATA 2010");
            assert_eq!(registry.snapshot().epochs_for(Domain::Physical), vec!["codata2010"]);
        }
        {
            let _guard = registry.with_temporary_epoch("iau2012").unwrap();
            for abbrev in ["au", "pc", "kpc"] {
                assert_eq!(registry.lookup(abbrev).unwrap().epoch(), "iau2012");
            }
            assert_eq!(registry.snapshot().epochs_for(Domain::Astronomical), vec!["iau2012"]);
        }
        assert_eq!(registry.lookup("au").unwrap().epoch(), "iau2015");
    }

    #[test]
    fn release_override_covers_both_domains() {
        let registry = registry();
        let before = registry.snapshot();
        registry
            .with_epoch("release-2013", |r| {
                assert_eq!(r.lookup("h").unwrap().reference(), "CODATA 2010");
                assert_eq!(r.lookup("M_sun").unwrap().value(), 1.9891e30);
            })
            .unwrap();
        assert_same(&before, &registry.snapshot());
    }

    #[test]
    fn nested_overrides_restore_in_order() {
        let registry = registry();
        let original = registry.snapshot();

        let outer = registry.with_temporary_epoch("codata2010").unwrap();
        let under_outer = registry.snapshot();
        assert_eq!(registry.lookup("G").unwrap().value(), 6.67384e-11);

        let inner = registry.with_temporary_epoch("codata2014").unwrap();
        assert_eq!(registry.lookup("G").unwrap().value(), 6.67408e-11);
        assert_eq!(registry.override_depth(), 2);

        drop(inner);
        assert_same(&under_outer, &registry.snapshot());

        drop(outer);
        assert_same(&original, &registry.snapshot());
    }

    #[test]
    fn out_of_order_release_still_restores_original() {
        let registry = registry();
        let original = registry.snapshot();

        let outer = registry.with_temporary_epoch("codata2010").unwrap();
        let inner = registry.with_temporary_epoch("iau2012").unwrap();
        let under_both = registry.snapshot();

        drop(outer);
        assert_same(&under_both, &registry.snapshot());
        drop(inner);
        assert_same(&original, &registry.snapshot());
    }

    #[test]
    fn with_epoch_restores_after_error() {
        let registry = registry();
        let before = registry.snapshot();
        let result: ConstantsResult<ConstantsResult<()>> =
            registry.with_epoch("codata2010", |r| {
                r.lookup("G")?;
                Err(ConstantsError::invalid_config("injected"))
            });
        assert!(result.unwrap().is_err());
        assert_same(&before, &registry.snapshot());
    }

    #[test]
    fn lock_during_override_survives_release() {
        let registry = registry();
        registry.get_active(Domain::Physical);
        let guard = registry.with_temporary_epoch("codata2010").unwrap();
        assert!(!registry.is_locked(Domain::Astronomical));
        assert_eq!(registry.get_active(Domain::Astronomical), "iau2015");
        drop(guard);
        assert_eq!(registry.lookup("R_earth").unwrap().value(), 6.3781e6);
        assert_eq!(registry.lookup("G").unwrap().value(), 6.67408e-11);
    }

    #[test]
    fn documentation_rows_follow_binding_order() {
        let registry = registry();
        let rows = registry.documentation_rows();
        assert_eq!(rows[0].name, "h");
        assert_eq!(rows[0].unit, "J s");
        assert_eq!(rows[0].description, "Planck constant");
        assert!(rows.iter().filter(|r| r.name == "e").count() == 1);
        let first_astro = rows.iter().position(|r| r.name == "L_bol0").unwrap();
        let last_phys = rows.iter().position(|r| r.name == "b_wien").unwrap();
        assert!(last_phys < first_astro);
    }
}
