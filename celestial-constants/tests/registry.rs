use approx::assert_relative_eq;
use celestial_constants::{
    bind, standard_catalog, ActiveNamespace, ConstantsConfig, ConstantsError, Domain, Registry,
    UnitSystem,
};
use std::panic::{self, AssertUnwindSafe};

fn fresh() -> Registry {
    Registry::standard().expect("standard registry")
}

#[test]
fn test_scenario_select_codata2010_then_read_g() {
    let registry = fresh();
    registry.select(Domain::Physical, "codata2010").unwrap();
    let g = registry.lookup("G").unwrap();
    assert_eq!(g.value(), 6.67384e-11);
    assert_eq!(g.unit(), "m3 / (kg s2)");
    assert_eq!(g.uncertainty(), 0.00080e-11);
    assert_eq!(g.reference(), "CODATA 2010");
}

#[test]
fn test_scenario_prior_configuration() {
    let config = ConstantsConfig::new("codata2010", "iau2012");
    let registry = Registry::new(standard_catalog(), &config).unwrap();
    let h = registry.lookup("h").unwrap();
    assert!((h.value() - 6.62606957e-34).abs() < 1e-43);
    assert!((h.cgs().unwrap().value() - 6.62606957e-27).abs() < 1e-36);
    assert_eq!(h.cgs().unwrap().unit(), "erg s");
}

#[test]
fn test_nested_overrides_restore_bit_for_bit() {
    let registry = fresh();
    let original = registry.snapshot();
    {
        let _outer = registry.with_temporary_epoch("release-2013").unwrap();
        let under_outer = registry.snapshot();
        {
            let _inner = registry.with_temporary_epoch("codata2014").unwrap();
            assert_eq!(registry.lookup("G").unwrap().reference(), "CODATA 2014");
        }
        assert!(registry.snapshot().identical(&under_outer));
    }
    assert!(registry.snapshot().identical(&original));
}

#[test]
fn test_override_resolves_every_record_to_override_epoch() {
    let catalog = standard_catalog();
    let mut ids: Vec<&str> = Domain::ALL
        .into_iter()
        .flat_map(|domain| catalog.ids(domain))
        .collect();
    ids.extend(catalog.releases().iter().map(|r| r.name.as_str()));

    for id in ids {
        let registry = fresh();
        let guard = registry.with_temporary_epoch(id).unwrap();
        let bound = registry.snapshot();

        for epoch in guard.epochs() {
            let set = catalog.get(epoch).unwrap();
            assert_eq!(bound.epochs_for(set.domain()), vec![set.id()]);
            for expected in set {
                let actual = registry
                    .lookup_in(expected.abbrev(), expected.system())
                    .unwrap();
                assert!(
                    actual.identical(expected),
                    "{} under {}: got {} ({})",
                    expected.key(),
                    id,
                    actual.epoch(),
                    actual.reference()
                );
            }
            let domain_records = bound.iter().filter(|c| c.domain() == set.domain()).count();
            assert_eq!(domain_records, set.len());
        }
    }
}

#[test]
fn test_override_restored_after_panic() {
    let registry = fresh();
    let original = registry.snapshot();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _guard = registry.with_temporary_epoch("codata2010").unwrap();
        assert_eq!(registry.lookup("G").unwrap().value(), 6.67384e-11);
        panic!("injected failure inside override");
    }));

    assert!(result.is_err());
    assert_eq!(registry.override_depth(), 0);
    assert!(registry.snapshot().identical(&original));
    assert_eq!(registry.lookup("G").unwrap().value(), 6.67408e-11);
}

#[test]
fn test_override_restored_after_error() {
    fn body(registry: &Registry) -> Result<(), ConstantsError> {
        let _guard = registry.with_temporary_epoch("iau2012")?;
        registry.lookup("GM_sun")?;
        Ok(())
    }

    let registry = fresh();
    let original = registry.snapshot();
    let err = body(&registry).unwrap_err();
    assert_eq!(err, ConstantsError::unknown_constant("GM_sun", None));
    assert!(registry.snapshot().identical(&original));
}

#[test]
fn test_em_variants_follow_cgs_factors() {
    for epoch in ["codata2010", "codata2014"] {
        let registry = fresh();
        registry.select(Domain::Physical, epoch).unwrap();
        let e = registry.lookup("e").unwrap();
        let c = registry.lookup("c").unwrap().value();

        assert!(matches!(
            e.cgs(),
            Err(ConstantsError::AmbiguousSystemConversion { .. })
        ));
        assert_relative_eq!(
            registry.lookup_in("e", UnitSystem::Esu).unwrap().value(),
            e.value() * c * 10.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            registry.lookup_in("e", UnitSystem::Emu).unwrap().value(),
            e.value() / 10.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            registry.lookup_in("e", UnitSystem::Gauss).unwrap().value(),
            e.value() * c * 10.0,
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_binding_is_idempotent() {
    let catalog = standard_catalog();
    let mut namespace = ActiveNamespace::new();
    let sets: Vec<_> = ["codata2014", "iau2015"]
        .iter()
        .map(|id| catalog.get(id).unwrap())
        .collect();
    bind(sets.iter().copied(), &mut namespace, false);
    let once = namespace.clone();
    let conflicts = bind(sets.iter().copied(), &mut namespace, false);
    assert!(conflicts.is_empty());
    assert!(namespace.identical(&once));
}

#[test]
fn test_rebinding_older_epoch_reports_conflicts() {
    let catalog = standard_catalog();
    let mut namespace = ActiveNamespace::new();
    bind([catalog.get("codata2014").unwrap()], &mut namespace, false);
    let conflicts = bind([catalog.get("codata2010").unwrap()], &mut namespace, false);
    let g = conflicts.iter().find(|c| c.name == "G").unwrap();
    assert_eq!(g.old_reference, "CODATA 2014");
    assert_eq!(g.new_reference, "CODATA 2010");
    assert!(conflicts.iter().all(|c| c.name != "c"));
}

#[test]
fn test_documentation_rows_match_namespace() {
    let registry = fresh();
    let rows = registry.documentation_rows();
    let h = rows.iter().find(|r| r.name == "h").unwrap();
    assert_eq!(h.value, "6.62607004e-34");
    assert_eq!(h.unit, "J s");
    assert_eq!(rows.iter().filter(|r| r.name == "e").count(), 1);
}
