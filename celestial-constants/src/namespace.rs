//! The active namespace and the binder that fills it.
//!
//! [`ActiveNamespace`] maps abbreviations to the constants currently visible
//! to consumers. Plain lookups return the primary record of an abbreviation
//! (the first one bound, normally SI); cgs-subsystem variants are only
//! reachable through [`ActiveNamespace::get_in`].
//!
//! [`bind`] merges epochs into a namespace in order. A name collision with an
//! identical definition is a no-op; a differing definition overwrites the old
//! record in place and is reported as a [`DuplicateDefinitionConflict`]
//! unless diagnostics are suppressed.

use crate::constant::{Constant, ConstantKey, UnitSystem};
use crate::docs::DocRow;
use crate::epoch::{ConstantSet, Domain};
use crate::errors::DuplicateDefinitionConflict;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ActiveNamespace {
    entries: Vec<Constant>,
    index: HashMap<ConstantKey, usize>,
}

impl ActiveNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound constants in binding order.
    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.entries.iter()
    }

    pub fn get(&self, abbrev: &str) -> Option<&Constant> {
        self.entries.iter().find(|c| c.abbrev() == abbrev)
    }

    pub fn get_in(&self, abbrev: &str, system: UnitSystem) -> Option<&Constant> {
        self.index
            .get(&ConstantKey::new(abbrev, system))
            .map(|&i| &self.entries[i])
    }

    pub fn contains_abbrev(&self, abbrev: &str) -> bool {
        self.get(abbrev).is_some()
    }

    /// Inserts or replaces in place, returning the replaced record.
    pub fn insert(&mut self, constant: Constant) -> Option<Constant> {
        let key = constant.key();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i], constant)),
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(constant);
                None
            }
        }
    }

    /// Drops the records of `domain` that `keep` rejects. Other domains are
    /// untouched and the relative order of survivors is preserved.
    pub fn retain_domain(&mut self, domain: Domain, mut keep: impl FnMut(&Constant) -> bool) {
        let before = self.entries.len();
        self.entries.retain(|c| c.domain() != domain || keep(c));
        if self.entries.len() != before {
            self.reindex();
        }
    }

    /// Makes `set` the only source of records for its domain.
    ///
    /// Records the set does not define are dropped; the rest are replaced in
    /// place even when the definition is unchanged, so provenance always
    /// names `set`. New keys are appended in the set's order.
    pub fn replace_domain(&mut self, set: &ConstantSet) {
        self.retain_domain(set.domain(), |c| set.contains_key(&c.key()));
        for constant in set {
            self.insert(constant.clone());
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, c)| (c.key(), i))
            .collect();
    }

    /// The set of epoch ids contributing records for `domain`.
    pub fn epochs_for(&self, domain: Domain) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for constant in self.entries.iter().filter(|c| c.domain() == domain) {
            if !ids.contains(&constant.epoch()) {
                ids.push(constant.epoch());
            }
        }
        ids
    }

    /// One documentation row per bound abbreviation, in binding order.
    pub fn documentation_rows(&self) -> Vec<DocRow> {
        let mut seen: Vec<&str> = Vec::new();
        let mut rows = Vec::new();
        for constant in &self.entries {
            if seen.contains(&constant.abbrev()) {
                continue;
            }
            seen.push(constant.abbrev());
            rows.push(doc_row(constant));
        }
        rows
    }

    /// Bitwise comparison of every field of every entry, in order.
    pub fn identical(&self, other: &ActiveNamespace) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.identical(b))
    }
}

fn doc_row(constant: &Constant) -> DocRow {
    DocRow::new(
        constant.abbrev(),
        constant.value(),
        constant.unit(),
        constant.name(),
    )
}

/// Merges `epochs` into `destination`, in list order and then insertion
/// order within each epoch.
///
/// Returns the redefinitions that were reported. The list is empty when
/// `suppress_diagnostics` is set, even if records were overwritten.
pub fn bind<'a>(
    epochs: impl IntoIterator<Item = &'a ConstantSet>,
    destination: &mut ActiveNamespace,
    suppress_diagnostics: bool,
) -> Vec<DuplicateDefinitionConflict> {
    bind_inner(epochs, destination, suppress_diagnostics, None)
}

/// Like [`bind`], additionally appending a [`DocRow`] to `rows` for every
/// abbreviation that was not bound before.
pub fn bind_documented<'a>(
    epochs: impl IntoIterator<Item = &'a ConstantSet>,
    destination: &mut ActiveNamespace,
    suppress_diagnostics: bool,
    rows: &mut Vec<DocRow>,
) -> Vec<DuplicateDefinitionConflict> {
    bind_inner(epochs, destination, suppress_diagnostics, Some(rows))
}

fn bind_inner<'a>(
    epochs: impl IntoIterator<Item = &'a ConstantSet>,
    destination: &mut ActiveNamespace,
    suppress_diagnostics: bool,
    mut rows: Option<&mut Vec<DocRow>>,
) -> Vec<DuplicateDefinitionConflict> {
    let mut conflicts = Vec::new();

    for epoch in epochs {
        tracing::trace!(epoch = epoch.id(), count = epoch.len(), "binding epoch");
        for constant in epoch {
            if let Some(existing) = destination.get_in(constant.abbrev(), constant.system()) {
                if existing.same_definition(constant) {
                    continue;
                }
                if !suppress_diagnostics {
                    let conflict = DuplicateDefinitionConflict {
                        name: constant.abbrev().to_string(),
                        old_reference: existing.reference().to_string(),
                        new_reference: constant.reference().to_string(),
                    };
                    tracing::warn!(
                        constant = constant.abbrev(),
                        system = %constant.system(),
                        old = existing.reference(),
                        new = constant.reference(),
                        "{}",
                        conflict
                    );
                    conflicts.push(conflict);
                }
                destination.insert(constant.clone());
                continue;
            }

            if let Some(rows) = rows.as_deref_mut() {
                if !destination.contains_abbrev(constant.abbrev()) {
                    rows.push(doc_row(constant));
                }
            }
            destination.insert(constant.clone());
        }
    }

    conflicts
}
