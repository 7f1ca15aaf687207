//! Per-domain epoch selection with one-time lock-in.
//!
//! ```text
//! Unset ──set──▶ Set(epoch) ──get──▶ Locked(epoch)
//!   │              │  ▲
//!   │              └──┘ set (replaces the pending choice)
//!   └─────────────get─────────────▶ Locked(default)
//! ```
//!
//! Constants get folded into derived values as soon as they are read, so a
//! later switch would leave those values silently disagreeing with new
//! computations. The selector therefore freezes at the first read and every
//! later `set` fails with [`ConstantsError::AlreadyLocked`].

use crate::epoch::Domain;
use crate::errors::{ConstantsError, ConstantsResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Unset,
    Set(String),
    Locked(String),
}

/// Result of [`VersionSelector::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub epoch: String,
    /// True only for the call that performed the lock-in.
    pub newly_locked: bool,
}

#[derive(Debug, Clone)]
pub struct VersionSelector {
    domain: Domain,
    default: String,
    known: Vec<String>,
    state: SelectionState,
}

impl VersionSelector {
    /// Creates an unlocked selector. `default` must be one of `known`.
    pub fn new(
        domain: Domain,
        default: impl Into<String>,
        known: impl IntoIterator<Item = impl Into<String>>,
    ) -> ConstantsResult<Self> {
        let default = default.into();
        let known: Vec<String> = known.into_iter().map(Into::into).collect();
        if !known.contains(&default) {
            return Err(ConstantsError::unknown_epoch(Some(domain), default));
        }
        Ok(Self {
            domain,
            default,
            known,
            state: SelectionState::Unset,
        })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn default_epoch(&self) -> &str {
        &self.default
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, SelectionState::Locked(_))
    }

    /// The epoch that is, or would be, active. Does not lock.
    pub fn peek(&self) -> &str {
        match &self.state {
            SelectionState::Unset => &self.default,
            SelectionState::Set(epoch) | SelectionState::Locked(epoch) => epoch,
        }
    }

    /// Returns the active epoch, locking the selector on first use.
    pub fn get(&mut self) -> Selection {
        match std::mem::replace(&mut self.state, SelectionState::Unset) {
            SelectionState::Locked(epoch) => {
                self.state = SelectionState::Locked(epoch.clone());
                Selection {
                    epoch,
                    newly_locked: false,
                }
            }
            SelectionState::Set(epoch) => self.lock(epoch),
            SelectionState::Unset => {
                let epoch = self.default.clone();
                self.lock(epoch)
            }
        }
    }

    fn lock(&mut self, epoch: String) -> Selection {
        tracing::debug!(domain = %self.domain, epoch = %epoch, "constants version locked");
        self.state = SelectionState::Locked(epoch.clone());
        Selection {
            epoch,
            newly_locked: true,
        }
    }

    /// Chooses the epoch to lock in at the next [`get`](Self::get).
    ///
    /// Validation happens before the lock check so a typo is reported as
    /// such even after lock-in.
    pub fn set(&mut self, epoch: &str) -> ConstantsResult<()> {
        if !self.known.iter().any(|k| k == epoch) {
            return Err(ConstantsError::unknown_epoch(Some(self.domain), epoch));
        }
        if let SelectionState::Locked(current) = &self.state {
            return Err(ConstantsError::already_locked(self.domain, current.clone()));
        }
        tracing::debug!(domain = %self.domain, epoch, "constants version selected");
        self.state = SelectionState::Set(epoch.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physical() -> VersionSelector {
        VersionSelector::new(Domain::Physical, "codata2014", ["codata2010", "codata2014"]).unwrap()
    }

    #[test]
    fn starts_unset_with_default() {
        let selector = physical();
        assert_eq!(selector.state(), &SelectionState::Unset);
        assert_eq!(selector.peek(), "codata2014");
        assert!(!selector.is_locked());
    }

    #[test]
    fn first_get_adopts_default_and_locks() {
        let mut selector = physical();
        let selection = selector.get();
        assert_eq!(selection.epoch, "codata2014");
        assert!(selection.newly_locked);
        assert_eq!(
            selector.state(),
            &SelectionState::Locked("codata2014".into())
        );
    }

    #[test]
    fn set_then_get_returns_selection() {
        let mut selector = physical();
        selector.set("codata2010").unwrap();
        assert_eq!(selector.state(), &SelectionState::Set("codata2010".into()));
        assert_eq!(selector.get().epoch, "codata2010");
    }

    #[test]
    fn set_replaces_pending_choice() {
        let mut selector = physical();
        selector.set("codata2010").unwrap();
        selector.set("codata2014").unwrap();
        assert_eq!(selector.get().epoch, "codata2014");
    }

    #[test]
    fn locks_only_once() {
        let mut selector = physical();
        assert!(selector.get().newly_locked);
        assert!(!selector.get().newly_locked);
        assert!(!selector.get().newly_locked);
    }

    #[test]
    fn set_after_get_fails() {
        let mut selector = physical();
        selector.get();
        let err = selector.set("codata2010").unwrap_err();
        assert_eq!(
            err,
            ConstantsError::already_locked(Domain::Physical, "codata2014")
        );
        assert_eq!(selector.get().epoch, "codata2014");
    }

    #[test]
    fn unknown_epoch_rejected_and_state_kept() {
        let mut selector = physical();
        selector.set("codata2010").unwrap();
        let err = selector.set("codata2012").unwrap_err();
        assert_eq!(
            err,
            ConstantsError::unknown_epoch(Some(Domain::Physical), "codata2012")
        );
        assert_eq!(selector.peek(), "codata2010");
    }

    #[test]
    fn unknown_default_rejected() {
        let err = VersionSelector::new(Domain::Astronomical, "allen1976", ["iau2012", "iau2015"])
            .unwrap_err();
        assert_eq!(
            err,
            ConstantsError::unknown_epoch(Some(Domain::Astronomical), "allen1976")
        );
    }
}
