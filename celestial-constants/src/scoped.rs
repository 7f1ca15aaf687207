//! Guard returned by [`Registry::with_temporary_epoch`].

use crate::registry::Registry;

/// Keeps a constants override in place until dropped.
///
/// Dropping the guard restores the namespace that was active before the
/// override, including when the scope unwinds from a panic.
#[must_use = "the override ends as soon as the guard is dropped"]
pub struct ScopedOverride<'a> {
    registry: &'a Registry,
    token: u64,
    epochs: Vec<String>,
}

impl<'a> ScopedOverride<'a> {
    pub(crate) fn new(registry: &'a Registry, token: u64, epochs: Vec<String>) -> Self {
        Self {
            registry,
            token,
            epochs,
        }
    }

    /// Epoch ids bound by this override, physical first.
    pub fn epochs(&self) -> &[String] {
        &self.epochs
    }

    /// Ends the override now.
    pub fn release(self) {}
}

impl Drop for ScopedOverride<'_> {
    fn drop(&mut self) {
        self.registry.release_override(self.token);
    }
}

impl std::fmt::Debug for ScopedOverride<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedOverride")
            .field("token", &self.token)
            .field("epochs", &self.epochs)
            .finish()
    }
}
