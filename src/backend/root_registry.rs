use std::sync::{Mutex, OnceLock, PoisonError};

use ahash::HashSet;

use super::types::RootId;

/// Roots that currently have a backend installed, process-wide.
fn active_roots() -> &'static Mutex<HashSet<RootId>> {
    static ACTIVE_ROOTS: OnceLock<Mutex<HashSet<RootId>>> = OnceLock::new();
    ACTIVE_ROOTS.get_or_init(Mutex::default)
}

/// Exclusive claim on an event-listening root. Released on drop.
#[derive(Debug)]
pub(super) struct RootClaim {
    root: RootId,
}

impl RootClaim {
    /// Returns `None` if another backend already holds `root`.
    pub(super) fn acquire(root: RootId) -> Option<Self> {
        let mut roots = active_roots()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only build the claim once inserted: dropping a claim releases the root.
        roots.insert(root).then(|| Self { root })
    }

    pub(super) fn root(&self) -> RootId {
        self.root
    }
}

impl Drop for RootClaim {
    fn drop(&mut self) {
        active_roots()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.root);
    }
}

/// Whether a backend is installed on `root`.
pub fn is_root_claimed(root: RootId) -> bool {
    active_roots()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&root)
}
