//! Copy-on-write patch builder
//!
//! One builder per open editing session. The builder owns the authoritative
//! patch; every edit clones it, applies the change plus any derived-field
//! recomputation, and hands back a fresh snapshot. Snapshots already given
//! out are never mutated, and a delayed submit always sees the latest edits
//! even if no snapshot was taken after them.

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A category patch the builder knows how to edit.
///
/// Edits are per-category enums, so only the category's statically known
/// fields are addressable. `apply_edit` is also where derived fields are
/// recomputed: it receives "now" so time-derived values are fixed at
/// mutation time, not at submit time.
pub trait EditablePatch: Clone {
    /// Typed edit for this category
    type Edit;

    /// Apply one edit in place, recomputing any derived fields
    fn apply_edit(&mut self, edit: Self::Edit, now: DateTime<Utc>);
}

/// Session-scoped builder accumulating user edits into a sparse patch
pub struct PatchBuilder<P: EditablePatch> {
    /// Authoritative patch for this session
    patch: P,
    /// Clock used by derived-field hooks
    clock: Arc<dyn Clock>,
}

impl<P: EditablePatch> PatchBuilder<P> {
    /// Create a builder over an initial (typically all-unset) patch
    #[inline]
    pub fn new(patch: P) -> Self {
        Self::with_clock(patch, Arc::new(SystemClock))
    }

    /// Create a builder with an injected clock
    #[inline]
    pub fn with_clock(patch: P, clock: Arc<dyn Clock>) -> Self {
        Self { patch, clock }
    }

    /// Apply one edit, returning the new snapshot.
    ///
    /// Copy-on-write: the previous snapshot stays intact for any view still
    /// holding it; the builder keeps the updated copy for submission.
    pub fn apply(&mut self, edit: P::Edit) -> P {
        let mut next = self.patch.clone();
        next.apply_edit(edit, self.clock.now());
        self.patch = next.clone();
        next
    }

    /// Current snapshot without editing
    #[inline]
    pub fn snapshot(&self) -> P {
        self.patch.clone()
    }

    /// Borrow the authoritative patch
    #[inline]
    pub fn patch(&self) -> &P {
        &self.patch
    }

    /// Consume the builder at submit time, yielding the final patch
    #[inline]
    pub fn into_patch(self) -> P {
        self.patch
    }
}
