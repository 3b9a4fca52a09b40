use itertools::Itertools as _;

use super::types::{SourceId, TargetId};

/// Ids collected for one physical event, innermost-first.
///
/// Created empty by a capture-phase top-level handler, filled by the per-node handlers and
/// consumed by value by the matching bubble-phase top-level handler, so each collection is
/// used exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "pass the collected ids on to the bubble-phase handler"]
pub struct EventIds<Id> {
    ids: Vec<Id>,
}

pub type DragStartSourceIds = EventIds<SourceId>;
pub type DragEnterTargetIds = EventIds<TargetId>;
pub type DragOverTargetIds = EventIds<TargetId>;
pub type DropTargetIds = EventIds<TargetId>;

impl<Id> EventIds<Id> {
    pub(super) fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Per-node handler: record the id of a node the event passed through.
    ///
    /// Ids are prepended, so when nodes report from the root towards the event target the
    /// innermost node ends up first.
    pub fn record(&mut self, id: Id) {
        self.ids.insert(0, id);
    }

    pub fn as_slice(&self) -> &[Id] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub(super) fn into_vec(self) -> Vec<Id> {
        self.ids
    }
}

impl<Id: std::fmt::Display> EventIds<Id> {
    pub(super) fn describe(&self) -> String {
        format!("[{}]", self.ids.iter().join(","))
    }
}
