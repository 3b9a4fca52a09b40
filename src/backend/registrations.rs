use std::cell::RefCell;
use std::rc::Rc;

use ahash::HashMap;
use egui::Pos2;

use super::host::HostNode;
use super::options::{DragPreviewOptions, DragSourceOptions};
use super::types::{SourceId, TargetId};

#[derive(Clone, Debug)]
pub(super) struct SourceRegistration<N> {
    pub(super) node: N,
    pub(super) options: DragSourceOptions,
}

#[derive(Clone, Debug)]
pub(super) struct PreviewRegistration<N> {
    pub(super) node: N,
    pub(super) options: DragPreviewOptions,
}

type SourceTable<N> = HashMap<SourceId, SourceRegistration<N>>;

/// Nodes connected by the embedding UI layer.
///
/// Lookups for ids that were never connected (or already disconnected) simply return `None`.
#[derive(Debug)]
pub(super) struct Registrations<N> {
    sources: Rc<RefCell<SourceTable<N>>>,
    previews: HashMap<SourceId, PreviewRegistration<N>>,
    targets: HashMap<TargetId, N>,
}

impl<N> Default for Registrations<N> {
    fn default() -> Self {
        Self {
            sources: Rc::default(),
            previews: HashMap::default(),
            targets: HashMap::default(),
        }
    }
}

impl<N: HostNode + 'static> Registrations<N> {
    pub(super) fn insert_source(&mut self, id: SourceId, node: N, options: DragSourceOptions) {
        self.sources
            .borrow_mut()
            .insert(id, SourceRegistration { node, options });
    }

    pub(super) fn remove_source(&mut self, id: SourceId) -> Option<SourceRegistration<N>> {
        self.sources.borrow_mut().remove(&id)
    }

    pub(super) fn source(&self, id: SourceId) -> Option<SourceRegistration<N>> {
        self.sources.borrow().get(&id).cloned()
    }

    pub(super) fn insert_preview(&mut self, id: SourceId, node: N, options: DragPreviewOptions) {
        self.previews
            .insert(id, PreviewRegistration { node, options });
    }

    pub(super) fn remove_preview(&mut self, id: SourceId) -> Option<PreviewRegistration<N>> {
        self.previews.remove(&id)
    }

    pub(super) fn preview(&self, id: SourceId) -> Option<&PreviewRegistration<N>> {
        self.previews.get(&id)
    }

    pub(super) fn insert_target(&mut self, id: TargetId, node: N) {
        self.targets.insert(id, node);
    }

    pub(super) fn remove_target(&mut self, id: TargetId) -> Option<N> {
        self.targets.remove(&id)
    }

    /// Sources registered on `node`, ordered by id.
    pub(super) fn sources_on(&self, node: &N) -> Vec<SourceId> {
        let mut ids: Vec<SourceId> = self
            .sources
            .borrow()
            .iter()
            .filter(|(_, registration)| registration.node == *node)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub(super) fn targets_on(&self, node: &N) -> Vec<TargetId> {
        let mut ids: Vec<TargetId> = self
            .targets
            .iter()
            .filter(|(_, target_node)| *target_node == node)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub(super) fn client_offsets(&self) -> SourceClientOffsets {
        let sources = Rc::clone(&self.sources);
        SourceClientOffsets {
            lookup: Rc::new(move |id: SourceId| {
                sources
                    .borrow()
                    .get(&id)
                    .and_then(|registration| registration.node.client_offset())
            }),
        }
    }
}

/// Lazily evaluated client offsets of the registered drag source nodes.
///
/// Each call to [`Self::get`] reads the live node, so an offset requested while hovering
/// reflects the layout at that moment rather than at drag start.
#[derive(Clone)]
pub struct SourceClientOffsets {
    lookup: Rc<dyn Fn(SourceId) -> Option<Pos2>>,
}

impl SourceClientOffsets {
    pub fn get(&self, source: SourceId) -> Option<Pos2> {
        (self.lookup)(source)
    }
}

impl std::fmt::Debug for SourceClientOffsets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceClientOffsets").finish_non_exhaustive()
    }
}
