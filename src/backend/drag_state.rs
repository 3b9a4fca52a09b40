use egui::Pos2;

use super::geometry::offset_changed;
use super::host::HostNode;

/// The node a registered drag started from.
///
/// Tracked so that a drag whose source disappears from the document (and therefore never
/// receives `dragend`) can still be ended, and so that a moved source can be detected.
#[derive(Debug)]
pub(super) struct CurrentDragSource<N> {
    node: N,
    captured_offset: Option<Pos2>,
    offset_changed: bool,
}

impl<N: HostNode> CurrentDragSource<N> {
    pub(super) fn new(node: N) -> Self {
        let captured_offset = node.client_offset();
        Self {
            node,
            captured_offset,
            offset_changed: false,
        }
    }

    pub(super) fn node(&self) -> &N {
        &self.node
    }

    pub(super) fn is_removed(&self) -> bool {
        !self.node.is_attached()
    }

    /// Whether the node moved since the drag started. Sticky once observed.
    pub(super) fn rect_changed(&mut self) -> bool {
        if !self.offset_changed {
            self.offset_changed = offset_changed(self.captured_offset, self.node.client_offset());
        }
        self.offset_changed
    }
}
