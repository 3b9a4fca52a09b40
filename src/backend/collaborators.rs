use std::rc::Rc;

use egui::Pos2;

use super::native::NativeDragSource;
use super::registrations::SourceClientOffsets;
use super::types::{ItemType, SourceId, TargetId};

/// Options passed along with [`DragDropActions::begin_drag`].
#[derive(Clone, Debug)]
pub struct BeginDragOptions {
    /// Whether the source should be published immediately.
    ///
    /// The backend always passes `false` for registered sources and publishes later through
    /// [`DragDropActions::publish_drag_source`].
    pub publish_source: bool,

    /// Pointer position when the drag started.
    pub client_offset: Option<Pos2>,

    /// Lazily evaluated offsets of the registered source nodes.
    pub source_client_offset: Option<SourceClientOffsets>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverOptions {
    pub client_offset: Option<Pos2>,
}

/// The action dispatcher that advances the shared drag session.
pub trait DragDropActions {
    /// Begin a session. The dispatcher picks the first source id (innermost-first) that accepts.
    fn begin_drag(&mut self, source_ids: &[SourceId], options: BeginDragOptions);

    fn publish_drag_source(&mut self);

    /// `target_ids` are ordered innermost-first.
    fn hover(&mut self, target_ids: &[TargetId], options: HoverOptions);

    fn drop(&mut self);

    fn end_drag(&mut self);
}

/// Read-only view of the shared drag session.
pub trait DragDropMonitor {
    fn is_dragging(&self) -> bool;

    fn item_type(&self) -> Option<ItemType>;

    fn source_id(&self) -> Option<SourceId>;

    fn can_drop_on_target(&self, target: TargetId) -> bool;
}

/// Registry of drag sources; used for the ephemeral native sources only.
pub trait HandlerRegistry {
    fn add_source(&mut self, item_type: ItemType, source: Rc<NativeDragSource>) -> SourceId;

    fn remove_source(&mut self, source: SourceId);
}

/// The coordination layer the backend drives: dispatcher, monitor and registry in one.
pub trait DragDropManager: DragDropActions + DragDropMonitor + HandlerRegistry {}

impl<T: DragDropActions + DragDropMonitor + HandlerRegistry> DragDropManager for T {}
