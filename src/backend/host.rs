use std::fmt::Debug;
use std::hash::Hash;

use egui::{Pos2, Rect, Vec2};

use super::native::NativeFile;
use super::types::{DropEffect, FrameId, Listener, RootId, TaskId};

/// A failure reported by the host while reading or mutating an event.
///
/// These are always recovered from locally by the backend; they never escape an event handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The host denied access to an event property (e.g. `target` or `preventDefault`).
    Inaccessible { property: &'static str },

    /// The transfer payload could not be read at this point of the gesture.
    UnreadableTransfer,
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inaccessible { property } => write!(f, "event property `{property}` is not accessible"),
            Self::UnreadableTransfer => write!(f, "transfer payload is not readable"),
        }
    }
}

impl std::error::Error for HostError {}

/// An identity handle to a node of the host's UI tree.
///
/// Equality must be identity: two handles compare equal iff they refer to the same node.
pub trait HostNode: Clone + Eq + Hash + Debug {
    /// Bounding rect in client coordinates, or `None` if the node is not laid out.
    fn client_rect(&self) -> Option<Rect>;

    /// Whether the node is still part of the document.
    fn is_attached(&self) -> bool;

    fn has_draggable_attribute(&self) -> bool;

    fn set_draggable(&self, draggable: bool);

    fn client_offset(&self) -> Option<Pos2> {
        self.client_rect().map(|rect| rect.min)
    }

    /// Whether `other` is this node or one of its descendants.
    ///
    /// Hosts that can't answer keep the default, and then an entered node is only forgotten
    /// through its own leave event (or a reset).
    fn contains(&self, _other: &Self) -> bool {
        true
    }
}

/// The transfer payload attached to a drag event.
pub trait DataTransfer<N> {
    /// The advertised type identifiers.
    ///
    /// `Ok(None)` means the host exposes no type list at all for this gesture.
    fn types(&self) -> Result<Option<Vec<String>>, HostError>;

    fn get_data(&self, format: &str) -> Result<String, HostError>;

    fn files(&self) -> Vec<NativeFile>;

    fn set_data(&mut self, format: &str, data: &str) -> Result<(), HostError>;

    fn supports_drag_image(&self) -> bool;

    /// Use `image` as the drag image, grabbed at `offset` from its top-left corner.
    fn set_drag_image(&mut self, image: &N, offset: Vec2);

    fn set_drop_effect(&mut self, effect: DropEffect);
}

/// One physical drag event delivered by the host.
pub trait DragEvent {
    type Node: HostNode;

    fn target(&self) -> Result<Self::Node, HostError>;

    /// Pointer position in client coordinates.
    fn client_offset(&self) -> Option<Pos2>;

    fn prevent_default(&mut self) -> Result<(), HostError>;

    fn data_transfer(&mut self) -> &mut dyn DataTransfer<Self::Node>;
}

/// The event-listening root the backend is installed on, plus its scheduling services.
///
/// Deferred work is handed back to the backend by the host:
/// tasks through [`super::Html5Backend::run_task`] and frames through
/// [`super::Html5Backend::run_animation_frame`].
pub trait HostWindow {
    type Node: HostNode;

    fn root_id(&self) -> RootId;

    fn add_listener(&mut self, listener: Listener);

    fn remove_listener(&mut self, listener: Listener);

    /// Schedule a task for the next scheduling turn.
    fn schedule_task(&mut self) -> TaskId;

    fn cancel_task(&mut self, task: TaskId);

    fn request_animation_frame(&mut self) -> FrameId;

    fn cancel_animation_frame(&mut self, frame: FrameId);
}

/// Receives warnings about host errors the backend swallowed.
pub trait DiagnosticSink {
    fn record_warning(&self, message: &str, item_type: Option<&str>);
}
