use std::rc::Rc;

mod collaborators;
mod debug;
mod dispatch;
mod drag_state;
mod drop_policy;
mod enter_leave;
mod error;
mod event_ids;
mod geometry;
mod host;
mod lifecycle;
mod native;
mod options;
mod quirks;
mod registrations;
mod root_registry;
mod session;
mod types;

#[cfg(test)]
mod mock;

pub use collaborators::{
    BeginDragOptions, DragDropActions, DragDropManager, DragDropMonitor, HandlerRegistry,
    HoverOptions,
};
pub use enter_leave::EnterLeaveCounter;
pub use error::BackendError;
pub use event_ids::{
    DragEnterTargetIds, DragOverTargetIds, DragStartSourceIds, DropTargetIds, EventIds,
};
pub use host::{DataTransfer, DiagnosticSink, DragEvent, HostError, HostNode, HostWindow};
pub use native::{
    NativeData, NativeDragSource, NativeFile, NativeItem, NativePayload, NativeType,
    match_native_item_type,
};
pub use options::{BackendOptions, DragPreviewOptions, DragSourceOptions};
pub use quirks::{HostKind, HostQuirks};
pub use registrations::SourceClientOffsets;
pub use root_registry::is_root_claimed;
pub use types::{
    DragEventKind, DragLifecycle, DropEffect, FrameId, ItemType, Listener, Phase, RootId,
    SourceId, TargetId, TaskId,
};

use debug::DebugLog;
use drag_state::CurrentDragSource;
use registrations::Registrations;
use root_registry::RootClaim;
use session::DragSession;
use types::TOP_LEVEL_LISTENERS;

/// Handle returned by the `connect_*` methods; pass it to [`Html5Backend::disconnect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "keep the connection to disconnect it later"]
pub enum Connection {
    DragSource(SourceId),
    DragPreview(SourceId),
    DropTarget(TargetId),
}

/// The ephemeral source registered while a native item is dragged.
#[derive(Debug)]
struct NativeDrag {
    handle: SourceId,
    source: Rc<NativeDragSource>,
}

/// Translates a host's native drag event stream into begin/hover/drop/end calls on a
/// [`DragDropManager`].
///
/// The host delivers each physical event in two halves: a capture-phase top-level handler that
/// returns an empty [`EventIds`] collection, per-node handlers that [`EventIds::record`] the
/// sources or targets the event passed through, and a bubble-phase top-level handler that
/// consumes the collection. The `dispatch_*` methods do all three given the propagation path.
///
/// At most one backend may be [set up](Self::setup) per event-listening root.
pub struct Html5Backend<W: HostWindow, M> {
    pub options: BackendOptions,

    window: W,
    manager: M,

    registrations: Registrations<W::Node>,
    enter_leave: EnterLeaveCounter<W::Node>,

    current_drag_source: Option<CurrentDragSource<W::Node>>,
    native: Option<NativeDrag>,
    drag_start_pending: bool,

    pending_publish: Option<TaskId>,
    async_end_frame: Option<FrameId>,
    native_stuck_listener: bool,

    claim: Option<RootClaim>,
    session: DragSession,
    debug_log: DebugLog,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
}

impl<W, M> std::fmt::Debug for Html5Backend<W, M>
where
    W: HostWindow,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Html5Backend")
            .field("options", &self.options)
            .field("root", &self.claim.as_ref().map(RootClaim::root))
            .field("native", &self.native)
            .field("drag_start_pending", &self.drag_start_pending)
            .finish_non_exhaustive()
    }
}

impl<W, M> Html5Backend<W, M>
where
    W: HostWindow,
    W::Node: 'static,
    M: DragDropManager,
{
    pub fn new(window: W, manager: M) -> Self {
        Self::new_with_options(window, manager, BackendOptions::default())
    }

    pub fn new_with_options(window: W, manager: M, options: BackendOptions) -> Self {
        Self {
            options,
            window,
            manager,
            registrations: Registrations::default(),
            enter_leave: EnterLeaveCounter::default(),
            current_drag_source: None,
            native: None,
            drag_start_pending: false,
            pending_publish: None,
            async_end_frame: None,
            native_stuck_listener: false,
            claim: None,
            session: DragSession::default(),
            debug_log: DebugLog::default(),
            diagnostics: None,
        }
    }

    /// Report swallowed host errors to `sink` in addition to the log.
    pub fn set_diagnostic_sink(&mut self, sink: impl DiagnosticSink + 'static) {
        self.diagnostics = Some(Box::new(sink));
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// Install the top-level listeners on the window.
    ///
    /// # Errors
    /// Fails if a backend (this one included) is already installed on the same root.
    pub fn setup(&mut self) -> Result<(), BackendError> {
        let root = self.window.root_id();
        if self.claim.is_some() {
            return Err(BackendError::AlreadySetUp { root });
        }
        let claim = RootClaim::acquire(root).ok_or(BackendError::AlreadySetUp { root })?;
        self.claim = Some(claim);

        for listener in TOP_LEVEL_LISTENERS {
            self.window.add_listener(listener);
        }
        self.debug_log_event(format!("setup root={root:?}"));
        Ok(())
    }

    /// Remove every listener and cancel every pending callback. A no-op if not set up.
    pub fn teardown(&mut self) {
        let Some(claim) = self.claim.take() else {
            return;
        };

        for listener in TOP_LEVEL_LISTENERS {
            self.window.remove_listener(listener);
        }
        self.drag_start_pending = false;
        self.clear_current_drag_source();
        self.remove_native_stuck_listener();
        if let Some(frame) = self.async_end_frame.take() {
            self.window.cancel_animation_frame(frame);
        }
        if let Some(task) = self.pending_publish.take() {
            self.window.cancel_task(task);
        }
        self.debug_log_event(format!("teardown root={:?}", claim.root()));
    }

    pub fn is_set_up(&self) -> bool {
        self.claim.is_some()
    }

    pub fn connect_drag_source(
        &mut self,
        source: SourceId,
        node: W::Node,
        options: DragSourceOptions,
    ) -> Connection {
        node.set_draggable(true);
        self.registrations.insert_source(source, node, options);
        Connection::DragSource(source)
    }

    pub fn connect_drag_preview(
        &mut self,
        source: SourceId,
        node: W::Node,
        options: DragPreviewOptions,
    ) -> Connection {
        self.registrations.insert_preview(source, node, options);
        Connection::DragPreview(source)
    }

    pub fn connect_drop_target(&mut self, target: TargetId, node: W::Node) -> Connection {
        self.registrations.insert_target(target, node);
        Connection::DropTarget(target)
    }

    /// Undo a `connect_*` call. Disconnecting twice is harmless.
    pub fn disconnect(&mut self, connection: Connection) {
        match connection {
            Connection::DragSource(source) => {
                if let Some(registration) = self.registrations.remove_source(source) {
                    registration.node.set_draggable(false);
                }
            }
            Connection::DragPreview(source) => {
                self.registrations.remove_preview(source);
            }
            Connection::DropTarget(target) => {
                self.registrations.remove_target(target);
            }
        }
    }

    pub fn lifecycle(&self) -> DragLifecycle {
        if self.drag_start_pending {
            DragLifecycle::DragPending
        } else if !self.manager.is_dragging() {
            DragLifecycle::Idle
        } else if self.is_dragging_native_item() {
            DragLifecycle::DraggingNative
        } else {
            DragLifecycle::Dragging
        }
    }

    pub fn is_dragging_native_item(&self) -> bool {
        self.manager
            .item_type()
            .is_some_and(|item_type| NativeType::from_item_type(&item_type).is_some())
    }

    /// The source object of the native drag in progress, if any.
    pub fn current_native_source(&self) -> Option<Rc<NativeDragSource>> {
        self.native.as_ref().map(|native| Rc::clone(&native.source))
    }

    /// The drop effect shown over droppable targets for the current drag.
    pub fn current_drop_effect(&self) -> DropEffect {
        let source_options = self
            .manager
            .source_id()
            .and_then(|source| self.registrations.source(source))
            .map(|registration| registration.options);
        drop_policy::effective_drop_effect(
            self.is_dragging_native_item(),
            self.options.native_drop_effect,
            source_options,
        )
    }

    fn current_preview_options(&self) -> DragPreviewOptions {
        self.manager
            .source_id()
            .and_then(|source| self.registrations.preview(source))
            .map(|preview| preview.options)
            .unwrap_or_default()
    }

    fn report_swallowed(&self, message: &str, err: &HostError) {
        log::warn!("{message}: {err}");
        if let Some(sink) = &self.diagnostics {
            let item_type = self.manager.item_type();
            sink.record_warning(message, item_type.as_ref().map(ItemType::as_str));
        }
    }
}
