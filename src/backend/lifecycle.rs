use std::rc::Rc;

use egui::Pos2;

use super::collaborators::{BeginDragOptions, DragDropManager, HoverOptions};
use super::drag_state::CurrentDragSource;
use super::drop_policy;
use super::event_ids::{
    DragEnterTargetIds, DragOverTargetIds, DragStartSourceIds, DropTargetIds, EventIds,
};
use super::geometry::drag_preview_offset;
use super::host::{DragEvent, HostNode, HostWindow};
use super::native::{NativeDragSource, NativeType, match_native_item_type};
use super::session::SessionKind;
use super::types::{FrameId, Listener, SourceId, TaskId};
use super::{Html5Backend, NativeDrag};

impl<W, M> Html5Backend<W, M>
where
    W: HostWindow,
    W::Node: 'static,
    M: DragDropManager,
{
    // ---------------------------------------------------------------------------------------
    // dragstart

    /// Capture-phase `dragstart`: forget any stale drag source and start collecting source ids.
    pub fn handle_top_drag_start_capture(&mut self) -> DragStartSourceIds {
        self.debug_log.next_event();
        self.clear_current_drag_source();
        self.drag_start_pending = true;
        EventIds::new()
    }

    /// Bubble-phase `dragstart`: begin a session for the collected sources, or a native drag.
    pub fn handle_top_drag_start<E>(&mut self, e: &mut E, source_ids: DragStartSourceIds)
    where
        E: DragEvent<Node = W::Node>,
    {
        self.drag_start_pending = false;
        log::trace!("dragstart sources={}", source_ids.describe());
        let source_ids = source_ids.into_vec();
        let client_offset = e.client_offset();

        // We missed the end of the previous gesture.
        if self.manager.is_dragging() {
            self.end_drag("missed dragend");
            self.release_native_source();
        }

        self.manager.begin_drag(
            &source_ids,
            BeginDragOptions {
                publish_source: false,
                client_offset,
                source_client_offset: Some(self.registrations.client_offsets()),
            },
        );

        let native_type = match match_native_item_type(e.data_transfer()) {
            Ok(native_type) => native_type,
            Err(err) => {
                // Let the host drag; dragenter classifies the payload once it is readable.
                log::debug!("dragstart payload not readable yet ({err}), deferring to dragenter");
                return;
            }
        };

        if self.manager.is_dragging() {
            self.start_registered_drag(e, client_offset);
        } else if let Some(native_type) = native_type {
            // A native item (such as a link or selected text) dragged from inside the document.
            self.begin_drag_native_item(native_type);
        } else if has_transfer_types(e) || target_is_draggable(e) {
            // No source accepted the drag.
            self.prevent_default(e, "dragstart");
        }
        // Otherwise there are no types and nothing draggable: a native drag (URL or text)
        // that dragenter picks up.
    }

    fn start_registered_drag<E>(&mut self, e: &mut E, client_offset: Option<Pos2>)
    where
        E: DragEvent<Node = W::Node>,
    {
        let Some(source) = self.manager.source_id() else {
            return;
        };
        let line = self.session.start(SessionKind::Registered(source));
        self.debug_log_event(line);

        self.set_custom_drag_image(e, source, client_offset);

        let format = self.options.required_data_format.clone();
        if let Err(err) = e.data_transfer().set_data(&format, "{}") {
            log::debug!("host rejected placeholder data as {format}: {err}");
        }

        match e.target() {
            Ok(node) => self.set_current_drag_source(node),
            Err(err) => self.report_swallowed("dragstart target not accessible", &err),
        }

        if self.current_preview_options().capture_dragging_state {
            self.publish_drag_source();
        } else {
            // Next turn, so the host snapshots the source before it renders as "dragging".
            if let Some(task) = self.pending_publish.take() {
                self.window.cancel_task(task);
            }
            self.pending_publish = Some(self.window.schedule_task());
        }
    }

    fn set_custom_drag_image<E>(&self, e: &mut E, source: SourceId, client_offset: Option<Pos2>)
    where
        E: DragEvent<Node = W::Node>,
    {
        if !e.data_transfer().supports_drag_image() {
            return;
        }
        let Some(preview) = self.registrations.preview(source) else {
            log::trace!("no drag preview connected for {source}, using the host default");
            return;
        };
        let source_rect = self
            .registrations
            .source(source)
            .and_then(|registration| registration.node.client_rect());
        let offset = drag_preview_offset(
            source_rect,
            preview.node.client_rect(),
            client_offset,
            &preview.options,
        );
        e.data_transfer().set_drag_image(&preview.node, offset);
    }

    /// Run a task scheduled through [`HostWindow::schedule_task`].
    pub fn run_task(&mut self, task: TaskId) {
        if self.pending_publish != Some(task) {
            return;
        }
        self.pending_publish = None;
        self.publish_drag_source();
    }

    fn publish_drag_source(&mut self) {
        if !self.manager.is_dragging() {
            log::debug!("drag ended before its source was published");
            return;
        }
        self.manager.publish_drag_source();
        self.debug_log_event(format!("publish source={:?}", self.manager.source_id()));
    }

    // ---------------------------------------------------------------------------------------
    // dragend

    /// Capture-phase `dragend`.
    pub fn handle_top_drag_end_capture(&mut self) {
        self.debug_log.next_event();
        self.drag_start_pending = false;
        // Some hosts re-dispatch dragend in a loop; only the first one ends the drag.
        if self.clear_current_drag_source() {
            self.end_drag("dragend");
        }
    }

    // ---------------------------------------------------------------------------------------
    // dragenter

    /// Capture-phase `dragenter`: track region entry and detect native items entering from outside.
    pub fn handle_top_drag_enter_capture<E>(&mut self, e: &mut E) -> DragEnterTargetIds
    where
        E: DragEvent<Node = W::Node>,
    {
        self.debug_log.next_event();
        self.finish_pending_drag_start();
        let ids = EventIds::new();

        let node = match e.target() {
            Ok(node) => node,
            Err(err) => {
                self.report_swallowed("dragenter target not accessible", &err);
                return ids;
            }
        };
        let is_first_enter = self.enter_leave.enter(node);
        if !is_first_enter || self.manager.is_dragging() {
            return ids;
        }

        match match_native_item_type(e.data_transfer()) {
            // A native item (such as a file or URL) dragged from outside the document.
            Ok(Some(native_type)) => self.begin_drag_native_item(native_type),
            Ok(None) => {}
            Err(err) => log::debug!("dragenter payload not readable ({err})"),
        }
        ids
    }

    /// Bubble-phase `dragenter`.
    pub fn handle_top_drag_enter<E>(&mut self, e: &mut E, target_ids: DragEnterTargetIds)
    where
        E: DragEvent<Node = W::Node>,
    {
        log::trace!("dragenter targets={}", target_ids.describe());
        let target_ids = target_ids.into_vec();

        // Probably a native item type we don't understand.
        if !self.manager.is_dragging() {
            return;
        }

        if !self.options.quirks.suppress_hover_on_enter {
            self.manager.hover(
                &target_ids,
                HoverOptions {
                    client_offset: e.client_offset(),
                },
            );
        }

        let can_drop = target_ids
            .iter()
            .any(|&target| self.manager.can_drop_on_target(target));
        if let Some(effect) = drop_policy::drag_enter_response(can_drop, self.current_drop_effect())
        {
            self.prevent_default(e, "dragenter");
            e.data_transfer().set_drop_effect(effect);
        }
    }

    // ---------------------------------------------------------------------------------------
    // dragover

    /// Capture-phase `dragover`. Fires continuously, so it only starts a fresh collection.
    pub fn handle_top_drag_over_capture(&mut self) -> DragOverTargetIds {
        self.debug_log.next_event();
        self.finish_pending_drag_start();
        EventIds::new()
    }

    /// Bubble-phase `dragover`.
    pub fn handle_top_drag_over<E>(&mut self, e: &mut E, target_ids: DragOverTargetIds)
    where
        E: DragEvent<Node = W::Node>,
    {
        let target_ids = target_ids.into_vec();
        let session_active = self.manager.is_dragging();

        if session_active {
            self.manager.hover(
                &target_ids,
                HoverOptions {
                    client_offset: e.client_offset(),
                },
            );
        }

        let can_drop = session_active
            && target_ids
                .iter()
                .any(|&target| self.manager.can_drop_on_target(target));
        let dragging_native = session_active && self.is_dragging_native_item();
        let effective = self.current_drop_effect();

        let response = drop_policy::drag_over_response(
            session_active,
            can_drop,
            dragging_native,
            effective,
            || self.current_drag_source_rect_changed(),
        );
        if let Some(effect) = response {
            self.prevent_default(e, "dragover");
            e.data_transfer().set_drop_effect(effect);
        }
    }

    fn current_drag_source_rect_changed(&mut self) -> bool {
        self.current_drag_source
            .as_mut()
            .is_some_and(CurrentDragSource::rect_changed)
    }

    // ---------------------------------------------------------------------------------------
    // dragleave

    /// Capture-phase `dragleave`: end a native drag once the pointer left the whole document.
    pub fn handle_top_drag_leave_capture<E>(&mut self, e: &mut E)
    where
        E: DragEvent<Node = W::Node>,
    {
        self.debug_log.next_event();
        self.finish_pending_drag_start();
        if self.is_dragging_native_item() {
            if let Err(err) = e.prevent_default() {
                self.report_swallowed("dragleave preventDefault not accessible", &err);
            }
        }

        let is_last_leave = match e.target() {
            Ok(node) => self.enter_leave.leave(&node),
            Err(err) => {
                self.report_swallowed("dragleave target not accessible", &err);
                false
            }
        };
        if is_last_leave && self.is_dragging_native_item() {
            self.end_drag_native_item();
        }
    }

    // ---------------------------------------------------------------------------------------
    // drop

    /// Capture-phase `drop`: block the host's own drop and read native contents.
    pub fn handle_top_drop_capture<E>(&mut self, e: &mut E) -> DropTargetIds
    where
        E: DragEvent<Node = W::Node>,
    {
        self.debug_log.next_event();
        self.finish_pending_drag_start();
        self.prevent_default(e, "drop");

        if self.is_dragging_native_item() {
            if let Some(native) = &self.native {
                // Transfer contents are only readable during drop.
                native
                    .source
                    .mutate_item_by_reading_data_transfer(&*e.data_transfer());
            }
        }

        // We may have missed leave events; start from a clean slate.
        self.enter_leave.reset();
        EventIds::new()
    }

    /// Bubble-phase `drop`.
    pub fn handle_top_drop<E>(&mut self, e: &mut E, target_ids: DropTargetIds)
    where
        E: DragEvent<Node = W::Node>,
    {
        let description = target_ids.describe();
        let target_ids = target_ids.into_vec();

        if !self.manager.is_dragging() {
            return;
        }

        self.manager.hover(
            &target_ids,
            HoverOptions {
                client_offset: e.client_offset(),
            },
        );
        self.manager.drop();
        self.debug_log_event(format!("drop targets={description}"));

        if self.is_dragging_native_item() {
            self.end_drag_native_item();
        } else {
            // Some hosts skip dragend when the drop removed the source node.
            self.end_drag_if_source_was_removed();
        }
    }

    // ---------------------------------------------------------------------------------------
    // mouse events while dragging

    /// Capture-phase `mousemove`, delivered while [`Listener::SourceRemovalCheck`] is installed.
    ///
    /// A mouse event in the middle of a drag means the drag is over and the source node vanished,
    /// so the host never dispatched `dragend`.
    pub fn handle_mouse_move_capture(&mut self) {
        self.end_drag_if_source_was_removed();
    }

    /// Capture-phase `mouseover`, delivered while [`Listener::NativeStuckCheck`] is installed.
    pub fn handle_mouse_over_capture(&mut self) {
        if !self.native_stuck_listener {
            return;
        }
        if let Some(frame) = self.async_end_frame.take() {
            self.window.cancel_animation_frame(frame);
        }
        self.async_end_frame = Some(self.window.request_animation_frame());
        self.remove_native_stuck_listener();
        self.enter_leave.reset();
    }

    /// Run an animation frame requested through [`HostWindow::request_animation_frame`].
    pub fn run_animation_frame(&mut self, frame: FrameId) {
        if self.async_end_frame != Some(frame) {
            return;
        }
        self.async_end_frame = None;
        self.end_drag_native_item();
    }

    fn end_drag_if_source_was_removed(&mut self) {
        let Some(current) = &self.current_drag_source else {
            return;
        };
        if !current.is_removed() {
            return;
        }
        log::debug!("drag source {:?} left the document", current.node());
        if self.clear_current_drag_source() {
            self.end_drag("source removed");
        }
    }

    // ---------------------------------------------------------------------------------------
    // native drags

    pub(super) fn begin_drag_native_item(&mut self, native_type: NativeType) {
        self.clear_current_drag_source();
        self.release_native_source();

        let source = Rc::new(NativeDragSource::new(native_type));
        let handle = self
            .manager
            .add_source(native_type.item_type(), Rc::clone(&source));
        self.native = Some(NativeDrag { handle, source });
        self.manager.begin_drag(
            &[handle],
            BeginDragOptions {
                publish_source: true,
                client_offset: None,
                source_client_offset: None,
            },
        );
        let line = self.session.start(SessionKind::Native(native_type));
        self.debug_log_event(format!("{line} handle={handle}"));

        if self.options.quirks.native_drag_stuck_detection && !self.native_stuck_listener {
            self.window.add_listener(Listener::NativeStuckCheck);
            self.native_stuck_listener = true;
        }
    }

    pub(super) fn end_drag_native_item(&mut self) {
        if !self.is_dragging_native_item() {
            return;
        }

        self.end_drag("native drag over");
        self.release_native_source();
    }

    /// Unregister the ephemeral native source, if any, along with its stuck-drag check.
    fn release_native_source(&mut self) {
        if let Some(native) = self.native.take() {
            self.manager.remove_source(native.handle);
            self.debug_log_event(format!("released native handle={}", native.handle));
        }
        self.remove_native_stuck_listener();
    }

    // ---------------------------------------------------------------------------------------
    // helpers

    /// Any later event means the bubble half of `dragstart` is not coming.
    fn finish_pending_drag_start(&mut self) {
        if self.drag_start_pending {
            log::debug!("dragstart never reached the bubble phase");
            self.drag_start_pending = false;
        }
    }

    fn end_drag(&mut self, reason: &'static str) {
        if let Some(task) = self.pending_publish.take() {
            self.window.cancel_task(task);
        }
        self.manager.end_drag();
        let line = self.session.end(reason);
        self.debug_log_event(line);
    }

    fn set_current_drag_source(&mut self, node: W::Node) {
        self.clear_current_drag_source();
        self.current_drag_source = Some(CurrentDragSource::new(node));
        self.window.add_listener(Listener::SourceRemovalCheck);
    }

    /// Returns `true` if a drag source node was tracked.
    pub(super) fn clear_current_drag_source(&mut self) -> bool {
        if self.current_drag_source.take().is_some() {
            self.window.remove_listener(Listener::SourceRemovalCheck);
            true
        } else {
            false
        }
    }

    pub(super) fn remove_native_stuck_listener(&mut self) {
        if self.native_stuck_listener {
            self.window.remove_listener(Listener::NativeStuckCheck);
            self.native_stuck_listener = false;
        }
    }

    fn prevent_default<E: DragEvent>(&self, e: &mut E, event: &str) {
        if let Err(err) = e.prevent_default() {
            self.report_swallowed(&format!("{event} preventDefault not accessible"), &err);
        }
    }
}

fn has_transfer_types<E: DragEvent>(e: &mut E) -> bool {
    e.data_transfer()
        .types()
        .is_ok_and(|types| types.is_some())
}

fn target_is_draggable<E: DragEvent>(e: &E) -> bool {
    e.target()
        .is_ok_and(|node| node.has_draggable_attribute())
}
