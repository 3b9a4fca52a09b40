//! Recording fakes of the host and the coordination layer, shared by the scenario tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ahash::{HashMap, HashSet};
use egui::{Pos2, Rect, Vec2};

use super::collaborators::{
    BeginDragOptions, DragDropActions, DragDropMonitor, HandlerRegistry, HoverOptions,
};
use super::host::{DataTransfer, DiagnosticSink, DragEvent, HostError, HostNode, HostWindow};
use super::native::{NativeDragSource, NativeFile};
use super::types::{DropEffect, FrameId, ItemType, Listener, RootId, SourceId, TargetId, TaskId};

pub(super) fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

// ----------------------------------------------------------------------------
// Nodes

#[derive(Debug)]
struct NodeState {
    attached: Cell<bool>,
    rect: Cell<Option<Rect>>,
    draggable: Cell<bool>,
}

#[derive(Clone, Debug)]
pub(super) struct MockNode {
    id: u32,
    state: Rc<NodeState>,
}

impl MockNode {
    pub(super) fn new(id: u32) -> Self {
        let origin = Pos2::new(id as f32 * 10.0, id as f32 * 10.0);
        Self {
            id,
            state: Rc::new(NodeState {
                attached: Cell::new(true),
                rect: Cell::new(Some(Rect::from_min_size(origin, Vec2::new(40.0, 20.0)))),
                draggable: Cell::new(false),
            }),
        }
    }

    pub(super) fn detach(&self) {
        self.state.attached.set(false);
    }

    pub(super) fn move_to(&self, min: Pos2) {
        let size = self.state.rect.get().map_or(Vec2::new(40.0, 20.0), |r| r.size());
        self.state.rect.set(Some(Rect::from_min_size(min, size)));
    }

    pub(super) fn is_draggable(&self) -> bool {
        self.state.draggable.get()
    }
}

impl PartialEq for MockNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MockNode {}

impl std::hash::Hash for MockNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl HostNode for MockNode {
    fn client_rect(&self) -> Option<Rect> {
        self.state.rect.get()
    }

    fn is_attached(&self) -> bool {
        self.state.attached.get()
    }

    fn has_draggable_attribute(&self) -> bool {
        self.state.draggable.get()
    }

    fn set_draggable(&self, draggable: bool) {
        self.state.draggable.set(draggable);
    }
}

// ----------------------------------------------------------------------------
// Events

#[derive(Debug, Default)]
pub(super) struct MockTransfer {
    pub(super) types: Option<Vec<String>>,
    pub(super) unreadable: bool,
    pub(super) data: HashMap<String, String>,
    pub(super) files: Vec<NativeFile>,
    pub(super) drag_image: Option<(MockNode, Vec2)>,
    pub(super) drop_effect: Option<DropEffect>,
}

impl DataTransfer<MockNode> for MockTransfer {
    fn types(&self) -> Result<Option<Vec<String>>, HostError> {
        if self.unreadable {
            return Err(HostError::UnreadableTransfer);
        }
        Ok(self.types.clone())
    }

    fn get_data(&self, format: &str) -> Result<String, HostError> {
        if self.unreadable {
            return Err(HostError::UnreadableTransfer);
        }
        Ok(self.data.get(format).cloned().unwrap_or_default())
    }

    fn files(&self) -> Vec<NativeFile> {
        self.files.clone()
    }

    fn set_data(&mut self, format: &str, data: &str) -> Result<(), HostError> {
        self.data.insert(format.to_owned(), data.to_owned());
        Ok(())
    }

    fn supports_drag_image(&self) -> bool {
        true
    }

    fn set_drag_image(&mut self, image: &MockNode, offset: Vec2) {
        self.drag_image = Some((image.clone(), offset));
    }

    fn set_drop_effect(&mut self, effect: DropEffect) {
        self.drop_effect = Some(effect);
    }
}

#[derive(Debug)]
pub(super) struct MockEvent {
    pub(super) target: MockNode,
    pub(super) target_denied: bool,
    pub(super) prevent_default_denied: bool,
    pub(super) default_prevented: bool,
    pub(super) client_offset: Option<Pos2>,
    pub(super) transfer: MockTransfer,
}

impl MockEvent {
    pub(super) fn on(target: &MockNode) -> Self {
        Self {
            target: target.clone(),
            target_denied: false,
            prevent_default_denied: false,
            default_prevented: false,
            client_offset: Some(Pos2::new(15.0, 15.0)),
            transfer: MockTransfer {
                types: Some(Vec::new()),
                ..Default::default()
            },
        }
    }

    pub(super) fn with_types(mut self, types: &[&str]) -> Self {
        self.transfer.types = Some(types.iter().map(|t| (*t).to_owned()).collect());
        self
    }

    pub(super) fn with_data(mut self, format: &str, data: &str) -> Self {
        self.transfer.data.insert(format.to_owned(), data.to_owned());
        self
    }
}

impl DragEvent for MockEvent {
    type Node = MockNode;

    fn target(&self) -> Result<MockNode, HostError> {
        if self.target_denied {
            return Err(HostError::Inaccessible { property: "target" });
        }
        Ok(self.target.clone())
    }

    fn client_offset(&self) -> Option<Pos2> {
        self.client_offset
    }

    fn prevent_default(&mut self) -> Result<(), HostError> {
        if self.prevent_default_denied {
            return Err(HostError::Inaccessible {
                property: "preventDefault",
            });
        }
        self.default_prevented = true;
        Ok(())
    }

    fn data_transfer(&mut self) -> &mut dyn DataTransfer<MockNode> {
        &mut self.transfer
    }
}

// ----------------------------------------------------------------------------
// Window

#[derive(Debug)]
pub(super) struct MockWindow {
    root: RootId,
    pub(super) listeners: Vec<Listener>,
    next_handle: u64,
    pub(super) pending_tasks: Vec<TaskId>,
    pub(super) pending_frames: Vec<FrameId>,
}

impl MockWindow {
    pub(super) fn new(root: u64) -> Self {
        Self {
            root: RootId(root),
            listeners: Vec::new(),
            next_handle: 1,
            pending_tasks: Vec::new(),
            pending_frames: Vec::new(),
        }
    }

    pub(super) fn has_listener(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    fn next_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl HostWindow for MockWindow {
    type Node = MockNode;

    fn root_id(&self) -> RootId {
        self.root
    }

    fn add_listener(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn remove_listener(&mut self, listener: Listener) {
        if let Some(index) = self.listeners.iter().position(|&l| l == listener) {
            self.listeners.remove(index);
        }
    }

    fn schedule_task(&mut self) -> TaskId {
        let task = TaskId(self.next_handle());
        self.pending_tasks.push(task);
        task
    }

    fn cancel_task(&mut self, task: TaskId) {
        self.pending_tasks.retain(|&t| t != task);
    }

    fn request_animation_frame(&mut self) -> FrameId {
        let frame = FrameId(self.next_handle());
        self.pending_frames.push(frame);
        frame
    }

    fn cancel_animation_frame(&mut self, frame: FrameId) {
        self.pending_frames.retain(|&f| f != frame);
    }
}

// ----------------------------------------------------------------------------
// Manager

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Call {
    BeginDrag(Vec<SourceId>),
    PublishDragSource,
    Hover(Vec<TargetId>),
    Drop,
    EndDrag,
    AddSource(ItemType),
    RemoveSource(SourceId),
}

/// A minimal dispatcher + monitor + registry: the first source id that can drag wins.
#[derive(Debug, Default)]
pub(super) struct MockManager {
    pub(super) calls: Vec<Call>,
    sources: HashMap<SourceId, ItemType>,
    refusing: HashSet<SourceId>,
    droppable: HashSet<TargetId>,
    pub(super) native_sources: HashMap<SourceId, Rc<NativeDragSource>>,
    next_native: u64,
    dragging: Option<(SourceId, ItemType)>,
    pub(super) last_begin_options: Option<BeginDragOptions>,

    /// Whether every registered native item had its contents read when `drop` was signaled.
    pub(super) native_ready_at_drop: Option<bool>,
}

impl MockManager {
    pub(super) fn with_source(mut self, source: SourceId, item_type: &'static str) -> Self {
        self.sources.insert(source, ItemType::from(item_type));
        self
    }

    pub(super) fn refusing(mut self, source: SourceId) -> Self {
        self.refusing.insert(source);
        self
    }

    pub(super) fn with_droppable(mut self, target: TargetId) -> Self {
        self.droppable.insert(target);
        self
    }

    pub(super) fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub(super) fn position(&self, call: &Call) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }
}

impl DragDropActions for MockManager {
    fn begin_drag(&mut self, source_ids: &[SourceId], options: BeginDragOptions) {
        self.calls.push(Call::BeginDrag(source_ids.to_vec()));
        self.last_begin_options = Some(options);
        self.dragging = source_ids
            .iter()
            .filter(|&&id| !self.refusing.contains(&id))
            .find_map(|&id| self.sources.get(&id).map(|item_type| (id, item_type.clone())));
    }

    fn publish_drag_source(&mut self) {
        self.calls.push(Call::PublishDragSource);
    }

    fn hover(&mut self, target_ids: &[TargetId], _options: HoverOptions) {
        self.calls.push(Call::Hover(target_ids.to_vec()));
    }

    fn drop(&mut self) {
        self.calls.push(Call::Drop);
        self.native_ready_at_drop = Some(
            self.native_sources
                .values()
                .all(|source| source.item().is_ready()),
        );
    }

    fn end_drag(&mut self) {
        self.calls.push(Call::EndDrag);
        self.dragging = None;
    }
}

impl DragDropMonitor for MockManager {
    fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    fn item_type(&self) -> Option<ItemType> {
        self.dragging.as_ref().map(|(_, item_type)| item_type.clone())
    }

    fn source_id(&self) -> Option<SourceId> {
        self.dragging.as_ref().map(|(source, _)| *source)
    }

    fn can_drop_on_target(&self, target: TargetId) -> bool {
        self.droppable.contains(&target)
    }
}

impl HandlerRegistry for MockManager {
    fn add_source(&mut self, item_type: ItemType, source: Rc<NativeDragSource>) -> SourceId {
        self.calls.push(Call::AddSource(item_type.clone()));
        self.next_native += 1;
        let handle = SourceId(1_000 + self.next_native);
        self.sources.insert(handle, item_type);
        self.native_sources.insert(handle, source);
        handle
    }

    fn remove_source(&mut self, source: SourceId) {
        self.calls.push(Call::RemoveSource(source));
        self.sources.remove(&source);
        self.native_sources.remove(&source);
    }
}

// ----------------------------------------------------------------------------
// Diagnostics

#[derive(Clone, Debug, Default)]
pub(super) struct RecordingSink {
    pub(super) warnings: Rc<RefCell<Vec<String>>>,
}

impl DiagnosticSink for RecordingSink {
    fn record_warning(&self, message: &str, item_type: Option<&str>) {
        self.warnings
            .borrow_mut()
            .push(format!("{message} ({})", item_type.unwrap_or("none")));
    }
}
