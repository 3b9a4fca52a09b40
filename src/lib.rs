//! A drag-and-drop backend for hosts with HTML5-style drag events.
//!
//! [`Html5Backend`] turns the host's `dragstart`/`dragenter`/`dragover`/`dragleave`/`drop`/`dragend`
//! stream into begin/hover/drop/end calls on a toolkit-agnostic [`DragDropManager`]. It also
//! recognizes native items (files, URLs, text) dragged in from outside the document.
//!
//! The host is abstracted by the traits in [`backend`]: [`HostWindow`] installs listeners and
//! schedules callbacks, [`DragEvent`] and [`DataTransfer`] expose one event, and [`HostNode`]
//! is a node of the document.

#![forbid(unsafe_code)]

pub mod backend;

pub use backend::{
    BackendError, BackendOptions, Connection, DataTransfer, DragDropActions, DragDropManager,
    DragDropMonitor, DragEvent, DragLifecycle, DragPreviewOptions, DragSourceOptions, DropEffect,
    EnterLeaveCounter, HandlerRegistry, HostKind, HostNode, HostQuirks, HostWindow, Html5Backend,
    ItemType, NativeDragSource, NativeType, SourceId, TargetId,
};
