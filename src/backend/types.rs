use std::borrow::Cow;
use std::fmt;

/// Id of a drag source handed out by the external handler registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SourceId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Id of a drop target handed out by the external handler registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// The type tag of the item being dragged.
///
/// Registered sources declare their own tags; native drags use the reserved
/// tags from [`super::native::NativeType::item_type`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ItemType(pub Cow<'static, str>);

impl ItemType {
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ItemType {
    fn from(tag: &'static str) -> Self {
        Self::from_static(tag)
    }
}

impl From<String> for ItemType {
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The visual drop effect shown by the host while hovering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DropEffect {
    None,
    Copy,
    Link,
    #[default]
    Move,
}

impl DropEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Link => "link",
            Self::Move => "move",
        }
    }
}

/// Identity of an event-listening root (a window, a document, a shadow root...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RootId(pub u64);

/// Handle of a task scheduled for the next scheduling turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Handle of a callback scheduled for the next animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// The drag-related host events the backend listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    DragStart,
    DragEnd,
    DragEnter,
    DragLeave,
    DragOver,
    Drop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Capture,
    Bubble,
}

/// A listener the backend installs on the [`super::host::HostWindow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Listener {
    /// One of the top-level drag handlers.
    Top { event: DragEventKind, phase: Phase },

    /// Capture-phase `mousemove` used to notice that the drag source node left the document.
    SourceRemovalCheck,

    /// Capture-phase `mouseover` used to notice a native drag that ended without `dragend`.
    NativeStuckCheck,
}

/// Every top-level listener installed by `setup()`, in installation order.
pub(super) const TOP_LEVEL_LISTENERS: [Listener; 10] = [
    Listener::Top { event: DragEventKind::DragStart, phase: Phase::Bubble },
    Listener::Top { event: DragEventKind::DragStart, phase: Phase::Capture },
    Listener::Top { event: DragEventKind::DragEnd, phase: Phase::Capture },
    Listener::Top { event: DragEventKind::DragEnter, phase: Phase::Bubble },
    Listener::Top { event: DragEventKind::DragEnter, phase: Phase::Capture },
    Listener::Top { event: DragEventKind::DragLeave, phase: Phase::Capture },
    Listener::Top { event: DragEventKind::DragOver, phase: Phase::Bubble },
    Listener::Top { event: DragEventKind::DragOver, phase: Phase::Capture },
    Listener::Top { event: DragEventKind::Drop, phase: Phase::Bubble },
    Listener::Top { event: DragEventKind::Drop, phase: Phase::Capture },
];

/// Where the backend is in the lifecycle of the current gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragLifecycle {
    Idle,

    /// The capture-phase `dragstart` ran but the bubble-phase one has not been processed yet.
    DragPending,

    /// A registered source is being dragged (published or about to be).
    Dragging,

    /// A native item (file, URL, text) is being dragged.
    DraggingNative,
}
