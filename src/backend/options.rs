use super::quirks::HostQuirks;
use super::types::DropEffect;

/// Options for [`super::Html5Backend`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackendOptions {
    /// Workarounds for the host the backend runs on.
    pub quirks: HostQuirks,

    /// Drop effect shown while a droppable target is hovered by a native item.
    pub native_drop_effect: DropEffect,

    /// Format of the placeholder data set on `dragstart`.
    ///
    /// Some hosts refuse to start a drag whose payload carries no data at all.
    pub required_data_format: String,

    /// If true, record lifecycle events in a small ring buffer (see
    /// [`super::Html5Backend::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep.
    pub debug_event_log_capacity: usize,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            quirks: HostQuirks::default(),
            native_drop_effect: DropEffect::Copy,
            required_data_format: "application/json".to_owned(),
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

/// Options passed to [`super::Html5Backend::connect_drag_source`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragSourceOptions {
    /// Drop effect shown while a droppable target is hovered.
    pub drop_effect: DropEffect,
}

/// Options passed to [`super::Html5Backend::connect_drag_preview`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragPreviewOptions {
    /// Horizontal grab point of the preview, as a fraction of its width.
    pub anchor_x: f32,

    /// Vertical grab point of the preview, as a fraction of its height.
    pub anchor_y: f32,

    /// Explicit horizontal grab offset in points; overrides `anchor_x`.
    pub offset_x: Option<f32>,

    /// Explicit vertical grab offset in points; overrides `anchor_y`.
    pub offset_y: Option<f32>,

    /// Publish the source synchronously on `dragstart`, so the host snapshots the
    /// *dragging* state of the source instead of the idle one.
    pub capture_dragging_state: bool,
}

impl Default for DragPreviewOptions {
    fn default() -> Self {
        Self {
            anchor_x: 0.5,
            anchor_y: 0.5,
            offset_x: None,
            offset_y: None,
            capture_dragging_state: false,
        }
    }
}
