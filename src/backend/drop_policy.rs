use super::options::DragSourceOptions;
use super::types::DropEffect;

/// The drop effect to show over a droppable target.
///
/// Native items use the configured native effect (copy by default); registered sources use their
/// own options, falling back to the defaults when the source is no longer connected.
pub(super) fn effective_drop_effect(
    dragging_native: bool,
    native_drop_effect: DropEffect,
    source_options: Option<DragSourceOptions>,
) -> DropEffect {
    if dragging_native {
        native_drop_effect
    } else {
        source_options.unwrap_or_default().drop_effect
    }
}

/// How to answer a bubble-phase `dragenter` while a session is active.
///
/// `Some(effect)`: cancel the host default and show `effect`. `None`: leave the event alone.
pub(super) fn drag_enter_response(can_drop: bool, effective: DropEffect) -> Option<DropEffect> {
    can_drop.then_some(effective)
}

/// How to answer a bubble-phase `dragover`.
///
/// `source_rect_changed` is only evaluated when nothing else decided, since it records that the
/// drag source moved.
pub(super) fn drag_over_response(
    session_active: bool,
    can_drop: bool,
    dragging_native: bool,
    effective: DropEffect,
    source_rect_changed: impl FnOnce() -> bool,
) -> Option<DropEffect> {
    if !session_active {
        // Unknown native gesture: still block the host's "navigate to the dropped thing".
        return Some(DropEffect::None);
    }
    if can_drop {
        Some(effective)
    } else if dragging_native {
        Some(DropEffect::None)
    } else if source_rect_changed() {
        // Anything but `none`, or the host animates the drag image back to a stale position.
        Some(DropEffect::Move)
    } else {
        None
    }
}
