use egui::{Pos2, Rect, Vec2, lerp};

use super::options::DragPreviewOptions;

/// Where to grab the drag preview, relative to its top-left corner.
///
/// The grab point follows the pointer's position inside the source node: at anchor 0 it keeps
/// the same distance to the leading edge, at anchor 1 to the trailing edge, and at 0.5 it scales
/// proportionally with the preview size. Explicit offsets in `options` win.
pub(super) fn drag_preview_offset(
    source_rect: Option<Rect>,
    preview_rect: Option<Rect>,
    client_offset: Option<Pos2>,
    options: &DragPreviewOptions,
) -> Vec2 {
    let Some(preview_rect) = preview_rect else {
        return Vec2::new(options.offset_x.unwrap_or(0.0), options.offset_y.unwrap_or(0.0));
    };
    let source_rect = source_rect.unwrap_or(preview_rect);
    let pointer = client_offset.unwrap_or_else(|| source_rect.center());
    let from_source: Vec2 = pointer - source_rect.min;

    let x = options.offset_x.unwrap_or_else(|| {
        anchored(
            from_source.x,
            source_rect.width(),
            preview_rect.width(),
            options.anchor_x,
        )
    });
    let y = options.offset_y.unwrap_or_else(|| {
        anchored(
            from_source.y,
            source_rect.height(),
            preview_rect.height(),
            options.anchor_y,
        )
    });
    Vec2::new(x, y)
}

fn anchored(from_source: f32, source_size: f32, preview_size: f32, anchor: f32) -> f32 {
    let leading = from_source;
    let proportional = if source_size > 0.0 {
        from_source / source_size * preview_size
    } else {
        leading
    };
    let trailing = from_source + preview_size - source_size;

    let anchor = anchor.clamp(0.0, 1.0);
    if anchor <= 0.5 {
        lerp(leading..=proportional, anchor * 2.0)
    } else {
        lerp(proportional..=trailing, (anchor - 0.5) * 2.0)
    }
}

/// Whether a tracked offset moved; a node that lost its layout counts as moved.
pub(super) fn offset_changed(captured: Option<Pos2>, current: Option<Pos2>) -> bool {
    captured != current
}
