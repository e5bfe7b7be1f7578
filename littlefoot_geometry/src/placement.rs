// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical placement, size constraints and the popover frame.

use kurbo::{Rect, Size, Vec2};


/// Which side of its button a popover opens on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Above the button.
    Top,
    /// Below the button. This is also the fallback for degenerate measurements.
    #[default]
    Bottom,
}

impl Placement {
    /// The attribute value used for `data-footnote-position`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Space around a button inside the viewport, in client coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Room {
    /// Distance from the top of the viewport to the vertical centre of the button.
    pub above: f64,
    /// Distance from the vertical centre of the button to the bottom of the viewport.
    pub below: f64,
    /// Horizontal centre of the button as a fraction of the viewport width, in `[0, 1]`.
    pub left_relative: f64,
}

impl Room {
    /// Room on the given side of the button.
    pub const fn on(&self, placement: Placement) -> f64 {
        match placement {
            Placement::Top => self.above,
            Placement::Bottom => self.below,
        }
    }
}

fn is_usable(rect: Rect) -> bool {
    rect.x0.is_finite()
        && rect.y0.is_finite()
        && rect.x1.is_finite()
        && rect.y1.is_finite()
        && rect.width() > 0.0
        && rect.height() > 0.0
}

/// Measure the room around `button` (client coordinates) inside a viewport of size `viewport`.
///
/// Returns `None` when the button or the viewport is degenerate (zero-sized or non-finite).
/// The button may lie partly or fully outside the viewport; the room on one side is then negative
/// and the other side exceeds the viewport height.
pub fn available_room(button: Rect, viewport: Size) -> Option<Room> {
    if !is_usable(button) || !viewport.is_finite() || viewport.width <= 0.0 {
        return None;
    }
    if viewport.height <= 0.0 {
        return None;
    }
    let centre = button.center();
    Some(Room {
        above: centre.y,
        below: viewport.height - centre.y,
        left_relative: (centre.x / viewport.width).clamp(0.0, 1.0),
    })
}

/// Height a popover needs to open on one side: its natural height limited by `max_height`,
/// plus a margin on each side.
pub fn decision_height(natural_height: f64, max_height: f64, margin: f64) -> f64 {
    natural_height.min(max_height).max(0.0) + 2.0 * margin.max(0.0)
}

/// Decide which side of the button the popover opens on.
///
/// The popover opens below when the room below fits `popover_height`, or when there is at least
/// as much room below as above. Otherwise it opens above. When neither side fits, the larger side
/// wins and an exact tie goes to [`Placement::Bottom`].
///
/// `popover_height` should not depend on the room itself (see [`decision_height`]); the decision
/// is then a pure function of the scroll position and repeated evaluation cannot oscillate.
pub fn resolve_placement(room: Option<Room>, popover_height: f64) -> Placement {
    let Some(room) = room else {
        return Placement::Bottom;
    };
    if room.below >= popover_height || room.below >= room.above {
        Placement::Bottom
    } else {
        Placement::Top
    }
}

/// Height allotted to the popover content on the chosen side, never more than `max_height` and
/// never negative.
pub fn available_height(
    room: Option<Room>,
    placement: Placement,
    max_height: f64,
    margin: f64,
    edge_gap: f64,
) -> f64 {
    let max_height = max_height.max(0.0);
    match room {
        Some(room) => (room.on(placement) - margin - edge_gap).clamp(0.0, max_height),
        None => max_height,
    }
}

/// Widest a popover may be: the document's content width.
pub fn popover_max_width(client_width: f64) -> f64 {
    if client_width.is_finite() {
        client_width.max(0.0)
    } else {
        0.0
    }
}

/// Width of the wrapper around the popover content: the content's natural width, clamped to
/// `max_width`.
pub fn wrapper_max_width(natural_width: f64, max_width: f64) -> f64 {
    if natural_width.is_finite() {
        natural_width.clamp(0.0, max_width.max(0.0))
    } else {
        max_width.max(0.0)
    }
}

/// Frame of a popover of `size` in document space, next to `button` (document space).
///
/// Horizontally the popover is shifted so that the point at `left_relative` of its width sits
/// under the button centre, then clamped into `[0, client_width]`.
pub fn popover_frame(
    button: Rect,
    placement: Placement,
    size: Size,
    left_relative: f64,
    margin: f64,
    client_width: f64,
) -> Rect {
    let centre_x = button.center().x;
    let max_x0 = (client_width - size.width).max(0.0);
    let x0 = (centre_x - left_relative * size.width).clamp(0.0, max_x0);
    let y0 = match placement {
        Placement::Bottom => button.y1 + margin,
        Placement::Top => button.y0 - margin - size.height,
    };
    Rect::from_origin_size((x0, y0), size)
}

/// Everything [`resolve`] needs to lay out one popover.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutInput {
    /// Button bounds in document space.
    pub button: Rect,
    /// Current viewport scroll offset.
    pub scroll_offset: Vec2,
    /// Viewport size.
    pub viewport: Size,
    /// Content width of the document.
    pub client_width: f64,
    /// Natural size of the popover content at `client_width`.
    pub natural: Size,
    /// Largest content height the popover may take.
    pub max_height: f64,
    /// Gap between the button and the popover.
    pub margin: f64,
    /// Gap kept between the popover and the viewport edge.
    pub edge_gap: f64,
}

/// Result of [`resolve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopoverLayout {
    /// Side of the button the popover opens on.
    pub placement: Placement,
    /// Maximum popover width.
    pub max_width: f64,
    /// Wrapper width, fitted to the content.
    pub wrapper_width: f64,
    /// Height allotted to the content.
    pub content_height: f64,
    /// Horizontal anchor of the tooltip, as a fraction of the popover width.
    pub left_relative: f64,
    /// Popover frame in document space.
    pub frame: Rect,
}

/// Lay out one popover.
pub fn resolve(input: &LayoutInput) -> PopoverLayout {
    let client_button = input.button - input.scroll_offset;
    let room = available_room(client_button, input.viewport);
    let placement = resolve_placement(
        room,
        decision_height(input.natural.height, input.max_height, input.margin),
    );
    let max_width = popover_max_width(input.client_width);
    let wrapper_width = wrapper_max_width(input.natural.width, max_width);
    let allotted = available_height(
        room,
        placement,
        input.max_height,
        input.margin,
        input.edge_gap,
    );
    let content_height = input.natural.height.max(0.0).min(allotted);
    let left_relative = room.map_or(0.5, |r| r.left_relative);
    let frame = popover_frame(
        input.button,
        placement,
        Size::new(wrapper_width, content_height),
        left_relative,
        input.margin,
        max_width,
    );
    PopoverLayout {
        placement,
        max_width,
        wrapper_width,
        content_height,
        left_relative,
        frame,
    }
}
