// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize direction tokens and the gesture's geometry algebra.
//!
//! A resize gesture is computed against a *baseline snapshot*: the
//! component's size and position captured at pointer-down, plus the pointer
//! origin. Every move event recomputes the full frame from that fixed
//! baseline and the current pointer, rather than accumulating incremental
//! deltas, so repeated rounding cannot drift the frame.
//!
//! Each handle is tagged with a direction token over the compass letters
//! `n`, `s`, `e`, `w`. The horizontal and vertical axes decompose
//! independently, so corner handles are just the composition of an edge rule
//! per axis:
//!
//! - `e` grows/shrinks the right edge; `x` never moves.
//! - `w` grows/shrinks the left edge; the right edge stays fixed by shifting
//!   `x` by however much the width actually changed. When the width clamp
//!   engages, `x` stops advancing with it.
//! - `s` and `n` mirror those rules vertically.
//!
//! The [`MIN_WIDTH`]/[`MIN_HEIGHT`] floors guarantee a placed field never
//! resizes to degenerate or inverted dimensions, so no later validation pass
//! is needed.

use kurbo::{Point, Vec2};

use cardstock_layout::{Dimensions, Position};

use crate::capture::CaptureGuard;

/// Minimum component width in pixels, enforced during interactive resize.
pub const MIN_WIDTH: f64 = 50.0;

/// Minimum component height in pixels, enforced during interactive resize.
pub const MIN_HEIGHT: f64 = 30.0;

bitflags::bitflags! {
    /// Which edges of a component a resize handle controls.
    ///
    /// Edge handles set one flag; corner handles set one horizontal and one
    /// vertical flag.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ResizeDirection: u8 {
        /// Top edge (`n`).
        const NORTH = 0b0001;
        /// Bottom edge (`s`).
        const SOUTH = 0b0010;
        /// Right edge (`e`).
        const EAST  = 0b0100;
        /// Left edge (`w`).
        const WEST  = 0b1000;
    }
}

impl ResizeDirection {
    /// Parses a handle's direction token, e.g. `"se"`, `"n"`, `"w"`.
    ///
    /// Returns `None` for an empty token or any character outside
    /// `{n,s,e,w}`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        let mut direction = Self::empty();
        for ch in token.chars() {
            direction |= match ch {
                'n' => Self::NORTH,
                's' => Self::SOUTH,
                'e' => Self::EAST,
                'w' => Self::WEST,
                _ => return None,
            };
        }
        Some(direction)
    }
}

/// Computes the frame a component takes on when the pointer has moved by
/// `delta` since the gesture began.
///
/// `base_position` and `base_size` are the baseline snapshot. Axes that the
/// direction does not mention pass through unchanged.
#[must_use]
pub fn resized_frame(
    direction: ResizeDirection,
    base_position: Position,
    base_size: Dimensions,
    delta: Vec2,
) -> (Position, Dimensions) {
    let mut x = base_position.x;
    let mut y = base_position.y;
    let mut width = base_size.width;
    let mut height = base_size.height;

    if direction.contains(ResizeDirection::EAST) {
        width = (base_size.width + delta.x).max(MIN_WIDTH);
    }
    if direction.contains(ResizeDirection::WEST) {
        width = (base_size.width - delta.x).max(MIN_WIDTH);
        // Keep the right edge fixed. When the width clamp engages, this stops
        // the left edge from advancing past the floor.
        x = base_position.x + (base_size.width - width);
    }
    if direction.contains(ResizeDirection::SOUTH) {
        height = (base_size.height + delta.y).max(MIN_HEIGHT);
    }
    if direction.contains(ResizeDirection::NORTH) {
        height = (base_size.height - delta.y).max(MIN_HEIGHT);
        y = base_position.y + (base_size.height - height);
    }

    (Position { x, y }, Dimensions { width, height })
}

/// Live state of one resize gesture.
///
/// One session exists at a time, owned by the editor while the gesture is in
/// flight. It holds the baseline snapshot and the pointer-capture guard;
/// dropping the session (pointer-up, editor close, or teardown mid-gesture)
/// releases capture exactly once.
#[derive(Debug)]
pub struct ResizeSession {
    component_id: String,
    direction: ResizeDirection,
    origin: Point,
    base_position: Position,
    base_size: Dimensions,
    _capture: CaptureGuard,
}

impl ResizeSession {
    pub(crate) fn new(
        component_id: String,
        direction: ResizeDirection,
        origin: Point,
        base_position: Position,
        base_size: Dimensions,
        capture: CaptureGuard,
    ) -> Self {
        Self {
            component_id,
            direction,
            origin,
            base_position,
            base_size,
            _capture: capture,
        }
    }

    /// Id of the component being resized.
    #[must_use]
    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    /// Direction token the gesture started from.
    #[must_use]
    pub fn direction(&self) -> ResizeDirection {
        self.direction
    }

    /// Frame for the current pointer position, computed from the baseline.
    #[must_use]
    pub fn frame_at(&self, pointer: Point) -> (Position, Dimensions) {
        resized_frame(
            self.direction,
            self.base_position,
            self.base_size,
            pointer - self.origin,
        )
    }
}
