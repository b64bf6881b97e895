//! Pointer-to-model coordinate mapping.
//!
//! Two spaces are involved. Window space is where pointer events and the
//! floating detail panel live. Overlay space is relative to the top-left
//! corner of the editor container and holds hitbox origins. Nothing here
//! clamps: targets may land anywhere, including outside the container.
//! Arithmetic saturates at the `i32` bounds, since typed positions may be
//! as large as `i32::MAX`.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// An integer pixel position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds a fractional pointer position to the nearest pixel.
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}

/// Vector from a drag target's top-left corner to the pointer, captured
/// once when a drag session starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x.saturating_sub(rhs.x),
            dy: self.y.saturating_sub(rhs.y),
        }
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

impl Sub<Offset> for Point {
    type Output = Point;

    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x.saturating_sub(rhs.dx), self.y.saturating_sub(rhs.dy))
    }
}

/// Placement of the overlay container inside the window, as measured when
/// a hitbox drag begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContainerFrame {
    pub origin: Point,
}

impl ContainerFrame {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }

    /// Window position -> overlay position.
    pub fn to_overlay(&self, window: Point) -> Point {
        window - (self.origin - Point::ZERO)
    }

    /// Overlay position -> window position.
    pub fn to_window(&self, overlay: Point) -> Point {
        overlay + (self.origin - Point::ZERO)
    }
}

/// Offset between the pointer and a target's top-left, both in the same space.
pub fn capture_offset(pointer: Point, top_left: Point) -> Offset {
    pointer - top_left
}

/// New top-left for the detail panel, in window space.
pub fn panel_target(pointer: Point, offset: Offset) -> Point {
    pointer - offset
}

/// New hitbox origin in overlay space:
/// `(pointer - container origin) - offset`.
pub fn hitbox_target(pointer: Point, frame: ContainerFrame, offset: Offset) -> Point {
    frame.to_overlay(pointer) - offset
}
