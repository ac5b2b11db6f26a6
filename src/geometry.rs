//! Grid geometry primitives shared by drawing operations and request payloads

use serde::{Deserialize, Serialize};

/// A cell coordinate. Only non-negative values address a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The coordinate as unsigned indices, or `None` if either is negative.
    pub fn to_unsigned(self) -> Option<(u64, u64)> {
        let x = u64::try_from(self.x).ok()?;
        let y = u64::try_from(self.y).ok()?;
        Some((x, y))
    }
}

/// An axis-aligned region `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub origin: Point,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub const fn new(origin: Point, width: u32, height: u32) -> Self {
        Self { origin, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
