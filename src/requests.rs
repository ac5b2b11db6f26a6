//! Drawing request payloads and their translation into canvas calls

use crate::canvas::{Canvas, Pattern};
use crate::geometry::{Point, Rectangle};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Payload for creating a document. Any `data` in the submitted record is
/// ignored: new documents always start blank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateCanvas {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl CreateCanvas {
    pub fn into_canvas(self) -> Canvas {
        Canvas::new(self.name, self.width, self.height)
    }
}

/// `{ rect: {origin: {x, y}, width, height}, fill: "", outline: "" }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawRect {
    pub rect: Rectangle,
    #[serde(default)]
    pub fill: String,
    #[serde(default)]
    pub outline: String,
}

impl DrawRect {
    /// Bounds are checked before the patterns are parsed, so a request that
    /// is wrong in both ways reports the bounds error.
    pub fn apply(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.check_rect(&self.rect)?;
        let fill = Pattern::parse(&self.fill)?;
        let outline = Pattern::parse(&self.outline)?;
        canvas.draw_rect(&self.rect, fill, outline)
    }
}

/// `{ origin: {x, y}, fill: "c" }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FloodFill {
    pub origin: Point,
    #[serde(default)]
    pub fill: String,
}

impl FloodFill {
    pub fn apply(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.cell(self.origin).ok_or(Error::PointOutOfBound)?;
        let fill = Pattern::parse(&self.fill)?;
        canvas.flood_fill(self.origin, fill)
    }
}
