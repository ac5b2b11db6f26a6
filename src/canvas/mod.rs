//! ASCII canvases: a fixed-size grid of single-byte cells with rectangle and
//! flood-fill drawing.
//!
//! The cell buffer is materialized lazily. A canvas that has never been drawn
//! on holds no buffer at all and is logically filled with [`BACKGROUND`]; its
//! encoded record carries no `data` field.

mod flood;
pub mod pattern;

pub use pattern::Pattern;

use crate::geometry::{Point, Rectangle};
use crate::{Error, Result};
use pattern::is_cell_byte;
use serde::{Deserialize, Serialize, Serializer};

/// Byte of a cell that was never drawn.
pub const BACKGROUND: u8 = b'-';

/// Largest grid (`width * height`) a canvas may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// A named grid of `width × height` cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CanvasRecord")]
pub struct Canvas {
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "cells_absent", serialize_with = "serialize_cells")]
    data: Option<Vec<u8>>,
}

/// Wire form of a canvas before its invariants are checked.
#[derive(Debug, Deserialize)]
struct CanvasRecord {
    #[serde(default)]
    name: Option<String>,
    width: u32,
    height: u32,
    #[serde(default)]
    data: Option<String>,
}

impl TryFrom<CanvasRecord> for Canvas {
    type Error = Error;

    fn try_from(record: CanvasRecord) -> Result<Self> {
        Canvas::with_cells(
            record.name.unwrap_or_default(),
            record.width,
            record.height,
            record.data.unwrap_or_default().into_bytes(),
        )
    }
}

fn cells_absent(data: &Option<Vec<u8>>) -> bool {
    data.as_ref().map_or(true, |cells| cells.is_empty())
}

fn serialize_cells<S: Serializer>(
    data: &Option<Vec<u8>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::Error as _;

    match data.as_deref().map(std::str::from_utf8) {
        Some(Ok(text)) => serializer.serialize_str(text),
        Some(Err(e)) => Err(S::Error::custom(e)),
        None => serializer.serialize_none(),
    }
}

impl Canvas {
    /// A fresh canvas whose buffer will be allocated on first use.
    ///
    /// Drawing on a canvas larger than [`MAX_CELLS`] fails with
    /// `ObjectTooLarge`; callers taking sizes from outside should bound them
    /// first.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            data: None,
        }
    }

    /// A canvas over existing cells. An empty buffer gives an uninitialized
    /// canvas; otherwise the buffer must hold exactly `width * height`
    /// printable ASCII bytes.
    pub fn with_cells(
        name: impl Into<String>,
        width: u32,
        height: u32,
        cells: Vec<u8>,
    ) -> Result<Self> {
        let mut canvas = Self::new(name, width, height);
        let expected = canvas.checked_cell_count().ok_or_else(|| {
            Error::DecodingFailure(format!(
                "a {}x{} canvas exceeds the {} cell limit",
                width, height, MAX_CELLS
            ))
        })?;
        if cells.is_empty() {
            return Ok(canvas);
        }

        if cells.len() != expected {
            return Err(Error::DecodingFailure(format!(
                "expected {} cells for a {}x{} canvas, got {}",
                expected,
                width,
                height,
                cells.len()
            )));
        }
        if let Some(pos) = cells.iter().position(|b| !is_cell_byte(*b)) {
            return Err(Error::DecodingFailure(format!(
                "cell {} holds unprintable byte 0x{:02x}",
                pos, cells[pos]
            )));
        }

        canvas.data = Some(cells);
        Ok(canvas)
    }

    /// Decode a canvas from its JSON record.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let record: CanvasRecord =
            serde_json::from_slice(bytes).map_err(|e| Error::DecodingFailure(e.to_string()))?;
        Canvas::try_from(record)
    }

    /// Encode the canvas as a JSON record: `name` (if set), `width`,
    /// `height`, and `data` (only once the grid has been materialized).
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::EncodingFailure(e.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_initialized(&self) -> bool {
        self.data.is_some()
    }

    /// The raw row-major buffer, if it was ever materialized.
    pub fn cells(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// The byte at `p`, or `None` outside the grid.
    pub fn cell(&self, p: Point) -> Option<u8> {
        let (x, y) = self.check_cell(p).ok()?;
        match &self.data {
            Some(cells) => cells.get(y * self.width as usize + x).copied(),
            None => Some(BACKGROUND),
        }
    }

    /// One string per row, materializing the background first.
    pub fn split(&mut self) -> Vec<String> {
        let width = self.width as usize;
        let height = self.height as usize;
        let cells = self.cells_mut();
        if width == 0 {
            return vec![String::new(); height];
        }

        cells
            .chunks(width)
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect()
    }

    /// The grid as newline-separated rows.
    pub fn render(&mut self) -> String {
        self.split().join("\n")
    }

    /// Bounds checks shared by [`Canvas::draw_rect`] and request handling.
    /// Returns the origin as indices.
    pub fn check_rect(&self, rect: &Rectangle) -> Result<(usize, usize)> {
        let (x, y) = rect.origin.to_unsigned().ok_or(Error::PointOutOfBound)?;
        let (width, height) = (u64::from(self.width), u64::from(self.height));

        if x > width || y > height {
            return Err(Error::PointOutOfBound);
        }
        if x + u64::from(rect.width) > width || y + u64::from(rect.height) > height {
            return Err(Error::ObjectTooLarge);
        }

        Ok((x as usize, y as usize))
    }

    /// Draw `rect` with an optional outline and an optional fill. The fill
    /// never overwrites the outline: with both set it covers the interior
    /// only.
    pub fn draw_rect(&mut self, rect: &Rectangle, fill: Pattern, outline: Pattern) -> Result<()> {
        let (x0, y0) = self.check_rect(rect)?;
        let fill = fill.checked_byte()?;
        let outline = outline.checked_byte()?;
        if rect.is_empty() {
            return Ok(());
        }
        self.checked_cell_count().ok_or(Error::ObjectTooLarge)?;

        let stride = self.width as usize;
        let (w, h) = (rect.width as usize, rect.height as usize);
        let cells = self.cells_mut();

        let (mut fill_x, mut fill_y, mut fill_w, mut fill_h) = (x0, y0, w, h);

        if let Some(c) = outline {
            let top = y0 * stride + x0;
            let bottom = (y0 + h - 1) * stride + x0;
            cells[top..top + w].fill(c);
            cells[bottom..bottom + w].fill(c);

            // Corners already belong to the horizontal edges.
            for y in y0 + 1..y0 + h - 1 {
                let row = y * stride;
                cells[row + x0] = c;
                cells[row + x0 + w - 1] = c;
            }

            fill_x += 1;
            fill_y += 1;
            fill_w = fill_w.saturating_sub(2);
            fill_h = fill_h.saturating_sub(2);
        }

        if let Some(c) = fill {
            for y in fill_y..fill_y + fill_h {
                let start = y * stride + fill_x;
                cells[start..start + fill_w].fill(c);
            }
        }

        Ok(())
    }

    /// Recolor the 4-connected region around `origin` with `fill`. On a
    /// canvas that was never drawn on the whole grid is one region.
    ///
    /// `origin` must address a cell: `x == width` or `y == height` is
    /// `PointOutOfBound`, even on a canvas that was never drawn on.
    pub fn flood_fill(&mut self, origin: Point, fill: Pattern) -> Result<()> {
        let (x, y) = self.check_cell(origin)?;
        let fill = fill.checked_byte()?.ok_or(Error::BadPattern)?;
        self.checked_cell_count().ok_or(Error::ObjectTooLarge)?;

        if !self.is_initialized() {
            self.init_background(fill);
            return Ok(());
        }

        let (width, height) = (self.width as usize, self.height as usize);
        flood::scanline_fill(self.cells_mut(), width, height, x, y, fill);
        Ok(())
    }

    fn check_cell(&self, p: Point) -> Result<(usize, usize)> {
        match p.to_unsigned() {
            Some((x, y)) if x < u64::from(self.width) && y < u64::from(self.height) => {
                Ok((x as usize, y as usize))
            }
            _ => Err(Error::PointOutOfBound),
        }
    }

    /// `width * height`, or `None` past [`MAX_CELLS`].
    fn checked_cell_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .filter(|n| *n <= MAX_CELLS)
    }

    fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn init_background(&mut self, byte: u8) {
        self.data = Some(vec![byte; self.cell_count()]);
    }

    fn cells_mut(&mut self) -> &mut [u8] {
        if self.data.is_none() {
            self.init_background(BACKGROUND);
        }
        self.data.as_deref_mut().unwrap_or_default()
    }
}
