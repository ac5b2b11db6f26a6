//! Sketch Canvas
//!
//! A document store for ASCII canvases: named, fixed-size grids of
//! single-character cells that clients draw on with two primitives.
//!
//! # Features
//!
//! - **Rectangles**: axis-aligned, with an optional outline and an optional
//!   fill that never overwrites the outline
//! - **Flood fill**: stack-based scanline fill of a 4-connected region
//! - **Lazy grids**: a canvas allocates its cells on first use and encodes
//!   without a `data` field until then
//! - **Stores**: in-memory and directory-backed document stores behind a
//!   common trait, plus an async facade for use from tasks
//!
//! # Example
//!
//! ```
//! use sketch_canvas::{Canvas, Pattern, Point, Rectangle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut canvas = Canvas::new("demo", 10, 10);
//! canvas.draw_rect(
//!     &Rectangle::new(Point::new(2, 3), 4, 5),
//!     Pattern::Char(b'#'),
//!     Pattern::Char(b'*'),
//! )?;
//! canvas.flood_fill(Point::new(0, 0), Pattern::Char(b'.'))?;
//!
//! let rows = canvas.split();
//! assert_eq!(rows[3], "..****....");
//! assert_eq!(rows[4], "..*##*....");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod canvas;
pub mod geometry;

// Drawing request payloads (wire forms of the two primitives)
pub mod requests;

// Document keys, storage, and the service that ties them to the canvas core
pub mod keygen;
pub mod service;
pub mod store;

// JSON-lines front end used by the `serve` command
pub mod serve;

// Async-friendly handle over a worker-owned service
pub mod async_api;

pub use async_api::CanvasHandle;
pub use canvas::{Canvas, Pattern, BACKGROUND};
pub use geometry::{Point, Rectangle};
pub use service::{CanvasService, DocumentPage};

/// Configuration for the document service
///
/// The defaults are conservative: listings return 10 keys per page and
/// canvases are limited to 1024×1024 cells.
///
/// # Examples
///
/// ```
/// let cfg = sketch_canvas::ServiceConfig::default();
/// assert_eq!(cfg.page_limit, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Keys per page when a listing does not ask for a size
    pub page_limit: usize,
    /// Widest canvas that may be created
    pub max_width: u32,
    /// Tallest canvas that may be created
    pub max_height: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_limit: 10,
            max_width: 1024,
            max_height: 1024,
        }
    }
}

impl ServiceConfig {
    /// Reject configurations that could never serve a request.
    pub fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            return Err(Error::ConfigError("page limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.page_limit, 10);
        assert_eq!(config.max_width, 1024);
        assert_eq!(config.max_height, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_limit_is_invalid() {
        let config = ServiceConfig {
            page_limit: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
