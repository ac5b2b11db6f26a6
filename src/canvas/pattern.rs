//! Single-character drawing patterns

use crate::{Error, Result};
use std::str::FromStr;

/// What to draw into a layer of a shape: nothing, or one cell byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    #[default]
    None,
    Char(u8),
}

impl Pattern {
    /// Parse the wire form: `""` is no pattern, one printable ASCII
    /// character is a pattern, anything else is `BadPattern`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [] => Ok(Pattern::None),
            [b] if is_cell_byte(*b) => Ok(Pattern::Char(*b)),
            _ => Err(Error::BadPattern),
        }
    }

    pub fn byte(self) -> Option<u8> {
        match self {
            Pattern::None => None,
            Pattern::Char(b) => Some(b),
        }
    }

    /// The byte to draw, or `BadPattern` for a `Char` that no cell may hold.
    pub fn checked_byte(self) -> Result<Option<u8>> {
        match self {
            Pattern::Char(b) if !is_cell_byte(b) => Err(Error::BadPattern),
            p => Ok(p.byte()),
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

impl TryFrom<char> for Pattern {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        u8::try_from(c)
            .ok()
            .filter(|b| is_cell_byte(*b))
            .map(Pattern::Char)
            .ok_or(Error::BadPattern)
    }
}

/// Bytes a cell may hold: printable ASCII, space included.
pub(crate) fn is_cell_byte(b: u8) -> bool {
    b == b' ' || b.is_ascii_graphic()
}
