// cell.rs - Cell coordinates and colours

use crate::error::ConfigError;

/// A flat cell colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from untyped channel values, rejecting anything outside 0..=255.
    pub fn try_from_channels(r: i32, g: i32, b: i32) -> Result<Self, ConfigError> {
        let channel = |value: i32| {
            u8::try_from(value).map_err(|_| ConfigError::ChannelOutOfRange { value })
        };
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// What a cell currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// Unset; drawn in the grid's background colour.
    #[default]
    Background,
    Rgb(Rgb),
}

impl CellColor {
    pub fn is_background(self) -> bool {
        matches!(self, Self::Background)
    }
}

impl From<Rgb> for CellColor {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

/// A (column, row) pair. Bounds are checked by whichever grid it is used against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub col: i32,
    pub row: i32,
}

impl CellCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}
