// config.rs - Grid geometry, fixed once the grid is initialised

use egui::Color32;

use crate::error::{ConfigError, GridError};

/// Window half of the configuration, frozen by `init_window`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color32,
}

impl WindowConfig {
    pub fn new(width: u32, height: u32, background: Color32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroWindowDimension { width, height });
        }
        Ok(Self { width, height, background })
    }
}

/// Number of columns and rows in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub columns: u32,
    pub rows: u32,
}

impl GridDims {
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as u32) < self.columns && (row as u32) < self.rows
    }

    /// Row-major index of `(col, row)`. Never clamps.
    pub fn index(&self, col: i32, row: i32) -> Result<usize, GridError> {
        if !self.contains(col, row) {
            return Err(GridError::OutOfBounds {
                col,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(row as usize * self.columns as usize + col as usize)
    }
}

/// Complete, validated grid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    window: WindowConfig,
    cell_width: u32,
    cell_height: u32,
    cell_border: u32,
    dims: GridDims,
}

impl GridConfig {
    pub fn new(
        window: WindowConfig,
        cell_width: u32,
        cell_height: u32,
        cell_border: u32,
    ) -> Result<Self, ConfigError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(ConfigError::ZeroCellDimension { width: cell_width, height: cell_height });
        }
        // The interior must keep at least one pixel on each axis.
        if cell_border.saturating_mul(2) >= cell_width.min(cell_height) {
            return Err(ConfigError::BorderTooThick {
                border: cell_border,
                cell_width,
                cell_height,
            });
        }
        let dims = GridDims {
            columns: window.width / cell_width,
            rows: window.height / cell_height,
        };
        if dims.columns == 0 || dims.rows == 0 {
            return Err(ConfigError::EmptyGrid { columns: dims.columns, rows: dims.rows });
        }
        Ok(Self { window, cell_width, cell_height, cell_border, dims })
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn window_width(&self) -> u32 {
        self.window.width
    }

    pub fn window_height(&self) -> u32 {
        self.window.height
    }

    pub fn background(&self) -> Color32 {
        self.window.background
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    pub fn cell_border(&self) -> u32 {
        self.cell_border
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn columns(&self) -> u32 {
        self.dims.columns
    }

    pub fn rows(&self) -> u32 {
        self.dims.rows
    }
}
