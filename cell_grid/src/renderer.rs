// renderer.rs - Grid renderer: staged setup, cell mutation, drawing

use std::fmt;

use egui::Color32;

use crate::cell::{CellColor, Rgb};
use crate::config::{GridConfig, GridDims, WindowConfig};
use crate::dirty::CellTarget;
use crate::error::GridError;
use crate::geometry::{GeometryBuffer, encode_color};
use crate::store::CellStore;
use crate::surface::RenderSurface;

/// Setup progress. Each phase fixes what the next one sizes itself from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Uninitialized,
    WindowReady,
    GridReady,
    Renderable,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Uninitialized => "uninitialized",
            Phase::WindowReady => "window-ready",
            Phase::GridReady => "grid-ready",
            Phase::Renderable => "renderable",
        };
        f.write_str(name)
    }
}

enum State {
    Uninitialized,
    WindowReady(WindowConfig),
    GridReady { config: GridConfig, store: CellStore },
    Renderable { config: GridConfig, store: CellStore, geometry: GeometryBuffer },
}

impl State {
    fn phase(&self) -> Phase {
        match self {
            State::Uninitialized => Phase::Uninitialized,
            State::WindowReady(_) => Phase::WindowReady,
            State::GridReady { .. } => Phase::GridReady,
            State::Renderable { .. } => Phase::Renderable,
        }
    }
}

/// Settings written before setup and frozen by it.
#[derive(Debug, Clone, Copy)]
struct Draft {
    window_width: u32,
    window_height: u32,
    background: Color32,
    cell_width: u32,
    cell_height: u32,
    cell_border: u32,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            background: Color32::BLACK,
            cell_width: 10,
            cell_height: 10,
            cell_border: 1,
        }
    }
}

/// Owns the cell store and the geometry buffer and keeps them in step.
///
/// Setup runs `init_window`, `init_grid`, `init_vertex_list` in that order;
/// mutation and drawing need the last of them.
pub struct GridRenderer {
    draft: Draft,
    state: State,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GridRenderer {
    pub fn new() -> Self {
        Self { draft: Draft::default(), state: State::Uninitialized }
    }

    /// Runs all three setup phases with an already validated config.
    pub fn with_config(config: GridConfig) -> Result<Self, GridError> {
        let mut grid = Self::new();
        grid.set_window_size(config.window_width(), config.window_height())?;
        grid.set_background(config.background())?;
        grid.set_cell_size(config.cell_width(), config.cell_height())?;
        grid.set_cell_border(config.cell_border())?;
        grid.init_window()?;
        grid.init_grid()?;
        grid.init_vertex_list()?;
        Ok(grid)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    // ---- staged configuration ----

    pub fn set_window_size(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        self.require_before(Phase::WindowReady, "set_window_size")?;
        self.draft.window_width = width;
        self.draft.window_height = height;
        Ok(())
    }

    pub fn set_background(&mut self, background: Color32) -> Result<(), GridError> {
        self.require_before(Phase::WindowReady, "set_background")?;
        self.draft.background = background;
        Ok(())
    }

    pub fn set_cell_size(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        self.require_before(Phase::GridReady, "set_cell_size")?;
        self.draft.cell_width = width;
        self.draft.cell_height = height;
        Ok(())
    }

    pub fn set_cell_border(&mut self, border: u32) -> Result<(), GridError> {
        self.require_before(Phase::GridReady, "set_cell_border")?;
        self.draft.cell_border = border;
        Ok(())
    }

    // ---- setup phases ----

    pub fn init_window(&mut self) -> Result<(), GridError> {
        match self.state {
            State::Uninitialized => {}
            _ => return Err(self.already("init_window")),
        }
        let window = WindowConfig::new(
            self.draft.window_width,
            self.draft.window_height,
            self.draft.background,
        )?;
        log::debug!("window ready: {}x{}", window.width, window.height);
        self.state = State::WindowReady(window);
        Ok(())
    }

    pub fn init_grid(&mut self) -> Result<(), GridError> {
        let window = match self.state {
            State::Uninitialized => return Err(self.not_ready("init_grid")),
            State::WindowReady(window) => window,
            _ => return Err(self.already("init_grid")),
        };
        let config = GridConfig::new(
            window,
            self.draft.cell_width,
            self.draft.cell_height,
            self.draft.cell_border,
        )?;
        log::debug!(
            "grid ready: {} columns x {} rows of {}x{} cells",
            config.columns(),
            config.rows(),
            config.cell_width(),
            config.cell_height()
        );
        let store = CellStore::new(config.dims());
        self.state = State::GridReady { config, store };
        Ok(())
    }

    pub fn init_vertex_list(&mut self) -> Result<(), GridError> {
        match self.state {
            State::Uninitialized | State::WindowReady(_) => {
                return Err(self.not_ready("init_vertex_list"));
            }
            State::GridReady { .. } => {}
            State::Renderable { .. } => return Err(self.already("init_vertex_list")),
        }
        if let State::GridReady { config, store } =
            std::mem::replace(&mut self.state, State::Uninitialized)
        {
            let geometry = GeometryBuffer::new(&config);
            log::debug!("vertex list ready: {} vertices", geometry.mesh().vertices.len());
            self.state = State::Renderable { config, store, geometry };
        }
        Ok(())
    }

    // ---- read access ----

    pub fn config(&self) -> Result<&GridConfig, GridError> {
        match &self.state {
            State::GridReady { config, .. } | State::Renderable { config, .. } => Ok(config),
            _ => Err(self.not_ready("config")),
        }
    }

    pub fn dims(&self) -> Result<GridDims, GridError> {
        self.config().map(GridConfig::dims)
    }

    pub fn columns(&self) -> Result<u32, GridError> {
        self.config().map(GridConfig::columns)
    }

    pub fn rows(&self) -> Result<u32, GridError> {
        self.config().map(GridConfig::rows)
    }

    pub fn store(&self) -> Result<&CellStore, GridError> {
        match &self.state {
            State::GridReady { store, .. } | State::Renderable { store, .. } => Ok(store),
            _ => Err(self.not_ready("store")),
        }
    }

    pub fn cell(&self, col: i32, row: i32) -> Result<CellColor, GridError> {
        self.store()?.get(col, row)
    }

    pub fn geometry(&self) -> Result<&GeometryBuffer, GridError> {
        match &self.state {
            State::Renderable { geometry, .. } => Ok(geometry),
            _ => Err(self.not_ready("geometry")),
        }
    }

    // ---- mutation ----

    /// Writes one cell and rewrites only its geometry block.
    pub fn set_cell(&mut self, col: i32, row: i32, color: Rgb) -> Result<(), GridError> {
        self.write(col, row, CellColor::Rgb(color), "set_cell")
    }

    pub fn unset_cell(&mut self, col: i32, row: i32) -> Result<(), GridError> {
        self.write(col, row, CellColor::Background, "unset_cell")
    }

    /// Resets every cell and block to background.
    pub fn clear_all_cells(&mut self) -> Result<(), GridError> {
        let (config, store, geometry) = self.renderable("clear_all_cells")?;
        store.clear_all();
        geometry.fill(config.background());
        Ok(())
    }

    /// Hands the current geometry to `surface`. Touches no cell state.
    pub fn draw<S>(&self, surface: &mut S) -> Result<(), GridError>
    where
        S: RenderSurface + ?Sized,
    {
        match &self.state {
            State::Renderable { config, geometry, .. } => {
                log::trace!("draw: {} vertices", geometry.mesh().vertices.len());
                surface.submit(geometry.mesh(), config.background());
                Ok(())
            }
            _ => Err(self.not_ready("draw")),
        }
    }

    fn write(
        &mut self,
        col: i32,
        row: i32,
        color: CellColor,
        operation: &'static str,
    ) -> Result<(), GridError> {
        let (config, store, geometry) = self.renderable(operation)?;
        store.set(col, row, color)?;
        geometry.write_cell(col, row, encode_color(color, config))
    }

    fn renderable(
        &mut self,
        operation: &'static str,
    ) -> Result<(&GridConfig, &mut CellStore, &mut GeometryBuffer), GridError> {
        let phase = self.state.phase();
        match &mut self.state {
            State::Renderable { config, store, geometry } => Ok((&*config, store, geometry)),
            _ => Err(GridError::NotInitialized { operation, phase }),
        }
    }

    fn require_before(&self, phase: Phase, operation: &'static str) -> Result<(), GridError> {
        if self.phase() < phase {
            Ok(())
        } else {
            Err(self.already(operation))
        }
    }

    fn not_ready(&self, operation: &'static str) -> GridError {
        GridError::NotInitialized { operation, phase: self.phase() }
    }

    fn already(&self, operation: &'static str) -> GridError {
        GridError::AlreadyInitialized { operation, phase: self.phase() }
    }
}

impl CellTarget for GridRenderer {
    fn unset_cell(&mut self, col: i32, row: i32) -> Result<(), GridError> {
        GridRenderer::unset_cell(self, col, row)
    }
}
