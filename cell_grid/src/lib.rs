// lib.rs - A fixed grid of bordered, flat-coloured cells drawn as one batched mesh
//
// Two ways to redraw each frame are supported through `UpdatePolicy`:
// clear everything and repaint, or track painted cells and let them fade.

pub mod cell;
pub mod config;
pub mod dirty;
pub mod error;
pub mod geometry;
pub mod policy;
pub mod renderer;
pub mod store;
pub mod surface;

pub use cell::{CellColor, CellCoord, Rgb};
pub use config::{GridConfig, GridDims, WindowConfig};
pub use dirty::{CellTarget, DirtyTracker};
pub use error::{ConfigError, GridError};
pub use geometry::{GeometryBuffer, encode_color, rect_for};
pub use policy::{DecayPolicy, FullClearPolicy, UpdatePolicy};
pub use renderer::{GridRenderer, Phase};
pub use store::CellStore;
pub use surface::{MeshRecorder, PixelSurface, RenderSurface};
