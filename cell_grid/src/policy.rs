// policy.rs - Per-frame update strategies driven by an external frame clock

use rand::{Rng, RngCore};

use crate::cell::Rgb;
use crate::dirty::{DirtyTracker, check_probability};
use crate::error::GridError;
use crate::renderer::GridRenderer;

pub const DEFAULT_DOTS_PER_FRAME: usize = 1000;
pub const DEFAULT_DECAY_PROBABILITY: f64 = 0.1;

/// One tick of business logic. Mutates the grid; the caller draws afterwards.
pub trait UpdatePolicy {
    fn update(&mut self, grid: &mut GridRenderer, rng: &mut dyn RngCore) -> Result<(), GridError>;

    fn name(&self) -> &'static str;

    /// Adjusts a live policy between frames without touching the grid.
    /// Policies without a decay ignore `decay_probability`.
    fn tune(&mut self, dots_per_frame: usize, decay_probability: f64) -> Result<(), GridError>;

    /// Cells the policy is still tracking, if it tracks any.
    fn tracked(&self) -> Option<usize> {
        None
    }
}

/// Random in-bounds coordinate and random colour.
fn random_dot(rng: &mut dyn RngCore, columns: u32, rows: u32) -> (i32, i32, Rgb) {
    let col = rng.gen_range(0..columns) as i32;
    let row = rng.gen_range(0..rows) as i32;
    let color = Rgb::new(rng.r#gen(), rng.r#gen(), rng.r#gen());
    (col, row, color)
}

/// Wipes the whole grid every frame, then paints fresh dots.
#[derive(Debug, Clone)]
pub struct FullClearPolicy {
    pub dots_per_frame: usize,
}

impl FullClearPolicy {
    pub fn new(dots_per_frame: usize) -> Self {
        log::debug!("full-clear policy: {dots_per_frame} dots per frame");
        Self { dots_per_frame }
    }
}

impl Default for FullClearPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DOTS_PER_FRAME)
    }
}

impl UpdatePolicy for FullClearPolicy {
    fn update(&mut self, grid: &mut GridRenderer, rng: &mut dyn RngCore) -> Result<(), GridError> {
        let dims = grid.dims()?;
        grid.clear_all_cells()?;
        for _ in 0..self.dots_per_frame {
            let (col, row, color) = random_dot(rng, dims.columns, dims.rows);
            grid.set_cell(col, row, color)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "full-clear"
    }

    fn tune(&mut self, dots_per_frame: usize, _decay_probability: f64) -> Result<(), GridError> {
        self.dots_per_frame = dots_per_frame;
        Ok(())
    }
}

/// Paints dots that linger: each frame every tracked dot fades with
/// probability `decay_probability`, so cost follows the number of changes.
#[derive(Debug, Clone)]
pub struct DecayPolicy {
    dots_per_frame: usize,
    decay_probability: f64,
    tracker: DirtyTracker,
}

impl DecayPolicy {
    pub fn new(dots_per_frame: usize, decay_probability: f64) -> Result<Self, GridError> {
        check_probability(decay_probability)?;
        log::debug!("decay policy: {dots_per_frame} dots per frame, decay {decay_probability}");
        Ok(Self { dots_per_frame, decay_probability, tracker: DirtyTracker::new() })
    }

    pub fn dots_per_frame(&self) -> usize {
        self.dots_per_frame
    }

    pub fn set_dots_per_frame(&mut self, dots: usize) {
        self.dots_per_frame = dots;
    }

    pub fn decay_probability(&self) -> f64 {
        self.decay_probability
    }

    pub fn set_decay_probability(&mut self, p: f64) -> Result<(), GridError> {
        check_probability(p)?;
        self.decay_probability = p;
        Ok(())
    }

    pub fn tracker(&self) -> &DirtyTracker {
        &self.tracker
    }

    /// Drops all tracking, e.g. after the host cleared the grid itself.
    pub fn reset(&mut self) {
        self.tracker.clear();
    }
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self {
            dots_per_frame: DEFAULT_DOTS_PER_FRAME,
            decay_probability: DEFAULT_DECAY_PROBABILITY,
            tracker: DirtyTracker::new(),
        }
    }
}

impl UpdatePolicy for DecayPolicy {
    fn update(&mut self, grid: &mut GridRenderer, rng: &mut dyn RngCore) -> Result<(), GridError> {
        let dims = grid.dims()?;
        self.tracker.sweep(self.decay_probability, rng, grid)?;
        for _ in 0..self.dots_per_frame {
            let (col, row, color) = random_dot(rng, dims.columns, dims.rows);
            grid.set_cell(col, row, color)?;
            self.tracker.mark(col, row);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "decay"
    }

    fn tune(&mut self, dots_per_frame: usize, decay_probability: f64) -> Result<(), GridError> {
        self.set_decay_probability(decay_probability)?;
        self.dots_per_frame = dots_per_frame;
        Ok(())
    }

    fn tracked(&self) -> Option<usize> {
        Some(self.tracker.len())
    }
}
