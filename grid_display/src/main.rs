// main.rs - Random dots on a cell grid, drawn in a window or headless

use std::time::{Duration, Instant};

use anyhow::anyhow;
use cell_grid::{
    DecayPolicy, FullClearPolicy, GridError, GridRenderer, UpdatePolicy,
    policy::{DEFAULT_DECAY_PROBABILITY, DEFAULT_DOTS_PER_FRAME},
};
use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;

mod capture;
mod headless;
mod painter_surface;
mod settings;
mod ui;

use settings::{PolicyKind, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let settings = Settings::from_args(std::env::args().skip(1))?;
    let grid = build_grid()?;

    if let Some(frames) = settings.headless_frames {
        return headless::run(grid, &settings, frames);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                settings::WINDOW_WIDTH as f32 + 40.0,
                settings::WINDOW_HEIGHT as f32 + 140.0,
            ]),
        ..Default::default()
    };

    let app = GridApp::new(grid, &settings)?;
    eframe::run_native("Cell Grid", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow!("window failed: {e}"))
}

/// Setup in the required order: window, then grid, then vertex list.
pub fn build_grid() -> Result<GridRenderer, GridError> {
    let mut grid = GridRenderer::new();
    grid.set_window_size(settings::WINDOW_WIDTH, settings::WINDOW_HEIGHT)?;
    grid.set_background(settings::BACKGROUND)?;
    grid.init_window()?;
    grid.set_cell_size(settings::CELL_WIDTH, settings::CELL_HEIGHT)?;
    grid.set_cell_border(settings::CELL_BORDER)?;
    grid.init_grid()?;
    grid.init_vertex_list()?;
    Ok(grid)
}

pub fn make_policy(
    kind: PolicyKind,
    dots: usize,
    decay: f64,
) -> Result<Box<dyn UpdatePolicy>, GridError> {
    let policy: Box<dyn UpdatePolicy> = match kind {
        PolicyKind::FullClear => Box::new(FullClearPolicy::new(dots)),
        PolicyKind::Decay => Box::new(DecayPolicy::new(dots, decay)?),
    };
    Ok(policy)
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// The interactive frame driver.
pub struct GridApp {
    pub grid: GridRenderer,
    policy: Box<dyn UpdatePolicy>,
    rng: StdRng,

    pub policy_kind: PolicyKind,
    pub dots_per_frame: usize,
    pub decay_probability: f64,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub frame: u64,
}

impl GridApp {
    pub fn new(grid: GridRenderer, settings: &Settings) -> Result<Self, GridError> {
        let dots_per_frame = DEFAULT_DOTS_PER_FRAME;
        let decay_probability = DEFAULT_DECAY_PROBABILITY;
        Ok(Self {
            grid,
            policy: make_policy(settings.policy, dots_per_frame, decay_probability)?,
            rng: make_rng(settings.seed),
            policy_kind: settings.policy,
            dots_per_frame,
            decay_probability,
            is_running: true,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(settings::FRAME_MILLIS),
            frame: 0,
        })
    }

    /// One tick of the selected policy. Drawing happens in the ui pass.
    pub fn step(&mut self) -> Result<(), GridError> {
        self.policy.update(&mut self.grid, &mut self.rng)?;
        self.frame += 1;
        Ok(())
    }

    /// Swaps in a fresh policy with the current knobs and starts from a blank grid.
    pub fn rebuild_policy(&mut self) -> Result<(), GridError> {
        self.policy = make_policy(self.policy_kind, self.dots_per_frame, self.decay_probability)?;
        self.grid.clear_all_cells()?;
        self.frame = 0;
        Ok(())
    }

    /// Pushes the current knobs into the running policy; the grid is left as is.
    pub fn tune_policy(&mut self) -> Result<(), GridError> {
        self.policy.tune(self.dots_per_frame, self.decay_probability)
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn tracked(&self) -> Option<usize> {
        self.policy.tracked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_display_settings() {
        let grid = build_grid().unwrap();
        assert_eq!(grid.columns(), Ok(5));
        assert_eq!(grid.rows(), Ok(40));
    }

    #[test]
    fn app_steps_and_switches_policy() {
        let settings = Settings { seed: Some(1), ..Settings::default() };
        let mut app = GridApp::new(build_grid().unwrap(), &settings).unwrap();
        app.step().unwrap();
        assert_eq!(app.frame, 1);
        assert_eq!(app.policy_name(), "full-clear");
        assert!(app.grid.store().unwrap().painted_count() > 0);

        app.policy_kind = PolicyKind::Decay;
        app.rebuild_policy().unwrap();
        assert_eq!(app.policy_name(), "decay");
        assert_eq!(app.tracked(), Some(0));
        assert_eq!(app.grid.store().unwrap().painted_count(), 0);
        app.step().unwrap();
        assert_eq!(app.tracked(), Some(app.grid.store().unwrap().painted_count()));
    }

    #[test]
    fn slider_changes_do_not_wipe_the_canvas() {
        let settings = Settings { policy: PolicyKind::Decay, seed: Some(4), ..Settings::default() };
        let mut app = GridApp::new(build_grid().unwrap(), &settings).unwrap();
        app.step().unwrap();
        let painted = app.grid.store().unwrap().clone();
        let tracked = app.tracked();

        app.dots_per_frame = 0;
        app.decay_probability = 0.0;
        app.tune_policy().unwrap();
        assert_eq!(app.frame, 1);
        assert_eq!(app.grid.store().unwrap(), &painted);
        assert_eq!(app.tracked(), tracked);

        // Zero dots and zero decay: the next frame changes nothing
        app.step().unwrap();
        assert_eq!(app.grid.store().unwrap(), &painted);
        assert_eq!(app.frame, 2);
    }
}
