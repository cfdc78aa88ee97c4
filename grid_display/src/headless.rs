// headless.rs - Frame clock without a window, optionally capturing each frame

use std::time::Duration;

use cell_grid::policy::{DEFAULT_DECAY_PROBABILITY, DEFAULT_DOTS_PER_FRAME};
use cell_grid::{GridRenderer, MeshRecorder, PixelSurface, RenderSurface};

use crate::capture::FrameCapture;
use crate::settings::{self, Settings};
use crate::{make_policy, make_rng};

/// Ticks the selected policy `frames` times, drawing after every tick.
pub fn run(mut grid: GridRenderer, settings: &Settings, frames: u64) -> anyhow::Result<()> {
    let mut policy =
        make_policy(settings.policy, DEFAULT_DOTS_PER_FRAME, DEFAULT_DECAY_PROBABILITY)?;
    let mut rng = make_rng(settings.seed);
    let mut capture = match &settings.capture_dir {
        Some(dir) => Some(FrameCapture::new(dir)?),
        None => None,
    };

    let config = *grid.config()?;
    let mut pixels = PixelSurface::new(config.window_width(), config.window_height());
    let mut recorder = MeshRecorder::new();

    log::info!("running {} policy headless for {frames} frames", policy.name());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut clock = tokio::time::interval(Duration::from_millis(settings::FRAME_MILLIS));
        for _ in 0..frames {
            clock.tick().await;
            policy.update(&mut grid, &mut rng)?;

            // Rasterise only when the frame is going to disk
            let surface: &mut dyn RenderSurface = match capture {
                Some(_) => &mut pixels,
                None => &mut recorder,
            };
            grid.draw(surface)?;
            if let Some(capture) = capture.as_mut() {
                capture.save(&pixels)?;
            }
        }
        anyhow::Ok(())
    })?;

    let painted = grid.store()?.painted_count();
    match policy.tracked() {
        Some(tracked) => log::info!("done: {painted} cells painted, {tracked} tracked"),
        None => log::info!("done: {painted} cells painted"),
    }
    Ok(())
}
