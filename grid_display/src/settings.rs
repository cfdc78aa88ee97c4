// settings.rs - Display defaults and command-line overrides

use std::path::PathBuf;

use anyhow::{Context, bail};
use egui::Color32;

// Window and cell geometry
pub const WINDOW_WIDTH: u32 = 400;
pub const WINDOW_HEIGHT: u32 = 800;
pub const CELL_WIDTH: u32 = 80;
pub const CELL_HEIGHT: u32 = 20;
pub const CELL_BORDER: u32 = 5;
pub const BACKGROUND: Color32 = Color32::WHITE;

pub const FRAME_MILLIS: u64 = 16; // ~60 frames per second

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    FullClear,
    Decay,
}

impl PolicyKind {
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::FullClear => "Full clear",
            PolicyKind::Decay => "Decay",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub policy: PolicyKind,
    pub headless_frames: Option<u64>,
    pub capture_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: PolicyKind::FullClear,
            headless_frames: None,
            capture_dir: None,
            seed: None,
        }
    }
}

impl Settings {
    /// `--policy full|decay`, `--headless <frames>`, `--capture <dir>`, `--seed <u64>`
    pub fn from_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut settings = Settings::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || args.next().with_context(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--policy" => {
                    settings.policy = match value()?.as_str() {
                        "full" => PolicyKind::FullClear,
                        "decay" => PolicyKind::Decay,
                        other => bail!("unknown policy {other:?} (expected full or decay)"),
                    }
                }
                "--headless" => {
                    settings.headless_frames =
                        Some(value()?.parse().context("--headless takes a frame count")?)
                }
                "--capture" => settings.capture_dir = Some(PathBuf::from(value()?)),
                "--seed" => settings.seed = Some(value()?.parse().context("--seed takes a u64")?),
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(settings)
    }
}
