// capture.rs - Save drawn frames as numbered PNG files

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use cell_grid::PixelSurface;

pub struct FrameCapture {
    dir: PathBuf,
    counter: u64,
}

impl FrameCapture {
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating capture directory {}", dir.display()))?;
        Ok(Self { dir, counter: 0 })
    }

    /// Writes the next frame as `0000000001.png`, `0000000002.png`, ...
    pub fn save(&mut self, surface: &PixelSurface) -> anyhow::Result<PathBuf> {
        self.counter += 1;
        let path = self.dir.join(frame_name(self.counter));
        write_png(&path, surface)?;
        log::debug!("captured frame {}", path.display());
        Ok(path)
    }
}

fn frame_name(counter: u64) -> String {
    format!("{counter:010}.png")
}

fn write_png(path: &Path, surface: &PixelSurface) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), surface.width(), surface.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(surface.pixels())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_name(1), "0000000001.png");
        assert_eq!(frame_name(1234567890), "1234567890.png");
    }

    #[test]
    fn saves_sequential_frames() {
        let dir = std::env::temp_dir().join(format!("grid_display_capture_{}", std::process::id()));
        let mut capture = FrameCapture::new(&dir).unwrap();
        let surface = PixelSurface::new(4, 3);
        let first = capture.save(&surface).unwrap();
        let second = capture.save(&surface).unwrap();
        assert!(first.ends_with("0000000001.png"));
        assert!(second.ends_with("0000000002.png"));
        let bytes = fs::read(&first).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn translucent_background_keeps_its_colour_on_disk() {
        use cell_grid::RenderSurface;
        use egui::Color32;
        use egui::epaint::Mesh;

        let dir = std::env::temp_dir().join(format!("grid_display_alpha_{}", std::process::id()));
        let mut capture = FrameCapture::new(&dir).unwrap();
        let mut surface = PixelSurface::new(3, 2);
        surface.submit(&Mesh::default(), Color32::from_rgba_unmultiplied(255, 255, 255, 128));
        let path = capture.save(&surface).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!(info.color_type, png::ColorType::Rgba);
        let px = &buf[0..4];
        assert!(px[..3].iter().all(|&c| c >= 250), "white came out as {px:?}");
        assert_eq!(px[3], 128);
        fs::remove_dir_all(&dir).unwrap();
    }
}
