// surface.rs - Where a drawn grid ends up

use egui::Color32;
use egui::epaint::Mesh;

use crate::geometry::VERTICES_PER_CELL;

/// A drawable target. After `submit` returns, the surface shows the mesh
/// over a `background` clear.
pub trait RenderSurface {
    fn submit(&mut self, mesh: &Mesh, background: Color32);
}

/// Keeps the most recent submission. Useful headless.
#[derive(Debug, Default)]
pub struct MeshRecorder {
    last: Option<(Mesh, Color32)>,
    submissions: u64,
}

impl MeshRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_mesh(&self) -> Option<&Mesh> {
        self.last.as_ref().map(|(mesh, _)| mesh)
    }

    pub fn last_background(&self) -> Option<Color32> {
        self.last.as_ref().map(|&(_, bg)| bg)
    }

    pub fn submissions(&self) -> u64 {
        self.submissions
    }
}

impl RenderSurface for MeshRecorder {
    fn submit(&mut self, mesh: &Mesh, background: Color32) {
        self.last = Some((mesh.clone(), background));
        self.submissions += 1;
    }
}

/// Software rasteriser into an RGBA8 buffer the size of the window.
///
/// Only handles the axis-aligned, flat-coloured quads the grid produces:
/// each four-vertex block is filled with its first vertex's colour.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed straight (unmultiplied) RGBA rows, top row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color32) {
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        let rgba = color.to_srgba_unmultiplied();
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                let i = (row + x as usize) * 4;
                self.pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
}

impl RenderSurface for PixelSurface {
    fn submit(&mut self, mesh: &Mesh, background: Color32) {
        self.fill_rect(0, 0, self.width, self.height, background);
        for block in mesh.vertices.chunks_exact(VERTICES_PER_CELL) {
            let (min, max) = block.iter().fold(
                (block[0].pos, block[0].pos),
                |(min, max), v| (min.min(v.pos), max.max(v.pos)),
            );
            self.fill_rect(
                min.x.max(0.0) as u32,
                min.y.max(0.0) as u32,
                max.x.max(0.0) as u32,
                max.y.max(0.0) as u32,
                block[0].color,
            );
        }
    }
}
