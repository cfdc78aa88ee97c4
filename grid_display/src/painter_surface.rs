// painter_surface.rs - Puts a submitted grid mesh onto an egui painter

use cell_grid::RenderSurface;
use egui::epaint::Mesh;
use egui::{Color32, Painter, Rect, Shape};

/// Borrowed for one frame; the grid's pixel origin lands on `area.min`,
/// the rect allocated for the grid (not the possibly clipped paint area).
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    area: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, area: Rect) -> Self {
        Self { painter, area }
    }
}

impl RenderSurface for PainterSurface<'_> {
    fn submit(&mut self, mesh: &Mesh, background: Color32) {
        self.painter.rect_filled(self.area, 0.0, background);
        self.painter.add(Shape::mesh(placed(mesh, self.area)));
    }
}

/// The mesh moved from window pixels into screen space at `area`.
fn placed(mesh: &Mesh, area: Rect) -> Mesh {
    let mut mesh = mesh.clone();
    mesh.translate(area.min.to_vec2());
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_grid;
    use egui::{pos2, vec2};

    #[test]
    fn mesh_origin_follows_the_allocated_rect() {
        let grid = build_grid().unwrap();
        let mesh = grid.geometry().unwrap().mesh();
        let area = Rect::from_min_size(pos2(20.0, -150.0), vec2(400.0, 800.0));

        let moved = placed(mesh, area);
        assert_eq!(moved.vertices.len(), mesh.vertices.len());
        for (before, after) in mesh.vertices.iter().zip(&moved.vertices) {
            assert_eq!(after.pos, before.pos + vec2(20.0, -150.0));
        }
        // Cell (0, 0) interior starts 5px inside the rect even when it begins off-screen
        assert_eq!(moved.vertices[0].pos, pos2(25.0, -145.0));
    }
}
