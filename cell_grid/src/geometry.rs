// geometry.rs - Cell rectangles and the batched per-cell vertex buffer

use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::{Color32, Pos2, pos2};

use crate::cell::CellColor;
use crate::config::{GridConfig, GridDims};
use crate::error::GridError;

pub const VERTICES_PER_CELL: usize = 4;
pub const INDICES_PER_CELL: usize = 6;

/// Corners of a cell's drawable interior, in window pixels (y down):
/// top-left, top-right, bottom-right, bottom-left.
pub fn rect_for(col: u32, row: u32, config: &GridConfig) -> [Pos2; 4] {
    let border = config.cell_border();
    let left = (col * config.cell_width() + border) as f32;
    let top = (row * config.cell_height() + border) as f32;
    let right = left + (config.cell_width() - 2 * border) as f32;
    let bottom = top + (config.cell_height() - 2 * border) as f32;
    [pos2(left, top), pos2(right, top), pos2(right, bottom), pos2(left, bottom)]
}

/// Fill colour written into a cell's vertices.
pub fn encode_color(color: CellColor, config: &GridConfig) -> Color32 {
    match color {
        CellColor::Background => config.background(),
        CellColor::Rgb(rgb) => Color32::from_rgb(rgb.r, rgb.g, rgb.b),
    }
}

/// One four-vertex block per cell, allocated once and rewritten in place.
#[derive(Debug, Clone)]
pub struct GeometryBuffer {
    dims: GridDims,
    mesh: Mesh,
}

impl GeometryBuffer {
    /// Every cell starts as a background-coloured rectangle.
    pub fn new(config: &GridConfig) -> Self {
        let dims = config.dims();
        let background = config.background();
        let mut mesh = Mesh::default();
        mesh.vertices.reserve_exact(dims.cell_count() * VERTICES_PER_CELL);
        mesh.indices.reserve_exact(dims.cell_count() * INDICES_PER_CELL);

        for row in 0..dims.rows {
            for col in 0..dims.columns {
                let base = mesh.vertices.len() as u32;
                for pos in rect_for(col, row, config) {
                    mesh.vertices.push(Vertex { pos, uv: WHITE_UV, color: background });
                }
                mesh.indices
                    .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }
        Self { dims, mesh }
    }

    /// Recolours only the block belonging to `(col, row)`.
    pub fn write_cell(&mut self, col: i32, row: i32, color: Color32) -> Result<(), GridError> {
        let start = self.dims.index(col, row)? * VERTICES_PER_CELL;
        for vertex in &mut self.mesh.vertices[start..start + VERTICES_PER_CELL] {
            vertex.color = color;
        }
        Ok(())
    }

    pub fn fill(&mut self, color: Color32) {
        for vertex in &mut self.mesh.vertices {
            vertex.color = color;
        }
    }

    pub fn block(&self, col: i32, row: i32) -> Result<&[Vertex], GridError> {
        let start = self.dims.index(col, row)? * VERTICES_PER_CELL;
        Ok(&self.mesh.vertices[start..start + VERTICES_PER_CELL])
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Rgb;
    use crate::config::WindowConfig;

    fn config() -> GridConfig {
        let window = WindowConfig::new(400, 800, Color32::WHITE).unwrap();
        GridConfig::new(window, 80, 20, 5).unwrap()
    }

    #[test]
    fn rect_is_inset_by_the_border() {
        let config = config();
        assert_eq!(
            rect_for(0, 0, &config),
            [pos2(5.0, 5.0), pos2(75.0, 5.0), pos2(75.0, 15.0), pos2(5.0, 15.0)]
        );
        let [top_left, _, bottom_right, _] = rect_for(2, 10, &config);
        assert_eq!(top_left, pos2(165.0, 205.0));
        assert_eq!(bottom_right, pos2(235.0, 215.0));
    }

    #[test]
    fn background_encodes_as_configured_colour() {
        let config = config();
        assert_eq!(encode_color(CellColor::Background, &config), Color32::WHITE);
        assert_eq!(
            encode_color(CellColor::Rgb(Rgb::new(255, 0, 0)), &config),
            Color32::from_rgb(255, 0, 0)
        );
    }

    #[test]
    fn buffer_holds_one_block_per_cell() {
        let buffer = GeometryBuffer::new(&config());
        assert_eq!(buffer.mesh().vertices.len(), 200 * VERTICES_PER_CELL);
        assert_eq!(buffer.mesh().indices.len(), 200 * INDICES_PER_CELL);
        assert!(buffer.mesh().is_valid());
        assert!(buffer.mesh().vertices.iter().all(|v| v.color == Color32::WHITE));
    }

    #[test]
    fn write_cell_touches_only_its_block() {
        let mut buffer = GeometryBuffer::new(&config());
        buffer.write_cell(2, 10, Color32::RED).unwrap();
        let start = 52 * VERTICES_PER_CELL;
        for (i, vertex) in buffer.mesh().vertices.iter().enumerate() {
            let expected = if (start..start + 4).contains(&i) { Color32::RED } else { Color32::WHITE };
            assert_eq!(vertex.color, expected, "vertex {i}");
        }
        assert_eq!(buffer.block(2, 10).unwrap()[0].pos, pos2(165.0, 205.0));
    }

    #[test]
    fn write_cell_rejects_out_of_bounds() {
        let mut buffer = GeometryBuffer::new(&config());
        assert!(matches!(
            buffer.write_cell(5, 0, Color32::RED),
            Err(GridError::OutOfBounds { .. })
        ));
    }
}
