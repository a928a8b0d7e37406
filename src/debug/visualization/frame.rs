use crate::physics::wave::grid::WALL;
use crate::physics::wave::{FieldGrid, SourcePosition, probe_column};

pub const WALL_COLOR: [u8; 4] = [255, 50, 50, 255];
pub const PROBE_COLOR: [u8; 4] = [0, 255, 100, 255];
pub const SOURCE_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Amplitude gain before the `tanh` squash.
const GAIN: f32 = 25.0;
/// Saturated values below this render as background.
const THRESHOLD: f32 = 0.005;
const GAMMA: f32 = 0.6;
/// Half edge of the source marker square.
const SOURCE_MARKER: i64 = 2;

/// Colour of one open cell: cyan for positive displacement, red for negative.
pub fn field_color(value: f32) -> [u8; 4] {
    let value = if value.is_finite() { value } else { 0.0 };
    let sat = (value * GAIN).tanh();
    if sat.abs() < THRESHOLD {
        return BACKGROUND;
    }
    let v = (sat.abs().powf(GAMMA) * 255.0).floor() as u8;
    if sat > 0.0 { [0, v, v, 255] } else { [v, 0, 0, 255] }
}

/// RGBA8 image of the field, one pixel per cell, row-major from the top.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl FrameRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height * 4];
    }

    /// Paints the field, then the dotted probe column, then the source marker.
    /// Returns `false` without touching the buffer when the grid size differs.
    pub fn draw(
        &mut self,
        grid: &FieldGrid,
        source: Option<SourcePosition>,
        probe_percent: Option<f32>,
    ) -> bool {
        if grid.width() != self.width || grid.height() != self.height {
            return false;
        }

        for ((px, &value), &wall) in self
            .pixels
            .chunks_exact_mut(4)
            .zip(grid.current())
            .zip(grid.walls())
        {
            let color = if wall == WALL {
                WALL_COLOR
            } else {
                field_color(value)
            };
            px.copy_from_slice(&color);
        }

        if let Some(percent) = probe_percent {
            let x = probe_column(self.width, percent);
            for y in (0..self.height).filter(|y| y % 4 < 2) {
                self.put(x as i64, y as i64, PROBE_COLOR);
            }
        }

        if let Some(src) = source {
            if src.x.is_finite() && src.y.is_finite() {
                let (cx, cy) = (src.x.floor() as i64, src.y.floor() as i64);
                for dy in -SOURCE_MARKER..=SOURCE_MARKER {
                    for dx in -SOURCE_MARKER..=SOURCE_MARKER {
                        self.put(cx + dx, cy + dy, SOURCE_COLOR);
                    }
                }
            }
        }
        true
    }

    /// Single pixel write, clipped to the buffer.
    fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let p = (y as usize * self.width + x as usize) * 4;
        self.pixels[p..p + 4].copy_from_slice(&color);
    }

    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let p = (y * self.width + x) * 4;
        [
            self.pixels[p],
            self.pixels[p + 1],
            self.pixels[p + 2],
            self.pixels[p + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_field_is_opaque_black() {
        let grid = FieldGrid::new(16, 12).unwrap();
        let mut renderer = FrameRenderer::new(16, 12);
        assert!(renderer.draw(&grid, None, None));
        assert!(renderer.pixels().chunks(4).all(|p| p == BACKGROUND));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(field_color(0.0), BACKGROUND);
        assert_eq!(field_color(1e-5), BACKGROUND);
        assert_eq!(field_color(f32::NAN), BACKGROUND);
        assert_eq!(field_color(10.0), [0, 255, 255, 255]);
        assert_eq!(field_color(-10.0), [255, 0, 0, 255]);

        let v = (((0.01_f32 * GAIN).tanh()).powf(GAMMA) * 255.0).floor() as u8;
        assert_eq!(field_color(0.01), [0, v, v, 255]);
        assert_eq!(field_color(-0.01), [v, 0, 0, 255]);
    }

    #[test]
    fn test_walls_probe_and_source_overlay() {
        let mut grid = FieldGrid::new(40, 20).unwrap();
        grid.set_slits(0.0, 0.0, 10.0);
        // Drive the source after one step so the phase is non-zero.
        grid.update();
        grid.add_source(20.0, 10.0, 5.0, 1.0);

        let mut renderer = FrameRenderer::new(40, 20);
        assert!(renderer.draw(&grid, None, Some(75.0)));
        assert_eq!(renderer.pixel(10, 3), WALL_COLOR);
        assert_eq!(renderer.pixel(8, 17), WALL_COLOR);
        assert_eq!(renderer.pixel(20, 10)[0], 0);
        assert!(renderer.pixel(20, 10)[1] > 0);

        // Dotted probe at column 30.
        assert_eq!(renderer.pixel(30, 0), PROBE_COLOR);
        assert_eq!(renderer.pixel(30, 1), PROBE_COLOR);
        assert_eq!(renderer.pixel(30, 2), BACKGROUND);
        assert_eq!(renderer.pixel(30, 5), PROBE_COLOR);

        assert!(renderer.draw(&grid, Some(SourcePosition::new(20.5, 10.9)), None));
        for (x, y) in [(18, 8), (22, 12), (20, 10)] {
            assert_eq!(renderer.pixel(x, y), SOURCE_COLOR);
        }
        assert_ne!(renderer.pixel(23, 10), SOURCE_COLOR);
        assert_ne!(renderer.pixel(30, 0), PROBE_COLOR);
    }

    #[test]
    fn test_wall_color_ignores_stored_value() {
        let mut grid = FieldGrid::new(20, 20).unwrap();
        grid.set_slits(0.0, 0.0, 10.0);
        grid.set_raw(10, 5, 50.0);
        grid.set_raw(9, 12, -50.0);
        grid.set_raw(11, 15, f32::NAN);
        assert!(grid.is_wall(10, 5) && grid.is_wall(9, 12) && grid.is_wall(11, 15));

        let mut renderer = FrameRenderer::new(20, 20);
        assert!(renderer.draw(&grid, None, None));
        assert_eq!(renderer.pixel(10, 5), WALL_COLOR);
        assert_eq!(renderer.pixel(9, 12), WALL_COLOR);
        assert_eq!(renderer.pixel(11, 15), WALL_COLOR);
    }

    #[test]
    fn test_source_marker_clipped_at_edges() {
        let grid = FieldGrid::new(10, 10).unwrap();
        let mut renderer = FrameRenderer::new(10, 10);
        assert!(renderer.draw(&grid, Some(SourcePosition::new(0.0, 9.0)), None));
        assert_eq!(renderer.pixel(0, 9), SOURCE_COLOR);
        assert_eq!(renderer.pixel(2, 7), SOURCE_COLOR);
        assert_eq!(renderer.pixel(3, 9), BACKGROUND);
    }

    #[test]
    fn test_dimension_mismatch_leaves_buffer() {
        let grid = FieldGrid::new(10, 10).unwrap();
        let mut renderer = FrameRenderer::new(12, 10);
        let before = renderer.pixels().to_vec();
        assert!(!renderer.draw(&grid, None, None));
        assert_eq!(renderer.pixels(), &before[..]);

        renderer.resize(10, 10);
        assert_eq!(renderer.pixels().len(), 400);
        assert!(renderer.draw(&grid, None, None));
    }
}
