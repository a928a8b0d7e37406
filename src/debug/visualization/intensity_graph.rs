use crate::physics::wave::IntensityProfile;

/// Share of the graph width the brightest bar spans.
const BAR_SPAN: f32 = 0.95;
/// Opacity of the white centre line.
const CENTER_LINE_ALPHA: f32 = 0.2;

/// Bar colour for a normalized intensity `n` in `[0, 1]`.
pub fn bar_color(n: f32) -> [u8; 4] {
    let n = n.clamp(0.0, 1.0);
    [
        (n * 100.0).floor() as u8,
        (150.0 + n * 105.0).floor() as u8,
        (n * 157.0).floor() as u8,
        255,
    ]
}

/// Horizontal bar chart of the screen intensity, one display row per pixel row.
#[derive(Debug, Clone)]
pub struct IntensityGraph {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl IntensityGraph {
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

    pub fn draw(&mut self, profile: &IntensityProfile) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[0, 0, 0, 255]);
        }
        if self.height == 0 || profile.is_empty() {
            return;
        }

        let row_bytes = self.width * 4;
        for y in 0..self.height {
            let grid_row = (y as f32 / self.height as f32 * profile.len() as f32).floor() as usize;
            let n = profile.normalized(grid_row);
            let bar = n * self.width as f32 * BAR_SPAN;
            if bar <= 0.5 {
                continue;
            }
            let len = (bar.round() as usize).min(self.width);
            let color = bar_color(n);
            let row = &mut self.pixels[y * row_bytes..y * row_bytes + len * 4];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }

        // Centre line
        let mid = self.height / 2;
        for px in self.pixels[mid * row_bytes..(mid + 1) * row_bytes].chunks_exact_mut(4) {
            for c in &mut px[..3] {
                *c = (*c as f32 * (1.0 - CENTER_LINE_ALPHA) + 255.0 * CENTER_LINE_ALPHA).round()
                    as u8;
            }
        }
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
    use crate::math::ScalarField2D;

    /// Column field whose rows grow linearly from 0 to 1.
    struct Ramp {
        height: usize,
    }

    impl ScalarField2D for Ramp {
        fn width(&self) -> usize {
            1
        }
        fn height(&self) -> usize {
            self.height
        }
        fn get_value(&self, _x: usize, y: usize) -> f32 {
            y as f32 / (self.height - 1) as f32
        }
    }

    #[test]
    fn test_bar_colors() {
        assert_eq!(bar_color(0.0), [0, 150, 0, 255]);
        assert_eq!(bar_color(1.0), [100, 255, 157, 255]);
        assert_eq!(bar_color(0.5), [50, 202, 78, 255]);
    }

    #[test]
    fn test_empty_profile_draws_background_and_line() {
        let mut graph = IntensityGraph::new(20, 10);
        graph.draw(&IntensityProfile::new(10));
        assert_eq!(graph.pixel(3, 2), [0, 0, 0, 255]);
        assert_eq!(graph.pixel(3, 5), [51, 51, 51, 255]);
    }

    #[test]
    fn test_bars_scale_with_intensity() {
        let mut profile = IntensityProfile::new(10);
        profile.sample(&Ramp { height: 10 }, 0.0);

        let mut graph = IntensityGraph::new(100, 20);
        graph.draw(&profile);

        // Row 19 of the graph maps to profile row 9, the peak: full 95 px bar.
        assert_eq!(graph.pixel(94, 19), bar_color(1.0));
        assert_eq!(graph.pixel(95, 19), [0, 0, 0, 255]);

        // Profile row 0 is zero: no bar.
        assert_eq!(graph.pixel(0, 0), [0, 0, 0, 255]);

        // Rows 2 and 3 share profile row 1.
        let n = profile.normalized(1);
        let len = (n * 100.0 * 0.95).round() as usize;
        assert_eq!(graph.pixel(len - 1, 2), bar_color(n));
        assert_eq!(graph.pixel(len, 3), [0, 0, 0, 255]);
    }
}
