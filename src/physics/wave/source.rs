// src/physics/wave/source.rs
use super::grid::{FieldGrid, WALL};
use serde::{Deserialize, Serialize};

/// Neighbourhood radius of the soft point source, in cells.
pub const SOURCE_RADIUS: i64 = 2;

/// Cells this close to the outer edge are never driven and never hold the source.
pub const EDGE_MARGIN: usize = 2;

/// Position of the point source in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub x: f32,
    pub y: f32,
}

impl SourcePosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Default placement: a quarter of the way in, vertically centred.
    pub fn default_for(width: usize, height: usize) -> Self {
        Self::new(width as f32 / 4.0, height as f32 / 2.0)
    }

    /// Clamps `(x, y)` so the source keeps `EDGE_MARGIN` cells to every edge.
    pub fn clamped(x: f32, y: f32, width: usize, height: usize) -> Self {
        let clamp_axis = |v: f32, extent: usize| {
            let lo = EDGE_MARGIN as f32;
            let hi = (extent.saturating_sub(EDGE_MARGIN + 1) as f32).max(lo);
            if v.is_finite() { v.clamp(lo, hi) } else { lo }
        };
        Self::new(clamp_axis(x, width), clamp_axis(y, height))
    }

    /// Accepts a pointer position only when it already lies inside the
    /// driveable region, mirroring a click on the canvas.
    pub fn from_pointer(x: f32, y: f32, width: usize, height: usize) -> Option<Self> {
        let margin = EDGE_MARGIN as f32;
        let inside = x >= margin
            && x < width as f32 - margin
            && y >= margin
            && y < height as f32 - margin;
        inside.then(|| Self::new(x, y))
    }
}

impl FieldGrid {
    /// Drives the field with `amplitude * sin(time * frequency)` around `(x, y)`.
    ///
    /// Cells within `SOURCE_RADIUS` of the floored position are overwritten
    /// (not accumulated) with the drive value weighted by
    /// `exp(-0.5 * distance)`. Wall cells and cells inside the edge margin are
    /// skipped. Call before `update` for the drive to enter this step.
    pub fn add_source(&mut self, x: f32, y: f32, amplitude: f32, frequency: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let ix = x.floor() as i64;
        let iy = y.floor() as i64;
        let width = self.width() as i64;
        let height = self.height() as i64;
        let margin = EDGE_MARGIN as i64;
        let drive = amplitude * (self.time as f64 * f64::from(frequency)).sin() as f32;

        for dy in -SOURCE_RADIUS..=SOURCE_RADIUS {
            for dx in -SOURCE_RADIUS..=SOURCE_RADIUS {
                let px = ix + dx;
                let py = iy + dy;
                if px < margin || px >= width - margin || py < margin || py >= height - margin {
                    continue;
                }
                let idx = self.index(px as usize, py as usize);
                if self.walls[idx] == WALL {
                    continue;
                }
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                let falloff = (-dist * 0.5).exp();
                self.current_mut()[idx] = drive * falloff;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn run_steps(grid: &mut FieldGrid, steps: usize) {
        for _ in 0..steps {
            grid.update();
        }
    }

    #[test]
    fn test_source_writes_gaussian_neighbourhood() {
        let mut grid = FieldGrid::new(20, 20).unwrap();
        // Advance the phase so the drive is non-zero: sin(5 * 0.3).
        grid.time = 5;
        grid.add_source(10.7, 10.2, 2.0, 0.3);

        let drive = 2.0 * (5.0_f64 * 0.3_f64).sin() as f32;
        assert_relative_eq!(grid.value(10, 10), drive, epsilon = 1e-6);
        assert_relative_eq!(grid.value(11, 10), drive * (-0.5_f32).exp(), epsilon = 1e-6);
        assert_relative_eq!(
            grid.value(12, 12),
            drive * (-(8.0_f32).sqrt() * 0.5).exp(),
            epsilon = 1e-6
        );
        assert_eq!(grid.value(13, 10), 0.0);
        assert_eq!(grid.value(10, 7), 0.0);

        let touched = grid.current().iter().filter(|&&v| v != 0.0).count();
        assert_eq!(touched, 25);
    }

    #[test]
    fn test_source_at_time_zero_is_silent() {
        let mut grid = FieldGrid::new(20, 20).unwrap();
        grid.add_source(10.0, 10.0, 2.0, 0.3);
        assert!(grid.current().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_source_overwrites_instead_of_adding() {
        let mut grid = FieldGrid::new(20, 20).unwrap();
        grid.time = 3;
        grid.add_source(10.0, 10.0, 1.0, 0.5);
        let first = grid.value(10, 10);
        grid.add_source(10.0, 10.0, 1.0, 0.5);
        assert_relative_eq!(grid.value(10, 10), first);
    }

    #[test]
    fn test_source_skips_walls_and_margin() {
        let mut grid = FieldGrid::new(20, 20).unwrap();
        grid.set_slits(0.0, 0.0, 10.0);
        grid.time = 4;
        grid.add_source(10.0, 10.0, 1.0, 0.4);
        assert!(grid.walls().iter().zip(grid.current()).all(|(&w, &v)| w != WALL || v == 0.0));

        grid.add_source(2.0, 2.0, 1.0, 0.4);
        for i in 0..20 {
            assert_eq!(grid.value(i, 0), 0.0);
            assert_eq!(grid.value(i, 1), 0.0);
            assert_eq!(grid.value(0, i), 0.0);
            assert_eq!(grid.value(1, i), 0.0);
        }
        assert!(grid.value(2, 2) != 0.0);
    }

    #[test]
    fn test_drive_phase_follows_step_counter() {
        let mut grid = FieldGrid::new(30, 30).unwrap();
        run_steps(&mut grid, 1);
        grid.add_source(15.0, 15.0, 1.0, 0.25);
        let expected = (1.0_f64 * 0.25).sin() as f32;
        assert_relative_eq!(grid.value(15, 15), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_position_clamping() {
        let p = SourcePosition::clamped(-5.0, 500.0, 100, 50);
        assert_eq!(p, SourcePosition::new(2.0, 47.0));
        let p = SourcePosition::clamped(40.5, 20.25, 100, 50);
        assert_eq!(p, SourcePosition::new(40.5, 20.25));
        let p = SourcePosition::clamped(f32::NAN, 10.0, 100, 50);
        assert_eq!(p.x, 2.0);
    }

    #[test]
    fn test_pointer_outside_margin_is_rejected() {
        assert!(SourcePosition::from_pointer(1.5, 10.0, 100, 50).is_none());
        assert!(SourcePosition::from_pointer(98.0, 10.0, 100, 50).is_none());
        assert_eq!(
            SourcePosition::from_pointer(30.0, 20.0, 100, 50),
            Some(SourcePosition::new(30.0, 20.0))
        );
        assert_eq!(
            SourcePosition::default_for(600, 450),
            SourcePosition::new(150.0, 225.0)
        );
    }
}
