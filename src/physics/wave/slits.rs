// src/physics/wave/slits.rs
use super::grid::{FieldGrid, OPEN, WALL};
use bevy::log::debug;

/// Half thickness of the barrier: wall cells span `wall_x - 2 ..= wall_x + 2`.
pub const WALL_HALF_THICKNESS: i64 = 2;

impl FieldGrid {
    /// Rebuilds the double-slit barrier at column `wall_x`.
    ///
    /// The mask is first reset to fully open, so consecutive calls never
    /// accumulate. A row is an aperture when it lies closer than
    /// `slit_width / 2` to either `center - gap / 2` or `center + gap / 2`;
    /// every other row is walled over the full barrier thickness and the field
    /// in those cells is zeroed so no energy survives inside the obstacle.
    ///
    /// A column outside the grid leaves the grid untouched.
    pub fn set_slits(&mut self, gap: f32, slit_width: f32, wall_x: f32) {
        let x = wall_x.floor();
        if !x.is_finite() || x < 0.0 || x >= self.width() as f32 {
            debug!("Ignoring slit barrier at column {wall_x}: outside 0..{}", self.width());
            return;
        }
        let x = x as i64;

        let width = self.width();
        let height = self.height();
        let center_y = height as f32 / 2.0;
        let half_width = slit_width / 2.0;
        let upper = center_y - gap / 2.0;
        let lower = center_y + gap / 2.0;

        self.walls.fill(OPEN);

        let mut wall_cells = Vec::new();
        for y in 0..height {
            let yf = y as f32;
            let is_hole = (yf - upper).abs() < half_width || (yf - lower).abs() < half_width;
            if is_hole {
                continue;
            }
            for dx in -WALL_HALF_THICKNESS..=WALL_HALF_THICKNESS {
                let wx = x + dx;
                if wx >= 0 && (wx as usize) < width {
                    wall_cells.push(self.index(wx as usize, y));
                }
            }
        }

        for &idx in &wall_cells {
            self.walls[idx] = WALL;
        }
        let (current, previous) = self.field_pair_mut();
        for &idx in &wall_cells {
            current[idx] = 0.0;
            previous[idx] = 0.0;
        }
    }

    /// Rows of the barrier column that are open after `set_slits`.
    #[cfg(test)]
    pub(crate) fn aperture_rows(&self, wall_x: usize) -> Vec<usize> {
        (0..self.height())
            .filter(|&y| !self.is_wall(wall_x, y))
            .collect()
    }
}
