// src/physics/wave/stepper.rs
use super::grid::{FieldGrid, WALL};

/// Interior cells are solved this far from every edge; the ring at distance 1
/// carries the absorbing boundary and the ring at distance 0 is pinned to zero.
pub const BOUNDARY_MARGIN: usize = 2;

impl FieldGrid {
    /// Advances the field by one timestep.
    ///
    /// Interior cells follow the leapfrog wave equation with a 5-point
    /// Laplacian; wall neighbours are read as zero so fronts reflect off
    /// obstacle faces. The ring one cell in from the edge applies Mur's
    /// first-order absorbing condition, the outermost ring is held at zero,
    /// and finally the buffer roles rotate and `time` advances.
    pub fn update(&mut self) {
        let w = self.width();
        let h = self.height();
        let c2 = self.courant_squared();
        let damping = self.damping();
        let mur = self.mur_coefficient();
        let (u, u_prev, u_next, walls) = self.step_views();

        let open = |i: usize| walls[i] != WALL;

        for y in BOUNDARY_MARGIN..h - BOUNDARY_MARGIN {
            let row = y * w;
            for x in BOUNDARY_MARGIN..w - BOUNDARY_MARGIN {
                let i = row + x;
                if !open(i) {
                    u_next[i] = 0.0;
                    continue;
                }

                let left = if open(i - 1) { u[i - 1] } else { 0.0 };
                let right = if open(i + 1) { u[i + 1] } else { 0.0 };
                let up = if open(i - w) { u[i - w] } else { 0.0 };
                let down = if open(i + w) { u[i + w] } else { 0.0 };

                let laplacian = left + right + up + down - 4.0 * u[i];
                u_next[i] = (2.0 * u[i] - u_prev[i] + c2 * laplacian) * damping;
            }
        }

        // Mur ABC, corners of the ring excluded.
        let mut absorb = |b: usize, adj: usize| {
            u_next[b] = u[adj] + mur * (u_next[adj] - u[b]);
        };
        for y in BOUNDARY_MARGIN..h - BOUNDARY_MARGIN {
            let left = y * w + 1;
            absorb(left, left + 1);
            let right = y * w + (w - 2);
            absorb(right, right - 1);
        }
        for x in BOUNDARY_MARGIN..w - BOUNDARY_MARGIN {
            let top = w + x;
            absorb(top, top + w);
            let bottom = (h - 2) * w + x;
            absorb(bottom, bottom - w);
        }

        // Outer ring: fixed zero.
        for x in 0..w {
            u_next[x] = 0.0;
            u_next[(h - 1) * w + x] = 0.0;
        }
        for y in 0..h {
            u_next[y * w] = 0.0;
            u_next[y * w + w - 1] = 0.0;
        }

        self.rotate();
        self.time += 1;
    }
}
