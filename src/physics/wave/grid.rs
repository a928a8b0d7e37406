// src/physics/wave/grid.rs
//! Discretized scalar wave field on a row-major lattice.
//!
//! The grid owns three equally sized buffers and a rotating head index that
//! decides which buffer currently plays `current`, `previous` and `next`.
//! Stepping never allocates: after each update the head advances by one and
//! the old `previous` buffer becomes the scratch space for the next step.

use crate::math::error::{SimError, SimResult};
use crate::math::scalar_field::ScalarField2D;

/// Smallest admissible grid extent. Leaves room for the two-cell boundary
/// margin on each side plus one solved cell.
pub const MIN_GRID_EXTENT: usize = 5;

/// Default bound used by the host to flag runaway amplitudes.
pub const SANITY_BOUND: f32 = 1.0e3;

const DEFAULT_DAMPING: f32 = 0.9999;

/// Wall mask values.
pub const OPEN: f32 = 1.0;
pub const WALL: f32 = 0.0;

/// Which arena slot plays which role for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferRoles {
    pub current: usize,
    pub previous: usize,
    pub next: usize,
}

impl BufferRoles {
    fn from_head(head: usize) -> Self {
        Self {
            current: head,
            next: (head + 1) % 3,
            previous: (head + 2) % 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldGrid {
    width: usize,
    height: usize,
    buffers: [Vec<f32>; 3],
    head: usize,
    pub(super) walls: Vec<f32>,
    courant: f32,
    courant_squared: f32,
    damping: f32,
    mur_coefficient: f32,
    pub(super) time: u64,
}

impl FieldGrid {
    pub fn new(width: usize, height: usize) -> SimResult<Self> {
        if width < MIN_GRID_EXTENT || height < MIN_GRID_EXTENT {
            return Err(SimError::GridTooSmall {
                width,
                height,
                min: MIN_GRID_EXTENT,
            });
        }

        let size = width * height;
        // Courant-optimal for the 5-point stencil in 2D: same phase speed along axes and diagonals.
        let courant = std::f32::consts::FRAC_1_SQRT_2;

        Ok(Self {
            width,
            height,
            buffers: [vec![0.0; size], vec![0.0; size], vec![0.0; size]],
            head: 0,
            walls: vec![OPEN; size],
            courant,
            courant_squared: courant * courant,
            damping: DEFAULT_DAMPING,
            mur_coefficient: (courant - 1.0) / (courant + 1.0),
            time: 0,
        })
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of completed `update` calls since construction or the last reset.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn courant(&self) -> f32 {
        self.courant
    }

    pub fn courant_squared(&self) -> f32 {
        self.courant_squared
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn mur_coefficient(&self) -> f32 {
        self.mur_coefficient
    }

    pub fn roles(&self) -> BufferRoles {
        BufferRoles::from_head(self.head)
    }

    /// Field at step t.
    pub fn current(&self) -> &[f32] {
        &self.buffers[self.roles().current]
    }

    /// Field at step t-1.
    pub fn previous(&self) -> &[f32] {
        &self.buffers[self.roles().previous]
    }

    /// Obstacle mask, 1.0 open and 0.0 wall.
    pub fn walls(&self) -> &[f32] {
        &self.walls
    }

    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.walls[self.index(x, y)] == WALL
    }

    /// Current field value at `(x, y)`, 0.0 outside the grid.
    pub fn value(&self, x: usize, y: usize) -> f32 {
        if x < self.width && y < self.height {
            self.current()[self.index(x, y)]
        } else {
            0.0
        }
    }

    pub(super) fn current_mut(&mut self) -> &mut [f32] {
        let slot = self.roles().current;
        &mut self.buffers[slot]
    }

    /// Writes `value` into `current` at `(x, y)`, wall or not.
    #[cfg(test)]
    pub(crate) fn set_raw(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.current_mut()[idx] = value;
    }

    /// Mutable views of `current` and `previous` together, for edits that
    /// must keep both in sync (wall placement).
    pub(super) fn field_pair_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        let roles = self.roles();
        let [a, b, c] = &mut self.buffers;
        let mut slots = [Some(a), Some(b), Some(c)];
        match (slots[roles.current].take(), slots[roles.previous].take()) {
            (Some(current), Some(previous)) => (&mut current[..], &mut previous[..]),
            _ => unreachable!("buffer roles always form a permutation"),
        }
    }

    /// Splits the arena into `(current, previous, next, walls)` for one step.
    pub(super) fn step_views(&mut self) -> (&[f32], &[f32], &mut [f32], &[f32]) {
        let roles = self.roles();
        let [a, b, c] = &mut self.buffers;
        let mut slots = [Some(a), Some(b), Some(c)];
        match (
            slots[roles.current].take(),
            slots[roles.previous].take(),
            slots[roles.next].take(),
        ) {
            (Some(current), Some(previous), Some(next)) => {
                (&current[..], &previous[..], &mut next[..], &self.walls[..])
            }
            _ => unreachable!("buffer roles always form a permutation"),
        }
    }

    /// Publishes the freshly computed `next` buffer: previous <- current,
    /// current <- next, and the old previous becomes scratch.
    pub(super) fn rotate(&mut self) {
        self.head = (self.head + 1) % 3;
    }

    /// Zeroes the field and the step counter. The wall mask is kept.
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
        self.time = 0;
    }

    /// Largest magnitude in `current`; infinity if any value is not finite.
    pub fn max_abs(&self) -> f32 {
        self.current().iter().fold(0.0_f32, |acc, &v| {
            if v.is_finite() {
                acc.max(v.abs())
            } else {
                f32::INFINITY
            }
        })
    }

    /// Whether the field has left `[-bound, bound]` or gone non-finite.
    pub fn exceeds(&self, bound: f32) -> bool {
        self.max_abs() > bound
    }

    /// Sum of squared amplitudes over the current field.
    pub fn energy(&self) -> f64 {
        self.current()
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum()
    }
}

impl ScalarField2D for FieldGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_value(&self, x: usize, y: usize) -> f32 {
        self.value(x, y)
    }
}
