// src/physics/wave/intensity.rs
//! Time-averaged intensity at the probe ("screen") column.
//!
//! The raw field oscillates in sign, so a single squared snapshot is noisy.
//! The profile keeps an exponential moving average of the squared amplitude
//! per row, which converges to the interference pattern.

use crate::math::scalar_field::ScalarField2D;

/// Weight kept from the previous average each frame.
pub const INTENSITY_DECAY: f32 = 0.92;

/// Lower bound for the normalization peak, keeps a quiet field from dividing by zero.
pub const INTENSITY_FLOOR: f32 = 0.001;

/// Converts a screen position in percent of the width into a column index,
/// clamped to the grid.
pub fn probe_column(width: usize, percent: f32) -> usize {
    if width == 0 {
        return 0;
    }
    let column = (width as f32 * (percent / 100.0)).floor();
    if column.is_finite() && column > 0.0 {
        (column as usize).min(width - 1)
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntensityProfile {
    accum: Vec<f32>,
    column: Option<usize>,
    decay: f32,
}

impl IntensityProfile {
    pub fn new(height: usize) -> Self {
        Self {
            accum: vec![0.0; height],
            column: None,
            decay: INTENSITY_DECAY,
        }
    }

    /// Folds one frame of the field at the probe column into the average.
    ///
    /// Moving the probe to another column, or a field with a different
    /// height, discards the old samples first.
    pub fn sample<F: ScalarField2D>(&mut self, field: &F, screen_percent: f32) {
        let column = probe_column(field.width(), screen_percent);
        if self.column != Some(column) || self.accum.len() != field.height() {
            self.accum.clear();
            self.accum.resize(field.height(), 0.0);
            self.column = Some(column);
        }

        let keep = self.decay;
        let gain = 1.0 - keep;
        for (acc, amp) in self.accum.iter_mut().zip(field.column(column)) {
            let amp = if amp.is_finite() { amp } else { 0.0 };
            *acc = *acc * keep + amp * amp * gain;
        }
    }

    pub fn reset(&mut self) {
        self.accum.fill(0.0);
    }

    /// Column sampled by the last call to `sample`.
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn len(&self) -> usize {
        self.accum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accum.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.accum
    }

    /// Largest accumulated value, never below `INTENSITY_FLOOR`.
    pub fn peak(&self) -> f32 {
        self.accum.iter().copied().fold(INTENSITY_FLOOR, f32::max)
    }

    /// `sqrt(value / peak)` for one row, in `[0, 1]`.
    pub fn normalized(&self, row: usize) -> f32 {
        self.accum
            .get(row)
            .map_or(0.0, |&v| (v / self.peak()).sqrt())
    }

    /// Rows that are strict local maxima above `threshold` times the peak.
    pub fn fringe_rows(&self, threshold: f32) -> Vec<usize> {
        let floor = self.peak() * threshold;
        self.accum
            .windows(3)
            .enumerate()
            .filter(|(_, w)| w[1] > w[0] && w[1] >= w[2] && w[1] > floor)
            .map(|(i, _)| i + 1)
            .collect()
    }
}
