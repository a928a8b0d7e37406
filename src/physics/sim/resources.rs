use crate::physics::wave::{FieldGrid, IntensityProfile, SourcePosition};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Knobs the control panel edits between ticks.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    // --- Source ---
    /// Angular frequency of the source in radians per step.
    pub frequency: f32,
    pub wave_enabled: bool,

    // --- Slit geometry (cells) ---
    pub slit_gap: f32,
    pub slit_width: f32,

    // --- Screen ---
    /// Probe column as percent of the grid width.
    pub screen_position: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            frequency: 0.07,
            wave_enabled: true,
            slit_gap: 50.0,
            slit_width: 15.0,
            screen_position: 85.0,
        }
    }
}

impl SimulationParameters {
    pub const FREQUENCY_RANGE: std::ops::RangeInclusive<f32> = 0.05..=0.1;
    pub const SLIT_GAP_RANGE: std::ops::RangeInclusive<f32> = 0.0..=200.0;
    pub const SLIT_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 2.0..=40.0;
    pub const SCREEN_RANGE: std::ops::RangeInclusive<f32> = 55.0..=95.0;

    /// Freezes the values one tick needs so every sub-step sees the same inputs.
    pub fn snapshot(&self, source: SourcePosition, amplitude: f32) -> TickParameters {
        TickParameters {
            frequency: self.frequency,
            amplitude,
            source_enabled: self.wave_enabled,
            source,
        }
    }
}

/// Immutable per-tick copy of the parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParameters {
    pub frequency: f32,
    pub amplitude: f32,
    pub source_enabled: bool,
    pub source: SourcePosition,
}

/// Slit geometry last written into the wall mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlitGeometry {
    pub gap: f32,
    pub width: f32,
    pub wall_x: f32,
}

/// The solver plus everything the tick needs to drive it.
#[derive(Resource, Debug)]
pub struct WaveSimulation {
    pub grid: FieldGrid,
    pub source: SourcePosition,
    pub amplitude: f32,
    pub steps_per_frame: u32,
    /// Barrier column as percent of the grid width.
    pub wall_position: f32,
    pub applied_slits: Option<SlitGeometry>,
}

impl WaveSimulation {
    pub fn new(grid: FieldGrid, amplitude: f32, steps_per_frame: u32, wall_position: f32) -> Self {
        let source = SourcePosition::default_for(grid.width(), grid.height());
        Self {
            grid,
            source,
            amplitude,
            steps_per_frame,
            wall_position,
            applied_slits: None,
        }
    }

    pub fn wall_column(&self) -> f32 {
        (self.grid.width() as f32 * self.wall_position / 100.0).floor()
    }

    /// Rewrites the barrier when the requested geometry differs from the
    /// applied one. Returns whether the mask changed.
    pub fn sync_slits(&mut self, params: &SimulationParameters) -> bool {
        let wanted = SlitGeometry {
            gap: params.slit_gap,
            width: params.slit_width,
            wall_x: self.wall_column(),
        };
        if self.applied_slits == Some(wanted) {
            return false;
        }
        self.grid.set_slits(wanted.gap, wanted.width, wanted.wall_x);
        self.applied_slits = Some(wanted);
        true
    }

    /// Runs the configured number of sub-steps with one parameter snapshot.
    pub fn advance(&mut self, tick: &TickParameters) {
        for _ in 0..self.steps_per_frame {
            if tick.source_enabled {
                self.grid
                    .add_source(tick.source.x, tick.source.y, tick.amplitude, tick.frequency);
            }
            self.grid.update();
        }
    }

    /// Moves the source, keeping it clear of the edges.
    pub fn place_source(&mut self, x: f32, y: f32) {
        self.source = SourcePosition::clamped(x, y, self.grid.width(), self.grid.height());
    }
}

/// Set by the control panel, consumed by `handle_reset_request_system`.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ResetRequest(pub bool);

/// Running average at the probe column, fed once per rendered frame.
#[derive(Resource, Debug, Clone)]
pub struct ScreenIntensity(pub IntensityProfile);
