// src/physics/wave/mod.rs

pub mod grid;
pub mod intensity;
pub mod slits;
pub mod source;
pub mod stepper;

pub use self::grid::{BufferRoles, FieldGrid, MIN_GRID_EXTENT, SANITY_BOUND};
pub use self::intensity::{IntensityProfile, probe_column};
pub use self::source::SourcePosition;
