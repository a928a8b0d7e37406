// ./src/config.rs
use crate::math::{SimError, SimResult};
use crate::physics::sim::resources::{SimulationParameters, WaveSimulation};
use crate::physics::wave::{FieldGrid, MIN_GRID_EXTENT};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "DOUBLE_SLIT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "double_slit.json";

/// Startup settings. Everything is optional in the file; missing keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub steps_per_frame: u32,
    pub amplitude: f32,
    /// Barrier column as percent of the grid width.
    pub wall_position: f32,
    pub parameters: SimulationParameters,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: 600,
            grid_height: 450,
            steps_per_frame: 3,
            amplitude: 2.0,
            wall_position: 50.0,
            parameters: SimulationParameters::default(),
        }
    }
}

impl SimulationConfig {
    /// Path from `DOUBLE_SLIT_CONFIG`, else `double_slit.json`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Reads and validates `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SimError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_json(&text).map_err(|e| match e {
            SimError::ConfigParse { source, .. } => SimError::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|source| SimError::ConfigParse {
                path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.grid_width < MIN_GRID_EXTENT || self.grid_height < MIN_GRID_EXTENT {
            return Err(SimError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_EXTENT,
            });
        }
        if self.steps_per_frame == 0 {
            return Err(SimError::InvalidConfig {
                message: "steps_per_frame must be at least 1".to_string(),
            });
        }
        if !(0.0..100.0).contains(&self.wall_position) {
            return Err(SimError::InvalidConfig {
                message: format!(
                    "wall_position {} is outside 0..100 percent",
                    self.wall_position
                ),
            });
        }
        if !self.amplitude.is_finite() {
            return Err(SimError::InvalidConfig {
                message: "amplitude must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Allocates the grid and wraps it with the configured drive settings.
    pub fn build_simulation(&self) -> SimResult<WaveSimulation> {
        let grid = FieldGrid::new(self.grid_width, self.grid_height)?;
        Ok(WaveSimulation::new(
            grid,
            self.amplitude,
            self.steps_per_frame,
            self.wall_position,
        ))
    }
}
