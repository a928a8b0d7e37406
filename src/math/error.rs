// src/math/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Grid too small: {width}x{height}, each extent must be at least {min}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("Could not read configuration file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse configuration file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_too_small_message() {
        let err = SimError::GridTooSmall {
            width: 3,
            height: 10,
            min: 5,
        };
        assert_eq!(
            err.to_string(),
            "Grid too small: 3x10, each extent must be at least 5"
        );
    }
}
