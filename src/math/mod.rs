pub mod error;
pub mod scalar_field;

// Re-exports
pub use error::{SimError, SimResult};
pub use scalar_field::ScalarField2D;
