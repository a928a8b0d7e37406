// src/math/scalar_field.rs

/// Read-only view of a two-dimensional scalar field stored row-major.
///
/// The intensity probe samples through this trait so it does not depend on
/// how the solver keeps its buffers.
pub trait ScalarField2D {
    /// Width of the field in cells.
    fn width(&self) -> usize;

    /// Height of the field in cells.
    fn height(&self) -> usize;

    /// Value at cell `(x, y)`. Returns 0.0 outside the field.
    fn get_value(&self, x: usize, y: usize) -> f32;

    /// Samples the whole column `x`, top to bottom.
    fn column(&self, x: usize) -> impl Iterator<Item = f32> + '_ {
        (0..self.height()).map(move |y| self.get_value(x, y))
    }
}
