//! Point sources for Monte Carlo sampling
//!
//! A point source yields independent pairs `(x, y)` drawn from the unit square
//! `[0, 1) x [0, 1)`. Each worker owns its own source, seeded from the round's
//! seed base and the worker index, so no generator state is ever shared.
//!
//! # Example
//!
//! ```
//! use scatter_reduce::distribution::{PointSource, uniform::UniformSquare};
//!
//! let mut source = UniformSquare::with_seed(1234);
//! let (x, y) = source.next_point();
//! assert!((0.0..1.0).contains(&x));
//! assert!((0.0..1.0).contains(&y));
//! ```

/// Source of sample points in the unit square
///
/// Sources must be `Send` so a worker thread can take ownership of one.
/// Implementations hold all of their state; there is no global generator.
pub trait PointSource: Send {
    /// Draw the next point
    ///
    /// Both coordinates lie in `[0, 1)`.
    fn next_point(&mut self) -> (f64, f64);
}

pub mod uniform;
