//! Numerical integration methods for the orbit engine

use crate::physics::math::{Scalar, Vector};
use std::fmt;

pub mod semi_implicit_euler;

pub use semi_implicit_euler::SemiImplicitEuler;

/// Acceleration felt by a body as a function of its position
pub trait AccelerationField {
    fn at(&self, position: Vector) -> Vector;
}

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Advance a single body's state by one time step
    ///
    /// # Arguments
    /// * `position` - Mutable reference to position
    /// * `velocity` - Mutable reference to velocity vector
    /// * `field` - Acceleration field acting on the body
    /// * `dt` - Time step
    fn step(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    );

    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
