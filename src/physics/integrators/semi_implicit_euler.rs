//! Semi-implicit Euler integration method (symplectic Euler)

use super::{AccelerationField, Integrator};
use crate::physics::math::{Scalar, Vector};

/// Semi-implicit Euler integrator (also known as symplectic Euler or Euler-Cromer)
///
/// This is a first-order symplectic integrator that updates velocities
/// before positions, providing better energy conservation than explicit Euler.
///
/// ```text
/// a(t)     = F(x(t)) / m
/// v(t+dt)  = v(t) + a(t) * dt
/// x(t+dt)  = x(t) + v(t+dt) * dt
/// ```
///
/// Swapping the two updates gives explicit Euler, whose circular orbits spiral outward.
#[derive(Debug, Copy, Clone, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(
        &self,
        position: &mut Vector,
        velocity: &mut Vector,
        field: &dyn AccelerationField,
        dt: Scalar,
    ) {
        let acceleration = field.at(*position);

        // Update velocity first: v(t+dt) = v(t) + a(t) * dt
        *velocity += acceleration * dt;

        // Then update position using new velocity: x(t+dt) = x(t) + v(t+dt) * dt
        *position += *velocity * dt;
    }

    fn name(&self) -> &'static str {
        "semi_implicit_euler"
    }
}
