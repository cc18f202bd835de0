//! Circular-orbit initialization from a nominal radius

use super::body::Body;
use super::force_law::CentralField;
use super::math::{Scalar, Vector};

/// Default scale of the out-of-plane offset produced by a body's inclination
pub const DEFAULT_INCLINATION_SCALE: Scalar = 0.1;

/// Position and velocity of a body on its initial orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    pub position: Vector,
    pub velocity: Vector,
}

/// Places bodies on circular orbits consistent with the active force law
///
/// The orbital plane is x–z. A body at phase angle θ sits at
/// `(d·cos θ, d·sin(inclination)·scale, d·sin θ)` and moves along
/// `(-sin θ, 0, cos θ)`, so every body orbits in the same sense
/// (angular momentum along −y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitInitializer {
    pub inclination_scale: Scalar,
}

impl Default for OrbitInitializer {
    fn default() -> Self {
        Self {
            inclination_scale: DEFAULT_INCLINATION_SCALE,
        }
    }
}

impl OrbitInitializer {
    pub fn new(inclination_scale: Scalar) -> Self {
        Self { inclination_scale }
    }

    /// Circular-orbit state for a body of `mass` at `distance` (m); angles in radians
    pub fn circular_state(
        &self,
        field: &CentralField<'_>,
        mass: Scalar,
        distance: Scalar,
        phase_angle: Scalar,
        inclination: Scalar,
    ) -> OrbitalState {
        let (sin_phase, cos_phase) = phase_angle.sin_cos();

        let position = Vector::new(
            distance * cos_phase,
            distance * inclination.sin() * self.inclination_scale,
            distance * sin_phase,
        );

        let acceleration = field.acceleration_magnitude(mass, distance);
        let speed = (acceleration * distance).max(0.0).sqrt();
        let velocity = Vector::new(-sin_phase, 0.0, cos_phase) * speed;

        OrbitalState { position, velocity }
    }

    /// Moves `body` onto the circular orbit given by its nominal parameters and
    /// clears its trail.
    pub fn initialize(&self, body: &mut Body, field: &CentralField<'_>) -> OrbitalState {
        let state = self.circular_state(
            field,
            body.mass,
            body.nominal_distance,
            body.phase_angle,
            body.inclination,
        );
        body.position = state.position;
        body.velocity = state.velocity;
        body.trail.clear(state.position);
        state
    }
}
