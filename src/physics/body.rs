//! Orbiting bodies and the handles used to address them

use super::math::{Scalar, Vector};
use super::trail::TrailHistory;
use super::units::m_to_km;
use std::fmt;

/// Stable handle for a body owned by a [`SimulationEngine`](super::engine::SimulationEngine)
///
/// Handles are never reused; after a full reset the old handles are unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u32);

impl BodyId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Physical state of one orbiting body, in SI units
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) name: String,
    pub(crate) mass: Scalar,
    /// Nominal orbital radius (m) used when the orbit is (re)initialized
    pub(crate) nominal_distance: Scalar,
    /// Radians
    pub(crate) phase_angle: Scalar,
    /// Radians, fixed at creation
    pub(crate) inclination: Scalar,
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) trail: TrailHistory,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn nominal_distance(&self) -> Scalar {
        self.nominal_distance
    }

    pub fn phase_angle(&self) -> Scalar {
        self.phase_angle
    }

    pub fn inclination(&self) -> Scalar {
        self.inclination
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn trail(&self) -> &TrailHistory {
        &self.trail
    }

    /// Live distance from the center, m
    pub fn distance_from_center(&self) -> Scalar {
        self.position.length()
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            name: self.name.clone(),
            mass: self.mass,
            position: self.position,
            velocity: self.velocity,
            distance_from_center: self.distance_from_center(),
            nominal_distance_km: m_to_km(self.nominal_distance),
            trail_len: self.trail.len(),
        }
    }
}

/// Read-only copy of a body's state for display
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    /// kg
    pub mass: Scalar,
    /// m
    pub position: Vector,
    /// m/s
    pub velocity: Vector,
    /// m
    pub distance_from_center: Scalar,
    pub nominal_distance_km: Scalar,
    pub trail_len: usize,
}

impl BodySnapshot {
    pub fn distance_from_center_km(&self) -> Scalar {
        m_to_km(self.distance_from_center)
    }

    pub fn speed(&self) -> Scalar {
        self.velocity.length()
    }
}

/// Edits to apply to a body; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyUpdate {
    pub name: Option<String>,
    /// kg
    pub mass: Option<Scalar>,
    pub distance_km: Option<Scalar>,
}

impl BodyUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mass(mut self, mass: Scalar) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn distance_km(mut self, distance_km: Scalar) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    /// Whether the edit moves the body onto a new orbit
    pub fn changes_orbit(&self) -> bool {
        self.mass.is_some() || self.distance_km.is_some()
    }
}
