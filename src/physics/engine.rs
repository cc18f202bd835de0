//! The orbit engine: owns the bodies, the active force law and the clock

use super::body::{Body, BodyId, BodySnapshot, BodyUpdate};
use super::clock::SimulationClock;
use super::force_law::{CentralField, ForceLaw, FormulaLaw, InverseSquare};
use super::formula::FormulaError;
use super::integrators::{AccelerationField, Integrator, SemiImplicitEuler};
use super::math::{Scalar, Vector};
use super::orbit::OrbitInitializer;
use super::trail::TrailHistory;
use super::units::km_to_m;
use crate::config::{BodyConfig, SimulationConfig};
use bevy::log::{debug, info, warn};
use std::fmt;

/// Reasons an edit to the body collection is refused
///
/// A refused edit leaves the engine exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Mass must be a positive, finite number of kilograms
    InvalidMass(Scalar),
    /// Nominal distance must be a positive, finite number of kilometres
    InvalidDistance(Scalar),
    EmptyName,
    UnknownBody(BodyId),
    InvalidParameter { name: &'static str, value: Scalar },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidMass(mass) => {
                write!(f, "Mass must be positive and finite, got {mass}")
            }
            ValidationError::InvalidDistance(distance) => {
                write!(f, "Distance must be positive and finite, got {distance} km")
            }
            ValidationError::EmptyName => write!(f, "Name must not be empty"),
            ValidationError::UnknownBody(id) => write!(f, "No body with handle {id}"),
            ValidationError::InvalidParameter { name, value } => {
                write!(f, "Parameter {name} must be finite, got {value}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(name)
    }
}

fn validate_mass(mass: Scalar) -> Result<Scalar, ValidationError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(ValidationError::InvalidMass(mass))
    }
}

fn validate_distance_km(distance_km: Scalar) -> Result<Scalar, ValidationError> {
    if distance_km.is_finite() && distance_km > 0.0 {
        Ok(distance_km)
    } else {
        Err(ValidationError::InvalidDistance(distance_km))
    }
}

fn validate_finite(name: &'static str, value: Scalar) -> Result<Scalar, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidParameter { name, value })
    }
}

/// Constants of the central field that do not depend on the force law
#[derive(Debug, Clone, Copy, PartialEq)]
struct FieldConstants {
    gravitational_constant: Scalar,
    central_mass: Scalar,
    min_separation: Scalar,
}

impl FieldConstants {
    fn with_law(self, law: &dyn ForceLaw) -> CentralField<'_> {
        CentralField {
            gravitational_constant: self.gravitational_constant,
            central_mass: self.central_mass,
            min_separation: self.min_separation,
            law,
        }
    }
}

/// The central field as felt by one body
struct BodyAcceleration<'a> {
    field: CentralField<'a>,
    mass: Scalar,
}

impl AccelerationField for BodyAcceleration<'_> {
    fn at(&self, position: Vector) -> Vector {
        self.field.acceleration_at(self.mass, position)
    }
}

fn force_law_from_config(formula: Option<&str>) -> Box<dyn ForceLaw> {
    match formula {
        None => Box::new(InverseSquare),
        Some(text) => match FormulaLaw::parse(text) {
            Ok(law) => Box::new(law),
            Err(e) => {
                warn!("Configured formula '{text}' is invalid: {e}. Using inverse-square law.");
                Box::new(InverseSquare)
            }
        },
    }
}

/// Orbit simulation engine
///
/// Every body orbits a fixed central mass at the origin. Bodies do not
/// attract each other, so a step is linear in the number of bodies.
///
/// The engine is driven by calling [`step`](Self::step) with the wall-clock
/// time since the previous frame. Measuring that delta, and re-anchoring it
/// when the simulation resumes, is the caller's job.
#[derive(Debug)]
pub struct SimulationEngine {
    bodies: Vec<Body>,
    force_law: Box<dyn ForceLaw>,
    integrator: Box<dyn Integrator>,
    constants: FieldConstants,
    orbit: OrbitInitializer,
    trail_max_points: usize,
    trail_min_spacing: Scalar,
    clock: SimulationClock,
    initial_time_scale: Scalar,
    default_formula: Option<String>,
    default_bodies: Vec<BodyConfig>,
    next_id: u32,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl SimulationEngine {
    /// An engine with the configured constants and no bodies
    pub fn new(config: &SimulationConfig) -> Self {
        let time = &config.time;
        let mut clock = SimulationClock::new(time.time_scale, time.min_time_scale, time.max_time_scale);
        clock.set_paused(time.start_paused);

        Self {
            bodies: Vec::new(),
            force_law: force_law_from_config(config.physics.formula.as_deref()),
            integrator: Box::new(SemiImplicitEuler),
            constants: FieldConstants {
                gravitational_constant: config.physics.gravitational_constant,
                central_mass: config.physics.central_mass,
                min_separation: config.physics.min_separation,
            },
            orbit: OrbitInitializer::new(config.physics.inclination_scale),
            trail_max_points: config.trails.max_points,
            trail_min_spacing: config.trails.min_point_distance,
            initial_time_scale: clock.time_scale(),
            clock,
            default_formula: config.physics.formula.clone(),
            default_bodies: config.bodies.clone(),
            next_id: 0,
        }
    }

    /// An engine populated with the configured body table
    pub fn from_config(config: &SimulationConfig) -> Self {
        let mut engine = Self::new(config);
        engine.spawn_default_bodies();
        engine
    }

    fn spawn_default_bodies(&mut self) {
        let table = std::mem::take(&mut self.default_bodies);
        for body in &table {
            if let Err(e) = self.create_body(
                &body.name,
                body.mass,
                body.distance_km,
                body.phase_degrees,
                body.inclination_degrees,
            ) {
                warn!("Skipping configured body '{}': {}", body.name, e);
            }
        }
        self.default_bodies = table;
    }

    fn field(&self) -> CentralField<'_> {
        self.constants.with_law(self.force_law.as_ref())
    }

    /// Adds a body on a circular orbit and returns its handle.
    ///
    /// Angles are in degrees; the inclination is fixed for the body's lifetime.
    pub fn create_body(
        &mut self,
        name: &str,
        mass: Scalar,
        distance_km: Scalar,
        phase_degrees: Scalar,
        inclination_degrees: Scalar,
    ) -> Result<BodyId, ValidationError> {
        let name = validate_name(name)?;
        let mass = validate_mass(mass)?;
        let distance_km = validate_distance_km(distance_km)?;
        let phase_degrees = validate_finite("phase_degrees", phase_degrees)?;
        let inclination_degrees = validate_finite("inclination_degrees", inclination_degrees)?;

        let id = BodyId(self.next_id);
        self.next_id += 1;

        let mut body = Body {
            id,
            name: name.to_owned(),
            mass,
            nominal_distance: km_to_m(distance_km),
            phase_angle: phase_degrees.to_radians(),
            inclination: inclination_degrees.to_radians(),
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            trail: TrailHistory::new(self.trail_max_points, self.trail_min_spacing, Vector::ZERO),
        };
        self.orbit.initialize(&mut body, &self.field());

        debug!(
            "Created {} '{}' at {} km, speed {:.1} m/s",
            id,
            body.name,
            distance_km,
            body.velocity.length()
        );
        self.bodies.push(body);
        Ok(id)
    }

    /// Advances every body by `delta_seconds` of wall-clock time times the time scale.
    ///
    /// Does nothing while paused or when `delta_seconds` is not positive.
    pub fn step(&mut self, delta_seconds: Scalar) {
        let Some(dt) = self.clock.advance(delta_seconds) else {
            return;
        };

        let field = self.constants.with_law(self.force_law.as_ref());
        for body in &mut self.bodies {
            let acceleration = BodyAcceleration {
                field,
                mass: body.mass,
            };
            self.integrator
                .step(&mut body.position, &mut body.velocity, &acceleration, dt);
            body.trail.maybe_record(body.position);
        }
    }

    /// Returns the scale actually applied after clamping.
    pub fn set_time_scale(&mut self, time_scale: Scalar) -> Scalar {
        self.clock.set_time_scale(time_scale)
    }

    /// Multiplies the time scale by `factor`, clamped like [`set_time_scale`](Self::set_time_scale).
    pub fn scale_time(&mut self, factor: Scalar) -> Scalar {
        self.clock.scale_time(factor)
    }

    pub fn time_scale(&self) -> Scalar {
        self.clock.time_scale()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn elapsed_seconds(&self) -> Scalar {
        self.clock.elapsed_seconds()
    }

    /// Replaces the force law with `text` and puts every body back on a fresh orbit.
    ///
    /// An invalid formula is rejected and nothing changes.
    pub fn set_formula(&mut self, text: &str) -> Result<(), FormulaError> {
        let law = match FormulaLaw::parse(text) {
            Ok(law) => law,
            Err(e) => {
                warn!("Rejected formula '{text}': {e}");
                return Err(e);
            }
        };
        info!("Applying formula '{}'", law.expression());
        self.replace_force_law(Box::new(law));
        Ok(())
    }

    /// Returns to the inverse-square law.
    pub fn reset_formula(&mut self) {
        info!("Restoring inverse-square law");
        self.replace_force_law(Box::new(InverseSquare));
    }

    /// Text of the active force law
    pub fn formula(&self) -> &str {
        self.force_law.expression()
    }

    fn replace_force_law(&mut self, law: Box<dyn ForceLaw>) {
        self.force_law = law;
        self.reinitialize_all();
    }

    fn reinitialize_all(&mut self) {
        let field = self.constants.with_law(self.force_law.as_ref());
        for body in &mut self.bodies {
            self.orbit.initialize(body, &field);
        }
    }

    /// Applies a name, mass or distance edit.
    ///
    /// Every field is checked before anything is written. A mass or distance
    /// change puts the body back on a circular orbit and clears its trail; a
    /// rename alone leaves its motion alone.
    pub fn update_body(&mut self, id: BodyId, update: BodyUpdate) -> Result<(), ValidationError> {
        let result = self.try_update_body(id, update);
        if let Err(e) = &result {
            warn!("Rejected update to {id}: {e}");
        }
        result
    }

    fn try_update_body(&mut self, id: BodyId, update: BodyUpdate) -> Result<(), ValidationError> {
        let index = self.index_of(id)?;
        let name = update.name.as_deref().map(validate_name).transpose()?;
        let mass = update.mass.map(validate_mass).transpose()?;
        let distance_km = update.distance_km.map(validate_distance_km).transpose()?;

        let field = self.constants.with_law(self.force_law.as_ref());
        let body = &mut self.bodies[index];
        if let Some(name) = name {
            body.name = name.to_owned();
        }
        if let Some(mass) = mass {
            body.mass = mass;
        }
        if let Some(distance_km) = distance_km {
            body.nominal_distance = km_to_m(distance_km);
        }
        if update.changes_orbit() {
            self.orbit.initialize(body, &field);
        }

        debug!("Updated {} '{}'", id, body.name);
        Ok(())
    }

    fn index_of(&self, id: BodyId) -> Result<usize, ValidationError> {
        self.bodies
            .iter()
            .position(|body| body.id == id)
            .ok_or(ValidationError::UnknownBody(id))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id == id)
    }

    /// Bodies in creation order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_ids(&self) -> Vec<BodyId> {
        self.bodies.iter().map(Body::id).collect()
    }

    pub fn snapshot(&self, id: BodyId) -> Result<BodySnapshot, ValidationError> {
        self.body(id)
            .map(Body::snapshot)
            .ok_or(ValidationError::UnknownBody(id))
    }

    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    pub fn trail(&self, id: BodyId) -> Result<&TrailHistory, ValidationError> {
        self.body(id)
            .map(Body::trail)
            .ok_or(ValidationError::UnknownBody(id))
    }

    /// Discards every body and rebuilds the configured table.
    ///
    /// The configured formula and time scale come back, elapsed time restarts
    /// at zero and the old handles become unknown. Pause state is kept.
    pub fn restore_defaults(&mut self) {
        info!("Restoring default bodies");
        self.bodies.clear();
        self.force_law = force_law_from_config(self.default_formula.as_deref());
        self.clock.set_time_scale(self.initial_time_scale);
        self.clock.reset();
        self.spawn_default_bodies();
    }
}
