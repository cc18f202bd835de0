//! Force laws between the central body and an orbiting body

use super::formula::{Bindings, Formula, FormulaError};
use super::math::{Scalar, Vector, VectorExt, finite_or_zero};
use bevy::log::trace;
use std::fmt::Debug;

/// Text reported for the built-in inverse-square law
pub const INVERSE_SQUARE_EXPRESSION: &str = "G * m1 * m2 / r^2";

/// Magnitude of the attraction between the central body and one orbiting body
pub trait ForceLaw: Debug + Send + Sync {
    fn magnitude(
        &self,
        gravitational_constant: Scalar,
        central_mass: Scalar,
        body_mass: Scalar,
        distance: Scalar,
    ) -> Scalar;

    /// The law written in formula syntax
    fn expression(&self) -> &str;
}

/// Newton's law of universal gravitation, `G * m1 * m2 / r^2`
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseSquare;

impl ForceLaw for InverseSquare {
    #[inline]
    fn magnitude(
        &self,
        gravitational_constant: Scalar,
        central_mass: Scalar,
        body_mass: Scalar,
        distance: Scalar,
    ) -> Scalar {
        gravitational_constant * central_mass * body_mass / (distance * distance)
    }

    fn expression(&self) -> &str {
        INVERSE_SQUARE_EXPRESSION
    }
}

/// A force law backed by a user formula
///
/// An evaluation fault yields zero force for that evaluation. It never falls
/// back to the inverse-square law.
#[derive(Debug, Clone)]
pub struct FormulaLaw {
    formula: Formula,
}

impl FormulaLaw {
    pub fn new(formula: Formula) -> Self {
        Self { formula }
    }

    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        Formula::parse(source).map(Self::new)
    }
}

impl ForceLaw for FormulaLaw {
    fn magnitude(
        &self,
        gravitational_constant: Scalar,
        central_mass: Scalar,
        body_mass: Scalar,
        distance: Scalar,
    ) -> Scalar {
        let bindings = Bindings {
            g: gravitational_constant,
            m1: central_mass,
            m2: body_mass,
            r: distance,
        };
        match self.formula.evaluate(&bindings) {
            Ok(force) => force,
            Err(fault) => {
                trace!(
                    "Formula '{}' failed at r = {distance}: {fault}; applying no force",
                    self.formula
                );
                0.0
            }
        }
    }

    fn expression(&self) -> &str {
        self.formula.source()
    }
}

/// The attracting center: constants plus the active force law
///
/// The center sits at the origin. Separations are floored to `min_separation`
/// before they reach the law.
#[derive(Debug, Clone, Copy)]
pub struct CentralField<'a> {
    pub gravitational_constant: Scalar,
    pub central_mass: Scalar,
    pub min_separation: Scalar,
    pub law: &'a dyn ForceLaw,
}

impl CentralField<'_> {
    /// Force magnitude on a body of `body_mass` at `distance`, zero if the law misbehaves
    pub fn force_magnitude(&self, body_mass: Scalar, distance: Scalar) -> Scalar {
        let distance = distance.max(self.min_separation);
        finite_or_zero(self.law.magnitude(
            self.gravitational_constant,
            self.central_mass,
            body_mass,
            distance,
        ))
    }

    /// `|force| / mass`; the sign of the law is ignored
    pub fn acceleration_magnitude(&self, body_mass: Scalar, distance: Scalar) -> Scalar {
        finite_or_zero(self.force_magnitude(body_mass, distance).abs() / body_mass)
    }

    /// Acceleration of a body of `body_mass` at `position`, always pointing at the center
    pub fn acceleration_at(&self, body_mass: Scalar, position: Vector) -> Vector {
        let to_center = -position;
        let magnitude = self.acceleration_magnitude(body_mass, to_center.length());
        (to_center.normalized() * magnitude).finite_or_zero()
    }
}
