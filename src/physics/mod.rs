//! Orbit physics
//!
//! Bodies orbit a fixed central mass at the origin under a configurable force
//! law, integrated with semi-implicit Euler. Nothing here depends on rendering.

pub mod body;
pub mod clock;
pub mod engine;
pub mod force_law;
pub mod formula;
pub mod integrators;
pub mod math;
pub mod orbit;
pub mod trail;
pub mod units;

pub use body::{Body, BodyId, BodySnapshot, BodyUpdate};
pub use engine::{SimulationEngine, ValidationError};
pub use formula::FormulaError;
