//! Orbitdrift prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::{BodyConfig, SimulationConfig};

// Internal re-exports - Events
pub use crate::events::{SimulationCommand, SimulationFeedback};

// Internal re-exports - Frame driving
pub use crate::frame_clock::FrameClock;

// Internal re-exports - Physics
pub use crate::physics::body::{BodyId, BodySnapshot, BodyUpdate};
pub use crate::physics::engine::{SimulationEngine, ValidationError};
pub use crate::physics::formula::FormulaError;
pub use crate::physics::math::{Scalar, Vector};
