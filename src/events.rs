//! Centralized event definitions
//!
//! Events are how a presentation layer talks to the simulation:
//! - [`SimulationCommand`] asks the engine to change something
//! - [`SimulationFeedback`] reports whether a fallible command took effect

use crate::physics::body::{BodyId, BodyUpdate};
use crate::physics::engine::ValidationError;
use crate::physics::formula::FormulaError;
use crate::physics::math::Scalar;
use bevy::prelude::*;

#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimulationCommand {
    TogglePause,
    SetPaused(bool),
    SetTimeScale(Scalar),
    /// Multiply the time scale, e.g. `2.0` for "faster" and `0.5` for "slower"
    ScaleTime(Scalar),
    SetFormula(String),
    ResetFormula,
    UpdateBody { id: BodyId, update: BodyUpdate },
    RestoreDefaults,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimulationFeedback {
    FormulaApplied(String),
    FormulaRejected { formula: String, error: FormulaError },
    BodyUpdated(BodyId),
    BodyUpdateRejected { id: BodyId, error: ValidationError },
}
