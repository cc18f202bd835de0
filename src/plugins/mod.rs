//! Headless Bevy plugins driving the orbit engine

pub mod report;
pub mod simulation;

pub use report::ReportPlugin;
pub use simulation::{Simulation, SimulationPlugin, SimulationSet};
