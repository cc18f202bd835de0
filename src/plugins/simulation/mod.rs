//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the engine as a resource, applies [`SimulationCommand`]s and drives
//! the engine once per frame from the real-time clock.

use crate::prelude::*;

mod actions;
mod physics;

pub use actions::handle_simulation_commands;
pub use physics::advance_simulation;

/// The engine, as a Bevy resource
#[derive(Resource, Deref, DerefMut, Debug)]
pub struct Simulation(pub SimulationEngine);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Advance,
    Report,
}

/// Inserts the engine built from `config` and the systems that drive it.
///
/// Without an explicit config the user config file is loaded at build time.
#[derive(Default)]
pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
}

impl SimulationPlugin {
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let engine = SimulationEngine::from_config(&config);
        info!(
            "Simulating {} bodies with '{}' at x{}",
            engine.bodies().len(),
            engine.formula(),
            engine.time_scale()
        );

        app.insert_resource(FrameClock::new(config.time.max_frame_delta));
        app.insert_resource(Simulation(engine));
        app.insert_resource(config);

        app.add_event::<SimulationCommand>();
        app.add_event::<SimulationFeedback>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Commands,
                SimulationSet::Advance,
                SimulationSet::Report,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                handle_simulation_commands.in_set(SimulationSet::Commands),
                advance_simulation.in_set(SimulationSet::Advance),
            ),
        );
    }
}
