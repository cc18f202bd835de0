//! Action handlers for simulation commands

use super::Simulation;
use crate::prelude::*;

/// Pausing and resuming both re-anchor the frame clock so no paused time leaks into a step.
fn set_paused(simulation: &mut Simulation, frame_clock: &mut FrameClock, paused: bool) {
    if simulation.is_paused() != paused {
        info!("{}", if paused { "Paused" } else { "Resumed" });
    }
    simulation.set_paused(paused);
    frame_clock.reanchor();
}

pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut feedback: EventWriter<SimulationFeedback>,
    mut simulation: ResMut<Simulation>,
    mut frame_clock: ResMut<FrameClock>,
) {
    for command in commands_reader.read() {
        match command {
            SimulationCommand::TogglePause => {
                let paused = !simulation.is_paused();
                set_paused(&mut simulation, &mut frame_clock, paused);
            }
            SimulationCommand::SetPaused(paused) => {
                set_paused(&mut simulation, &mut frame_clock, *paused);
            }
            SimulationCommand::SetTimeScale(time_scale) => {
                let applied = simulation.set_time_scale(*time_scale);
                debug!("Time scale x{applied}");
            }
            SimulationCommand::ScaleTime(factor) => {
                let applied = simulation.scale_time(*factor);
                debug!("Time scale x{applied}");
            }
            SimulationCommand::SetFormula(formula) => match simulation.set_formula(formula) {
                Ok(()) => {
                    feedback.write(SimulationFeedback::FormulaApplied(
                        simulation.formula().to_owned(),
                    ));
                }
                Err(error) => {
                    feedback.write(SimulationFeedback::FormulaRejected {
                        formula: formula.clone(),
                        error,
                    });
                }
            },
            SimulationCommand::ResetFormula => {
                simulation.reset_formula();
                feedback.write(SimulationFeedback::FormulaApplied(
                    simulation.formula().to_owned(),
                ));
            }
            SimulationCommand::UpdateBody { id, update } => {
                match simulation.update_body(*id, update.clone()) {
                    Ok(()) => {
                        feedback.write(SimulationFeedback::BodyUpdated(*id));
                    }
                    Err(error) => {
                        feedback.write(SimulationFeedback::BodyUpdateRejected { id: *id, error });
                    }
                }
            }
            SimulationCommand::RestoreDefaults => {
                simulation.restore_defaults();
                frame_clock.reanchor();
            }
        }
    }
}
