use super::Simulation;
use crate::prelude::*;

/// Steps the engine by the real time since the previous frame.
///
/// While paused the frame clock is kept re-anchored, so the first frame after
/// resuming only takes a reading.
pub fn advance_simulation(
    time: Res<Time<Real>>,
    mut frame_clock: ResMut<FrameClock>,
    mut simulation: ResMut<Simulation>,
) {
    if simulation.is_paused() {
        frame_clock.reanchor();
        return;
    }

    if let Some(delta) = frame_clock.tick(time.elapsed()) {
        simulation.step(delta);
    }
}
