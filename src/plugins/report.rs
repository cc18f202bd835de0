//! Periodic status reporting
//!
//! Logs the simulated time, time scale and every body's distance from the
//! center at a fixed wall-clock interval.

use crate::plugins::simulation::{Simulation, SimulationSet};
use crate::prelude::*;
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

#[derive(Resource, Deref, DerefMut, Debug)]
pub struct StatusReportTimer(pub Timer);

pub struct ReportPlugin;

impl Plugin for ReportPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_report_timer);
        app.add_systems(
            Update,
            report_status
                .run_if(resource_exists::<StatusReportTimer>)
                .in_set(SimulationSet::Report),
        );
    }
}

fn setup_report_timer(mut commands: Commands, config: Res<SimulationConfig>) {
    let interval = config.report.interval_seconds;
    if interval.is_finite() && interval > 0.0 {
        commands.insert_resource(StatusReportTimer(Timer::new(
            Duration::from_secs_f32(interval),
            TimerMode::Repeating,
        )));
    } else {
        debug!("Status reporting disabled");
    }
}

pub fn report_status(
    time: Res<Time<Real>>,
    mut timer: ResMut<StatusReportTimer>,
    simulation: Res<Simulation>,
) {
    if !timer.tick(time.delta()).just_finished() {
        return;
    }

    info!(
        "Elapsed {} at x{:.2}{}",
        format_elapsed(simulation.elapsed_seconds()),
        simulation.time_scale(),
        if simulation.is_paused() { " (paused)" } else { "" }
    );
    for snapshot in simulation.snapshots() {
        info!(
            "  {:<10} {:>16.0} km  {:>9.1} m/s",
            snapshot.name,
            snapshot.distance_from_center_km(),
            snapshot.speed()
        );
    }
}

/// Formats simulated seconds as `D d HH:MM:SS`
///
/// Negative and non-finite values read as zero; fractions are truncated.
pub fn format_elapsed(seconds: Scalar) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let days = total / SECONDS_PER_DAY;
    let hours = total % SECONDS_PER_DAY / SECONDS_PER_HOUR;
    let minutes = total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
    let seconds = total % SECONDS_PER_MINUTE;
    format!("{days} d {hours:02}:{minutes:02}:{seconds:02}")
}
