use bevy::app::ScheduleRunnerPlugin;
use bevy::diagnostic::FrameCount;
use bevy::log::{Level, LogPlugin};
use clap::Parser;
use orbitdrift::cli::{Args, load_and_apply_config};
use orbitdrift::plugins::{ReportPlugin, SimulationPlugin, SimulationSet};
use orbitdrift::prelude::*;
use std::time::Duration;

const DEFAULT_FPS: f64 = 60.0;

#[derive(Resource, Deref, Copy, Clone, Debug)]
struct FrameLimit(u32);

fn main() -> AppExit {
    let args = Args::parse();

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    if args.print_config {
        return match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                println!("{toml_string}");
                AppExit::Success
            }
            Err(e) => {
                eprintln!("Failed to serialize configuration to TOML: {e}");
                AppExit::error()
            }
        };
    }

    let fps = if args.fps.is_finite() && args.fps > 0.0 {
        args.fps
    } else {
        DEFAULT_FPS
    };

    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / fps,
        ))),
        LogPlugin {
            level: if args.verbose {
                Level::DEBUG
            } else {
                Level::INFO
            },
            ..default()
        },
        SimulationPlugin::with_config(config),
        ReportPlugin,
    ));

    if let Some(frames) = args.frames {
        app.insert_resource(FrameLimit(frames));
        app.add_systems(Update, exit_after_frames.after(SimulationSet::Report));
    }

    app.run()
}

fn exit_after_frames(
    frame_count: Res<FrameCount>,
    limit: Res<FrameLimit>,
    simulation: Res<orbitdrift::plugins::Simulation>,
    mut exit: EventWriter<AppExit>,
) {
    if frame_count.0 + 1 < **limit {
        return;
    }

    info!(
        "Stopping after {} frames at {:.0} simulated seconds",
        **limit,
        simulation.elapsed_seconds()
    );
    for snapshot in simulation.snapshots() {
        info!(
            "  {:<10} {:>16.0} km",
            snapshot.name,
            snapshot.distance_from_center_km()
        );
    }
    exit.write(AppExit::Success);
}
