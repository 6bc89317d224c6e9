// readonly_sim/examples/readonly_fleet.rs

//! A headless run that reports a scenario's robots as read-only robots.
//!
//! This example demonstrates how to:
//! 1. Load a scenario from a TOML file chosen on the command line.
//! 2. Set up a windowless Bevy app ticking at the scenario's rate.
//! 3. Add `ReadonlySimulationPlugin`, which spawns and reports the robots.
//! 4. Drain the transport the way a fleet manager would, and pause the clock mid-run.
//!
//! To run this example (from the `readonly_sim` directory):
//! `cargo run --example readonly_fleet -- --scenario assets/scenarios/two_readonly_robots.toml`

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use clap::Parser;
use std::time::Duration;

use readonly_sim::cli::Cli;
use readonly_sim::prelude::{load_scenario, validate, ReportingTransport, ScenarioConfig};
use readonly_sim::ReadonlySimulationPlugin;

/// Wall-clock instant at which a paused clock resumes.
#[derive(Resource, Default)]
struct PauseState {
    resume_at: Option<Duration>,
    done: bool,
}

fn main() {
    let cli = Cli::parse();

    // --- 1. Load Scenario Configuration ---
    let mut scenario = match load_scenario(&cli.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Failed to load scenario {}: {}", cli.scenario.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(duration) = cli.duration {
        scenario.simulation.duration_seconds = duration;
        if let Err(e) = validate(&scenario) {
            eprintln!("Invalid --duration {}: {}", duration, e);
            std::process::exit(1);
        }
    }
    let frame = match Duration::try_from_secs_f64(1.0 / scenario.simulation.tick_rate_hz) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Unusable tick rate {}: {}", scenario.simulation.tick_rate_hz, e);
            std::process::exit(1);
        }
    };

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)),
        LogPlugin {
            level: bevy::log::Level::INFO,
            filter: "info,readonly_sim=debug,readonly_core=info".to_string(),
            ..default()
        },
    ))
    .insert_resource(scenario)
    .init_resource::<PauseState>();

    // --- 3. Add the Read-only Simulation Plugin ---
    app.add_plugins(ReadonlySimulationPlugin);

    // --- 4. Example-Specific Systems ---
    app.add_systems(Update, (log_fleet_reports, drive_pause_window, exit_after_duration));

    app.run();
}

/// Plays the fleet manager: takes every report published this frame.
fn log_fleet_reports(transport: Res<ReportingTransport>) {
    for report in transport.0.drain_reports() {
        info!(
            "[FLEET] {} ({}/{}) t={}s x={:.2} y={:.2} yaw={:.1}deg seq={}",
            report.name,
            report.fleet_name,
            report.level_name,
            report.sim_time_secs,
            report.location.x,
            report.location.y,
            report.location.yaw.to_degrees(),
            report.seq
        );
    }
}

fn drive_pause_window(
    scenario: Res<ScenarioConfig>,
    mut state: ResMut<PauseState>,
    mut virtual_time: ResMut<Time<Virtual>>,
    real_time: Res<Time<Real>>,
) {
    let settings = &scenario.simulation;
    let Some(pause_after) = settings.pause_after_seconds else {
        return;
    };

    let resume_at = state.resume_at;
    match resume_at {
        None if !state.done && virtual_time.elapsed_secs() >= pause_after => {
            info!("[CLOCK] Pausing simulation for {}s", settings.pause_duration_seconds);
            virtual_time.pause();
            let hold = Duration::try_from_secs_f32(settings.pause_duration_seconds)
                .unwrap_or(Duration::MAX);
            state.resume_at = Some(real_time.elapsed().saturating_add(hold));
        }
        Some(resume_at) if real_time.elapsed() >= resume_at => {
            info!("[CLOCK] Resuming simulation");
            virtual_time.unpause();
            state.resume_at = None;
            state.done = true;
        }
        _ => {}
    }
}

fn exit_after_duration(
    scenario: Res<ScenarioConfig>,
    time: Res<Time<Virtual>>,
    mut exit: EventWriter<AppExit>,
) {
    if time.elapsed_secs() >= scenario.simulation.duration_seconds {
        info!("Scenario finished after {:.1}s of simulated time.", time.elapsed_secs());
        exit.write(AppExit::Success);
    }
}
