use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Reports simulated bodies to a fleet manager as read-only robots.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the readonly_sim library.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(
        short,
        long,
        default_value = "assets/scenarios/two_readonly_robots.toml"
    )]
    pub scenario: PathBuf,

    /// Override the scenario's simulated duration, in seconds.
    #[arg(long)]
    pub duration: Option<f32>,
}
