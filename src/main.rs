//! Interactive viewer.
//!
//! Usage: `ratbox [SCENARIO] [STEERING]`, e.g. `ratbox blocks unicycle`. The arrow keys steer the
//! agent, `R` restarts the episode and `T` toggles the status line.

use std::process::ExitCode;

use bevy::{prelude::*, window::WindowResolution};
use thiserror::Error;

use ratbox::domain::{ConfigurationError, Episode, EpisodeConfig, Scenario, UnknownScenario};

mod controller;
mod resource;
mod simulator;
mod visualizer;

#[derive(Error, Debug)]
enum ViewerError {
    #[error(transparent)]
    Scenario(#[from] UnknownScenario),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

fn create_episode(
    scenario: Option<String>,
    steering: Option<String>,
) -> Result<Episode<Scenario>, ViewerError> {
    let scenario = scenario.as_deref().unwrap_or("empty").parse::<Scenario>()?;
    let steering = steering.as_deref().unwrap_or("discrete");
    let config = EpisodeConfig::default().with_steering_name(steering)?;
    Ok(Episode::new(scenario, config)?)
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let episode = match create_episode(args.next(), args.next()) {
        Ok(episode) => episode,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let config = episode.config().clone();
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "ratbox".to_string(),
                resolution: WindowResolution::new(
                    config.world_width as f32,
                    config.world_height as f32,
                ),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(resource::EpisodeRes::from(episode))
        .add_plugins(controller::Controller)
        .add_plugins(visualizer::Visualizer)
        .add_plugins(simulator::Simulator)
        .run();

    ExitCode::SUCCESS
}
