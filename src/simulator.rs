//! Simulation of the episode.
//!
//! Requested actions are applied at a fixed rate. The episode restarts once the goal is reached
//! or when `R` is pressed.

use bevy::prelude::*;

use crate::resource::{ActionRes, EpisodeRes, LastStepRes};

/// Steps per second.
const STEP_RATE: f32 = 10.0;

pub struct Simulator;

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        app.insert_resource(StepTimer(Timer::from_seconds(
            1.0 / STEP_RATE,
            TimerMode::Repeating,
        )))
        .init_resource::<LastStepRes>()
        .add_systems(Startup, start)
        .add_systems(Update, (handle_keyboard_input, simulate).chain());
    }
}

#[derive(Resource)]
struct StepTimer(Timer);

fn start(mut episode: ResMut<EpisodeRes>) {
    let observation = episode.reset();
    info!("episode started at {:?}", observation.to_array());
}

fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut episode: ResMut<EpisodeRes>,
    mut last_step: ResMut<LastStepRes>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        episode.reset();
        **last_step = None;
        info!("episode restarted");
    }
}

fn simulate(
    time: Res<Time>,
    mut timer: ResMut<StepTimer>,
    mut episode: ResMut<EpisodeRes>,
    mut action: ResMut<ActionRes>,
    mut last_step: ResMut<LastStepRes>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let Some(action) = action.take() else {
        return;
    };

    match episode.step(&action) {
        Ok(step) => {
            **last_step = Some(step);
            if step.terminal {
                info!(
                    "goal reached after {} steps with reward {:.4}",
                    episode.step_count(),
                    step.reward
                );
                episode.reset();
            }
        }
        Err(error) => warn!("{error}"),
    }
}
