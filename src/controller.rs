//! Controller steering the agent.
//!
//! The arrow keys are translated into an action vector of the agent's steering model. No action
//! is requested while no arrow key is pressed.

use std::f64::consts::FRAC_PI_4;

use bevy::prelude::*;

use ratbox::domain::{CompassAction, DiscreteAction, EgoAction, SteeringVariant};

use crate::resource::{ActionRes, EpisodeRes};

/// Logit of a pressed key for the softmax based steering models. Large enough to put nearly all
/// weight on the pressed directions.
const PRESSED_LOGIT: f64 = 10.0;

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionRes>().add_systems(Update, control);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Arrows {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl Arrows {
    fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        Self {
            up: keys.pressed(KeyCode::ArrowUp),
            down: keys.pressed(KeyCode::ArrowDown),
            left: keys.pressed(KeyCode::ArrowLeft),
            right: keys.pressed(KeyCode::ArrowRight),
        }
    }

    fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Forward and left axes in `[-1, 1]`.
    fn axes(&self) -> (f64, f64) {
        let axis = |positive: bool, negative: bool| f64::from(positive) - f64::from(negative);
        (axis(self.up, self.down), axis(self.left, self.right))
    }
}

/// Logits with `PRESSED_LOGIT` on the commands of all pressed keys.
fn logits(commands: [(bool, [f64; 4]); 4]) -> Vec<f64> {
    commands
        .iter()
        .filter(|(pressed, _)| *pressed)
        .fold(vec![0.0; 4], |sum, (_, one_hot)| {
            sum.iter()
                .zip(one_hot)
                .map(|(logit, command)| logit + command * PRESSED_LOGIT)
                .collect()
        })
}

fn action_for(steering: SteeringVariant, arrows: Arrows) -> Option<Vec<f64>> {
    if !arrows.any() {
        return None;
    }

    let (forward, left) = arrows.axes();
    let action = match steering {
        SteeringVariant::Discrete => {
            let action = if arrows.up {
                DiscreteAction::Forward
            } else if arrows.right {
                DiscreteAction::Right
            } else if arrows.left {
                DiscreteAction::Left
            } else {
                return None;
            };
            action.one_hot().to_vec()
        }
        SteeringVariant::Compass => logits([
            (arrows.up, CompassAction::North.one_hot()),
            (arrows.down, CompassAction::South.one_hot()),
            (arrows.right, CompassAction::East.one_hot()),
            (arrows.left, CompassAction::West.one_hot()),
        ]),
        SteeringVariant::Ego => logits([
            (arrows.up, EgoAction::Forward.one_hot()),
            (arrows.down, EgoAction::Backward.one_hot()),
            (arrows.right, EgoAction::Rightward.one_hot()),
            (arrows.left, EgoAction::Leftward.one_hot()),
        ]),
        SteeringVariant::Unicycle => vec![forward, left * FRAC_PI_4],
        SteeringVariant::SkidSteer => vec![
            (forward - left).clamp(-1.0, 1.0),
            (forward + left).clamp(-1.0, 1.0),
        ],
    };
    Some(action)
}

fn control(
    keys: Res<ButtonInput<KeyCode>>,
    episode: Res<EpisodeRes>,
    mut action: ResMut<ActionRes>,
) {
    if let Some(requested) = action_for(episode.agent().steering(), Arrows::from_keys(&keys)) {
        **action = Some(requested);
    }
}
