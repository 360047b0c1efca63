//! Discrete steering: turn right, turn left or move forward.

use super::{
    argmax, check_dimension, softmax, ActionSpace, SteeringModel, SteeringVariant, ValidationError,
};
use crate::domain::{Agent, Angle, Pose};

/// Exactly one primitive is executed per step: the one with the largest softmax weight over the
/// non-negative part of the commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discrete;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiscreteAction {
    Right = 0,
    Left = 1,
    Forward = 2,
}

impl DiscreteAction {
    pub fn one_hot(self) -> [f64; 3] {
        let mut action = [0.0; 3];
        action[self as usize] = 1.0;
        action
    }
}

impl SteeringModel for Discrete {
    fn action_dimension(&self) -> usize {
        3
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::uniform(3, 0.0, f64::INFINITY)
    }

    fn step(&self, agent: &Agent, action: &[f64]) -> Result<Pose, ValidationError> {
        check_dimension(SteeringVariant::Discrete, action, self.action_dimension())?;

        let clipped = action.iter().map(|u| u.max(0.0)).collect::<Vec<_>>();
        let pose = agent.pose();

        Ok(match argmax(&softmax(&clipped)) {
            0 => pose.rotated(Angle::from_deg(agent.turn_increment())),
            1 => pose.rotated(-Angle::from_deg(agent.turn_increment())),
            _ => pose.with_position(pose.position() + pose.direction() * agent.max_speed()),
        })
    }
}
