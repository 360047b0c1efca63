//! Allocentric steering over the four compass directions.

use super::{
    check_dimension, weighted_motion, ActionSpace, SteeringModel, SteeringVariant, ValidationError,
};
use crate::domain::{Agent, Pose, Position};

/// Commands are logits for north, south, east and west. The motion vector is the softmax
/// weighted sum of the four unit directions, scaled by the agent's maximum speed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Compass;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompassAction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl CompassAction {
    pub fn one_hot(self) -> [f64; 4] {
        let mut action = [0.0; 4];
        action[self as usize] = 1.0;
        action
    }
}

const DIRECTIONS: [Position; 4] = [
    Position::NORTH,
    Position::SOUTH,
    Position::EAST,
    Position::WEST,
];

impl SteeringModel for Compass {
    fn action_dimension(&self) -> usize {
        4
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::uniform(4, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn step(&self, agent: &Agent, action: &[f64]) -> Result<Pose, ValidationError> {
        check_dimension(SteeringVariant::Compass, action, self.action_dimension())?;

        let motion = weighted_motion(DIRECTIONS, action);
        let pose = agent.pose();
        Ok(pose
            .with_position(pose.position() + motion * agent.max_speed())
            .with_direction(motion))
    }
}
