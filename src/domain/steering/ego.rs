//! Egocentric steering relative to the agent's heading.

use super::{
    check_dimension, weighted_motion, ActionSpace, SteeringModel, SteeringVariant, ValidationError,
};
use crate::domain::{Agent, Pose};

/// Commands are logits for forward, backward, rightward and leftward motion. The primitives are
/// the heading vector turned by 0, 180, +90 and -90 degrees.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ego;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EgoAction {
    Forward = 0,
    Backward = 1,
    Rightward = 2,
    Leftward = 3,
}

impl EgoAction {
    pub fn one_hot(self) -> [f64; 4] {
        let mut action = [0.0; 4];
        action[self as usize] = 1.0;
        action
    }
}

impl SteeringModel for Ego {
    fn action_dimension(&self) -> usize {
        4
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::uniform(4, 0.0, 1.0)
    }

    fn step(&self, agent: &Agent, action: &[f64]) -> Result<Pose, ValidationError> {
        check_dimension(SteeringVariant::Ego, action, self.action_dimension())?;

        let forward = agent.direction();
        let rightward = forward.quarter_turn();
        let motion = weighted_motion([forward, -forward, rightward, -rightward], action);
        let pose = agent.pose();
        Ok(pose
            .with_position(pose.position() + motion * agent.max_speed())
            .with_direction(motion))
    }
}
