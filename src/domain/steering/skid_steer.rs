//! Skid steering, also known as tank driving.

use super::{
    check_dimension, euler_step, ActionSpace, SteeringModel, SteeringVariant, ValidationError,
};
use crate::domain::{Agent, Pose};

/// Commands are the left and right track speeds in `[-1, 1]`. The tracks are one agent width
/// apart.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkidSteer;

impl SteeringModel for SkidSteer {
    fn action_dimension(&self) -> usize {
        2
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::uniform(2, -1.0, 1.0)
    }

    fn step(&self, agent: &Agent, action: &[f64]) -> Result<Pose, ValidationError> {
        check_dimension(SteeringVariant::SkidSteer, action, self.action_dimension())?;

        let (left, right) = (action[0], action[1]);
        let velocity = (left + right) / 2.0 * agent.max_speed();
        let heading_rate = (right - left) / agent.width();
        Ok(euler_step(agent, velocity, heading_rate))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::Position;

    const EPSILON: f64 = 1e-9;

    fn agent() -> Agent {
        Agent::new(
            Pose::new(Position::new(300.0, 300.0), 0.0),
            SteeringVariant::SkidSteer,
        )
        .with_radius(0.5)
    }

    #[rstest]
    #[case::idle(0.0, 0.0, (300.0, 300.0), 0.0)]
    #[case::straight(1.0, 1.0, (400.0, 300.0), 0.0)]
    #[case::backwards(-1.0, -1.0, (200.0, 300.0), 0.0)]
    #[case::spin_left(-0.5, 0.5, (300.0, 300.0), 57.29577951308232)]
    #[case::arc(0.0, 1.0, (350.0, 300.0), 57.29577951308232)]
    fn test_skid_steer_step(
        #[case] left: f64,
        #[case] right: f64,
        #[case] position: (f64, f64),
        #[case] heading: f64,
    ) {
        let pose = SkidSteer.step(&agent(), &[left, right]).unwrap();
        assert_abs_diff_eq!(pose.position(), Position::from(position), epsilon = EPSILON);
        assert_abs_diff_eq!(pose.heading(), heading, epsilon = EPSILON);
    }

    #[test]
    fn test_skid_steer_wider_agent_turns_slower() {
        let narrow = SkidSteer.step(&agent(), &[0.0, 1.0]).unwrap();
        let wide = SkidSteer.step(&agent().with_radius(5.0), &[0.0, 1.0]).unwrap();
        assert!(wide.heading() < narrow.heading());
    }
}
