//! Kinematic unicycle.

use super::{
    check_dimension, euler_step, ActionSpace, SteeringModel, SteeringVariant, ValidationError,
};
use crate::domain::{Agent, Pose};

/// Commands are a throttle in `[-1, 1]` and a turn rate in `[-π/2, π/2]` radians per unit time.
#[derive(Clone, Copy, Debug, Default)]
pub struct KinematicUnicycle;

impl SteeringModel for KinematicUnicycle {
    fn action_dimension(&self) -> usize {
        2
    }

    fn action_space(&self) -> ActionSpace {
        use std::f64::consts::FRAC_PI_2;
        ActionSpace::new(vec![-1.0, -FRAC_PI_2], vec![1.0, FRAC_PI_2])
    }

    fn step(&self, agent: &Agent, action: &[f64]) -> Result<Pose, ValidationError> {
        check_dimension(SteeringVariant::Unicycle, action, self.action_dimension())?;

        let (throttle, turn_rate) = (action[0], action[1]);
        Ok(euler_step(agent, throttle * agent.max_speed(), turn_rate))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::Position;

    const EPSILON: f64 = 1e-9;

    fn agent(heading: f64) -> Agent {
        Agent::new(
            Pose::new(Position::new(300.0, 300.0), heading),
            SteeringVariant::Unicycle,
        )
    }

    #[test]
    fn test_unicycle_idle_keeps_pose() {
        let start = agent(0.0);
        let pose = KinematicUnicycle.step(&start, &[0.0, 0.0]).unwrap();
        assert_eq!(pose, start.pose());
    }

    #[rstest]
    #[case::full_throttle(1.0, 0.0, (400.0, 300.0), 0.0)]
    #[case::reverse(-0.5, 0.0, (250.0, 300.0), 0.0)]
    #[case::turn_in_place(0.0, FRAC_PI_2, (300.0, 300.0), 90.0)]
    #[case::turn_right(0.0, -0.5 * FRAC_PI_2, (300.0, 300.0), -45.0)]
    #[case::drive_then_turn(1.0, FRAC_PI_2, (400.0, 300.0), 90.0)]
    fn test_unicycle_step(
        #[case] throttle: f64,
        #[case] turn_rate: f64,
        #[case] position: (f64, f64),
        #[case] heading: f64,
    ) {
        let pose = KinematicUnicycle.step(&agent(0.0), &[throttle, turn_rate]).unwrap();
        assert_abs_diff_eq!(pose.position(), Position::from(position), epsilon = EPSILON);
        assert_abs_diff_eq!(pose.heading(), heading, epsilon = EPSILON);
        assert_abs_diff_eq!(pose.direction(), Position::from_heading(heading), epsilon = EPSILON);
    }

    #[test]
    fn test_unicycle_heading_wraps() {
        let pose = KinematicUnicycle.step(&agent(250.0), &[0.0, FRAC_PI_2]).unwrap();
        assert_abs_diff_eq!(pose.heading(), -20.0, epsilon = EPSILON);
    }

    #[test]
    fn test_unicycle_dt_scales_step() {
        let pose = KinematicUnicycle
            .step(&agent(90.0).with_dt(0.5), &[1.0, 0.0])
            .unwrap();
        assert_abs_diff_eq!(pose.position(), Position::new(300.0, 250.0), epsilon = EPSILON);
    }
}
