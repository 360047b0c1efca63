//! Swept collision resolution.
//!
//! A candidate motion is not checked only at its end point. The steering model is re-run at
//! fractions of the agent's maximum speed, which yields intermediate poses along the same
//! trajectory, and the agent is stopped at the last pose before the first overlap.

use tracing::debug;

use super::{Agent, HasCollision, Obstacle, Pose, ValidationError};

/// Smallest number of sub-steps per motion, including the starting pose.
pub const MIN_SUB_STEPS: usize = 10;

/// Upper limit for the number of sub-steps of a single motion.
pub const MAX_SUB_STEPS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub pose: Pose,
    pub collided: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionResolver {
    min_sub_steps: usize,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            min_sub_steps: MIN_SUB_STEPS,
        }
    }
}

impl CollisionResolver {
    pub fn new(min_sub_steps: usize) -> Self {
        Self {
            min_sub_steps: min_sub_steps.clamp(2, MAX_SUB_STEPS),
        }
    }

    /// Furthest pose towards `candidate` that does not overlap any obstacle.
    ///
    /// `candidate` must be the result of the agent's steering model for `action`; the model is
    /// invoked again for the intermediate poses. Obstacles are scanned in slice order.
    pub fn resolve(
        &self,
        agent: &Agent,
        action: &[f64],
        candidate: Pose,
        obstacles: &[Obstacle],
    ) -> Result<Resolution, ValidationError> {
        if obstacles.is_empty() {
            return Ok(Resolution {
                pose: candidate,
                collided: false,
            });
        }

        let distance = agent.position().distance(candidate.position());
        let trajectory = self.trajectory(agent, action, distance)?;

        let hit = trajectory.iter().enumerate().find_map(|(k, pose)| {
            let probe = agent.at(*pose);
            obstacles
                .iter()
                .find(|obstacle| probe.has_collision(*obstacle))
                .map(|obstacle| (k, obstacle))
        });

        let Some((k, obstacle)) = hit else {
            return Ok(Resolution {
                pose: candidate,
                collided: false,
            });
        };

        debug!(
            obstacle = obstacle.name(),
            sub_step = k,
            sub_steps = trajectory.len(),
            distance,
            "motion blocked"
        );

        let pose = match k {
            // Position collisions never block a continuous rotation.
            0 if agent.steering().is_discrete() => agent.pose(),
            0 => candidate.with_position(agent.position()),
            k => candidate.with_position(trajectory[k - 1].position()),
        };

        Ok(Resolution {
            pose,
            collided: true,
        })
    }

    /// Number of sub-steps for a motion over `distance`. Consecutive probes are at most one agent
    /// radius apart, so that thin obstacles cannot be skipped.
    pub fn sub_steps(&self, distance: f64, radius: f64) -> usize {
        let needed = if radius > 0.0 && distance.is_finite() {
            (distance / radius).ceil() as usize + 1
        } else {
            self.min_sub_steps
        };
        needed.clamp(self.min_sub_steps, MAX_SUB_STEPS)
    }

    fn trajectory(
        &self,
        agent: &Agent,
        action: &[f64],
        distance: f64,
    ) -> Result<Vec<Pose>, ValidationError> {
        let steering = agent.steering();
        let n = self.sub_steps(distance, agent.radius());
        (0..n)
            .map(|i| {
                let fraction = i as f64 / (n - 1) as f64;
                steering.step(&agent.with_max_speed(agent.max_speed() * fraction), action)
            })
            .collect()
    }
}
