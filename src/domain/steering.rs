//! Steering models turning an action vector into a candidate pose.
//!
//! Every model reads the agent's current pose and motion limits and returns where the agent
//! would end up if nothing was in the way. None of them mutate the agent; committing the pose is
//! left to the episode after collision resolution.

mod compass;
mod discrete;
mod ego;
mod skid_steer;
mod unicycle;

use std::{collections::BTreeMap, fmt, str::FromStr};

use nalgebra::{DVector, Matrix2x4, Vector2, Vector4};
use once_cell::sync::Lazy;
use thiserror::Error;

use super::{Agent, ConfigurationError, Pose, Position};

pub use compass::{Compass, CompassAction};
pub use discrete::{Discrete, DiscreteAction};
pub use ego::{Ego, EgoAction};
pub use skid_steer::SkidSteer;
pub use unicycle::KinematicUnicycle;

pub trait SteeringModel {
    /// Number of commands expected in an action vector.
    fn action_dimension(&self) -> usize;

    fn action_space(&self) -> ActionSpace;

    /// Candidate pose after applying `action` to `agent`.
    fn step(&self, agent: &Agent, action: &[f64]) -> Result<Pose, ValidationError>;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SteeringVariant {
    #[default]
    Discrete,
    Compass,
    Ego,
    Unicycle,
    SkidSteer,
}

/// Steering models by identifier.
pub static STEERING: Lazy<BTreeMap<&'static str, SteeringVariant>> = Lazy::new(|| {
    SteeringVariant::ALL
        .iter()
        .map(|variant| (variant.name(), *variant))
        .collect()
});

impl SteeringVariant {
    pub const ALL: [SteeringVariant; 5] = [
        SteeringVariant::Discrete,
        SteeringVariant::Compass,
        SteeringVariant::Ego,
        SteeringVariant::Unicycle,
        SteeringVariant::SkidSteer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SteeringVariant::Discrete => "discrete",
            SteeringVariant::Compass => "compass",
            SteeringVariant::Ego => "ego",
            SteeringVariant::Unicycle => "unicycle",
            SteeringVariant::SkidSteer => "skidsteer",
        }
    }

    /// Comma separated list of all identifiers, in registration order.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|variant| variant.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn model(&self) -> &'static dyn SteeringModel {
        match self {
            SteeringVariant::Discrete => &Discrete,
            SteeringVariant::Compass => &Compass,
            SteeringVariant::Ego => &Ego,
            SteeringVariant::Unicycle => &KinematicUnicycle,
            SteeringVariant::SkidSteer => &SkidSteer,
        }
    }

    /// Discrete motion is a single rigid translation or rotation.
    pub fn is_discrete(&self) -> bool {
        *self == SteeringVariant::Discrete
    }

    pub fn action_dimension(&self) -> usize {
        self.model().action_dimension()
    }

    pub fn action_space(&self) -> ActionSpace {
        self.model().action_space()
    }

    pub fn step(&self, agent: &Agent, action: &[f64]) -> Result<Pose, ValidationError> {
        self.model().step(agent, action)
    }
}

impl fmt::Display for SteeringVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SteeringVariant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STEERING
            .get(s)
            .copied()
            .ok_or_else(|| ConfigurationError::UnknownSteering {
                name: s.to_string(),
                valid: SteeringVariant::valid_names(),
            })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{variant} steering expects {expected} action commands, got {received}")]
    ActionLength {
        variant: SteeringVariant,
        expected: usize,
        received: usize,
    },
}

/// Per-command bounds of an action vector.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSpace {
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl ActionSpace {
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Self {
        Self { low, high }
    }

    pub fn uniform(dimension: usize, low: f64, high: f64) -> Self {
        Self::new(vec![low; dimension], vec![high; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.low.len()
    }

    pub fn contains(&self, action: &[f64]) -> bool {
        action.len() == self.dimension()
            && action
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(u, (low, high))| low <= u && u <= high)
    }
}

/// Numerically stable softmax. NaN entries count as the maximum logit, infinities are clipped
/// to the largest finite values first.
pub fn softmax(logits: &[f64]) -> DVector<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let shifted = DVector::from_iterator(
        logits.len(),
        logits.iter().map(|logit| {
            let shifted = logit - max;
            if shifted.is_nan() {
                0.0
            } else {
                shifted.clamp(f64::MIN, f64::MAX)
            }
        }),
    );
    let exp = shifted.map(f64::exp);
    let sum = exp.sum();
    exp / sum
}

/// Index of the largest weight; ties resolve to the lowest index.
pub(crate) fn argmax(weights: &DVector<f64>) -> usize {
    weights
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &w)| {
            if w > max {
                (i, w)
            } else {
                (best, max)
            }
        })
        .0
}

pub(crate) fn check_dimension(
    variant: SteeringVariant,
    action: &[f64],
    expected: usize,
) -> Result<(), ValidationError> {
    if action.len() == expected {
        Ok(())
    } else {
        Err(ValidationError::ActionLength {
            variant,
            expected,
            received: action.len(),
        })
    }
}

/// Softmax weighted sum of four motion primitives.
pub(crate) fn weighted_motion(primitives: [Position; 4], logits: &[f64]) -> Position {
    let weights = Vector4::from_iterator(softmax(logits).iter().copied());
    let directions = Matrix2x4::from_columns(&primitives.map(|p| Vector2::new(p.x(), p.y())));
    let motion = directions * weights;
    Position::new(motion[0], motion[1])
}

/// Single explicit Euler step of the unicycle kinematics.
///
/// The kinematic state angle is the heading shifted by a quarter turn, so that a zero heading
/// moves the agent east on the y-down screen. The state angle is wrapped to `[0, 2π)`, which
/// puts the resulting heading in `[-90, 270)` degrees.
pub(crate) fn euler_step(agent: &Agent, velocity: f64, heading_rate: f64) -> Pose {
    let dt = agent.dt();
    let theta = (agent.heading() + 90.0).to_radians();
    let delta = Position::new(theta.sin(), theta.cos()) * (velocity * dt);
    let heading =
        (agent.heading() + 90.0 + (heading_rate * dt).to_degrees()).rem_euclid(360.0) - 90.0;
    Pose::new(agent.position() + delta, heading)
}
