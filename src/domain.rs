//! The domain module encapsulates the core logic of the arena. It defines the `Agent`, `Goal` and
//! `Obstacle` entities, the steering models moving the agent, and the episode rules governing
//! their interactions.
//!
//! By minimizing hard dependencies, this module ensures the core logic remains adaptable and
//! independent of any rendering or training frontend.

mod basis;
mod bounds;
mod collision;
mod config;
mod entity;
mod episode;
mod render;
mod resolver;
mod scenario;
mod steering;
mod time_limit;
mod world;

pub use basis::{Angle, Position};
pub use bounds::{clamp, BOUNDARY_MARGIN};
pub use collision::{HasCollision, Shape};
pub use config::{ConfigurationError, EpisodeConfig, StartMode, MIN_ARENA_EXTENT};
pub use entity::{Agent, Goal, Obstacle, ObstacleKind, Pose, GOAL_CAPTURE_EXTENT};
pub use episode::{
    Episode, EpisodeError, EpisodeState, Observation, Step, OBSERVATION_HIGH, OBSERVATION_LOW,
};
pub use render::{Drawable, DrawableGeometry, Sprite, AGENT_SPRITE, COLORS, GOAL_SPRITE};
pub use resolver::{CollisionResolver, Resolution, MAX_SUB_STEPS, MIN_SUB_STEPS};
pub use scenario::{Scenario, UnknownScenario};
pub use steering::{
    softmax, ActionSpace, Compass, CompassAction, Discrete, DiscreteAction, Ego, EgoAction,
    KinematicUnicycle, SkidSteer, SteeringModel, SteeringVariant, ValidationError, STEERING,
};
pub use time_limit::{LimitedStep, TimeLimit, DEFAULT_MAX_EPISODE_STEPS};
pub use world::{World, WorldBuilder, WorldLayout};
