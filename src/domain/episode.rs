//! A single training episode.
//!
//! Every step runs the agent's steering model, resolves the candidate motion against the
//! obstacles, clamps the result into the arena and finally evaluates reward and termination.

use std::{fmt, ops::Range, sync::Arc};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::{
    bounds, render, Agent, CollisionResolver, ConfigurationError, Drawable, EpisodeConfig, Goal,
    HasCollision, Obstacle, Pose, Position, StartMode, ValidationError, World, WorldBuilder,
    BOUNDARY_MARGIN,
};

pub const OBSERVATION_LOW: f64 = -1000.0;
pub const OBSERVATION_HIGH: f64 = 1000.0;

/// Share of the maximum reward lost when the goal is reached in the last allowed step.
const STEP_DISCOUNT: f64 = 0.9;

/// Exclusive upper limit of randomly drawn start coordinates.
const RANDOM_START_END: u32 = 500;

const RANDOM_START_ATTEMPTS: usize = 100;

/// Observed state, every component clamped into `[OBSERVATION_LOW, OBSERVATION_HIGH]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub agent_x: f64,
    pub agent_y: f64,
    /// Heading of the agent in degrees.
    pub heading: f64,
    pub goal_x: f64,
    pub goal_y: f64,
}

impl Observation {
    fn of(world: &World) -> Self {
        let agent = world.agent();
        let goal = world.goal();
        let bounded = |value: f64| value.clamp(OBSERVATION_LOW, OBSERVATION_HIGH);
        Self {
            agent_x: bounded(agent.position().x()),
            agent_y: bounded(agent.position().y()),
            heading: bounded(agent.heading()),
            goal_x: bounded(goal.position().x()),
            goal_y: bounded(goal.position().y()),
        }
    }

    pub fn to_array(&self) -> [f64; 5] {
        [
            self.agent_x,
            self.agent_y,
            self.heading,
            self.goal_x,
            self.goal_y,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub terminal: bool,
    pub collided: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EpisodeState {
    /// Created, but not reset yet.
    #[default]
    Reset,
    Running,
    Terminated,
}

impl fmt::Display for EpisodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EpisodeState::Reset => "waiting for reset",
            EpisodeState::Running => "running",
            EpisodeState::Terminated => "terminated",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EpisodeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("episode cannot be stepped, it is {0}")]
    NotRunning(EpisodeState),
}

/// Episode controller owning the world and all mutable episode state.
pub struct Episode<B: WorldBuilder> {
    config: Arc<EpisodeConfig>,
    builder: B,
    resolver: CollisionResolver,
    rng: ChaCha8Rng,
    world: World,
    step_count: u32,
    state: EpisodeState,
}

impl<B: WorldBuilder> Episode<B> {
    pub fn new(builder: B, config: EpisodeConfig) -> Result<Self, ConfigurationError> {
        Self::with_shared_config(builder, Arc::new(config))
    }

    pub fn with_shared_config(
        builder: B,
        config: Arc<EpisodeConfig>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        // The world is populated from a copy of the random source, so the first reset draws the
        // same start as `reset_with_seed(config.seed)`.
        let world = populate(&config, &builder, &mut rng.clone());
        Ok(Self {
            config,
            builder,
            resolver: CollisionResolver::default(),
            rng,
            world,
            step_count: 0,
            state: EpisodeState::Reset,
        })
    }

    pub fn config(&self) -> &Arc<EpisodeConfig> {
        &self.config
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn agent(&self) -> &Agent {
        self.world.agent()
    }

    pub fn goal(&self) -> &Goal {
        self.world.goal()
    }

    pub fn observation(&self) -> Observation {
        Observation::of(&self.world)
    }

    pub fn drawables(&self) -> Vec<Drawable> {
        render::drawables(&self.world)
    }

    /// Rebuild the world and start a new episode.
    pub fn reset(&mut self) -> Observation {
        self.world = populate(&self.config, &self.builder, &mut self.rng);
        self.step_count = 0;
        self.state = EpisodeState::Running;

        debug!(
            agent = ?self.world.agent().pose(),
            goal = ?self.world.goal().position(),
            obstacles = self.world.obstacles().len(),
            "episode reset"
        );

        self.observation()
    }

    pub fn reset_with_seed(&mut self, seed: u64) -> Observation {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.reset()
    }

    pub fn step(&mut self, action: &[f64]) -> Result<Step, EpisodeError> {
        if self.state != EpisodeState::Running {
            return Err(EpisodeError::NotRunning(self.state));
        }

        let agent = self.world.agent();
        let candidate = agent.steering().step(agent, action)?;
        let resolution = self
            .resolver
            .resolve(agent, action, candidate, self.world.obstacles())?;
        let (position, out_of_bounds) = bounds::clamp(
            resolution.pose.position(),
            self.world.width(),
            self.world.height(),
            self.world.margin(),
        );
        if out_of_bounds {
            debug!(?position, "agent clamped to arena");
        }

        let pose = resolution.pose.with_position(position);
        let collided = resolution.collided || out_of_bounds;

        trace!(?action, ?candidate, ?pose, collided, "step");

        self.step_count += 1;
        let agent = self.world.agent_mut();
        agent.set_pose(pose);
        agent.set_collided(collided);

        let reward = if collided {
            -self.config.collision_penalty
        } else if self.world.goal().is_reached_by(position) {
            self.state = EpisodeState::Terminated;
            let reward = self.config.max_reward
                - STEP_DISCOUNT * (self.step_count as f64 / self.config.max_steps as f64);
            debug!(step = self.step_count, reward, "goal reached");
            reward
        } else {
            0.0
        };

        Ok(Step {
            observation: self.observation(),
            reward,
            terminal: self.state == EpisodeState::Terminated,
            collided,
        })
    }
}

/// Fresh world with the agent placed according to the configured start modes.
fn populate<B: WorldBuilder>(
    config: &EpisodeConfig,
    builder: &B,
    rng: &mut ChaCha8Rng,
) -> World {
    let layout = builder.build(config.world_width, config.world_height);
    let agent = Agent::new(layout.agent, config.steering)
        .with_max_speed(config.speed)
        .with_turn_increment(config.turn_increment())
        .with_dt(config.dt)
        .with_radius(config.agent_radius);

    let mut pose = layout.agent;
    if config.start_position == StartMode::Random {
        match random_start(config, &agent, &layout.obstacles, rng) {
            Some(position) => pose = pose.with_position(position),
            None => warn!(
                attempts = RANDOM_START_ATTEMPTS,
                "no free random start found, keeping the layout start"
            ),
        }
    }
    if config.start_heading == StartMode::Random {
        let direction = if config.steering.is_discrete() {
            let turns = rng.random_range(0..=config.turn_count);
            Position::from_heading(turns as f64 * config.turn_increment())
        } else {
            Position::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0))
        };
        pose = Pose::facing(pose.position(), direction);
    }

    World::new(
        config.world_width,
        config.world_height,
        agent.at(pose),
        Goal::new(layout.goal.position()),
    )
    .with_obstacles(layout.obstacles)
}

/// Random start on the integer grid with distinct coordinates, redrawn until the agent clears
/// every obstacle.
fn random_start(
    config: &EpisodeConfig,
    agent: &Agent,
    obstacles: &[Obstacle],
    rng: &mut ChaCha8Rng,
) -> Option<Position> {
    let xs = start_range(config.world_width);
    let ys = start_range(config.world_height);
    (0..RANDOM_START_ATTEMPTS)
        .map(|_| distinct_pair(xs.clone(), ys.clone(), rng))
        .map(|(x, y)| Position::new(x as f64, y as f64))
        .find(|position| {
            let probe = agent.at(agent.pose().with_position(*position));
            !obstacles.iter().any(|obstacle| probe.has_collision(obstacle))
        })
}

/// Start coordinates along an axis: `[50, 500)`, cut to the part of the axis inside the margin.
fn start_range(extent: f64) -> Range<u32> {
    let start = BOUNDARY_MARGIN as u32;
    let end = ((extent - BOUNDARY_MARGIN).floor() as u32 + 1).min(RANDOM_START_END);
    start..end.max(start + 1)
}

/// Uniform pair drawn without replacement, unless `ys` leaves no other choice than `x`.
fn distinct_pair(xs: Range<u32>, ys: Range<u32>, rng: &mut ChaCha8Rng) -> (u32, u32) {
    let x = rng.random_range(xs);
    if !ys.contains(&x) || ys.len() < 2 {
        return (x, rng.random_range(ys));
    }
    let y = rng.random_range(ys.start..ys.end - 1);
    (x, if y >= x { y + 1 } else { y })
}
