//! The arena and everything placed in it.

use super::{Agent, Goal, Obstacle, Pose, Position, BOUNDARY_MARGIN};

/// Initial placement of all entities, as produced by a [`WorldBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub struct WorldLayout {
    pub agent: Pose,
    pub goal: Pose,
    pub obstacles: Vec<Obstacle>,
}

impl WorldLayout {
    pub fn new(agent: Pose, goal: Pose) -> Self {
        Self {
            agent,
            goal,
            obstacles: vec![],
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }
}

/// Populates a fresh world on every episode reset.
pub trait WorldBuilder {
    fn build(&self, width: f64, height: f64) -> WorldLayout;
}

impl<F> WorldBuilder for F
where
    F: Fn(f64, f64) -> WorldLayout,
{
    fn build(&self, width: f64, height: f64) -> WorldLayout {
        self(width, height)
    }
}

/// A bounded arena with exactly one agent, one goal and any number of obstacles.
///
/// Obstacles are keyed by name. They keep their insertion order, which is also the order in which
/// collisions are checked; a later obstacle replaces an earlier one of the same name in place.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    width: f64,
    height: f64,
    margin: f64,
    agent: Agent,
    goal: Goal,
    obstacles: Vec<Obstacle>,
}

impl World {
    pub fn new(width: f64, height: f64, agent: Agent, goal: Goal) -> Self {
        Self {
            width,
            height,
            margin: BOUNDARY_MARGIN,
            agent,
            goal,
            obstacles: vec![],
        }
    }

    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        for obstacle in obstacles {
            self.insert(obstacle);
        }
        self
    }

    pub fn insert(&mut self, obstacle: Obstacle) {
        match self
            .obstacles
            .iter_mut()
            .find(|existing| existing.name() == obstacle.name())
        {
            Some(existing) => *existing = obstacle,
            None => self.obstacles.push(obstacle),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle(&self, name: &str) -> Option<&Obstacle> {
        self.obstacles.iter().find(|obstacle| obstacle.name() == name)
    }

    /// Whether `position` lies in the area reachable by the agent's center.
    pub fn contains(&self, position: Position) -> bool {
        (self.margin..=self.width - self.margin).contains(&position.x())
            && (self.margin..=self.height - self.margin).contains(&position.y())
    }
}
