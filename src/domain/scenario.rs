//! Built-in arena layouts.
//!
//! All layouts start the agent facing east on the western border and put the goal into the
//! south-east corner. Obstacle positions are absolute and laid out for a 600 × 600 arena.

use std::{fmt, str::FromStr};

use thiserror::Error;

use super::{Obstacle, Pose, Position, WorldBuilder, WorldLayout, BOUNDARY_MARGIN};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Scenario {
    #[default]
    Empty,
    Wall,
    Blocks,
    TMaze,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scenario '{0}', expected one of: empty, wall, blocks, tmaze")]
pub struct UnknownScenario(pub String);

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Empty,
        Scenario::Wall,
        Scenario::Blocks,
        Scenario::TMaze,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Empty => "empty",
            Scenario::Wall => "wall",
            Scenario::Blocks => "blocks",
            Scenario::TMaze => "tmaze",
        }
    }

    /// Start of the agent. The T-maze corridor runs through the middle of the arena, every other
    /// layout starts in the north-west corner.
    fn start(&self, height: f64) -> Position {
        match self {
            Scenario::TMaze => Position::new(BOUNDARY_MARGIN, height / 2.0),
            _ => Position::new(BOUNDARY_MARGIN, BOUNDARY_MARGIN),
        }
    }

    fn obstacles(&self) -> Vec<Obstacle> {
        match self {
            Scenario::Empty => vec![],
            Scenario::Wall => vec![Obstacle::rectangle(
                "wall",
                Position::new(250.0, 250.0),
                50.0,
                500.0,
                0.0,
            )],
            Scenario::Blocks => {
                let blocks = [
                    ("block_1", (225.0, 100.0), 60.0, 45.0),
                    ("block_2", (362.5, 312.5), 75.0, 0.0),
                    ("block_3", (575.0, 350.0), 50.0, 20.0),
                    ("block_4", (125.0, 500.0), 50.0, -75.0),
                ]
                .into_iter()
                .map(|(name, center, size, rotation)| {
                    Obstacle::rectangle(name, center.into(), size, size, rotation)
                        .with_color("yellow")
                });
                let balls = [
                    ("ball_1", (100.0, 325.0), 25.0),
                    ("ball_2", (437.5, 62.5), 37.5),
                    ("ball_3", (300.0, 550.0), 37.5),
                ]
                .into_iter()
                .map(|(name, center, radius)| {
                    Obstacle::circle(name, center.into(), radius).with_color("blue")
                });
                blocks.chain(balls).collect()
            }
            Scenario::TMaze => vec![
                Obstacle::rectangle("wall_1", Position::new(200.0, 100.0), 400.0, 200.0, 0.0),
                Obstacle::rectangle("wall_3", Position::new(200.0, 500.0), 400.0, 200.0, 0.0),
            ],
        }
    }
}

impl WorldBuilder for Scenario {
    fn build(&self, width: f64, height: f64) -> WorldLayout {
        let agent = Pose::new(self.start(height), 0.0);
        let goal = Pose::new(
            Position::new(width - BOUNDARY_MARGIN, height - BOUNDARY_MARGIN),
            0.0,
        );
        self.obstacles()
            .into_iter()
            .fold(WorldLayout::new(agent, goal), WorldLayout::with_obstacle)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::{HasCollision, ObstacleKind, Shape};

    #[rstest]
    #[case::empty(Scenario::Empty, (50.0, 50.0), &[])]
    #[case::wall(Scenario::Wall, (50.0, 50.0), &["wall"])]
    #[case::blocks(
        Scenario::Blocks,
        (50.0, 50.0),
        &["block_1", "block_2", "block_3", "block_4", "ball_1", "ball_2", "ball_3"]
    )]
    #[case::tmaze(Scenario::TMaze, (50.0, 300.0), &["wall_1", "wall_3"])]
    fn test_layout(
        #[case] scenario: Scenario,
        #[case] start: (f64, f64),
        #[case] names: &[&str],
    ) {
        let layout = scenario.build(600.0, 600.0);
        assert_eq!(layout.agent, Pose::new(start.into(), 0.0));
        assert_eq!(layout.goal.position(), Position::new(550.0, 550.0));
        assert_eq!(
            layout.obstacles.iter().map(Obstacle::name).collect::<Vec<_>>(),
            names
        );
    }

    #[rstest]
    #[case(Scenario::Empty)]
    #[case(Scenario::Wall)]
    #[case(Scenario::Blocks)]
    #[case(Scenario::TMaze)]
    fn test_start_and_goal_are_free(#[case] scenario: Scenario) {
        let layout = scenario.build(600.0, 600.0);
        for position in [layout.agent.position(), layout.goal.position()] {
            let probe = Shape::Circle {
                position,
                radius: 15.0,
            };
            assert!(layout
                .obstacles
                .iter()
                .all(|obstacle| !probe.has_intersection(&obstacle.shape())));
        }
    }

    #[test]
    fn test_blocks_colors() {
        let layout = Scenario::Blocks.build(600.0, 600.0);
        for obstacle in &layout.obstacles {
            match obstacle.kind() {
                ObstacleKind::Rectangle { .. } => assert_eq!(obstacle.color(), "yellow"),
                ObstacleKind::Circle { .. } => assert_eq!(obstacle.color(), "blue"),
            }
        }
    }

    #[test]
    fn test_wall_is_grey() {
        let layout = Scenario::Wall.build(600.0, 600.0);
        assert_eq!(layout.obstacles[0].color(), Obstacle::DEFAULT_COLOR);
        assert_eq!(
            layout.obstacles[0].kind(),
            ObstacleKind::Rectangle {
                center: Position::new(250.0, 250.0),
                width: 50.0,
                height: 500.0,
                rotation: 0.0
            }
        );
    }

    #[test]
    fn test_goal_follows_arena_size() {
        let layout = Scenario::Empty.build(800.0, 300.0);
        assert_eq!(layout.goal.position(), Position::new(750.0, 250.0));
    }

    #[test]
    fn test_parse() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.to_string().parse::<Scenario>(), Ok(scenario));
        }
        insta::assert_snapshot!(
            "maze".parse::<Scenario>().unwrap_err().to_string(),
            @"unknown scenario 'maze', expected one of: empty, wall, blocks, tmaze"
        );
    }
}
