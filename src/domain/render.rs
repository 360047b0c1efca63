//! Description of what a renderer has to draw. Nothing is drawn here.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::{ObstacleKind, Position, World};

/// Named RGB colors available to obstacles.
pub static COLORS: Lazy<BTreeMap<&'static str, [u8; 3]>> = Lazy::new(|| {
    BTreeMap::from([
        ("red", [255, 0, 0]),
        ("green", [0, 255, 0]),
        ("forest_green", [34, 139, 34]),
        ("blue", [0, 0, 255]),
        ("purple", [112, 39, 195]),
        ("yellow", [255, 255, 0]),
        ("grey", [100, 100, 100]),
        ("black", [0, 0, 0]),
    ])
});

pub const AGENT_SPRITE: &str = "rat";
pub const GOAL_SPRITE: &str = "cheese";

#[derive(Clone, Debug, PartialEq)]
pub enum Sprite {
    Image(&'static str),
    Color { name: String, rgb: [u8; 3] },
}

impl Sprite {
    /// Color sprite from the registry. Unknown names are drawn black.
    pub fn color(name: &str) -> Self {
        Sprite::Color {
            name: name.to_string(),
            rgb: COLORS.get(name).copied().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawableGeometry {
    Point,
    Rectangle {
        width: f64,
        height: f64,
        rotation: f64,
    },
    Circle {
        radius: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    pub name: String,
    pub position: Position,
    pub rotatable: bool,
    /// Heading in degrees, only present for rotatable entities.
    pub heading: Option<f64>,
    pub sprite: Sprite,
    pub geometry: DrawableGeometry,
}

/// Drawables of all entities: obstacles first, then the goal and finally the agent on top.
pub fn drawables(world: &World) -> Vec<Drawable> {
    let obstacles = world.obstacles().iter().map(|obstacle| {
        let geometry = match obstacle.kind() {
            ObstacleKind::Rectangle {
                width,
                height,
                rotation,
                ..
            } => DrawableGeometry::Rectangle {
                width,
                height,
                rotation,
            },
            ObstacleKind::Circle { radius, .. } => DrawableGeometry::Circle { radius },
        };
        Drawable {
            name: obstacle.name().to_string(),
            position: obstacle.position(),
            rotatable: false,
            heading: None,
            sprite: Sprite::color(obstacle.color()),
            geometry,
        }
    });

    let goal = Drawable {
        name: "goal".to_string(),
        position: world.goal().position(),
        rotatable: false,
        heading: None,
        sprite: Sprite::Image(GOAL_SPRITE),
        geometry: DrawableGeometry::Point,
    };

    let agent = world.agent();
    let agent = Drawable {
        name: "agent".to_string(),
        position: agent.position(),
        rotatable: true,
        heading: Some(agent.heading()),
        sprite: Sprite::Image(AGENT_SPRITE),
        geometry: DrawableGeometry::Circle {
            radius: agent.radius(),
        },
    };

    obstacles.chain([goal, agent]).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{Agent, Goal, Obstacle, Pose, SteeringVariant};

    #[test]
    fn test_color_registry() {
        assert_eq!(COLORS.len(), 8);
        assert_eq!(COLORS["forest_green"], [34, 139, 34]);
        assert_eq!(
            Sprite::color("grey"),
            Sprite::Color {
                name: "grey".to_string(),
                rgb: [100, 100, 100]
            }
        );
        assert_eq!(
            Sprite::color("magenta"),
            Sprite::Color {
                name: "magenta".to_string(),
                rgb: [0, 0, 0]
            }
        );
    }

    #[test]
    fn test_drawables() {
        let world = World::new(
            600.0,
            600.0,
            Agent::new(Pose::new(Position::new(80.0, 90.0), 90.0), SteeringVariant::Ego),
            Goal::new(Position::new(550.0, 550.0)),
        )
        .with_obstacles([
            Obstacle::rectangle("wall", Position::new(250.0, 250.0), 50.0, 500.0, 10.0),
            Obstacle::circle("ball", Position::new(100.0, 325.0), 25.0).with_color("blue"),
        ]);

        assert_eq!(
            drawables(&world),
            vec![
                Drawable {
                    name: "wall".to_string(),
                    position: Position::new(250.0, 250.0),
                    rotatable: false,
                    heading: None,
                    sprite: Sprite::color("grey"),
                    geometry: DrawableGeometry::Rectangle {
                        width: 50.0,
                        height: 500.0,
                        rotation: 10.0
                    },
                },
                Drawable {
                    name: "ball".to_string(),
                    position: Position::new(100.0, 325.0),
                    rotatable: false,
                    heading: None,
                    sprite: Sprite::color("blue"),
                    geometry: DrawableGeometry::Circle { radius: 25.0 },
                },
                Drawable {
                    name: "goal".to_string(),
                    position: Position::new(550.0, 550.0),
                    rotatable: false,
                    heading: None,
                    sprite: Sprite::Image("cheese"),
                    geometry: DrawableGeometry::Point,
                },
                Drawable {
                    name: "agent".to_string(),
                    position: Position::new(80.0, 90.0),
                    rotatable: true,
                    heading: Some(90.0),
                    sprite: Sprite::Image("rat"),
                    geometry: DrawableGeometry::Circle { radius: 15.0 },
                },
            ]
        );
    }
}
