//! Agent, goal and obstacles placed in the arena.

use super::{Angle, HasCollision, Position, Shape, SteeringVariant};

/// Per-axis distance within which the agent has reached the goal.
pub const GOAL_CAPTURE_EXTENT: f64 = 50.0;

/// Position and heading of an entity. The direction vector always matches the heading.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Pose {
    position: Position,
    heading: f64,
    direction: Position,
}

impl Pose {
    pub fn new(position: Position, heading: f64) -> Self {
        Self {
            position,
            heading,
            direction: Position::from_heading(heading),
        }
    }

    /// Pose looking along `direction`. A zero vector falls back to facing east.
    pub fn facing(position: Position, direction: Position) -> Self {
        let direction = direction.normalized().unwrap_or(Position::EAST);
        Self {
            position,
            heading: direction.heading(),
            direction,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Heading in degrees.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn direction(&self) -> Position {
        self.direction
    }

    pub fn with_position(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    pub fn with_heading(&self, heading: f64) -> Self {
        Self::new(self.position, heading)
    }

    /// Turn towards `direction`. Motion vectors of zero length leave the heading untouched.
    pub fn with_direction(&self, direction: Position) -> Self {
        match direction.normalized() {
            Some(direction) => Self {
                position: self.position,
                heading: direction.heading(),
                direction,
            },
            None => *self,
        }
    }

    pub fn rotated(&self, angle: Angle) -> Self {
        self.with_direction(self.direction.rotate_vector(angle))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Position::default(), 0.0)
    }
}

/// The mobile agent. Exactly one exists per episode.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Agent {
    pose: Pose,
    steering: SteeringVariant,
    max_speed: f64,
    turn_increment: f64,
    dt: f64,
    radius: f64,
    collided: bool,
}

impl Agent {
    pub fn new(pose: Pose, steering: SteeringVariant) -> Self {
        Self {
            pose,
            steering,
            max_speed: 100.0,
            turn_increment: 90.0,
            dt: 1.0,
            radius: 15.0,
            collided: false,
        }
    }

    pub fn with_max_speed(&self, max_speed: f64) -> Self {
        Self {
            max_speed,
            ..self.clone()
        }
    }

    pub fn with_turn_increment(&self, turn_increment: f64) -> Self {
        Self {
            turn_increment,
            ..self.clone()
        }
    }

    pub fn with_dt(&self, dt: f64) -> Self {
        Self { dt, ..self.clone() }
    }

    pub fn with_radius(&self, radius: f64) -> Self {
        Self {
            radius,
            ..self.clone()
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Position {
        self.pose.position()
    }

    pub fn heading(&self) -> f64 {
        self.pose.heading()
    }

    pub fn direction(&self) -> Position {
        self.pose.direction()
    }

    pub fn steering(&self) -> SteeringVariant {
        self.steering
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Degrees turned by a single discrete turn.
    pub fn turn_increment(&self) -> f64 {
        self.turn_increment
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance between the tracks of a skid-steered agent.
    pub fn width(&self) -> f64 {
        2.0 * self.radius
    }

    pub fn collided(&self) -> bool {
        self.collided
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub fn set_collided(&mut self, collided: bool) {
        self.collided = collided;
    }

    /// Copy of the agent standing at `pose`, used to probe intermediate positions.
    pub(super) fn at(&self, pose: Pose) -> Self {
        Self {
            pose,
            ..self.clone()
        }
    }
}

impl HasCollision for Agent {
    fn shape(&self) -> Shape {
        Shape::Circle {
            position: self.pose.position(),
            radius: self.radius,
        }
    }
}

/// Stationary target. The agent may pass through it; reaching it ends the episode.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Goal {
    position: Position,
}

impl Goal {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_reached_by(&self, position: Position) -> bool {
        (position.x() - self.position.x()).abs() < GOAL_CAPTURE_EXTENT
            && (position.y() - self.position.y()).abs() < GOAL_CAPTURE_EXTENT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum ObstacleKind {
    Rectangle {
        center: Position,
        width: f64,
        height: f64,
        rotation: f64,
    },
    Circle {
        center: Position,
        radius: f64,
    },
}

/// Static obstacle. The collision shape is computed once on construction.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Obstacle {
    name: String,
    kind: ObstacleKind,
    color: String,
    bounds: Shape,
}

impl Obstacle {
    pub const DEFAULT_COLOR: &'static str = "grey";

    /// Rectangle of `width × height` turned by `rotation` degrees around its center.
    pub fn rectangle(
        name: impl Into<String>,
        center: Position,
        width: f64,
        height: f64,
        rotation: f64,
    ) -> Self {
        let angle = rotation.to_radians();
        let (sin, cos) = (angle.sin().abs(), angle.cos().abs());
        Self {
            name: name.into(),
            kind: ObstacleKind::Rectangle {
                center,
                width,
                height,
                rotation,
            },
            color: Self::DEFAULT_COLOR.to_string(),
            bounds: Shape::Rectangle {
                position: center,
                x_length: width * cos + height * sin,
                y_length: width * sin + height * cos,
            },
        }
    }

    pub fn circle(name: impl Into<String>, center: Position, radius: f64) -> Self {
        Self {
            name: name.into(),
            kind: ObstacleKind::Circle { center, radius },
            color: Self::DEFAULT_COLOR.to_string(),
            bounds: Shape::Circle {
                position: center,
                radius,
            },
        }
    }

    pub fn with_color(self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn position(&self) -> Position {
        self.bounds.position()
    }

    /// Collision shape: the bounding box of the rotated outline for rectangles.
    pub fn bounds(&self) -> Shape {
        self.bounds
    }
}

impl HasCollision for Obstacle {
    fn shape(&self) -> Shape {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-9;

    #[rstest]
    #[case::unrotated(60.0, 20.0, 0.0, (60.0, 20.0))]
    #[case::quarter_turn(60.0, 20.0, 90.0, (20.0, 60.0))]
    #[case::diagonal(60.0, 60.0, 45.0, (60.0 * std::f64::consts::SQRT_2, 60.0 * std::f64::consts::SQRT_2))]
    #[case::negative(50.0, 50.0, -90.0, (50.0, 50.0))]
    fn test_obstacle_rectangle_bounds(
        #[case] width: f64,
        #[case] height: f64,
        #[case] rotation: f64,
        #[case] lengths: (f64, f64),
    ) {
        let obstacle = Obstacle::rectangle("block", Position::new(10.0, 20.0), width, height, rotation);
        let Shape::Rectangle {
            position,
            x_length,
            y_length,
        } = obstacle.bounds()
        else {
            panic!("rectangle obstacle without rectangular bounds");
        };
        assert_abs_diff_eq!(position, Position::new(10.0, 20.0));
        assert_abs_diff_eq!(x_length, lengths.0, epsilon = EPSILON);
        assert_abs_diff_eq!(y_length, lengths.1, epsilon = EPSILON);
    }

    #[test]
    fn test_obstacle_circle_bounds() {
        let obstacle = Obstacle::circle("ball", Position::new(1.0, 2.0), 3.0).with_color("blue");
        assert_eq!(
            obstacle.bounds(),
            Shape::Circle {
                position: Position::new(1.0, 2.0),
                radius: 3.0
            }
        );
        assert_eq!(obstacle.color(), "blue");
        assert_eq!(obstacle.name(), "ball");
    }

    #[rstest]
    #[case::inside(Position::new(520.0, 530.0), true)]
    #[case::on_capture_edge(Position::new(500.0, 550.0), false)]
    #[case::one_axis_only(Position::new(550.0, 450.0), false)]
    fn test_goal_is_reached_by(#[case] position: Position, #[case] expected: bool) {
        let goal = Goal::new(Position::new(550.0, 550.0));
        assert_eq!(goal.is_reached_by(position), expected);
    }

    #[test]
    fn test_pose_with_zero_direction_keeps_heading() {
        let pose = Pose::new(Position::new(1.0, 1.0), 90.0);
        assert_eq!(pose.with_direction(Position::default()), pose);
    }

    #[test]
    fn test_pose_facing() {
        let pose = Pose::facing(Position::new(1.0, 1.0), Position::new(0.0, 2.0));
        assert_abs_diff_eq!(pose.heading(), -90.0, epsilon = EPSILON);
        assert_abs_diff_eq!(pose.direction(), Position::SOUTH, epsilon = EPSILON);

        let pose = Pose::facing(Position::new(1.0, 1.0), Position::default());
        assert_abs_diff_eq!(pose.heading(), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(pose.direction(), Position::EAST, epsilon = EPSILON);
    }

    #[test]
    fn test_agent_shape() {
        let agent = Agent::new(Pose::new(Position::new(5.0, 6.0), 0.0), SteeringVariant::Discrete)
            .with_radius(4.0);
        assert_eq!(
            agent.shape(),
            Shape::Circle {
                position: Position::new(5.0, 6.0),
                radius: 4.0
            }
        );
        assert_abs_diff_eq!(agent.width(), 8.0);
    }
}
