//! Collision detection based on basic shapes.
//!
//! Rectangles are always axis-aligned here. Rotated obstacles are reduced to the bounding box of
//! their rotated outline before they reach this module, and circles are tested against
//! rectangles through their own bounding square.

use super::Position;

pub trait HasCollision {
    fn has_collision(&self, other: &dyn HasCollision) -> bool {
        self.shape().has_intersection(&other.shape())
    }

    fn shape(&self) -> Shape;
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Shape {
    Rectangle {
        position: Position,
        x_length: f64,
        y_length: f64,
    },
    Circle {
        position: Position,
        radius: f64,
    },
}

impl Shape {
    pub fn position(&self) -> Position {
        match self {
            Shape::Rectangle { position, .. } | Shape::Circle { position, .. } => *position,
        }
    }

    /// Smallest axis-aligned rectangle enclosing the shape.
    pub fn bounding_box(&self) -> Shape {
        match *self {
            Shape::Rectangle { .. } => *self,
            Shape::Circle { position, radius } => Shape::Rectangle {
                position,
                x_length: 2.0 * radius,
                y_length: 2.0 * radius,
            },
        }
    }

    pub fn has_intersection(&self, other: &Shape) -> bool {
        match (self, other) {
            (
                Shape::Circle { position, radius },
                Shape::Circle {
                    position: other_position,
                    radius: other_radius,
                },
            ) => position.distance(*other_position) <= radius + other_radius,
            (Shape::Circle { .. }, Shape::Rectangle { .. }) => {
                self.bounding_box().has_intersection(other)
            }
            (Shape::Rectangle { .. }, Shape::Circle { .. }) => {
                self.has_intersection(&other.bounding_box())
            }
            (
                Shape::Rectangle {
                    position,
                    x_length,
                    y_length,
                },
                Shape::Rectangle {
                    position: other_position,
                    x_length: other_x_length,
                    y_length: other_y_length,
                },
            ) => {
                // Touching edges do not count as an overlap.
                let (x_min, x_max, y_min, y_max) = extents(*position, *x_length, *y_length);
                let (other_x_min, other_x_max, other_y_min, other_y_max) =
                    extents(*other_position, *other_x_length, *other_y_length);
                x_min < other_x_max
                    && x_max > other_x_min
                    && y_min < other_y_max
                    && y_max > other_y_min
            }
        }
    }
}

fn extents(position: Position, x_length: f64, y_length: f64) -> (f64, f64, f64, f64) {
    (
        position.x() - x_length / 2.0,
        position.x() + x_length / 2.0,
        position.y() - y_length / 2.0,
        position.y() + y_length / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn square(x: f64, y: f64, length: f64) -> Shape {
        Shape::Rectangle {
            position: Position::new(x, y),
            x_length: length,
            y_length: length,
        }
    }

    fn circle(x: f64, y: f64, radius: f64) -> Shape {
        Shape::Circle {
            position: Position::new(x, y),
            radius,
        }
    }

    #[rstest]
    #[case::overlapping(square(0.0, 0.0, 2.0), square(1.5, 1.5, 2.0), true)]
    #[case::contained(square(0.0, 0.0, 10.0), square(1.0, -1.0, 1.0), true)]
    #[case::touching_edge(square(0.0, 0.0, 2.0), square(2.0, 0.0, 2.0), false)]
    #[case::separated(square(0.0, 0.0, 2.0), square(5.0, 0.0, 2.0), false)]
    #[case::circles_touching(circle(0.0, 0.0, 1.0), circle(3.0, 0.0, 2.0), true)]
    #[case::circles_apart(circle(0.0, 0.0, 1.0), circle(3.1, 0.0, 2.0), false)]
    #[case::circle_bounding_square_hits_corner(circle(0.0, 0.0, 1.0), square(1.8, 1.8, 2.0), true)]
    #[case::circle_next_to_square(circle(0.0, 0.0, 1.0), square(3.0, 0.0, 2.0), false)]
    fn test_shape_has_intersection(#[case] a: Shape, #[case] b: Shape, #[case] expected: bool) {
        assert_eq!(a.has_intersection(&b), expected);
        assert_eq!(b.has_intersection(&a), expected);
    }

    #[test]
    fn test_circle_bounding_box() {
        assert_eq!(circle(1.0, 2.0, 3.0).bounding_box(), square(1.0, 2.0, 6.0));
    }
}
