//! Basic building blocks.
//!
//! The arena uses screen coordinates: x grows to the east, y grows to the south. Headings are
//! given in degrees and measured from the +x axis, with positive angles turning towards north
//! (counter-clockwise on screen).

use std::{
    f64::consts::PI,
    ops::{Add, Mul, Neg, Sub},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const EAST: Position = Position::new(1.0, 0.0);
    pub const WEST: Position = Position::new(-1.0, 0.0);
    pub const NORTH: Position = Position::new(0.0, -1.0);
    pub const SOUTH: Position = Position::new(0.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance(&self, position: Self) -> f64 {
        ((self.x - position.x).powi(2) + (self.y - position.y).powi(2)).sqrt()
    }

    pub fn norm(&self) -> f64 {
        self.distance(Position::default())
    }

    /// Unit vector pointing in the same direction, or `None` for the zero vector.
    pub fn normalized(&self) -> Option<Position> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            None
        } else {
            Some(Position::new(self.x / norm, self.y / norm))
        }
    }

    pub fn rotate_vector(&self, angle: Angle) -> Position {
        Position::new(
            self.x * angle.0.cos() - self.y * angle.0.sin(),
            self.x * angle.0.sin() + self.y * angle.0.cos(),
        )
    }

    /// Exact quarter turn, equivalent to `rotate_vector(Angle::from_deg(90.0))` without the
    /// rounding of the trigonometric functions.
    pub fn quarter_turn(&self) -> Position {
        Position::new(-self.y, self.x)
    }

    /// Heading in degrees of this vector taken as a direction.
    pub fn heading(&self) -> f64 {
        -self.y.atan2(self.x).to_degrees()
    }

    /// Unit direction vector for a heading in degrees.
    pub fn from_heading(heading: f64) -> Position {
        let angle = heading.to_radians();
        Position::new(angle.cos(), -angle.sin())
    }
}

impl From<Position> for (f32, f32) {
    fn from(value: Position) -> Self {
        (value.x as f32, value.y as f32)
    }
}

impl From<Position> for (f64, f64) {
    fn from(value: Position) -> Self {
        (value.x, value.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from(value: (f64, f64)) -> Self {
        Position::new(value.0, value.1)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub fn from_deg(degree: f64) -> Self {
        Self(degree * PI / 180.0)
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}
