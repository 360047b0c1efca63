//! Keeping the agent inside the arena.

use super::Position;

/// Distance between the arena border and the area reachable by the agent's center.
pub const BOUNDARY_MARGIN: f64 = 50.0;

/// Clamp each axis of `position` into `[margin, dimension - margin]`.
///
/// The second value tells whether any axis had to be adjusted, which counts as a collision with
/// the arena border.
pub fn clamp(position: Position, width: f64, height: f64, margin: f64) -> (Position, bool) {
    let x = clamp_axis(position.x(), width, margin);
    let y = clamp_axis(position.y(), height, margin);
    let clamped = Position::new(x, y);
    (clamped, clamped != position)
}

fn clamp_axis(value: f64, dimension: f64, margin: f64) -> f64 {
    value.max(margin).min(dimension - margin)
}
