//! Classification of drag gestures into swipe directions.

use serde::{Deserialize, Serialize};

/// Screen-space vector; `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector2 {
    /// Construct a vector.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Commit thresholds for the position+velocity composite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SwipeThresholds {
    /// Minimum composite power, in pixels, for a swipe to commit.
    pub distance: f64,
    /// Pixels of power contributed per px/s of release velocity.
    pub velocity_weight: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            distance: 100.0,
            velocity_weight: 0.2,
        }
    }
}

/// Outcome of a released drag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Swipe {
    /// Skip for now.
    Left,
    /// Mark done.
    Right,
    /// Next cat.
    Up,
    /// Previous cat.
    Down,
    /// Below threshold; the card springs back.
    None,
}

/// Classify a released drag.
///
/// Each axis gets `offset + velocity * velocity_weight`; the axis with the
/// larger absolute power decides the direction and must reach
/// `thresholds.distance`. Horizontal wins exact ties.
#[must_use]
pub fn classify(offset: Vector2, velocity: Vector2, thresholds: SwipeThresholds) -> Swipe {
    let power_x = offset.x + velocity.x * thresholds.velocity_weight;
    let power_y = offset.y + velocity.y * thresholds.velocity_weight;

    if !power_x.is_finite() || !power_y.is_finite() {
        return Swipe::None;
    }

    if power_x.abs() >= power_y.abs() {
        if power_x.abs() < thresholds.distance {
            Swipe::None
        } else if power_x > 0.0 {
            Swipe::Right
        } else {
            Swipe::Left
        }
    } else if power_y.abs() < thresholds.distance {
        Swipe::None
    } else if power_y < 0.0 {
        Swipe::Up
    } else {
        Swipe::Down
    }
}
