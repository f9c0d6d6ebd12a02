//! Random velocity updates for the uniform jitter model.
//!
//! The engine owns the random source and hands it to the policy, so a seeded
//! engine replays the same run and tests can swap the policy out entirely.

use crate::regime::FlowRegime;
use cgmath::Vector2;
use rand::{rngs::StdRng, Rng};

pub const MIN_AXIAL_SPEED: f64 = 0.1;
/// Lateral displacement per tick is `vy` scaled by a factor drawn from
/// `[-LATERAL_STEP_SCALE, LATERAL_STEP_SCALE]`.
pub const LATERAL_STEP_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterBounds {
    pub vx: f64,
    pub vy: f64,
}

pub type JitterFn = fn(Vector2<f64>, FlowRegime, &JitterBounds, &mut StdRng) -> Vector2<f64>;

/// `rand` 0.7 panics on an empty range; a collapsed range yields its lower end.
pub fn uniform(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low, high)
    } else {
        low
    }
}

pub fn initial_velocity(bounds: &JitterBounds, rng: &mut StdRng) -> Vector2<f64> {
    Vector2::new(
        uniform(rng, MIN_AXIAL_SPEED, bounds.vx),
        uniform(rng, -bounds.vy, bounds.vy),
    )
}

/// Laminar flow redraws the axial speed and keeps the (unused) lateral one;
/// turbulent flow keeps the axial speed and redraws the lateral one.
pub fn uniform_jitter(
    prior: Vector2<f64>,
    regime: FlowRegime,
    bounds: &JitterBounds,
    rng: &mut StdRng,
) -> Vector2<f64> {
    match regime {
        FlowRegime::Laminar => Vector2::new(uniform(rng, MIN_AXIAL_SPEED, bounds.vx), prior.y),
        FlowRegime::Turbulent => Vector2::new(prior.x, uniform(rng, -bounds.vy, bounds.vy)),
    }
}
