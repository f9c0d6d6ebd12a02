//! Axial velocity across the capillary cross-section.
//!
//! The profile is the plane-Poiseuille parabola with half-width
//! `R = max_width / 2`. Lanes outside `[0, max_width]` clamp to zero.

/// `count` evenly spaced lane offsets from wall to wall, both walls included.
pub fn lane_offsets(max_width: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![max_width / 2.0],
        _ => (0..count)
            .map(|i| max_width * i as f64 / (count - 1) as f64)
            .collect(),
    }
}

/// Requires `viscosity * length != 0`.
pub fn poiseuille_velocity(
    pressure_start: f64,
    pressure_end: f64,
    viscosity: f64,
    length: f64,
    max_width: f64,
    lane: f64,
) -> f64 {
    let half_width = max_width / 2.0;
    let pressure_drop = pressure_start - pressure_end;
    let denominator = 4.0 * viscosity * length;
    let distance_from_center = (lane - half_width).abs();
    let clearance2 = (half_width.powi(2) - distance_from_center.powi(2)).max(0.0);
    pressure_drop / denominator * clearance2
}

pub fn compute_velocity_field(
    pressure_start: f64,
    pressure_end: f64,
    viscosity: f64,
    length: f64,
    max_width: f64,
    lanes: &[f64],
) -> Vec<f64> {
    lanes
        .iter()
        .map(|&lane| {
            poiseuille_velocity(
                pressure_start,
                pressure_end,
                viscosity,
                length,
                max_width,
                lane,
            )
        })
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Plug flow: every lane moves at the ensemble's mean speed.
pub fn flatten_to_mean(velocities: &mut [f64]) {
    let mean = mean(velocities);
    velocities.iter_mut().for_each(|v| *v = mean);
}
