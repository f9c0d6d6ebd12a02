use std::time::Duration;

pub struct Config {
    /// tracer particles in the ensemble
    pub particle_count: usize,
    /// seed of the random source used by the uniform jitter model
    pub seed: u64,
    pub min_duration_between_logs: Duration,
    pub fps_limit: usize,
    pub render: RenderConfig,
}
pub struct RenderConfig {
    pub width: usize,  // px
    pub height: usize, // px
    /// length of the velocity direction indicator, in pixels
    pub indicator_length: f64,
    pub particle_radius: usize, // px
}
pub const CONFIG: Config = Config {
    particle_count: 25,
    seed: 0x5EED,
    min_duration_between_logs: Duration::from_secs(1),
    fps_limit: 20,
    render: RenderConfig {
        width: 1200,
        height: 400,
        indicator_length: 24.0,
        particle_radius: 3,
    },
};
