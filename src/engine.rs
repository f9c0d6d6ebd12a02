use crate::{
    config::CONFIG,
    error::{FlowError, Result},
    field,
    fluid::FluidState,
    jitter::{self, JitterBounds, JitterFn},
    params::ParameterSet,
    particle::{Particle, ParticleState},
    regime::{self, Classification, Regime},
};
use cgmath::Vector2;
use rand::{rngs::StdRng, SeedableRng};
use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowModel {
    /// Parabolic profile driven by the pressure drop along the capillary
    PressureDriven,
    /// Random per-particle speeds with lateral jitter once the flow turns
    /// turbulent
    UniformJitter,
}

impl FlowModel {
    pub fn default_boundary(self) -> BoundaryPolicy {
        match self {
            FlowModel::PressureDriven => BoundaryPolicy::ResetAndFlag,
            FlowModel::UniformJitter => BoundaryPolicy::Wrap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Periodic domain, a particle leaving one end reappears at the other
    Wrap,
    /// As soon as any particle leaves the capillary, every particle restarts
    /// at the inlet and the emitted frame is flagged
    ResetAndFlag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub particle_count: usize,
    pub model: FlowModel,
    pub boundary: BoundaryPolicy,
    pub seed: u64,
}

impl EngineConfig {
    pub fn new(model: FlowModel) -> Self {
        Self {
            particle_count: CONFIG.particle_count,
            model,
            boundary: model.default_boundary(),
            seed: CONFIG.seed,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(FlowModel::PressureDriven)
    }
}

/// What the renderer gets to see after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub particles: Vec<ParticleState>,
    pub reynolds: f64,
    pub regime: Regime,
    /// Set on exactly the frame in which the ensemble was sent back to the
    /// inlet
    pub just_reset: bool,
}

pub struct Engine {
    config: EngineConfig,
    params: ParameterSet,
    fluid: FluidState,
    particles: Vec<Particle>,
    rng: StdRng,
    jitter: JitterFn,
    paused: bool,
    last_frame: FrameSnapshot,
    ticks_elapsed: usize,
}

/// Everything that is replaced together by a parameter update.
struct Seeded {
    fluid: FluidState,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl Engine {
    pub fn new(config: EngineConfig, params: ParameterSet) -> Result<Self> {
        Self::with_jitter(config, params, jitter::uniform_jitter)
    }
    pub fn with_jitter(
        config: EngineConfig,
        params: ParameterSet,
        jitter: JitterFn,
    ) -> Result<Self> {
        if config.particle_count == 0 {
            return Err(FlowError::invalid(
                "particle_count",
                0.0,
                "the ensemble needs at least one particle",
            ));
        }
        let Seeded {
            fluid,
            particles,
            rng,
        } = seed(&config, &params)?;
        let mut engine = Self {
            config,
            params,
            fluid,
            particles,
            rng,
            jitter,
            paused: false,
            last_frame: FrameSnapshot {
                particles: Vec::new(),
                reynolds: 0.0,
                regime: Regime::Laminar,
                just_reset: false,
            },
            ticks_elapsed: 0,
        };
        engine.last_frame = engine.frame(engine.classify(), false);
        log::info!(
            "{:?} engine with {} particles, {:?} boundary, effective viscosity {:.4e} Pa s",
            config.model,
            config.particle_count,
            config.boundary,
            engine.fluid.effective_viscosity(),
        );
        Ok(engine)
    }

    /// Replaces the parameter set, recomputes the fluid state and re-seeds the
    /// ensemble. Nothing changes if the new parameters are rejected.
    pub fn update_parameters(&mut self, params: ParameterSet) -> Result<()> {
        let Seeded {
            fluid,
            particles,
            rng,
        } = seed(&self.config, &params)?;
        self.params = params;
        self.fluid = fluid;
        self.particles = particles;
        self.rng = rng;
        self.last_frame = self.frame(self.classify(), false);
        log::info!(
            "Parameters updated: T = {} K, dp = {:.3e} Pa, effective viscosity {:.4e} Pa s, Re = {:.1}",
            params.temperature,
            params.pressure_drop(),
            fluid.effective_viscosity(),
            self.last_frame.reynolds,
        );
        Ok(())
    }

    /// Advances the simulation one step. While paused nothing moves and the
    /// last frame is handed out again.
    pub fn tick(&mut self) -> FrameSnapshot {
        if self.paused {
            return self.last_frame.clone();
        }
        let classification = self.classify();
        match self.config.model {
            FlowModel::PressureDriven => self.step_pressure_driven(&classification),
            FlowModel::UniformJitter => self.step_uniform_jitter(&classification),
        }
        let just_reset = self.apply_boundary();
        self.ticks_elapsed += 1;

        let frame = self.frame(classification, just_reset);
        if frame.regime != self.last_frame.regime {
            log::debug!(
                "Tick {}: {} -> {} (Re = {:.3})",
                self.ticks_elapsed,
                self.last_frame.regime,
                frame.regime,
                frame.reynolds
            );
        }
        self.last_frame = frame.clone();
        frame
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused ^= true;
        log::info!(
            "Simulation {} at tick {}",
            if self.paused { "paused" } else { "resumed" },
            self.ticks_elapsed
        );
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }
    pub fn fluid_state(&self) -> &FluidState {
        &self.fluid
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn ticks_elapsed(&self) -> usize {
        self.ticks_elapsed
    }
    /// The frame most recently emitted, or the freshly seeded state if no tick
    /// happened since the last parameter update.
    pub fn current_frame(&self) -> &FrameSnapshot {
        &self.last_frame
    }

    fn mean_axial_velocity(&self) -> f64 {
        let velocities: Vec<f64> = self.particles.iter().map(|p| p.vel.x).collect();
        field::mean(&velocities)
    }

    fn characteristic_length(&self) -> f64 {
        match self.config.model {
            FlowModel::PressureDriven => self.params.max_width,
            FlowModel::UniformJitter => regime::interpolated_diameter(
                self.params.min_width,
                self.params.max_width,
                FRAC_PI_2,
            ),
        }
    }

    fn classify(&self) -> Classification {
        regime::classify(regime::reynolds_number(
            self.params.density,
            self.mean_axial_velocity(),
            self.characteristic_length(),
            self.fluid.effective_viscosity(),
        ))
    }

    fn regime_tag(&self, classification: &Classification) -> Regime {
        match self.config.model {
            FlowModel::PressureDriven => classification.forces.into(),
            FlowModel::UniformJitter => classification.flow.into(),
        }
    }

    /// Viscosity dominated flow moves as a plug at the current mean speed,
    /// anything else gets the full parabolic profile back. The decision is
    /// made fresh every tick.
    fn step_pressure_driven(&mut self, classification: &Classification) {
        let velocities = match classification.forces {
            regime::ForceBalance::ViscosityDominant => {
                let mut velocities: Vec<f64> = self.particles.iter().map(|p| p.vel.x).collect();
                field::flatten_to_mean(&mut velocities);
                velocities
            }
            regime::ForceBalance::InertiaDominant => {
                let lanes: Vec<f64> = self.particles.iter().map(Particle::lane).collect();
                poiseuille_field(&self.params, &self.fluid, &lanes)
            }
        };
        for (particle, vx) in self.particles.iter_mut().zip(velocities) {
            particle.vel = Vector2::new(vx, 0.0);
            particle.advance();
        }
    }

    fn step_uniform_jitter(&mut self, classification: &Classification) {
        let bounds = jitter_bounds(&self.params);
        let max_width = self.params.max_width;
        for particle in self.particles.iter_mut() {
            particle.advance();
            let prior = particle.vel;
            match classification.flow {
                regime::FlowRegime::Laminar => particle.return_to_lane(),
                regime::FlowRegime::Turbulent => {
                    let step = jitter::uniform(
                        &mut self.rng,
                        -jitter::LATERAL_STEP_SCALE,
                        jitter::LATERAL_STEP_SCALE,
                    );
                    particle.pos.y = (particle.pos.y + prior.y * step).max(0.0).min(max_width);
                }
            }
            particle.vel = (self.jitter)(prior, classification.flow, &bounds, &mut self.rng);
        }
    }

    fn apply_boundary(&mut self) -> bool {
        let length = self.params.capillary_length;
        match self.config.boundary {
            BoundaryPolicy::Wrap => {
                self.particles.iter_mut().for_each(|p| p.wrap(length));
                false
            }
            BoundaryPolicy::ResetAndFlag => {
                if !self.particles.iter().any(|p| p.is_outside_bounds(length)) {
                    return false;
                }
                self.particles.iter_mut().for_each(|p| p.pos.x = 0.0);
                log::debug!("Tick {}: ensemble reset to the inlet", self.ticks_elapsed + 1);
                true
            }
        }
    }

    fn frame(&self, classification: Classification, just_reset: bool) -> FrameSnapshot {
        FrameSnapshot {
            particles: self.particles.iter().map(Particle::snapshot).collect(),
            reynolds: classification.reynolds,
            regime: self.regime_tag(&classification),
            just_reset,
        }
    }
}

fn jitter_bounds(params: &ParameterSet) -> JitterBounds {
    JitterBounds {
        vx: params.particle_vx_bound,
        vy: params.particle_vy_bound,
    }
}

fn poiseuille_field(params: &ParameterSet, fluid: &FluidState, lanes: &[f64]) -> Vec<f64> {
    field::compute_velocity_field(
        params.pressure_start,
        params.pressure_end,
        fluid.effective_viscosity(),
        params.capillary_length,
        params.max_width,
        lanes,
    )
}

/// Builds a fresh fluid state and ensemble, or explains why the parameters
/// cannot be simulated.
fn seed(config: &EngineConfig, params: &ParameterSet) -> Result<Seeded> {
    let fluid = FluidState::from_parameters(params)?;
    let denominator = 4.0 * fluid.effective_viscosity() * params.capillary_length;
    if !(denominator.is_finite() && denominator > 0.0) {
        return Err(FlowError::invalid(
            "capillary_length",
            params.capillary_length,
            "viscous resistance of the capillary is degenerate",
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let count = config.particle_count;
    let particles: Vec<Particle> = match config.model {
        FlowModel::PressureDriven => {
            let lanes = field::lane_offsets(params.max_width, count);
            let velocities = poiseuille_field(params, &fluid, &lanes);
            lanes
                .into_iter()
                .zip(velocities)
                .map(|(lane, vx)| Particle::new_in_lane(0.0, lane, Vector2::new(vx, 0.0)))
                .collect()
        }
        FlowModel::UniformJitter => {
            let bounds = jitter_bounds(params);
            (0..count)
                .map(|i| {
                    let x = params.capillary_length * i as f64 / count as f64;
                    let lane = jitter::uniform(&mut rng, 0.0, params.max_width);
                    let vel = jitter::initial_velocity(&bounds, &mut rng);
                    Particle::new_in_lane(x, lane, vel)
                })
                .collect()
        }
    };
    if let Some(p) = particles
        .iter()
        .find(|p| !(p.vel.x.is_finite() && p.vel.y.is_finite()))
    {
        return Err(FlowError::invalid(
            "pressure_start",
            params.pressure_start,
            if p.vel.x.is_finite() {
                "lateral velocity is not finite"
            } else {
                "axial velocity is not finite"
            },
        ));
    }

    Ok(Seeded {
        fluid,
        particles,
        rng,
    })
}
