use approx::assert_relative_eq;
use capillary_flow::{
    engine::{BoundaryPolicy, Engine, EngineConfig, FlowModel, FrameSnapshot},
    error::FlowError,
    field,
    params::ParameterSet,
    regime::Regime,
};

/// Short capillary with a gentle pressure drop, so the front reaches the
/// outlet within a handful of ticks.
fn short_capillary() -> ParameterSet {
    ParameterSet {
        capillary_length: 10.0,
        pressure_start: 109_132.5,
        pressure_end: 100_000.0,
        ..ParameterSet::DEFAULT
    }
}

fn max_x(frame: &FrameSnapshot) -> f64 {
    frame.particles.iter().map(|p| p.x).fold(f64::MIN, f64::max)
}

#[test]
fn reset_sends_every_particle_back_for_exactly_one_frame() {
    let params = short_capillary();
    let mut engine = Engine::new(EngineConfig::default(), params).unwrap();
    let mut previous = engine.current_frame().clone();
    for _ in 0..100 {
        let about_to_leave = previous
            .particles
            .iter()
            .any(|p| p.x + p.vx >= params.capillary_length);
        let frame = engine.tick();
        if about_to_leave {
            assert!(frame.just_reset);
            assert!(frame.particles.iter().all(|p| p.x == 0.0));

            let next = engine.tick();
            assert!(!next.just_reset);
            for p in &next.particles {
                assert_relative_eq!(p.x, p.vx);
            }
            return;
        }
        assert!(!frame.just_reset);
        assert!(max_x(&frame) < params.capillary_length);
        previous = frame;
    }
    panic!("the ensemble never reached the outlet");
}

#[test]
fn wrap_keeps_particles_inside_without_flagging() {
    let params = short_capillary();
    let config = EngineConfig {
        boundary: BoundaryPolicy::Wrap,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config, params).unwrap();
    let center = engine.current_frame().particles.len() / 2;
    let mut travelled = 0.0;
    for _ in 0..50 {
        let frame = engine.tick();
        assert!(!frame.just_reset);
        for p in &frame.particles {
            assert!(p.x >= 0.0 && p.x < params.capillary_length);
        }
        travelled += frame.particles[center].vx;
    }
    let frame = engine.current_frame();
    assert_relative_eq!(
        frame.particles[center].x,
        travelled % params.capillary_length,
        epsilon = 1e-9
    );
}

#[test]
fn pause_freezes_the_frame() {
    let mut engine = Engine::new(EngineConfig::default(), ParameterSet::DEFAULT).unwrap();
    engine.tick();
    let last = engine.tick();

    assert!(engine.toggle_pause());
    assert!(engine.is_paused());
    for _ in 0..5 {
        assert_eq!(engine.tick(), last);
    }
    assert_eq!(engine.ticks_elapsed(), 2);

    assert!(!engine.toggle_pause());
    let resumed = engine.tick();
    assert_ne!(resumed, last);
    assert_eq!(engine.ticks_elapsed(), 3);
}

#[test]
fn pause_also_freezes_the_reset_flag() {
    let mut engine = Engine::new(EngineConfig::default(), short_capillary()).unwrap();
    let mut frame = engine.tick();
    while !frame.just_reset {
        frame = engine.tick();
    }
    engine.toggle_pause();
    assert!(engine.tick().just_reset);
    assert!(engine.tick().just_reset);
    engine.toggle_pause();
    assert!(!engine.tick().just_reset);
}

#[test]
fn identical_updates_are_idempotent() {
    for &model in [FlowModel::PressureDriven, FlowModel::UniformJitter].iter() {
        let mut engine = Engine::new(EngineConfig::new(model), ParameterSet::DEFAULT).unwrap();
        let params = short_capillary();

        engine.update_parameters(params).unwrap();
        let fluid = *engine.fluid_state();
        let frame = engine.current_frame().clone();
        for _ in 0..7 {
            engine.tick();
        }

        engine.update_parameters(params).unwrap();
        assert_eq!(*engine.fluid_state(), fluid);
        assert_eq!(*engine.current_frame(), frame);
        assert_eq!(engine.tick(), {
            let mut fresh = Engine::new(EngineConfig::new(model), params).unwrap();
            fresh.tick()
        });
    }
}

#[test]
fn rejected_update_changes_nothing() {
    let mut engine = Engine::new(EngineConfig::default(), ParameterSet::DEFAULT).unwrap();
    engine.tick();
    let frame = engine.current_frame().clone();
    let fluid = *engine.fluid_state();

    let broken = [
        ParameterSet {
            max_width: 0.005,
            ..ParameterSet::DEFAULT
        },
        ParameterSet {
            capillary_length: 0.0,
            ..ParameterSet::DEFAULT
        },
        ParameterSet {
            base_viscosity: -0.2,
            ..ParameterSet::DEFAULT
        },
        ParameterSet {
            reference_temperature: 0.0,
            ..ParameterSet::DEFAULT
        },
    ];
    for params in broken.iter() {
        match engine.update_parameters(*params) {
            Err(FlowError::InvalidParameter { .. }) => {}
            Ok(()) => panic!("accepted {:?}", params),
        }
        assert_eq!(*engine.parameters(), ParameterSet::DEFAULT);
        assert_eq!(*engine.fluid_state(), fluid);
        assert_eq!(*engine.current_frame(), frame);
    }
}

#[test]
fn centerline_lane_carries_the_hand_computed_speed() {
    let engine = Engine::new(EngineConfig::default(), ParameterSet::DEFAULT).unwrap();
    let p = ParameterSet::DEFAULT;
    let mu = engine.fluid_state().effective_viscosity();
    let expected = (p.pressure_start - p.pressure_end) / (4.0 * mu * p.capillary_length)
        * (p.max_width / 2.0).powi(2);

    let particles = &engine.current_frame().particles;
    let center = particles.len() / 2;
    assert_relative_eq!(particles[center].y, p.max_width / 2.0, epsilon = 1e-12);
    assert_relative_eq!(particles[center].vx, expected, max_relative = 1e-9);
    assert_relative_eq!(particles[0].vx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(particles[particles.len() - 1].vx, 0.0, epsilon = 1e-9);
}

#[test]
fn reynolds_uses_mean_speed_and_channel_width() {
    let engine = Engine::new(EngineConfig::default(), ParameterSet::DEFAULT).unwrap();
    let frame = engine.current_frame();
    let speeds: Vec<f64> = frame.particles.iter().map(|p| p.vx).collect();
    let p = ParameterSet::DEFAULT;
    let expected =
        p.density * field::mean(&speeds) * p.max_width / engine.fluid_state().effective_viscosity();
    assert_relative_eq!(frame.reynolds, expected, max_relative = 1e-12);
    assert_eq!(frame.regime, Regime::InertiaDominant);
}

#[test]
fn equal_pressures_leave_the_fluid_at_rest() {
    let params = ParameterSet {
        pressure_start: 100_000.0,
        ..ParameterSet::DEFAULT
    };
    let mut engine = Engine::new(EngineConfig::default(), params).unwrap();
    for _ in 0..3 {
        let frame = engine.tick();
        assert_eq!(frame.regime, Regime::ViscosityDominant);
        assert!(frame.particles.iter().all(|p| p.x == 0.0 && p.vx == 0.0));
        assert!(!frame.just_reset);
    }
}

#[test]
fn seeded_jitter_runs_replay() {
    let params = ParameterSet {
        base_viscosity: 0.001,
        particle_vy_bound: 0.05,
        ..ParameterSet::DEFAULT
    };
    let config = EngineConfig::new(FlowModel::UniformJitter);
    let mut a = Engine::new(config, params).unwrap();
    let mut b = Engine::new(config, params).unwrap();
    let mut c = Engine::new(
        EngineConfig {
            seed: config.seed + 1,
            ..config
        },
        params,
    )
    .unwrap();

    let mut diverged = false;
    for _ in 0..30 {
        let frame = a.tick();
        assert_eq!(frame.regime, Regime::Turbulent);
        assert_eq!(frame, b.tick());
        diverged |= frame != c.tick();
    }
    assert!(diverged);
}
