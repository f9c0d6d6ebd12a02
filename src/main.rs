mod framebuffer;
mod visual;

use crate::framebuffer::FrameBuffer;
use capillary_flow::{
    config::CONFIG,
    engine::{Engine, EngineConfig, FlowModel, FrameSnapshot},
    params::ParameterSet,
};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::{error::Error, time::Instant};

const TEMPERATURE_STEP: f64 = 5.0; // K
const PRESSURE_DROP_FACTOR: f64 = 2.0;

pub struct Sim {
    engine: Engine,
    ui: UiState,
}
struct UiState {
    tick_index: usize,
    last_logged_instant: Instant,
    exponential_moving_average_frame_time: f64,
}
struct InputSnapshot {
    pressed_space: bool,
    pressed_up: bool,
    pressed_down: bool,
    pressed_left: bool,
    pressed_right: bool,
    pressed_model: bool,
    pressed_reset: bool,
}

/// A parameter edit requested from the keyboard.
enum Edit {
    Temperature(f64),
    PressureDropFactor(f64),
    Defaults,
}

impl Edit {
    fn apply(&self, params: &ParameterSet) -> ParameterSet {
        match *self {
            Edit::Temperature(delta) => ParameterSet {
                temperature: params.temperature + delta,
                ..*params
            },
            Edit::PressureDropFactor(factor) => ParameterSet {
                pressure_start: params.pressure_end + params.pressure_drop() * factor,
                ..*params
            },
            Edit::Defaults => ParameterSet::DEFAULT,
        }
    }
}

impl Sim {
    fn new(model: FlowModel, params: ParameterSet) -> capillary_flow::Result<Self> {
        Ok(Self {
            engine: Engine::new(EngineConfig::new(model), params)?,
            ui: UiState {
                tick_index: 0,
                last_logged_instant: Instant::now(),
                exponential_moving_average_frame_time: 1.0,
            },
        })
    }
    fn handle_input(
        &mut self,
        InputSnapshot {
            pressed_space,
            pressed_up,
            pressed_down,
            pressed_left,
            pressed_right,
            pressed_model,
            pressed_reset,
        }: InputSnapshot,
    ) {
        if pressed_space {
            self.engine.toggle_pause();
        }
        if pressed_model {
            self.switch_model();
        }
        let edits = [
            (pressed_up, Edit::Temperature(TEMPERATURE_STEP)),
            (pressed_down, Edit::Temperature(-TEMPERATURE_STEP)),
            (pressed_right, Edit::PressureDropFactor(PRESSURE_DROP_FACTOR)),
            (pressed_left, Edit::PressureDropFactor(1.0 / PRESSURE_DROP_FACTOR)),
            (pressed_reset, Edit::Defaults),
        ];
        for (_, edit) in edits.iter().filter(|(pressed, _)| *pressed) {
            let params = edit.apply(self.engine.parameters());
            if let Err(err) = self.engine.update_parameters(params) {
                log::warn!("Keeping previous parameters: {}", err);
            }
        }
    }
    fn switch_model(&mut self) {
        let model = match self.engine.config().model {
            FlowModel::PressureDriven => FlowModel::UniformJitter,
            FlowModel::UniformJitter => FlowModel::PressureDriven,
        };
        let paused = self.engine.is_paused();
        match Engine::new(EngineConfig::new(model), *self.engine.parameters()) {
            Ok(mut engine) => {
                if paused {
                    engine.toggle_pause();
                }
                self.engine = engine;
            }
            Err(err) => log::warn!("Cannot switch to {:?}: {}", model, err),
        }
    }
    fn maybe_log(&mut self, frame: &FrameSnapshot) {
        self.ui.tick_index += 1;
        let now = Instant::now();
        if now.duration_since(self.ui.last_logged_instant) > CONFIG.min_duration_between_logs {
            log::info!(
                "tick {} (frame {}), {:.0} FPS, Re = {:.2}, {}",
                self.engine.ticks_elapsed(),
                self.ui.tick_index,
                1.0 / self.ui.exponential_moving_average_frame_time,
                frame.reynolds,
                frame.regime,
            );
            self.ui.last_logged_instant = now;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut framebuffer = FrameBuffer::new();
    let mut window = Window::new(
        "Capillary flow",
        FrameBuffer::WIDTH,
        FrameBuffer::HEIGHT,
        WindowOptions::default(),
    )?;
    window.limit_update_rate(Some(std::time::Duration::from_nanos(
        1_000_000_000 / CONFIG.fps_limit as u64,
    )));

    let mut sim = Sim::new(FlowModel::PressureDriven, ParameterSet::DEFAULT)?;
    let mut instant_last_frame = Instant::now();
    const C: f64 = 0.90;
    log::info!("Space: pause, Up/Down: temperature, Left/Right: pressure drop, M: model, R: defaults");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        sim.handle_input(InputSnapshot {
            pressed_space: window.is_key_pressed(Key::Space, KeyRepeat::No),
            pressed_up: window.is_key_pressed(Key::Up, KeyRepeat::No),
            pressed_down: window.is_key_pressed(Key::Down, KeyRepeat::No),
            pressed_left: window.is_key_pressed(Key::Left, KeyRepeat::No),
            pressed_right: window.is_key_pressed(Key::Right, KeyRepeat::No),
            pressed_model: window.is_key_pressed(Key::M, KeyRepeat::No),
            pressed_reset: window.is_key_pressed(Key::R, KeyRepeat::No),
        });

        let frame = sim.engine.tick();
        visual::paint(
            &mut framebuffer,
            &frame,
            sim.engine.parameters(),
            sim.engine.config().model,
        );
        window.set_title(&visual::title(&frame, sim.engine.is_paused()));
        window.update_with_buffer(
            framebuffer.as_flat(),
            FrameBuffer::WIDTH,
            FrameBuffer::HEIGHT,
        )?;

        {
            let now = Instant::now();
            let frame_time = now.duration_since(instant_last_frame).as_secs_f64();
            instant_last_frame = now;
            sim.ui.exponential_moving_average_frame_time *= C;
            sim.ui.exponential_moving_average_frame_time += (1.0 - C) * frame_time;
        }
        sim.maybe_log(&frame);
    }
    Ok(())
}
