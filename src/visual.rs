use crate::framebuffer::FrameBuffer;
use capillary_flow::{
    config::CONFIG,
    engine::{FlowModel, FrameSnapshot},
    params::ParameterSet,
    regime::Regime,
};

const PARTICLE_COLOR: u32 = 0x000000;
const INDICATOR_COLOR: u32 = 0x505050;
const WALL_COLOR: u32 = 0x202020;

/// Maps capillary coordinates onto the window: the axis runs left to right,
/// `y = 0` is the bottom wall.
#[derive(Clone, Copy)]
pub struct ChannelView {
    length: f64,
    max_width: f64,
}
impl ChannelView {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            length: params.capillary_length,
            max_width: params.max_width,
        }
    }
    pub fn to_window(self, x: f64, y: f64) -> (f64, f64) {
        let r = (1.0 - y / self.max_width) * (FrameBuffer::HEIGHT - 1) as f64;
        let c = x / self.length * (FrameBuffer::WIDTH - 1) as f64;
        (r, c)
    }
    fn row_to_lane(self, r: usize) -> f64 {
        (1.0 - r as f64 / (FrameBuffer::HEIGHT - 1) as f64) * self.max_width
    }
}

fn tint(regime: Regime) -> u32 {
    match regime {
        Regime::Laminar | Regime::InertiaDominant => 0x0000FF,
        Regime::ViscosityDominant => 0x00A000,
        Regime::Turbulent => 0xFF0000,
    }
}

/// Blends `color` into white, `strength` in `[0, 1]`.
fn wash(color: u32, strength: f64) -> u32 {
    let strength = strength.max(0.0).min(1.0) * 0.35;
    let channel = |shift: u32| {
        let c = ((color >> shift) & 0xFF) as f64;
        let blended = 255.0 + (c - 255.0) * strength;
        (blended.round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

pub fn paint(
    framebuffer: &mut FrameBuffer,
    frame: &FrameSnapshot,
    params: &ParameterSet,
    model: FlowModel,
) {
    let view = ChannelView::new(params);
    let color = tint(frame.regime);
    // The parabolic profile shows up as shading across the channel
    framebuffer.fill_rows(|r| {
        if r == 0 || r + 1 == FrameBuffer::HEIGHT {
            return WALL_COLOR;
        }
        let strength = match model {
            FlowModel::PressureDriven => {
                let half = view.max_width / 2.0;
                1.0 - ((view.row_to_lane(r) - half) / half).powi(2)
            }
            FlowModel::UniformJitter => 1.0,
        };
        wash(color, strength)
    });

    for p in &frame.particles {
        let at = view.to_window(p.x, p.y);
        framebuffer.draw_dot(at, CONFIG.render.particle_radius, PARTICLE_COLOR);
        if frame.just_reset {
            continue;
        }
        let speed = p.vx.hypot(p.vy);
        if speed > 0.0 {
            let len = CONFIG.render.indicator_length;
            let tip = (at.0 - p.vy / speed * len, at.1 + p.vx / speed * len);
            framebuffer.draw_line(at, tip, INDICATOR_COLOR);
        }
    }
}

pub fn title(frame: &FrameSnapshot, paused: bool) -> String {
    format!(
        "Capillary flow (Re = {:.1}, {}){}",
        frame.reynolds,
        frame.regime,
        if paused { " [paused]" } else { "" }
    )
}
