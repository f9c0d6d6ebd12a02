use cgmath::Vector2;

/// A tracer riding along with the fluid. `lane` is the lateral offset the
/// particle was seeded at; it never changes for the particle's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    lane: f64,
}

impl Particle {
    pub fn new_in_lane(x: f64, lane: f64, vel: Vector2<f64>) -> Self {
        Self {
            pos: Vector2::new(x, lane),
            vel,
            lane,
        }
    }
    pub fn lane(&self) -> f64 {
        self.lane
    }
    pub fn return_to_lane(&mut self) {
        self.pos.y = self.lane;
    }
    pub fn advance(&mut self) {
        self.pos.x += self.vel.x;
    }
    pub fn is_outside_bounds(&self, length: f64) -> bool {
        !(0.0 <= self.pos.x && self.pos.x < length)
    }
    pub fn wrap(&mut self, length: f64) {
        self.pos.x = self.pos.x.rem_euclid(length);
        // rem_euclid of a tiny negative number rounds up to `length`
        if self.pos.x >= length {
            self.pos.x = 0.0;
        }
    }
    pub fn snapshot(&self) -> ParticleState {
        ParticleState {
            x: self.pos.x,
            y: self.pos.y,
            vx: self.vel.x,
            vy: self.vel.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}
