use capillary_flow::config::CONFIG;
use rayon::prelude::*;

pub struct FrameBuffer {
    inner: Vec<u32>,
}
impl FrameBuffer {
    pub const WIDTH: usize = CONFIG.render.width;
    pub const HEIGHT: usize = CONFIG.render.height;

    const SIZE: usize = Self::WIDTH * Self::HEIGHT;

    pub fn new() -> Self {
        Self {
            inner: vec![0xFFFFFF; Self::SIZE],
        }
    }
    pub fn as_flat(&self) -> &[u32] {
        &self.inner
    }
    /// Out of bounds pixels are silently dropped.
    pub fn set_pixel(&mut self, r: isize, c: isize, color: u32) {
        if 0 <= r && (r as usize) < Self::HEIGHT && 0 <= c && (c as usize) < Self::WIDTH {
            self.inner[r as usize * Self::WIDTH + c as usize] = color;
        }
    }
    pub fn fill_rows<F>(&mut self, row_color: F)
    where
        F: Fn(usize) -> u32 + Sync,
    {
        self.inner
            .par_chunks_mut(Self::WIDTH)
            .enumerate()
            .for_each(|(r, row)| row.fill(row_color(r)));
    }
    pub fn draw_dot(&mut self, (r, c): (f64, f64), radius: usize, color: u32) {
        let (r0, c0) = (r.round() as isize, c.round() as isize);
        let radius = radius as isize;
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr * dr + dc * dc <= radius * radius {
                    self.set_pixel(r0 + dr, c0 + dc, color);
                }
            }
        }
    }
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: u32) {
        let (dr, dc) = (to.0 - from.0, to.1 - from.1);
        let steps = dr.abs().max(dc.abs()).ceil() as usize;
        for i in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                i as f64 / steps as f64
            };
            self.set_pixel(
                (from.0 + t * dr).round() as isize,
                (from.1 + t * dc).round() as isize,
                color,
            );
        }
    }
}
