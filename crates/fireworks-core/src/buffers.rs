//! Fixed-capacity render buffers and the per-frame packer that fills them.
//!
//! Layout matches what a point-sprite renderer uploads directly:
//!
//! - `positions`: `xyz` per point
//! - `colors`: `rgb` per point
//! - `sizes`: one pixel size per point
//!
//! Storage is allocated once at mount and reused every frame. Slots past the
//! live prefix are always inert: parked off-frame with zero size and color.

use crate::color::Color;
use crate::constants::{
    OFFSCREEN_Y, ROCKET_HEAD_SIZE, ROCKET_HEAD_WHITE_MIX, TRAIL_BLUE_WEIGHT, TRAIL_GREEN_WEIGHT,
    TRAIL_SIZE,
};
use crate::firework::Firework;
use glam::Vec3;

pub struct RenderBuffers {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    capacity: usize,
    live: usize,
    // Highest live count since the last blanking; slots beyond it are already inert.
    high_water: usize,
}

impl RenderBuffers {
    pub fn new(capacity: usize) -> Self {
        let mut positions = vec![0.0; capacity * 3];
        for slot in positions.chunks_exact_mut(3) {
            slot[1] = OFFSCREEN_Y;
        }
        Self {
            positions,
            colors: vec![0.0; capacity * 3],
            sizes: vec![0.0; capacity],
            capacity,
            live: 0,
            high_water: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points written by the most recent pack.
    pub fn live_len(&self) -> usize {
        self.live
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    pub fn color(&self, i: usize) -> Color {
        let c = &self.colors[i * 3..i * 3 + 3];
        Color::new(c[0], c[1], c[2])
    }

    pub fn size(&self, i: usize) -> f32 {
        self.sizes[i]
    }

    /// A slot nothing will draw.
    pub fn is_inert(&self, i: usize) -> bool {
        self.sizes[i] == 0.0 && self.positions[i * 3 + 1] == OFFSCREEN_Y
    }

    /// Drop the backing storage. Packing into released buffers writes nothing.
    pub fn release(&mut self) {
        self.positions = Vec::new();
        self.colors = Vec::new();
        self.sizes = Vec::new();
        self.capacity = 0;
        self.live = 0;
        self.high_water = 0;
    }

    pub fn is_released(&self) -> bool {
        self.capacity == 0 && self.positions.is_empty()
    }

    fn write(&mut self, i: usize, position: Vec3, color: Color, size: f32) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&position.to_array());
        self.colors[i * 3..i * 3 + 3].copy_from_slice(&color.to_array());
        self.sizes[i] = size;
    }

    fn blank(&mut self, i: usize) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&[0.0, OFFSCREEN_Y, 0.0]);
        self.colors[i * 3..i * 3 + 3].fill(0.0);
        self.sizes[i] = 0.0;
    }
}

/// Summary of one pack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackReport {
    pub written: usize,
    /// Live points that existed this frame, including those that did not fit.
    pub requested: usize,
}

impl PackReport {
    pub fn truncated(&self) -> bool {
        self.requested > self.written
    }
}

/// Write cursor over a [`RenderBuffers`] arena for a single frame.
pub struct BufferPacker<'a> {
    buffers: &'a mut RenderBuffers,
    cursor: usize,
}

impl<'a> BufferPacker<'a> {
    pub fn begin(buffers: &'a mut RenderBuffers) -> Self {
        Self { buffers, cursor: 0 }
    }

    pub fn is_full(&self) -> bool {
        self.cursor >= self.buffers.capacity
    }

    /// Append one point; returns `false` (and writes nothing) once full.
    pub fn push(&mut self, position: Vec3, color: Color, size: f32) -> bool {
        if self.is_full() {
            return false;
        }
        self.buffers.write(self.cursor, position, color, size);
        self.cursor += 1;
        true
    }

    /// Blank every slot a previous, larger frame left behind.
    pub fn finish(self) -> usize {
        let written = self.cursor;
        for i in written..self.buffers.high_water {
            self.buffers.blank(i);
        }
        self.buffers.live = written;
        self.buffers.high_water = written;
        written
    }
}

/// Pack every live point of `fireworks` in order: rocket head, its trail,
/// then particles. Points beyond capacity are dropped without preference.
pub fn pack_fireworks(fireworks: &[Firework], buffers: &mut RenderBuffers) -> PackReport {
    let requested = fireworks.iter().map(Firework::point_count).sum();
    let mut packer = BufferPacker::begin(buffers);

    'outer: for fw in fireworks {
        match fw {
            Firework::Ascending(rocket) => {
                let head = rocket.color.lerp(Color::WHITE, ROCKET_HEAD_WHITE_MIX);
                if !packer.push(rocket.position, head, ROCKET_HEAD_SIZE) {
                    break 'outer;
                }
                for tp in &rocket.trail {
                    let ember = Color::new(
                        tp.color.r * tp.life,
                        tp.color.g * tp.life * TRAIL_GREEN_WEIGHT,
                        tp.color.b * tp.life * TRAIL_BLUE_WEIGHT,
                    );
                    if !packer.push(tp.position, ember, TRAIL_SIZE * tp.life) {
                        break 'outer;
                    }
                }
            }
            Firework::Decaying(particles) => {
                for p in particles {
                    let fade = p.life.max(0.0).sqrt();
                    if !packer.push(p.position, p.color.scaled(fade), p.size * fade) {
                        break 'outer;
                    }
                }
            }
            Firework::Dead => {}
        }
    }

    PackReport {
        written: packer.finish(),
        requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firework::Rocket;
    use crate::particle::Particle;
    use crate::trail::TrailPoint;

    fn burst(n: usize, life: f32) -> Firework {
        let mut p = Particle::new(Vec3::new(1.0, 2.0, 0.0), Vec3::ZERO, Color::WHITE, 2.0, 4.0);
        p.life = life;
        Firework::Decaying(vec![p; n])
    }

    #[test]
    fn fresh_buffers_are_inert() {
        let b = RenderBuffers::new(8);
        assert_eq!(b.live_len(), 0);
        assert!((0..8).all(|i| b.is_inert(i)));
    }

    #[test]
    fn particles_fade_with_sqrt_life() {
        let mut b = RenderBuffers::new(4);
        let report = pack_fireworks(&[burst(1, 0.25)], &mut b);
        assert_eq!(report.written, 1);
        assert!((b.size(0) - 2.0).abs() < 1e-6);
        assert!((b.color(0).r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rocket_head_then_trail_with_ember_weighting() {
        let mut rocket = Rocket::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, Color::new(0.2, 0.4, 1.0));
        rocket.trail.push(TrailPoint {
            position: Vec3::new(0.0, 4.0, 0.0),
            life: 0.5,
            color: Color::new(1.0, 1.0, 1.0),
        });
        let mut b = RenderBuffers::new(4);
        pack_fireworks(&[Firework::launch(rocket)], &mut b);
        assert_eq!(b.live_len(), 2);
        assert_eq!(b.size(0), ROCKET_HEAD_SIZE);
        let head = b.color(0);
        assert!((head.r - 0.6).abs() < 1e-6 && (head.g - 0.7).abs() < 1e-6);
        assert!((head.b - 1.0).abs() < 1e-6);
        let ember = b.color(1);
        assert!((ember.r - 0.5).abs() < 1e-6);
        assert!((ember.g - 0.35).abs() < 1e-6);
        assert!((ember.b - 0.15).abs() < 1e-6);
        assert!((b.size(1) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn overflow_truncates_to_capacity() {
        let mut b = RenderBuffers::new(10);
        let report = pack_fireworks(&[burst(6, 1.0), burst(6, 1.0)], &mut b);
        assert_eq!(report.written, 10);
        assert_eq!(report.requested, 12);
        assert!(report.truncated());
        assert_eq!(b.live_len(), 10);
    }

    #[test]
    fn shrinking_frame_blanks_stale_slots() {
        let mut b = RenderBuffers::new(10);
        pack_fireworks(&[burst(7, 1.0)], &mut b);
        assert!(!b.is_inert(6));
        pack_fireworks(&[burst(3, 1.0)], &mut b);
        assert_eq!(b.live_len(), 3);
        assert!(!b.is_inert(2));
        assert!((3..10).all(|i| b.is_inert(i)));
    }

    #[test]
    fn released_buffers_accept_nothing() {
        let mut b = RenderBuffers::new(10);
        b.release();
        assert!(b.is_released());
        let report = pack_fireworks(&[burst(3, 1.0)], &mut b);
        assert_eq!(report.written, 0);
        b.release();
        assert!(b.is_released());
    }
}
