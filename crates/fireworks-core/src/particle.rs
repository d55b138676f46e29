use crate::color::Color;
use glam::Vec3;

/// A burst or spark fragment. `life` counts down from 1.0 over `max_life` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, color: Color, max_life: f32, size: f32) -> Self {
        Self {
            position,
            velocity,
            color,
            life: 1.0,
            max_life,
            size,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}
