//! Viewport and camera types shared with the web and native frontends.
//!
//! These types intentionally avoid referencing platform-specific APIs. The
//! simulation reads [`FrameBounds`] to scale launch geometry to the visible
//! area, and renderers read the [`Camera`] matrices.

use crate::constants::{CAMERA_FOVY_DEGREES, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::error::SetupError;
use glam::{Mat4, Vec3};

/// Host-supplied drawable size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Physical size of an element measured in CSS pixels. A collapsed
    /// element stays zero-area so `validate` can reject it.
    pub fn from_css(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let px = |css: f64| (css * device_pixel_ratio).max(0.0) as u32;
        Self::new(px(css_width), px(css_height))
    }

    /// Reject zero-area viewports; a camera cannot derive an aspect from them.
    pub fn validate(self) -> Result<Self, SetupError> {
        if self.width == 0 || self.height == 0 {
            return Err(SetupError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Half extents of the visible region on the `z = 0` plane, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameBounds {
    pub half_width: f32,
    pub half_height: f32,
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Fixed camera looking down -Z at the origin, fitted to `viewport`.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Visible half extents at the target plane.
    pub fn frame_bounds(&self) -> FrameBounds {
        let distance = (self.eye - self.target).length();
        let half_height = (self.fovy_radians * 0.5).tan() * distance;
        FrameBounds {
            half_width: half_height * self.aspect,
            half_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_viewport_is_rejected() {
        assert!(Viewport::new(0, 600).validate().is_err());
        assert!(Viewport::new(800, 0).validate().is_err());
        assert!(Viewport::new(800, 600).validate().is_ok());
    }

    #[test]
    fn css_size_scales_by_pixel_ratio_without_padding_zero() {
        assert_eq!(Viewport::from_css(640.0, 360.0, 2.0), Viewport::new(1280, 720));
        assert_eq!(Viewport::from_css(0.0, 0.0, 2.0), Viewport::new(0, 0));
        assert!(Viewport::from_css(0.0, 0.0, 2.0).validate().is_err());
        assert!(Viewport::from_css(300.0, 0.4, 2.0).validate().is_err());
    }

    #[test]
    fn frame_bounds_follow_aspect() {
        let cam = Camera::for_viewport(Viewport::new(1600, 800));
        let b = cam.frame_bounds();
        let expected_half_h = (CAMERA_FOVY_DEGREES.to_radians() * 0.5).tan() * CAMERA_Z;
        assert!((b.half_height - expected_half_h).abs() < 1e-3);
        assert!((b.half_width - 2.0 * b.half_height).abs() < 1e-3);
    }

    #[test]
    fn origin_projects_to_clip_center() {
        let cam = Camera::for_viewport(Viewport::new(800, 600));
        let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }
}
