//! Mouse-driven orbit camera: spherical coordinates around the scene origin.

use glam::{Mat4, Vec3};

use crate::params::{OrbitParams, RenderConfig};

/// Orbit camera state (polar angle, azimuth, distance)
#[derive(Debug)]
pub struct OrbitCamera {
    params: OrbitParams,
    /// Azimuth around the y axis (radians)
    theta: f32,
    /// Polar angle from the y axis (radians), kept off the poles
    phi: f32,
    /// Distance from the origin (world units)
    radius: f32,
}

impl OrbitCamera {
    pub fn new(params: OrbitParams) -> Self {
        let radius = params.initial_radius;
        Self {
            params,
            theta: 1.5 * std::f32::consts::PI,
            phi: 0.1 * std::f32::consts::PI,
            radius,
        }
    }

    /// Left-drag: orbit by pixel deltas.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        self.theta += self.params.rotate_per_pixel * dx_px;
        self.phi += self.params.rotate_per_pixel * dy_px;

        // Keep phi away from the poles so the view matrix stays well formed.
        self.phi = self.phi.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Right-drag: dolly in and out by pixel deltas.
    pub fn zoom(&mut self, dx_px: f32, dy_px: f32) {
        self.radius += self.params.zoom_per_pixel * (dx_px - dy_px);
        self.radius = self
            .radius
            .clamp(self.params.min_radius, self.params.max_radius);
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.phi.sin() * self.theta.cos(),
            self.radius * self.phi.cos(),
            self.radius * self.phi.sin() * self.theta.sin(),
        )
    }

    /// Combined view-projection matrix looking at the origin.
    pub fn view_proj(&self, aspect_ratio: f32, config: &RenderConfig) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(
            config.fov_degrees.to_radians(),
            aspect_ratio,
            config.near_plane,
            config.far_plane,
        );
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_clamps_at_poles() {
        let mut camera = OrbitCamera::new(OrbitParams::terrain());
        camera.rotate(0.0, 1e6);
        assert!(camera.phi <= std::f32::consts::PI - 0.1);
        camera.rotate(0.0, -1e6);
        assert!(camera.phi >= 0.1);
    }

    #[test]
    fn test_radius_clamps_to_limits() {
        let params = OrbitParams::object();
        let (min, max) = (params.min_radius, params.max_radius);
        let mut camera = OrbitCamera::new(params);

        camera.zoom(1e6, 0.0);
        assert_eq!(camera.radius, max);
        camera.zoom(0.0, 1e6);
        assert_eq!(camera.radius, min);
    }

    #[test]
    fn test_eye_distance_matches_radius() {
        let mut camera = OrbitCamera::new(OrbitParams::terrain());
        assert!((camera.eye().length() - 200.0).abs() < 1e-3);

        camera.rotate(123.0, -45.0);
        camera.zoom(10.0, 250.0);
        assert!((camera.eye().length() - camera.radius).abs() < 1e-3);
    }

    #[test]
    fn test_view_proj_is_finite_and_nontrivial() {
        let camera = OrbitCamera::new(OrbitParams::model());
        let view_proj = camera.view_proj(16.0 / 9.0, &RenderConfig::default());

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert!(view_proj.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
