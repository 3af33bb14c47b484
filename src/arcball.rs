use anyhow::{bail, Result};
use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::traits::camera::CameraRig;

/// Lower clamp on the orbit radius; zooming converges toward this bound but
/// the eye never coincides with the target
pub const MIN_RADIUS: f32 = 0.1;
/// Upper clamp so repeated zoom-out cannot diverge
pub const MAX_RADIUS: f32 = 1000.0;
/// Elevation clamp in radians, strictly inside +/-90 degrees
pub const PHI_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

pub const DEFAULT_ORBIT_SENSITIVITY: f32 = 0.25;

/// Orbit camera: the eye position is derived from `(target, radius, theta,
/// phi)` rather than stored, so every mutation is a transition of that tuple
/// followed by a recompute of position and view matrix.
///
/// Axis convention: Y-up, azimuth (theta) measured from +Z toward +X, so
/// `position = target + radius * (cos(phi)sin(theta), sin(phi), cos(phi)cos(theta))`.
/// Angles are stored in radians; degree inputs convert once at the API
/// boundary.
pub struct ArcballCamera {
    pub target: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,

    /// Orbit sensitivity in degrees per pixel of cursor travel
    pub sensitivity: f32,

    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    view: Mat4,
    projection: Mat4,
}

impl ArcballCamera {
    /// Build an orbit rig around the world origin. Angles are given in
    /// degrees and converted once here.
    pub fn new(
        theta_degrees: f32,
        phi_degrees: f32,
        radius: f32,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<Self> {
        let params = [theta_degrees, phi_degrees, radius, fov, aspect, near, far];
        if params.iter().any(|p| !p.is_finite()) {
            bail!("arcball camera parameters must be finite, got {:?}", params);
        }
        if radius <= 0.0 {
            bail!("arcball radius must be positive, got {}", radius);
        }

        let mut camera = Self {
            target: Vec3::ZERO,
            radius: radius.clamp(MIN_RADIUS, MAX_RADIUS),
            theta: theta_degrees.to_radians(),
            phi: phi_degrees.to_radians().clamp(-PHI_LIMIT, PHI_LIMIT),
            sensitivity: DEFAULT_ORBIT_SENSITIVITY,
            fov,
            near,
            far,
            view: Mat4::IDENTITY,
            projection: Mat4::perspective_rh(
                fov.to_radians(),
                aspect.max(f32::EPSILON),
                near,
                far,
            ),
        };
        camera.update_view_matrix();
        Ok(camera)
    }

    /// Build an orbit rig looking at `target` from `position`, recovering
    /// the equivalent `(radius, theta, phi)` tuple
    pub fn looking_at(
        position: Vec3,
        target: Vec3,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<Self> {
        let offset = position - target;
        let radius = offset.length();
        if radius <= 0.0 || !offset.is_finite() {
            bail!("arcball eye must be a finite distance from its target");
        }

        let phi = (offset.y / radius).asin();
        let theta = offset.x.atan2(offset.z);

        let mut camera = Self::new(
            theta.to_degrees(),
            phi.to_degrees(),
            radius,
            fov,
            aspect,
            near,
            far,
        )?;
        camera.target = target;
        camera.update_view_matrix();
        Ok(camera)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Azimuth in radians
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Elevation in radians
    pub fn phi(&self) -> f32 {
        self.phi
    }

    /// Scroll zoom: factor < 1 moves the eye toward the target, > 1 away.
    /// The radius is clamped on every call so it can neither collapse onto
    /// the target nor blow up under repeated scrolling.
    pub fn scale_radius(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(MIN_RADIUS, MAX_RADIUS);
        self.update_view_matrix();
    }

    /// Orbit rotate: cursor deltas accumulate into azimuth/elevation.
    /// Elevation is clamped strictly inside the poles before it is used, so
    /// the look-at basis never degenerates against the up vector.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.theta += (dx * self.sensitivity).to_radians();
        self.phi = (self.phi + (dy * self.sensitivity).to_radians()).clamp(-PHI_LIMIT, PHI_LIMIT);
        self.update_view_matrix();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        let aspect = aspect.max(f32::EPSILON);
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far);
    }

    pub fn view_transform(&self) -> Mat4 {
        self.view
    }

    pub fn projection_transform(&self) -> Mat4 {
        self.projection
    }

    /// Spherical-to-Cartesian eye position, derived from the orbit tuple
    pub fn derived_position(&self) -> Vec3 {
        self.target
            + self.radius
                * Vec3::new(
                    self.phi.cos() * self.theta.sin(),
                    self.phi.sin(),
                    self.phi.cos() * self.theta.cos(),
                )
    }

    fn update_view_matrix(&mut self) {
        self.view = Mat4::look_at_rh(self.derived_position(), self.target, Camera::UP);
    }
}

impl CameraRig for ArcballCamera {
    fn tick(&mut self, _delta_time: f32) {
        self.update_view_matrix();
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    fn position(&self) -> Vec3 {
        self.derived_position()
    }

    fn set_aspect(&mut self, aspect: f32) {
        ArcballCamera::set_aspect(self, aspect);
    }

    fn rotate(&mut self, dx: f32, dy: f32) {
        ArcballCamera::rotate(self, dx, dy);
    }

    fn zoom(&mut self, factor: f32) {
        self.scale_radius(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn test_arcball() -> ArcballCamera {
        ArcballCamera::new(0.0, 0.0, 10.0, 55.0, 1.0, 0.1, 500.0).unwrap()
    }

    #[test]
    fn rejects_non_finite_parameters() {
        assert!(ArcballCamera::new(f32::NAN, 0.0, 10.0, 55.0, 1.0, 0.1, 500.0).is_err());
        assert!(ArcballCamera::new(0.0, 0.0, f32::INFINITY, 55.0, 1.0, 0.1, 500.0).is_err());
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(ArcballCamera::new(0.0, 0.0, 0.0, 55.0, 1.0, 0.1, 500.0).is_err());
        assert!(ArcballCamera::new(0.0, 0.0, -5.0, 55.0, 1.0, 0.1, 500.0).is_err());
    }

    #[test]
    fn initial_position_on_positive_z() {
        let camera = test_arcball();
        assert!(camera.derived_position().distance(Vec3::new(0.0, 0.0, 10.0)) < TOLERANCE);
    }

    #[test]
    fn quarter_turn_reaches_positive_x() {
        let mut camera = test_arcball();
        camera.sensitivity = 1.0;
        camera.rotate(90.0, 0.0);

        assert!(camera.derived_position().distance(Vec3::new(10.0, 0.0, 0.0)) < 1e-3);
    }

    #[test]
    fn repeated_zoom_in_never_reaches_floor() {
        let mut camera = test_arcball();
        for _ in 0..10_000 {
            camera.scale_radius(0.9);
        }
        assert!(camera.radius() >= MIN_RADIUS);
        assert!(camera.radius() > 0.0);
    }

    #[test]
    fn repeated_zoom_out_is_bounded() {
        let mut camera = test_arcball();
        for _ in 0..10_000 {
            camera.scale_radius(1.1);
        }
        assert!(camera.radius() <= MAX_RADIUS);
        assert!(camera.derived_position().is_finite());
    }

    #[test]
    fn phi_clamped_strictly_inside_pole() {
        let mut camera = test_arcball();
        camera.sensitivity = 1.0;
        for _ in 0..50 {
            camera.rotate(0.0, 30.0);
        }

        assert!(camera.phi() < std::f32::consts::FRAC_PI_2);
        assert!(camera.phi() <= PHI_LIMIT + TOLERANCE);
        assert!(camera.derived_position().is_finite());
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn view_matrix_matches_look_at() {
        let mut camera = test_arcball();
        camera.rotate(140.0, -65.0);
        camera.scale_radius(0.8);

        let expected = Mat4::look_at_rh(camera.derived_position(), camera.target, Vec3::Y);
        assert_eq!(camera.view_matrix(), expected);
    }

    #[test]
    fn position_orbits_around_target() {
        let mut camera = ArcballCamera::new(0.0, 0.0, 4.0, 55.0, 1.0, 0.1, 500.0).unwrap();
        camera.target = Vec3::new(1.0, 2.0, 3.0);
        camera.tick(0.0);

        for step in 0..36 {
            camera.sensitivity = 1.0;
            camera.rotate(10.0, 0.0);
            let distance = camera.derived_position().distance(camera.target);
            assert!(
                (distance - 4.0).abs() < 1e-3,
                "radius drifted at step {}: {}",
                step,
                distance
            );
        }
    }

    #[test]
    fn looking_at_recovers_orbit_tuple() {
        let camera = ArcballCamera::looking_at(
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::ZERO,
            55.0,
            1.0,
            0.1,
            500.0,
        )
        .unwrap();

        assert!((camera.radius() - 8.0).abs() < TOLERANCE);
        assert!(camera.theta().abs() < TOLERANCE);
        assert!(camera.phi().abs() < TOLERANCE);
        assert!(camera.position().distance(Vec3::new(0.0, 0.0, 8.0)) < 1e-3);
    }

    #[test]
    fn set_aspect_leaves_orbit_untouched() {
        let mut camera = test_arcball();
        let position = camera.derived_position();

        camera.set_aspect(16.0 / 9.0);

        assert_eq!(camera.derived_position(), position);
        assert!(camera.projection_matrix().is_finite());
    }
}
