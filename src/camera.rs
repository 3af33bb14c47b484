use glam::{Mat4, Vec3};

use crate::traits::camera::{CameraRig, MoveDirection};

pub const DEFAULT_MOVEMENT_SPEED: f32 = 5.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Free-fly camera: absolute position plus a look-at point, translated by
/// WASD-style input and re-aimed by accumulated yaw/pitch.
///
/// The view matrix is never stale: every public mutator ends by recomputing
/// it from the current position/look-at pair.
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,

    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    pub movement_speed: f32,
    pub sensitivity: f32,

    /// Orientation angles in degrees; pitch is clamped to +/-89 so the
    /// world-up cross product never degenerates
    pub yaw: f32,
    pub pitch: f32,

    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// World-up axis shared by both rigs
    pub const UP: Vec3 = Vec3::Y;

    pub fn new(position: Vec3, look_at: Vec3, fov: f32, near: f32, far: f32) -> Self {
        // Seed yaw/pitch from the initial look direction so the first
        // rotate() doesn't snap to an unrelated orientation
        let (yaw, pitch) = match (look_at - position).try_normalize() {
            Some(dir) => (
                dir.z.atan2(dir.x).to_degrees(),
                dir.y.asin().to_degrees().clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES),
            ),
            None => (-90.0, 0.0),
        };

        let mut camera = Self {
            position,
            look_at,
            fov,
            near,
            far,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            yaw,
            pitch,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera
    }

    /// Compute the projection matrix from screen dimensions
    ///
    /// A zero height is a configuration error (window resizes can transiently
    /// report it); it is clamped to 1 rather than producing a NaN aspect.
    pub fn init(&mut self, screen_width: u32, screen_height: u32) {
        if screen_height == 0 {
            log::warn!("camera init with zero screen height, clamping to 1");
        }
        let aspect = screen_width.max(1) as f32 / screen_height.max(1) as f32;
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far);
        self.update_view_matrix();
    }

    pub fn move_forward(&mut self, delta_time: f32) {
        if let Some(forward) = (self.look_at - self.position).try_normalize() {
            self.translate_by(forward * self.movement_speed * delta_time);
        }
    }

    pub fn move_backward(&mut self, delta_time: f32) {
        if let Some(backward) = (self.position - self.look_at).try_normalize() {
            self.translate_by(backward * self.movement_speed * delta_time);
        }
    }

    pub fn move_left(&mut self, delta_time: f32) {
        if let Some(forward) = (self.look_at - self.position).try_normalize() {
            if let Some(left) = Self::UP.cross(forward).try_normalize() {
                self.translate_by(left * self.movement_speed * delta_time);
            }
        }
    }

    pub fn move_right(&mut self, delta_time: f32) {
        if let Some(forward) = (self.look_at - self.position).try_normalize() {
            if let Some(right) = forward.cross(Self::UP).try_normalize() {
                self.translate_by(right * self.movement_speed * delta_time);
            }
        }
    }

    /// Free-look: accumulate cursor deltas into yaw/pitch and re-aim the
    /// look-at point one unit ahead of the (unchanged) position
    pub fn rotate(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity)
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);

        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let direction = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.look_at = self.position + direction.normalize();

        self.update_view_matrix();
    }

    /// Move the eye to a new position without re-aiming
    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
        self.update_view_matrix();
    }

    fn translate_by(&mut self, offset: Vec3) {
        // Translation only: position and look-at shift together, so the
        // distance between them is preserved
        self.position += offset;
        self.look_at += offset;
        self.update_view_matrix();
    }

    fn update_view_matrix(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.look_at, Self::UP);
    }
}

impl CameraRig for Camera {
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
        self.position
    }

    fn set_aspect(&mut self, aspect: f32) {
        let aspect = aspect.max(f32::EPSILON);
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far);
    }

    fn rotate(&mut self, dx: f32, dy: f32) {
        Camera::rotate(self, dx, dy);
    }

    fn translate(&mut self, direction: MoveDirection, delta_time: f32) {
        match direction {
            MoveDirection::Forward => self.move_forward(delta_time),
            MoveDirection::Backward => self.move_backward(delta_time),
            MoveDirection::Left => self.move_left(delta_time),
            MoveDirection::Right => self.move_right(delta_time),
        }
    }
}
