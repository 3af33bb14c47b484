use glam::{Mat4, Vec3};

/// Translation directions for free-fly style movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Camera rig abstraction - two state representations (free-fly and orbit)
/// share this matrix-output contract
pub trait CameraRig {
    /// Update camera state based on elapsed time
    fn tick(&mut self, delta_time: f32);

    /// Get the view matrix for rendering (world -> eye, right-handed)
    fn view_matrix(&self) -> Mat4;

    /// Get the perspective projection matrix (eye -> clip)
    fn projection_matrix(&self) -> Mat4;

    /// Get the true eye position in world space
    ///
    /// Downstream lighting reads this for view-dependent terms, so an orbit
    /// rig must return the derived eye position, never its target.
    fn position(&self) -> Vec3;

    /// Recompute the projection for a new aspect ratio
    fn set_aspect(&mut self, aspect: f32);

    /// Apply raw cursor deltas (screen-space pixels)
    fn rotate(&mut self, dx: f32, dy: f32);

    /// Translate the rig (free-fly only; orbit rigs ignore it)
    fn translate(&mut self, _direction: MoveDirection, _delta_time: f32) {}

    /// Scale the distance to the focus point (orbit only; free-fly rigs ignore it)
    fn zoom(&mut self, _factor: f32) {}
}
