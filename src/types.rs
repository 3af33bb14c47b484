use glam::{Mat4, Vec3};

/// Camera uniform buffer data for GPU
///
/// Field order is the render contract: view transform, projection transform,
/// then the true eye position (`cam_pos`) for view-dependent lighting.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub cam_pos: [f32; 3],
    pub _pad: f32,
}

impl CameraUniform {
    pub fn new(view: Mat4, proj: Mat4, cam_pos: Vec3) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            cam_pos: cam_pos.to_array(),
            _pad: 0.0,
        }
    }
}

/// Directional light uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub direction: [f32; 3],
    pub _pad1: f32,
    pub colour: [f32; 3],
    pub _pad2: f32,
    pub ambient: [f32; 3],
    pub _pad3: f32,
}

impl LightUniform {
    pub fn new(direction: Vec3, colour: Vec3, ambient: Vec3) -> Self {
        Self {
            direction: direction.to_array(),
            _pad1: 0.0,
            colour: colour.to_array(),
            _pad2: 0.0,
            ambient: ambient.to_array(),
            _pad3: 0.0,
        }
    }
}

/// Flat-colour vertex. A zero-length normal marks the vertex as unlit
/// (used by the principle axes lines).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub colour: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], colour: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            colour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_uniform_round_trips_matrices() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        let uniform = CameraUniform::new(view, proj, Vec3::new(0.0, 0.0, 5.0));

        assert_eq!(Mat4::from_cols_array_2d(&uniform.view), view);
        assert_eq!(Mat4::from_cols_array_2d(&uniform.proj), proj);
        assert_eq!(uniform.cam_pos, [0.0, 0.0, 5.0]);
    }

    #[test]
    fn uniform_sizes_are_std140_friendly() {
        // mat4 + mat4 + padded vec3
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64 + 64 + 16);
        // three padded vec3s
        assert_eq!(std::mem::size_of::<LightUniform>(), 48);
    }
}
