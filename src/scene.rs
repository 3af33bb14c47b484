use anyhow::{Context, Result};
use glam::Vec3;

use crate::arcball::ArcballCamera;
use crate::camera::Camera;
use crate::cli::CameraMode;
use crate::loaders::manifest::{CameraDef, Manifest, ModelDef};
use crate::traits::camera::{CameraRig, MoveDirection};
use crate::types::{CameraUniform, LightUniform};

/// Owns the parsed manifest entities and the single active camera rig.
///
/// The scene is the only owner of the rig: input handlers and the render
/// loop both reach the camera through here, strictly ordered within a frame
/// (input mutations, then `update`, then uniform reads).
pub struct Scene {
    manifest: Manifest,
    active_camera: Box<dyn CameraRig>,
    active_index: usize,
    mode: CameraMode,
    aspect: f32,
}

impl Scene {
    pub fn new(manifest: Manifest, mode: CameraMode, width: u32, height: u32) -> Result<Self> {
        let aspect = aspect_ratio(width, height);
        let first = manifest
            .cameras
            .first()
            .context("manifest defines no cameras")?;
        let active_camera = build_rig(first, mode, aspect)?;

        Ok(Self {
            manifest,
            active_camera,
            active_index: 0,
            mode,
            aspect,
        })
    }

    /// Per-frame update: the rig recomputes its derived matrices
    pub fn update(&mut self, delta_time: f32) {
        self.active_camera.tick(delta_time);
    }

    pub fn camera(&self) -> &dyn CameraRig {
        self.active_camera.as_ref()
    }

    pub fn active_camera_name(&self) -> &str {
        &self.manifest.cameras[self.active_index].name
    }

    pub fn models(&self) -> &[ModelDef] {
        &self.manifest.models
    }

    /// Switch to the next manifest-defined camera, rebuilding the rig from
    /// its definition
    pub fn cycle_camera(&mut self) -> Result<()> {
        let next = (self.active_index + 1) % self.manifest.cameras.len();
        self.active_camera = build_rig(&self.manifest.cameras[next], self.mode, self.aspect)?;
        self.active_index = next;
        log::info!("switched to camera {:?}", self.active_camera_name());
        Ok(())
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
        self.active_camera.set_aspect(self.aspect);
    }

    pub fn move_camera(&mut self, direction: MoveDirection, delta_time: f32) {
        self.active_camera.translate(direction, delta_time);
    }

    pub fn rotate_camera(&mut self, dx: f32, dy: f32) {
        self.active_camera.rotate(dx, dy);
    }

    pub fn zoom_camera(&mut self, factor: f32) {
        self.active_camera.zoom(factor);
    }

    /// View, projection, and eye position for the shader uniform slots
    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform::new(
            self.active_camera.view_matrix(),
            self.active_camera.projection_matrix(),
            self.active_camera.position(),
        )
    }

    /// First manifest light, or an overhead white light when none is defined
    pub fn light_uniform(&self) -> LightUniform {
        match self.manifest.lights.first() {
            Some(light) => LightUniform::new(
                Vec3::from_array(light.direction).normalize(),
                Vec3::from_array(light.colour),
                Vec3::from_array(light.ambient),
            ),
            None => LightUniform::new(Vec3::Y, Vec3::ONE, Vec3::splat(0.2)),
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        log::warn!("zero window height, clamping to 1");
    }
    width.max(1) as f32 / height.max(1) as f32
}

fn build_rig(def: &CameraDef, mode: CameraMode, aspect: f32) -> Result<Box<dyn CameraRig>> {
    match mode {
        CameraMode::Arcball => {
            let camera = ArcballCamera::looking_at(
                def.position_vec(),
                def.look_at_vec(),
                def.fov,
                aspect,
                def.near,
                def.far,
            )
            .with_context(|| format!("camera {:?} cannot drive an arcball rig", def.name))?;
            Ok(Box::new(camera))
        }
        CameraMode::Free => {
            let mut camera = Camera::new(
                def.position_vec(),
                def.look_at_vec(),
                def.fov,
                def.near,
                def.far,
            );
            CameraRig::set_aspect(&mut camera, aspect);
            Ok(Box::new(camera))
        }
    }
}
