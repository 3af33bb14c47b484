use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scene manifest: cameras, lights, and model placements
///
/// All float validation happens here - the camera rigs trust the values they
/// are constructed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub cameras: Vec<CameraDef>,
    #[serde(default)]
    pub lights: Vec<LightDef>,
    #[serde(default)]
    pub models: Vec<ModelDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDef {
    pub name: String,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightDef {
    pub name: String,
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_colour")]
    pub colour: [f32; 3],
    #[serde(default = "default_light_ambient")]
    pub ambient: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDef {
    pub name: String,
    #[serde(default)]
    pub mesh: Option<String>,
    #[serde(default)]
    pub texture: Option<String>,
    pub position: [f32; 3],
    /// Rotation about the Y axis in degrees
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_light_direction() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_light_colour() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_light_ambient() -> [f32; 3] {
    [0.2, 0.2, 0.2]
}

fn default_scale() -> f32 {
    1.0
}

impl CameraDef {
    pub fn position_vec(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn look_at_vec(&self) -> Vec3 {
        Vec3::from_array(self.look_at)
    }
}

impl Manifest {
    /// Parse and validate a manifest from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("invalid manifest {:?}", path))
    }

    /// Parse and validate a manifest from a JSON string
    pub fn from_json(text: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(text).context("manifest is not valid JSON")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest, falling back to the built-in scene if the file is
    /// missing. A present-but-malformed manifest is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("manifest {:?} not found, using built-in scene", path);
            Ok(Self::default_scene())
        }
    }

    /// The scene the demo falls back to when no manifest file exists
    pub fn default_scene() -> Self {
        Self {
            cameras: vec![CameraDef {
                name: "main".to_string(),
                position: [0.0, 0.0, 10.0],
                look_at: [0.0, 0.0, 0.0],
                fov: 55.0,
                near: 0.1,
                far: 500.0,
            }],
            lights: vec![LightDef {
                name: "sun".to_string(),
                direction: default_light_direction(),
                colour: default_light_colour(),
                ambient: default_light_ambient(),
            }],
            models: vec![
                ModelDef {
                    name: "beast".to_string(),
                    mesh: None,
                    texture: None,
                    position: [2.0, 0.0, 0.0],
                    rotation: 0.0,
                    scale: 1.0,
                },
                ModelDef {
                    name: "wall".to_string(),
                    mesh: None,
                    texture: None,
                    position: [6.0, 6.0, 6.0],
                    rotation: 0.0,
                    scale: 1.0,
                },
                ModelDef {
                    name: "planet".to_string(),
                    mesh: None,
                    texture: None,
                    position: [4.0, 4.0, 4.0],
                    rotation: 0.0,
                    scale: 1.0,
                },
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cameras.is_empty() {
            bail!("manifest defines no cameras");
        }

        for camera in &self.cameras {
            let fields = [
                camera.position[0],
                camera.position[1],
                camera.position[2],
                camera.look_at[0],
                camera.look_at[1],
                camera.look_at[2],
                camera.fov,
                camera.near,
                camera.far,
            ];
            if fields.iter().any(|f| !f.is_finite()) {
                bail!("camera {:?} has non-finite fields", camera.name);
            }
            if camera.fov <= 0.0 || camera.fov >= 180.0 {
                bail!(
                    "camera {:?} field of view {} outside (0, 180)",
                    camera.name,
                    camera.fov
                );
            }
            if camera.near <= 0.0 || camera.near >= camera.far {
                bail!(
                    "camera {:?} requires 0 < near < far, got {}..{}",
                    camera.name,
                    camera.near,
                    camera.far
                );
            }
        }

        for light in &self.lights {
            let direction = Vec3::from_array(light.direction);
            if !direction.is_finite() || direction.length_squared() == 0.0 {
                bail!("light {:?} has a degenerate direction", light.name);
            }
        }

        for model in &self.models {
            let position = Vec3::from_array(model.position);
            if !position.is_finite() || !model.rotation.is_finite() || !model.scale.is_finite() {
                bail!("model {:?} has non-finite placement", model.name);
            }
            if model.scale <= 0.0 {
                bail!("model {:?} scale must be positive", model.name);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST_JSON: &str = r#"{
        "cameras": [
            {
                "name": "main",
                "position": [0.0, 0.0, 10.0],
                "look_at": [0.0, 0.0, 0.0],
                "fov": 55.0,
                "near": 0.1,
                "far": 500.0
            },
            {
                "name": "overhead",
                "position": [0.0, 20.0, 0.1],
                "look_at": [0.0, 0.0, 0.0],
                "fov": 45.0,
                "near": 0.5,
                "far": 200.0
            }
        ],
        "lights": [
            {
                "name": "sun",
                "direction": [0.0, 1.0, 0.0],
                "colour": [1.0, 1.0, 1.0],
                "ambient": [0.2, 0.2, 0.2]
            }
        ],
        "models": [
            {
                "name": "beast",
                "mesh": "assets/beast.obj",
                "texture": "assets/beast_texture.bmp",
                "position": [2.0, 0.0, 0.0]
            }
        ]
    }"#;

    #[test]
    fn parses_full_manifest() {
        let manifest = Manifest::from_json(MANIFEST_JSON).unwrap();

        assert_eq!(manifest.cameras.len(), 2);
        assert_eq!(manifest.cameras[0].name, "main");
        assert_eq!(manifest.cameras[0].position, [0.0, 0.0, 10.0]);
        assert_eq!(manifest.cameras[1].fov, 45.0);

        assert_eq!(manifest.lights.len(), 1);
        assert_eq!(manifest.lights[0].direction, [0.0, 1.0, 0.0]);

        assert_eq!(manifest.models.len(), 1);
        assert_eq!(manifest.models[0].mesh.as_deref(), Some("assets/beast.obj"));
        // defaults fill in omitted placement fields
        assert_eq!(manifest.models[0].rotation, 0.0);
        assert_eq!(manifest.models[0].scale, 1.0);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(Manifest::from_json("{ not json").is_err());
    }

    #[test]
    fn rejects_empty_camera_list() {
        let result = Manifest::from_json(r#"{"cameras": [], "lights": [], "models": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_frustum() {
        let json = r#"{
            "cameras": [{
                "name": "broken",
                "position": [0, 0, 5],
                "look_at": [0, 0, 0],
                "fov": 55.0,
                "near": 10.0,
                "far": 1.0
            }]
        }"#;
        assert!(Manifest::from_json(json).is_err());
    }

    #[test]
    fn rejects_zero_fov() {
        let json = r#"{
            "cameras": [{
                "name": "broken",
                "position": [0, 0, 5],
                "look_at": [0, 0, 0],
                "fov": 0.0,
                "near": 0.1,
                "far": 100.0
            }]
        }"#;
        assert!(Manifest::from_json(json).is_err());
    }

    #[test]
    fn rejects_degenerate_light_direction() {
        let json = r#"{
            "cameras": [{
                "name": "main",
                "position": [0, 0, 5],
                "look_at": [0, 0, 0],
                "fov": 55.0,
                "near": 0.1,
                "far": 100.0
            }],
            "lights": [{"name": "null", "direction": [0, 0, 0]}]
        }"#;
        assert!(Manifest::from_json(json).is_err());
    }

    #[test]
    fn default_scene_validates() {
        assert!(Manifest::default_scene().validate().is_ok());
        assert!(!Manifest::default_scene().cameras.is_empty());
    }
}
