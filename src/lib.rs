pub mod arcball;
pub mod camera;
pub mod cli;
pub mod core;
pub mod loaders;
pub mod renderer;
pub mod scene;
pub mod traits;
pub mod types;

pub use arcball::ArcballCamera;
pub use camera::Camera;
pub use scene::Scene;
pub use traits::camera::{CameraRig, MoveDirection};
