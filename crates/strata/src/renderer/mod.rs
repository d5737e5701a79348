pub mod camera;

pub use camera::{Camera, CameraLimits, ViewUniform};
