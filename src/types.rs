use glam::Mat4;

use crate::camera::Camera;
use crate::geometry::PlaneMesh;

/// Shader uniform set, rewritten every frame. Field order matches the
/// `SketchUniforms` struct in plane.wgsl; mat4x4 fields keep the whole
/// struct 16-byte aligned for WGSL.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SketchUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
}

impl SketchUniforms {
    pub fn new(camera: &Camera, plane: &PlaneMesh, params: &SketchParams, time: f32) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            model: plane.model_matrix().to_cols_array_2d(),
            time,
            amplitude: params.amplitude,
            frequency: params.frequency,
            speed: params.speed,
        }
    }

    pub fn identity() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
            time: 0.0,
            amplitude: 0.0,
            frequency: 0.0,
            speed: 0.0,
        }
    }
}

/// Tweakable state exposed in the debug panel: the shader wave parameters
/// plus the wireframe and control-damping toggles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchParams {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
    pub wireframe: bool,
    pub damping: bool,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            amplitude: 0.1,
            frequency: 4.0,
            speed: 1.0,
            wireframe: false,
            damping: true,
        }
    }
}
