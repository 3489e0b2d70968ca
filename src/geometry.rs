use glam::{Mat4, Vec3};

pub const PLANE_SIZE: f32 = 2.0;
pub const PLANE_SEGMENTS: u32 = 50;

/// Vertex layout shared with the WGSL shader
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Subdivided plane mesh: a (segments+1)^2 grid of vertices in the local XY
/// plane with a triangle index list, plus the Euler rotation that orients it
/// in the scene.
pub struct PlaneMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub rotation: Vec3,
}

impl PlaneMesh {
    /// Build a `size` x `size` plane centred on the origin in the XY plane,
    /// split into `segments` quads per side.
    pub fn new(size: f32, segments: u32) -> Self {
        let side = segments + 1;
        let half = size * 0.5;
        let step = size / segments as f32;

        let mut vertices = Vec::with_capacity((side * side) as usize);
        for iy in 0..side {
            for ix in 0..side {
                let u = ix as f32 / segments as f32;
                let v = iy as f32 / segments as f32;
                vertices.push(Vertex {
                    position: [-half + ix as f32 * step, half - iy as f32 * step, 0.0],
                    uv: [u, 1.0 - v],
                });
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = iy * side + ix;
                let b = a + side;
                let c = b + 1;
                let d = a + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            vertices,
            indices,
            rotation: Vec3::ZERO,
        }
    }

    /// The sketch's plane: rotated -pi/2 about X so it lies flat with its
    /// normal pointing up.
    pub fn horizontal(size: f32, segments: u32) -> Self {
        let mut mesh = Self::new(size, segments);
        mesh.rotation.x = -std::f32::consts::FRAC_PI_2;
        mesh
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_winding_stays_in_range() {
        let mesh = PlaneMesh::new(1.0, 3);
        let vertex_count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn test_single_quad_plane() {
        let mesh = PlaneMesh::new(2.0, 1);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }
}
