use bytemuck::{Pod, Zeroable};

use super::geometry_builder::RenderGeometry;

/// One interleaved vertex: 12 bytes position, 12 bytes normal, 8 bytes UV.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();
}

impl RenderGeometry {
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), uv)| MeshVertex {
                position: *position,
                normal: *normal,
                uv: *uv,
            })
            .collect()
    }

    /// Vertex bytes ready for a GPU buffer upload.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(self.interleaved().as_slice()).to_vec()
    }
}
