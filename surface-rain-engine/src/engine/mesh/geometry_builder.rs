use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use crate::engine::anchors::MeshAnchor;

/// Flat attribute arrays for one anchor. `positions`, `normals` and `uvs` always have
/// the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl RenderGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Resident size of the attribute and index arrays.
    pub fn byte_size(&self) -> usize {
        self.positions.len() * std::mem::size_of::<[f32; 3]>()
            + self.normals.len() * std::mem::size_of::<[f32; 3]>()
            + self.uvs.len() * std::mem::size_of::<[f32; 2]>()
            + self.indices.len() * std::mem::size_of::<u32>()
    }

    /// UVs for texture sampling: positions projected onto the plane facing the dominant
    /// axis of the mean normal, so horizontal meshes get a 2D spread instead of `(x, 0)`.
    /// Falls back to the stored planar UVs when the normals cancel out.
    pub fn texture_uvs(&self) -> Vec<[f32; 2]> {
        let sum: Vec3 = self.normals.iter().map(|&n| Vec3::from(n)).sum();
        if !sum.is_finite() || sum.length_squared() <= f32::EPSILON {
            return self.uvs.clone();
        }

        let axis = sum.abs();
        self.positions
            .iter()
            .map(|&[x, y, z]| {
                if axis.y >= axis.x && axis.y >= axis.z {
                    [x, z]
                } else if axis.x >= axis.z {
                    [z, y]
                } else {
                    [x, y]
                }
            })
            .collect()
    }
}

impl From<&RenderGeometry> for Mesh {
    fn from(geometry: &RenderGeometry) -> Self {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions.clone())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, geometry.normals.clone())
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, geometry.texture_uvs())
        .with_inserted_indices(Indices::U32(geometry.indices.clone()))
    }
}

pub struct MeshGeometryBuilder;

impl MeshGeometryBuilder {
    /// Rebuilds an anchor's geometry. Returns `None` when the anchor carries no vertices.
    ///
    /// Index values are trusted as delivered by the scan source. Normals missing from a
    /// short normal buffer are zero. UVs are the planar projection `(x, y)` of the local
    /// position; `texture_uvs` reprojects them per mesh when building the Bevy `Mesh`.
    pub fn build(anchor: &MeshAnchor) -> Option<RenderGeometry> {
        let buffers = &anchor.geometry;
        let vertex_count = buffers.vertex_count();
        if vertex_count == 0 {
            return None;
        }

        let mut geometry = RenderGeometry {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: buffers.faces.indices().collect(),
        };

        for (i, position) in buffers.vertices.iter().enumerate() {
            let normal = buffers.normals.get(i).unwrap_or(Vec3::ZERO);
            geometry.positions.push(position.to_array());
            geometry.normals.push(normal.to_array());
            geometry.uvs.push([position.x, position.y]);
        }

        Some(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::anchors::{GeometryElement, GeometrySource, MeshBuffers};
    use crate::engine::classification::{SurfaceType, classify};
    use bevy::render::mesh::VertexAttributeValues;
    use uuid::Uuid;

    fn anchor(buffers: MeshBuffers) -> MeshAnchor {
        MeshAnchor::new(Uuid::new_v4(), Mat4::IDENTITY, buffers)
    }

    #[test]
    fn grid_builds_consistent_arrays() {
        let buffers = MeshBuffers::grid(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 2.0, 3);
        let geometry = MeshGeometryBuilder::build(&anchor(buffers)).unwrap();

        assert_eq!(geometry.vertex_count(), 16);
        assert_eq!(geometry.normals.len(), 16);
        assert_eq!(geometry.uvs.len(), 16);
        assert_eq!(geometry.triangle_count(), 18);
        assert!(
            geometry
                .indices
                .iter()
                .all(|&i| (i as usize) < geometry.vertex_count())
        );
    }

    #[test]
    fn uv_is_planar_local_xy() {
        let corners = [
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(1.0, 2.0, 5.0),
            Vec3::new(0.0, 2.0, 5.0),
        ];
        let geometry = MeshGeometryBuilder::build(&anchor(MeshBuffers::quad(corners, Vec3::Z)))
            .unwrap();
        assert_eq!(geometry.uvs[2], [1.0, 2.0]);
        assert_eq!(geometry.uvs[3], [0.0, 2.0]);
    }

    #[test]
    fn zero_vertices_build_nothing() {
        assert!(MeshGeometryBuilder::build(&anchor(MeshBuffers::default())).is_none());
    }

    #[test]
    fn short_normal_buffer_pads_with_zero() {
        let buffers = MeshBuffers {
            vertices: GeometrySource::from_vec3s(&[Vec3::X, Vec3::Y, Vec3::Z]),
            normals: GeometrySource::from_vec3s(&[Vec3::Y]),
            faces: GeometryElement::from_u16(&[0, 1, 2]),
        };
        let geometry = MeshGeometryBuilder::build(&anchor(buffers)).unwrap();
        assert_eq!(geometry.normals, vec![[0.0, 1.0, 0.0], [0.0; 3], [0.0; 3]]);
        assert_eq!(geometry.indices, vec![0, 1, 2]);
    }

    fn uv_extent(mesh: &Mesh) -> (f32, f32) {
        let Some(VertexAttributeValues::Float32x2(uvs)) = mesh.attribute(Mesh::ATTRIBUTE_UV_0)
        else {
            panic!("mesh has no UV_0");
        };
        let span = |axis: usize| {
            let values = uvs.iter().map(|uv| uv[axis]);
            values.clone().fold(f32::MIN, f32::max) - values.fold(f32::MAX, f32::min)
        };
        (span(0), span(1))
    }

    #[test]
    fn floor_mesh_gets_two_dimensional_texture_uvs() {
        let origin = Vec3::new(-1.0, 0.0, -1.0);
        let buffers = MeshBuffers::grid(origin, Vec3::Z * 2.0, Vec3::X * 2.0, 4);
        let anchor = anchor(buffers);
        assert_eq!(classify(&anchor), SurfaceType::Floor);

        let geometry = MeshGeometryBuilder::build(&anchor).unwrap();
        assert!(geometry.uvs.iter().all(|uv| uv[1] == 0.0));

        let (u, v) = uv_extent(&Mesh::from(&geometry));
        assert_eq!((u, v), (2.0, 2.0));
    }

    #[test]
    fn wall_mesh_keeps_local_xy_for_texture_uvs() {
        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let geometry =
            MeshGeometryBuilder::build(&anchor(MeshBuffers::quad(corners, Vec3::Z))).unwrap();
        assert_eq!(geometry.texture_uvs(), geometry.uvs);
    }

    #[test]
    fn converts_into_bevy_mesh() {
        let buffers = MeshBuffers::grid(Vec3::ZERO, Vec3::X, Vec3::Z, 1);
        let geometry = MeshGeometryBuilder::build(&anchor(buffers)).unwrap();
        let mesh = Mesh::from(&geometry);

        assert_eq!(mesh.count_vertices(), 4);
        assert!(matches!(mesh.indices(), Some(Indices::U32(indices)) if indices.len() == 6));
        assert!(matches!(
            mesh.attribute(Mesh::ATTRIBUTE_UV_0),
            Some(VertexAttributeValues::Float32x2(uvs)) if uvs.len() == 4
        ));
    }
}
