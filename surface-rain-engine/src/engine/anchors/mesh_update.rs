use bevy::math::{Mat4, Vec3};
use constants::class::{
    LABEL_CEILING, LABEL_DOOR, LABEL_FLOOR, LABEL_NONE, LABEL_SEAT, LABEL_TABLE, LABEL_WALL,
    LABEL_WINDOW, get_label_name,
};
use uuid::Uuid;

use super::buffers::{GeometryElement, GeometrySource};

/// Per-face semantic tag supplied by the scan source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassificationLabel {
    #[default]
    None,
    Wall,
    Floor,
    Ceiling,
    Table,
    Seat,
    Window,
    Door,
}

impl ClassificationLabel {
    /// Decodes a raw label byte. Codes the pipeline does not know about read as `None`.
    pub fn from_raw(code: u8) -> Self {
        match code {
            LABEL_WALL => Self::Wall,
            LABEL_FLOOR => Self::Floor,
            LABEL_CEILING => Self::Ceiling,
            LABEL_TABLE => Self::Table,
            LABEL_SEAT => Self::Seat,
            LABEL_WINDOW => Self::Window,
            LABEL_DOOR => Self::Door,
            _ => Self::None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::None => LABEL_NONE,
            Self::Wall => LABEL_WALL,
            Self::Floor => LABEL_FLOOR,
            Self::Ceiling => LABEL_CEILING,
            Self::Table => LABEL_TABLE,
            Self::Seat => LABEL_SEAT,
            Self::Window => LABEL_WINDOW,
            Self::Door => LABEL_DOOR,
        }
    }

    pub fn name(self) -> String {
        get_label_name(self.code())
    }
}

/// Raw geometry of one anchor, read through bounds-checked views.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    pub vertices: GeometrySource,
    pub normals: GeometrySource,
    pub faces: GeometryElement,
}

impl MeshBuffers {
    /// Two-triangle patch over four counter-clockwise corners sharing one normal.
    pub fn quad(corners: [Vec3; 4], normal: Vec3) -> Self {
        Self {
            vertices: GeometrySource::from_vec3s(&corners),
            normals: GeometrySource::from_vec3s(&[normal; 4]),
            faces: GeometryElement::from_u16(&[0, 1, 2, 0, 2, 3]),
        }
    }

    /// Regular grid of `segments × segments` cells spanning `u_axis` and `v_axis` from `origin`.
    /// The normal is `u_axis × v_axis`.
    pub fn grid(origin: Vec3, u_axis: Vec3, v_axis: Vec3, segments: u32) -> Self {
        let segments = segments.max(1);
        let normal = u_axis.cross(v_axis).normalize_or_zero();
        let step = 1.0 / segments as f32;

        let mut positions = Vec::new();
        for j in 0..=segments {
            for i in 0..=segments {
                positions.push(origin + u_axis * (i as f32 * step) + v_axis * (j as f32 * step));
            }
        }

        let row = segments + 1;
        let mut indices = Vec::new();
        for j in 0..segments {
            for i in 0..segments {
                let a = j * row + i;
                let b = a + 1;
                let c = a + row;
                let d = c + 1;
                indices.extend_from_slice(&[a, b, d, a, d, c]);
            }
        }

        Self {
            normals: GeometrySource::from_vec3s(&vec![normal; positions.len()]),
            vertices: GeometrySource::from_vec3s(&positions),
            faces: GeometryElement::from_u32(&indices),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.triangle_count()
    }
}

/// Snapshot of one scanned mesh region.
#[derive(Debug, Clone)]
pub struct MeshAnchor {
    pub id: Uuid,
    /// Local-to-world rigid transform.
    pub transform: Mat4,
    pub geometry: MeshBuffers,
    /// One label per triangle when the scan source classifies faces.
    pub classification: Option<Vec<ClassificationLabel>>,
}

impl MeshAnchor {
    pub fn new(id: Uuid, transform: Mat4, geometry: MeshBuffers) -> Self {
        Self {
            id,
            transform,
            geometry,
            classification: None,
        }
    }

    pub fn with_classification(mut self, labels: Vec<ClassificationLabel>) -> Self {
        self.classification = Some(labels);
        self
    }

    /// Attaches labels straight from the scan source's byte-per-face buffer.
    pub fn with_raw_classification(self, codes: &[u8]) -> Self {
        let labels = codes.iter().copied().map(ClassificationLabel::from_raw).collect();
        self.with_classification(labels)
    }
}

#[derive(Debug, Clone)]
pub enum MeshUpdateKind {
    Added(MeshAnchor),
    Updated(MeshAnchor),
    Removed,
}

/// Inbound scan event, normalised before it reaches the scene table.
#[derive(Debug, Clone)]
pub struct MeshUpdate {
    pub anchor_id: Uuid,
    pub kind: MeshUpdateKind,
}

impl MeshUpdate {
    pub fn added(anchor: MeshAnchor) -> Self {
        Self {
            anchor_id: anchor.id,
            kind: MeshUpdateKind::Added(anchor),
        }
    }

    pub fn updated(anchor: MeshAnchor) -> Self {
        Self {
            anchor_id: anchor.id,
            kind: MeshUpdateKind::Updated(anchor),
        }
    }

    pub fn removed(anchor_id: Uuid) -> Self {
        Self {
            anchor_id,
            kind: MeshUpdateKind::Removed,
        }
    }
}
