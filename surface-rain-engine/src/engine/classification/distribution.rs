use serde::Serialize;

use super::surface_classifier::classify_normal;
use super::surface_type::SurfaceType;
use crate::engine::anchors::MeshAnchor;

/// Share of an anchor's triangles falling in each surface bucket. Used for diagnostics only;
/// render classification always goes through the whole-anchor vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SurfaceDistribution {
    pub triangle_count: usize,
    pub wall: f32,
    pub floor: f32,
    pub ceiling: f32,
    pub unknown: f32,
}

impl SurfaceDistribution {
    /// Each triangle is classified by the mean of its three vertex normals.
    pub fn from_anchor(anchor: &MeshAnchor) -> Self {
        let geometry = &anchor.geometry;
        let mut counts = [0usize; SurfaceType::ALL.len()];
        let mut total = 0usize;

        for [a, b, c] in geometry.faces.triangles() {
            let normals = [a, b, c].map(|i| geometry.normals.get(i as usize));
            let surface = match normals {
                [Some(na), Some(nb), Some(nc)] => {
                    classify_normal((na + nb + nc) / 3.0, &anchor.transform)
                }
                _ => SurfaceType::Unknown,
            };
            counts[surface.index()] += 1;
            total += 1;
        }

        if total == 0 {
            return Self::default();
        }

        let share = |surface: SurfaceType| counts[surface.index()] as f32 / total as f32;
        Self {
            triangle_count: total,
            wall: share(SurfaceType::Wall),
            floor: share(SurfaceType::Floor),
            ceiling: share(SurfaceType::Ceiling),
            unknown: share(SurfaceType::Unknown),
        }
    }

    pub fn fraction(&self, surface: SurfaceType) -> f32 {
        match surface {
            SurfaceType::Wall => self.wall,
            SurfaceType::Floor => self.floor,
            SurfaceType::Ceiling => self.ceiling,
            SurfaceType::Unknown => self.unknown,
        }
    }

    /// Bucket holding the largest share, `Unknown` for an empty mesh.
    pub fn dominant(&self) -> SurfaceType {
        SurfaceType::ALL
            .into_iter()
            .max_by(|a, b| self.fraction(*a).total_cmp(&self.fraction(*b)))
            .filter(|_| self.triangle_count > 0)
            .unwrap_or(SurfaceType::Unknown)
    }
}
