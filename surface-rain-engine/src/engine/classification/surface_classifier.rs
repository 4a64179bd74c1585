//! Maps an anchor to a [`SurfaceType`].
//!
//! Per-face labels from the scan source win when their majority names a structural
//! surface. Otherwise the anchor's averaged normal is rotated into world space and
//! compared against the vertical.

use bevy::math::{Mat4, Vec3};
use constants::class::LABEL_COUNT;
use constants::orientation::{DEGENERATE_NORMAL_LENGTH, VERTICAL_DOT_THRESHOLD, WORLD_UP};

use super::surface_type::SurfaceType;
use crate::engine::anchors::{ClassificationLabel, MeshAnchor};

pub fn classify(anchor: &MeshAnchor) -> SurfaceType {
    if let Some(surface) = anchor
        .classification
        .as_deref()
        .and_then(majority_label)
        .and_then(surface_for_label)
    {
        return surface;
    }
    classify_geometry(anchor)
}

/// Most frequent label. Ties go to the label that appeared first.
pub fn majority_label(labels: &[ClassificationLabel]) -> Option<ClassificationLabel> {
    let mut counts = [0usize; LABEL_COUNT];
    let mut first_seen = [usize::MAX; LABEL_COUNT];

    for (position, label) in labels.iter().enumerate() {
        let slot = usize::from(label.code());
        counts[slot] += 1;
        first_seen[slot] = first_seen[slot].min(position);
    }

    labels
        .iter()
        .copied()
        .max_by(|a, b| {
            let (a, b) = (usize::from(a.code()), usize::from(b.code()));
            counts[a]
                .cmp(&counts[b])
                .then(first_seen[b].cmp(&first_seen[a]))
        })
}

/// Structural labels map straight to a bucket; furniture and `None` defer to geometry.
pub fn surface_for_label(label: ClassificationLabel) -> Option<SurfaceType> {
    match label {
        ClassificationLabel::Wall | ClassificationLabel::Door | ClassificationLabel::Window => {
            Some(SurfaceType::Wall)
        }
        ClassificationLabel::Floor => Some(SurfaceType::Floor),
        ClassificationLabel::Ceiling => Some(SurfaceType::Ceiling),
        ClassificationLabel::Table | ClassificationLabel::Seat | ClassificationLabel::None => None,
    }
}

fn classify_geometry(anchor: &MeshAnchor) -> SurfaceType {
    let geometry = &anchor.geometry;
    if geometry.vertex_count() == 0 {
        return SurfaceType::Unknown;
    }

    match average_normal(geometry.normals.iter().take(geometry.vertex_count())) {
        Some(normal) => classify_normal(normal, &anchor.transform),
        None => SurfaceType::Unknown,
    }
}

/// Unweighted mean direction. `None` when there are no normals or they cancel out.
pub fn average_normal(normals: impl Iterator<Item = Vec3>) -> Option<Vec3> {
    let (sum, count) = normals.fold((Vec3::ZERO, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        return None;
    }
    let mean = sum / count as f32;
    (mean.length() > DEGENERATE_NORMAL_LENGTH).then(|| mean.normalize())
}

/// Classifies a local-space normal under the anchor transform. Translation is ignored.
pub fn classify_normal(normal: Vec3, transform: &Mat4) -> SurfaceType {
    let world = transform.transform_vector3(normal);
    if world.length() <= DEGENERATE_NORMAL_LENGTH || !world.is_finite() {
        return SurfaceType::Unknown;
    }

    let up = world.normalize().dot(WORLD_UP);
    if up > VERTICAL_DOT_THRESHOLD {
        SurfaceType::Floor
    } else if up < -VERTICAL_DOT_THRESHOLD {
        SurfaceType::Ceiling
    } else {
        SurfaceType::Wall
    }
}
