use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use constants::render_settings::{FRAME_SKIP, MAX_TICK_DT};
use image::RgbaImage;
use uuid::Uuid;

use crate::engine::anchors::{MeshAnchor, MeshUpdate, MeshUpdateKind};
use crate::engine::atlas::GlyphMasks;
use crate::engine::classification::{SurfaceDistribution, SurfaceType, classify};
use crate::engine::materials::{MaterialCache, SurfaceMaterial};
use crate::engine::mesh::{MeshGeometryBuilder, RenderGeometry};
use crate::engine::params::EffectParameters;
use crate::engine::rain::RainAnimator;

/// Render-side state of one live anchor.
#[derive(Debug, Clone)]
pub struct RenderEntity {
    pub anchor_id: Uuid,
    pub geometry: RenderGeometry,
    pub surface_type: SurfaceType,
    pub distribution: SurfaceDistribution,
    pub transform: Mat4,
    /// Shared with every other entity of the same surface type.
    pub material: Option<Arc<SurfaceMaterial>>,
}

/// Structural change waiting to be mirrored by the render sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    Upsert(Uuid),
    Remove(Uuid),
}

/// Keyed table of live render entities, mutated only through add, update and remove.
#[derive(Resource, Debug)]
pub struct SceneGraphSync {
    entities: HashMap<Uuid, RenderEntity>,
    changes: Vec<SceneChange>,
    frame_skip: u32,
    tick_count: u64,
    frames_rendered: u64,
}

impl Default for SceneGraphSync {
    fn default() -> Self {
        Self::new(FRAME_SKIP)
    }
}

impl SceneGraphSync {
    pub fn new(frame_skip: u32) -> Self {
        Self {
            entities: HashMap::new(),
            changes: Vec::new(),
            frame_skip: frame_skip.max(1),
            tick_count: 0,
            frames_rendered: 0,
        }
    }

    /// Added and Updated both rebuild the entity from scratch. An anchor without vertices
    /// leaves no entity behind. Removing an unknown anchor does nothing.
    pub fn apply_update(&mut self, update: &MeshUpdate, cache: &mut MaterialCache) {
        match &update.kind {
            MeshUpdateKind::Added(anchor) | MeshUpdateKind::Updated(anchor) => {
                self.upsert(update.anchor_id, anchor, cache)
            }
            MeshUpdateKind::Removed => self.remove(update.anchor_id),
        }
    }

    fn upsert(&mut self, anchor_id: Uuid, anchor: &MeshAnchor, cache: &mut MaterialCache) {
        let Some(geometry) = MeshGeometryBuilder::build(anchor) else {
            debug!("Anchor {anchor_id} has no vertices");
            self.remove(anchor_id);
            return;
        };

        let surface_type = classify(anchor);
        let entity = RenderEntity {
            anchor_id,
            geometry,
            surface_type,
            distribution: SurfaceDistribution::from_anchor(anchor),
            transform: anchor.transform,
            material: Some(cache.get(surface_type)),
        };
        self.entities.insert(anchor_id, entity);
        self.changes.push(SceneChange::Upsert(anchor_id));
    }

    fn remove(&mut self, anchor_id: Uuid) {
        if self.entities.remove(&anchor_id).is_some() {
            self.changes.push(SceneChange::Remove(anchor_id));
        }
    }

    /// One simulation tick.
    ///
    /// `dt` is capped at the 30 Hz step, then scaled by the fall speed. Every `frame_skip`
    /// ticks a new rain frame is rendered (when glyph masks exist) and returned. Materials
    /// are untouched until the caller has uploaded it and calls `commit_frame`.
    pub fn advance(
        &mut self,
        dt: f32,
        animator: &mut RainAnimator,
        parameters: &EffectParameters,
        masks: Option<&GlyphMasks>,
    ) -> Option<RgbaImage> {
        let step = dt.clamp(0.0, MAX_TICK_DT) * parameters.clamped().fall_speed;
        animator.tick(step);
        self.tick_count += 1;

        if self.tick_count % u64::from(self.frame_skip) != 0 {
            return None;
        }
        Some(animator.render_frame(masks?, &parameters.palette()))
    }

    /// Marks an uploaded frame as live: the cache is invalidated and every entity picks up
    /// its rebuilt material.
    pub fn commit_frame(&mut self, cache: &mut MaterialCache) {
        cache.invalidate();
        self.rebind_materials(cache);
        self.frames_rendered += 1;
    }

    pub fn rebind_materials(&mut self, cache: &mut MaterialCache) {
        for entity in self.entities.values_mut() {
            entity.material = Some(cache.get(entity.surface_type));
        }
    }

    /// Pending structural changes in the order they happened.
    pub fn take_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn get(&self, anchor_id: &Uuid) -> Option<&RenderEntity> {
        self.entities.get(anchor_id)
    }

    pub fn contains(&self, anchor_id: &Uuid) -> bool {
        self.entities.contains_key(anchor_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderEntity> {
        self.entities.values()
    }

    /// Entity count per surface type, indexed by `SurfaceType::index`.
    pub fn surface_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for entity in self.entities.values() {
            counts[entity.surface_type.index()] += 1;
        }
        counts
    }

    pub fn geometry_bytes(&self) -> usize {
        self.entities.values().map(|e| e.geometry.byte_size()).sum()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn frame_skip(&self) -> u32 {
        self.frame_skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::anchors::MeshBuffers;
    use crate::engine::atlas::{GlyphAtlas, GlyphAtlasConfig};
    use crate::engine::rain::RainConfig;

    fn floor_anchor(id: Uuid) -> MeshAnchor {
        let buffers = MeshBuffers::grid(Vec3::ZERO, Vec3::Z, Vec3::X, 2);
        MeshAnchor::new(id, Mat4::IDENTITY, buffers)
    }

    fn empty_anchor(id: Uuid) -> MeshAnchor {
        MeshAnchor::new(id, Mat4::IDENTITY, MeshBuffers::default())
    }

    #[test]
    fn entity_exists_only_after_add_or_update() {
        let mut scene = SceneGraphSync::default();
        let mut cache = MaterialCache::default();
        let id = Uuid::new_v4();

        scene.apply_update(&MeshUpdate::added(floor_anchor(id)), &mut cache);
        scene.apply_update(&MeshUpdate::updated(floor_anchor(id)), &mut cache);
        scene.apply_update(&MeshUpdate::updated(floor_anchor(id)), &mut cache);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(&id).map(|e| e.surface_type), Some(SurfaceType::Floor));

        scene.apply_update(&MeshUpdate::removed(id), &mut cache);
        assert!(!scene.contains(&id));
        assert_eq!(
            scene.take_changes(),
            vec![
                SceneChange::Upsert(id),
                SceneChange::Upsert(id),
                SceneChange::Upsert(id),
                SceneChange::Remove(id)
            ]
        );
    }

    #[test]
    fn removing_unknown_anchor_is_a_no_op() {
        let mut scene = SceneGraphSync::default();
        let mut cache = MaterialCache::default();
        scene.apply_update(&MeshUpdate::removed(Uuid::new_v4()), &mut cache);
        assert!(scene.is_empty());
        assert!(scene.take_changes().is_empty());
    }

    #[test]
    fn update_for_absent_anchor_creates_it() {
        let mut scene = SceneGraphSync::default();
        let mut cache = MaterialCache::default();
        let id = Uuid::new_v4();
        scene.apply_update(&MeshUpdate::updated(floor_anchor(id)), &mut cache);
        assert!(scene.contains(&id));
    }

    #[test]
    fn empty_mesh_removes_existing_entity() {
        let mut scene = SceneGraphSync::default();
        let mut cache = MaterialCache::default();
        let id = Uuid::new_v4();

        scene.apply_update(&MeshUpdate::added(empty_anchor(id)), &mut cache);
        assert!(scene.is_empty());

        scene.apply_update(&MeshUpdate::added(floor_anchor(id)), &mut cache);
        scene.apply_update(&MeshUpdate::updated(empty_anchor(id)), &mut cache);
        assert!(scene.is_empty());
        assert_eq!(
            scene.take_changes(),
            vec![SceneChange::Upsert(id), SceneChange::Remove(id)]
        );
    }

    #[test]
    fn same_surface_entities_share_one_material() {
        let mut scene = SceneGraphSync::default();
        let mut cache = MaterialCache::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        scene.apply_update(&MeshUpdate::added(floor_anchor(a)), &mut cache);
        scene.apply_update(&MeshUpdate::added(floor_anchor(b)), &mut cache);

        let material = |id: &Uuid| scene.get(id).and_then(|e| e.material.clone()).unwrap();
        assert!(Arc::ptr_eq(&material(&a), &material(&b)));
        assert_eq!(scene.surface_counts(), [0, 2, 0, 0]);
    }

    #[test]
    fn frames_render_every_nth_tick_and_rebind_materials() {
        let mut scene = SceneGraphSync::new(4);
        let mut cache = MaterialCache::default();
        let mut animator = RainAnimator::with_seed(
            RainConfig {
                columns: 4,
                rows: 4,
                resolution: 64,
                glyph_count: 16,
            },
            2,
        );
        let masks = GlyphAtlas::build(GlyphAtlasConfig {
            columns: 4,
            rows: 4,
            cell_size: 16,
            seed: 1,
        })
        .unwrap()
        .glyph_masks(16);
        let parameters = EffectParameters::default();
        let id = Uuid::new_v4();
        scene.apply_update(&MeshUpdate::added(floor_anchor(id)), &mut cache);
        let before = scene.get(&id).and_then(|e| e.material.clone()).unwrap();

        let produced: Vec<bool> = (0..8)
            .map(|_| {
                let frame = scene.advance(1.0 / 60.0, &mut animator, &parameters, Some(&masks));
                if frame.is_some() {
                    scene.commit_frame(&mut cache);
                }
                frame.is_some()
            })
            .collect();

        assert_eq!(
            produced,
            vec![false, false, false, true, false, false, false, true]
        );
        assert_eq!(scene.frames_rendered(), 2);
        let after = scene.get(&id).and_then(|e| e.material.clone()).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &cache.get(SurfaceType::Floor)));
    }

    #[test]
    fn uncommitted_frame_leaves_materials_alone() {
        let mut scene = SceneGraphSync::new(1);
        let mut cache = MaterialCache::default();
        let mut animator = RainAnimator::with_seed(RainConfig::default(), 6);
        let masks = GlyphAtlas::build(GlyphAtlasConfig::default())
            .unwrap()
            .glyph_masks(16);
        let id = Uuid::new_v4();
        scene.apply_update(&MeshUpdate::added(floor_anchor(id)), &mut cache);
        let generation = cache.generation();
        let before = scene.get(&id).and_then(|e| e.material.clone()).unwrap();

        let frame = scene.advance(0.016, &mut animator, &EffectParameters::default(), Some(&masks));
        assert!(frame.is_some());
        assert_eq!(cache.generation(), generation);
        assert_eq!(scene.frames_rendered(), 0);
        let still = scene.get(&id).and_then(|e| e.material.clone()).unwrap();
        assert!(Arc::ptr_eq(&before, &still));
    }

    #[test]
    fn no_frame_without_masks() {
        let mut scene = SceneGraphSync::new(1);
        let mut animator = RainAnimator::with_seed(RainConfig::default(), 4);
        let frame = scene.advance(0.016, &mut animator, &EffectParameters::default(), None);
        assert!(frame.is_none());
        assert_eq!(scene.tick_count(), 1);
    }
}
