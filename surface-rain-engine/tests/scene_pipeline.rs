//! End-to-end checks of the scan-to-surface pipeline without a renderer.

use std::sync::Arc;

use bevy::prelude::*;
use constants::render_settings::{COLUMN_SPEED_MIN, MAX_TICK_DT};
use surface_rain_engine::engine::anchors::queue::drain_mesh_update_queue;
use surface_rain_engine::engine::anchors::{
    GeometryElement, GeometrySource, MeshAnchor, MeshBuffers, MeshUpdate, MeshUpdateEvent,
    MeshUpdateQueue,
};
use surface_rain_engine::engine::atlas::{GlyphAtlas, GlyphAtlasConfig};
use surface_rain_engine::engine::classification::SurfaceType;
use surface_rain_engine::engine::materials::{
    BoundMaterials, MaterialCache, bind_surface_materials,
};
use surface_rain_engine::engine::params::EffectParameters;
use surface_rain_engine::engine::rain::{RainAnimator, RainConfig};
use surface_rain_engine::engine::scene::{
    AnchorEntities, SceneChange, SceneGraphSync, SurfaceTag, apply_mesh_updates,
    sync_render_entities,
};
use surface_rain_engine::engine::systems::{GlyphResources, RainTexture, advance_rain_frame};
use uuid::Uuid;

fn flat_floor(id: Uuid) -> MeshAnchor {
    let positions = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, 1.0),
    ];
    let buffers = MeshBuffers {
        vertices: GeometrySource::from_vec3s(&positions),
        normals: GeometrySource::from_vec3s(&[Vec3::Y; 4]),
        faces: GeometryElement::from_u16(&[0, 2, 1, 0, 3, 2]),
    };
    MeshAnchor::new(id, Mat4::from_translation(Vec3::new(3.0, -1.2, 8.0)), buffers)
}

fn wall(id: Uuid) -> MeshAnchor {
    let corners = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 2.5, 0.0),
        Vec3::new(0.0, 2.5, 0.0),
    ];
    MeshAnchor::new(id, Mat4::IDENTITY, MeshBuffers::quad(corners, Vec3::Z))
}

/// Headless app running the whole sink: queue, scene table, rain frames, ECS entities and
/// per-surface material assets. Renders a frame every second update.
fn render_app() -> App {
    let config = RainConfig {
        columns: 8,
        rows: 8,
        resolution: 64,
        glyph_count: 16,
    };
    let masks = GlyphAtlas::build(GlyphAtlasConfig {
        columns: 4,
        rows: 4,
        cell_size: 16,
        seed: 3,
    })
    .expect("small atlas")
    .glyph_masks(8);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_asset::<Image>()
        .add_event::<MeshUpdateEvent>()
        .init_resource::<MeshUpdateQueue>()
        .init_resource::<MaterialCache>()
        .init_resource::<BoundMaterials>()
        .init_resource::<AnchorEntities>()
        .init_resource::<EffectParameters>()
        .init_resource::<RainTexture>()
        .insert_resource(SceneGraphSync::new(2))
        .insert_resource(RainAnimator::with_seed(config, 11))
        .insert_resource(GlyphResources {
            masks: Some(masks),
            ..default()
        })
        .add_systems(
            Update,
            (
                drain_mesh_update_queue,
                apply_mesh_updates,
                advance_rain_frame,
                sync_render_entities,
                bind_surface_materials,
            )
                .chain(),
        );
    app
}

fn send(app: &App, update: MeshUpdate) {
    assert!(app.world().resource::<MeshUpdateQueue>().sender().send(update));
}

fn tagged(app: &mut App) -> Vec<(Entity, SurfaceTag)> {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &SurfaceTag)>();
    query.iter(world).map(|(e, tag)| (e, *tag)).collect()
}

fn material_of(app: &App, entity: Entity) -> Handle<StandardMaterial> {
    app.world()
        .get::<MeshMaterial3d<StandardMaterial>>(entity)
        .map(|m| m.0.clone())
        .expect("entity has a material")
}

#[test]
fn flat_horizontal_mesh_becomes_one_floor_entity() {
    let mut scene = SceneGraphSync::default();
    let mut cache = MaterialCache::default();
    let id = Uuid::new_v4();

    scene.apply_update(&MeshUpdate::added(flat_floor(id)), &mut cache);

    assert_eq!(scene.len(), 1);
    let entity = scene.get(&id).expect("entity for added anchor");
    assert_eq!(entity.surface_type, SurfaceType::Floor);
    assert_eq!(entity.geometry.positions.len(), 4);
    assert_eq!(entity.geometry.normals.len(), 4);
    assert_eq!(entity.geometry.uvs.len(), 4);
    assert_eq!(entity.geometry.indices.len(), 6);
    assert!(entity.geometry.indices.iter().all(|&i| i < 4));
    assert_eq!(scene.take_changes(), vec![SceneChange::Upsert(id)]);
}

#[test]
fn added_then_removed_in_one_batch_leaves_nothing() {
    let queue = MeshUpdateQueue::default();
    let sender = queue.sender();
    let id = Uuid::new_v4();
    assert!(sender.send(MeshUpdate::added(flat_floor(id))));
    assert!(sender.send(MeshUpdate::removed(id)));

    let mut scene = SceneGraphSync::default();
    let mut cache = MaterialCache::default();
    for update in queue.drain() {
        scene.apply_update(&update, &mut cache);
    }

    assert!(!scene.contains(&id));
    assert!(scene.is_empty());
}

#[test]
fn queued_updates_flow_through_the_schedule() {
    let mut app = App::new();
    app.add_event::<MeshUpdateEvent>()
        .init_resource::<MeshUpdateQueue>()
        .init_resource::<SceneGraphSync>()
        .init_resource::<MaterialCache>()
        .add_systems(
            Update,
            (drain_mesh_update_queue, apply_mesh_updates).chain(),
        );

    let sender = app.world().resource::<MeshUpdateQueue>().sender();
    let (kept, dropped) = (Uuid::new_v4(), Uuid::new_v4());
    sender.send(MeshUpdate::added(flat_floor(kept)));
    sender.send(MeshUpdate::added(flat_floor(dropped)));
    sender.send(MeshUpdate::removed(dropped));
    app.update();

    let scene = app.world().resource::<SceneGraphSync>();
    assert!(scene.contains(&kept));
    assert!(!scene.contains(&dropped));
    assert!(app.world().resource::<MeshUpdateQueue>().is_empty());
}

#[test]
fn column_recycles_after_falling_past_the_grid() {
    let config = RainConfig::default();
    let mut animator = RainAnimator::with_seed(config, 2024);
    let mut scene = SceneGraphSync::default();
    let parameters = EffectParameters::default();

    let rows = config.rows as f32;
    let worst_case_secs = (rows + 2.0 * animator.trail_max()) / COLUMN_SPEED_MIN;
    let max_ticks = (worst_case_secs / MAX_TICK_DT).ceil() as usize + 1;

    let mut recycled = false;
    for _ in 0..max_ticks {
        let before = animator.columns()[0].recycle_count;
        scene.advance(MAX_TICK_DT, &mut animator, &parameters, None);
        let column = &animator.columns()[0];
        if column.recycle_count > before {
            assert!(column.head < 0.0);
            assert_eq!(column.head, -column.trail_length);
            recycled = true;
            break;
        }
    }
    assert!(recycled, "column never recycled within {max_ticks} ticks");
}

#[test]
fn entities_share_materials_until_a_new_frame() {
    let mut scene = SceneGraphSync::new(2);
    let mut cache = MaterialCache::default();
    let mut animator = RainAnimator::with_seed(RainConfig::default(), 8);
    let masks = GlyphAtlas::build(GlyphAtlasConfig::default())
        .expect("default atlas")
        .glyph_masks(animator.config().cell_size().0);
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    scene.apply_update(&MeshUpdate::added(flat_floor(a)), &mut cache);
    scene.apply_update(&MeshUpdate::added(flat_floor(b)), &mut cache);

    let material = |scene: &SceneGraphSync, id: &Uuid| {
        scene.get(id).and_then(|e| e.material.clone()).expect("bound material")
    };
    let first = material(&scene, &a);
    assert!(Arc::ptr_eq(&first, &material(&scene, &b)));

    let parameters = EffectParameters::default();
    assert!(
        scene
            .advance(0.016, &mut animator, &parameters, Some(&masks))
            .is_none()
    );
    assert!(Arc::ptr_eq(&first, &material(&scene, &a)));

    let frame = scene
        .advance(0.016, &mut animator, &parameters, Some(&masks))
        .expect("frame on second tick");
    assert_eq!(frame.dimensions(), (512, 512));
    assert!(Arc::ptr_eq(&first, &material(&scene, &a)));

    scene.commit_frame(&mut cache);
    let rebuilt = material(&scene, &a);
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert!(Arc::ptr_eq(&rebuilt, &material(&scene, &b)));
}

#[test]
fn scene_changes_spawn_replace_and_despawn_entities() {
    let mut app = render_app();
    let (floor_id, wall_id) = (Uuid::new_v4(), Uuid::new_v4());
    send(&app, MeshUpdate::added(flat_floor(floor_id)));
    send(&app, MeshUpdate::added(wall(wall_id)));
    app.update();

    let spawned = tagged(&mut app);
    assert_eq!(spawned.len(), 2);
    let floor_entity = app.world().resource::<AnchorEntities>().0[&floor_id];
    let surface = |app: &mut App, entity: Entity| {
        tagged(app)
            .into_iter()
            .find(|(e, _)| *e == entity)
            .map(|(_, tag)| tag.surface)
    };
    assert_eq!(surface(&mut app, floor_entity), Some(SurfaceType::Floor));

    send(&app, MeshUpdate::updated(flat_floor(floor_id)));
    app.update();
    assert_eq!(tagged(&mut app).len(), 2);
    assert_eq!(
        app.world().resource::<AnchorEntities>().0[&floor_id],
        floor_entity
    );
    let transform = app.world().get::<Transform>(floor_entity).expect("transform");
    assert_eq!(transform.translation, Vec3::new(3.0, -1.2, 8.0));

    send(&app, MeshUpdate::removed(wall_id));
    app.update();
    let left = tagged(&mut app);
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].1.anchor_id, floor_id);
    assert!(!app.world().resource::<AnchorEntities>().0.contains_key(&wall_id));
}

#[test]
fn same_surface_entities_share_a_material_until_the_next_frame() {
    let mut app = render_app();
    let (a, b, w) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    send(&app, MeshUpdate::added(flat_floor(a)));
    send(&app, MeshUpdate::added(flat_floor(b)));
    send(&app, MeshUpdate::added(wall(w)));
    app.update();

    let entity = |app: &App, id: &Uuid| app.world().resource::<AnchorEntities>().0[id];
    let (ea, eb, ew) = (entity(&app, &a), entity(&app, &b), entity(&app, &w));
    let first = material_of(&app, ea);
    assert_eq!(first, material_of(&app, eb));
    assert_ne!(first, material_of(&app, ew));
    assert!(app.world().resource::<RainTexture>().handle.is_none());

    // second update is a frame-skip tick
    app.update();
    assert!(app.world().resource::<RainTexture>().handle.is_some());
    assert_eq!(app.world().resource::<SceneGraphSync>().frames_rendered(), 1);
    let rebuilt = material_of(&app, ea);
    assert_ne!(first, rebuilt);
    assert_eq!(rebuilt, material_of(&app, eb));

    let materials = app.world().resource::<Assets<StandardMaterial>>();
    let bound = materials.get(&rebuilt).expect("material asset");
    assert_eq!(
        bound.base_color_texture,
        app.world().resource::<RainTexture>().handle.clone()
    );
}
