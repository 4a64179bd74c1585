//! Scripted scan source: a small room that appears piece by piece on a worker thread.

use std::f32::consts::{FRAC_PI_2, PI};
use std::thread;
use std::time::Duration;

use bevy::prelude::*;
use constants::class::{LABEL_DOOR, LABEL_TABLE, LABEL_WALL};
use surface_rain_engine::engine::anchors::{
    MeshAnchor, MeshBuffers, MeshUpdate, MeshUpdateQueue, MeshUpdateSender,
};
use uuid::Uuid;

const STEP_INTERVAL: Duration = Duration::from_millis(400);
const ROOM_SIZE: f32 = 4.0;
const ROOM_HEIGHT: f32 = 2.5;
const TABLE_HEIGHT: f32 = 0.75;

pub fn start_synthetic_scan(queue: Res<MeshUpdateQueue>) {
    let sender = queue.sender();
    let spawned = thread::Builder::new()
        .name("synthetic-scan".into())
        .spawn(move || run_scan(sender));

    match spawned {
        Ok(_) => println!("✓ Synthetic scan source started"),
        Err(error) => warn!("Synthetic scan source failed to start: {error}"),
    }
}

fn run_scan(sender: MeshUpdateSender) {
    let room = RoomLayout::new();
    for step in 0u32.. {
        for update in room.updates_for_step(step) {
            if !sender.send(update) {
                return;
            }
        }
        thread::sleep(STEP_INTERVAL);
    }
}

struct RoomLayout {
    floor: Uuid,
    walls: [Uuid; 4],
    ceiling: Uuid,
    table: Uuid,
}

impl RoomLayout {
    fn new() -> Self {
        Self {
            floor: Uuid::new_v4(),
            walls: [(); 4].map(|_| Uuid::new_v4()),
            ceiling: Uuid::new_v4(),
            table: Uuid::new_v4(),
        }
    }

    fn updates_for_step(&self, step: u32) -> Vec<MeshUpdate> {
        let mut updates = Vec::new();

        match step {
            0 => updates.push(MeshUpdate::added(self.floor_anchor(step))),
            1..=8 => updates.push(MeshUpdate::updated(self.floor_anchor(step))),
            _ => {}
        }
        if (2..=5).contains(&step) {
            updates.push(MeshUpdate::added(self.wall_anchor((step - 2) as usize)));
        }
        if step == 6 {
            updates.push(MeshUpdate::added(self.ceiling_anchor()));
        }
        if step == 7 {
            updates.push(MeshUpdate::added(self.table_anchor()));
        }

        // the table drops out of tracking and comes back every 20 steps
        if step >= 12 {
            match step % 20 {
                12 => updates.push(MeshUpdate::removed(self.table)),
                14 => updates.push(MeshUpdate::added(self.table_anchor())),
                _ => {}
            }
        }
        if step > 8 && step % 4 == 0 {
            let wall = (step / 4) as usize % self.walls.len();
            updates.push(MeshUpdate::updated(self.wall_anchor(wall)));
        }
        updates
    }

    fn floor_anchor(&self, step: u32) -> MeshAnchor {
        let extent = (1.0 + step as f32 * 0.375).min(ROOM_SIZE);
        let buffers = MeshBuffers::grid(
            Vec3::new(-extent / 2.0, 0.0, -extent / 2.0),
            Vec3::Z * extent,
            Vec3::X * extent,
            2 + step.min(8),
        );
        MeshAnchor::new(self.floor, Mat4::IDENTITY, buffers)
    }

    /// Walls are scanned as local XY planes facing +Z, then turned to face the room centre.
    fn wall_anchor(&self, index: usize) -> MeshAnchor {
        let half = ROOM_SIZE / 2.0;
        let yaw = index as f32 * FRAC_PI_2;
        let rotation = Quat::from_rotation_y(yaw);
        let position = rotation * Vec3::new(0.0, 0.0, -half);
        let transform = Mat4::from_rotation_translation(rotation, position);

        let buffers = MeshBuffers::grid(
            Vec3::new(-half, 0.0, 0.0),
            Vec3::X * ROOM_SIZE,
            Vec3::Y * ROOM_HEIGHT,
            6,
        );
        let triangles = buffers.triangle_count();
        let anchor = MeshAnchor::new(self.walls[index], transform, buffers);

        // the first wall carries a door over a third of its faces
        let labels: Vec<u8> = (0..triangles)
            .map(|t| {
                if index == 0 && t % 3 == 0 {
                    LABEL_DOOR
                } else {
                    LABEL_WALL
                }
            })
            .collect();
        anchor.with_raw_classification(&labels)
    }

    fn ceiling_anchor(&self) -> MeshAnchor {
        let half = ROOM_SIZE / 2.0;
        let buffers = MeshBuffers::grid(
            Vec3::new(-half, 0.0, -half),
            Vec3::X * ROOM_SIZE,
            Vec3::Z * ROOM_SIZE,
            4,
        );
        MeshAnchor::new(
            self.ceiling,
            Mat4::from_translation(Vec3::Y * ROOM_HEIGHT),
            buffers,
        )
    }

    /// Labelled as furniture, so it is classified by its upward normal.
    fn table_anchor(&self) -> MeshAnchor {
        let buffers = MeshBuffers::grid(
            Vec3::new(-0.6, 0.0, -0.4),
            Vec3::Z * 0.8,
            Vec3::X * 1.2,
            2,
        );
        let labels = vec![LABEL_TABLE; buffers.triangle_count()];
        let transform = Mat4::from_rotation_translation(
            Quat::from_rotation_y(PI / 8.0),
            Vec3::new(0.5, TABLE_HEIGHT, 0.3),
        );
        MeshAnchor::new(self.table, transform, buffers).with_raw_classification(&labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_rain_engine::engine::classification::{SurfaceType, classify};

    #[test]
    fn room_pieces_classify_as_expected() {
        let room = RoomLayout::new();
        assert_eq!(classify(&room.floor_anchor(3)), SurfaceType::Floor);
        assert_eq!(classify(&room.ceiling_anchor()), SurfaceType::Ceiling);
        assert_eq!(classify(&room.table_anchor()), SurfaceType::Floor);
        for wall in 0..4 {
            assert_eq!(classify(&room.wall_anchor(wall)), SurfaceType::Wall);
        }
    }

    #[test]
    fn script_adds_before_it_removes() {
        let room = RoomLayout::new();
        let first = room.updates_for_step(0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].anchor_id, room.floor);
        assert!(
            room.updates_for_step(12)
                .iter()
                .any(|u| u.anchor_id == room.table)
        );
    }
}
