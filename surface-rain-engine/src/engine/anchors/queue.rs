use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::mesh_update::MeshUpdate;

type SharedQueue = Arc<Mutex<VecDeque<MeshUpdate>>>;

/// Ordered hand-off between the scan source's thread and the update timeline.
#[derive(Resource, Clone, Default)]
pub struct MeshUpdateQueue(SharedQueue);

impl MeshUpdateQueue {
    /// Cloneable producer handle for another thread.
    pub fn sender(&self) -> MeshUpdateSender {
        MeshUpdateSender(self.0.clone())
    }

    /// Takes every pending update in arrival order.
    pub fn drain(&self) -> Vec<MeshUpdate> {
        if let Ok(mut queue) = self.0.lock() {
            queue.drain(..).collect()
        } else {
            Vec::new()
        }
    }

    pub fn len(&self) -> usize {
        self.0.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
pub struct MeshUpdateSender(SharedQueue);

impl MeshUpdateSender {
    /// Returns false when the queue is unusable (a producer panicked while holding it).
    pub fn send(&self, update: MeshUpdate) -> bool {
        match self.0.lock() {
            Ok(mut queue) => {
                queue.push_back(update);
                true
            }
            Err(_) => false,
        }
    }
}

/// One inbound scan update, in queue order.
#[derive(Event, Debug, Clone)]
pub struct MeshUpdateEvent(pub MeshUpdate);

pub fn drain_mesh_update_queue(
    queue: Res<MeshUpdateQueue>,
    mut update_events: EventWriter<MeshUpdateEvent>,
) {
    for update in queue.drain() {
        update_events.write(MeshUpdateEvent(update));
    }
}
