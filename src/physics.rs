// ============================================
// Physics - Коллайдеры террейна (rapier3d)
// ============================================

use std::collections::HashMap;
use std::sync::Arc;

use rapier3d::prelude::*;
use ultraviolet::Vec2;

use crate::terrain::cache::ChunkCoord;
use crate::terrain::manager::CollisionSink;
use crate::terrain::mesh::MeshData;

/// Trimesh-коллайдер на каждый чанк в `ColliderSet`
#[derive(Default)]
pub struct RapierColliderSink {
    colliders: ColliderSet,
    handles: HashMap<ChunkCoord, ColliderHandle>,
}

impl RapierColliderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    /// Передать набор в физический мир
    pub fn into_collider_set(self) -> ColliderSet {
        self.colliders
    }

    pub fn collider(&self, coord: ChunkCoord) -> Option<&Collider> {
        self.handles.get(&coord).and_then(|h| self.colliders.get(*h))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl CollisionSink for RapierColliderSink {
    fn install_collider(&mut self, coord: ChunkCoord, center: Vec2, mesh: Arc<MeshData>) {
        if mesh.is_empty() {
            log::warn!("Chunk {:?}: empty collision mesh skipped", coord);
            return;
        }
        if self.handles.contains_key(&coord) {
            log::warn!("Chunk {:?}: collider already installed", coord);
            return;
        }

        let vertices: Vec<Point<Real>> = mesh
            .vertices
            .iter()
            .map(|v| point![v.position[0], v.position[1], v.position[2]])
            .collect();
        let collider = ColliderBuilder::trimesh(vertices, mesh.triangles())
            .translation(vector![center.x, 0.0, center.y])
            .build();

        let handle = self.colliders.insert(collider);
        self.handles.insert(coord, handle);
    }
}
