// ============================================
// Terrain Chunk - Состояние одного чанка
// ============================================
//
//   Awaiting -> Ready(карта)
//   для каждой ступени LOD: Idle -> Requested -> Ready(меш)
//
// Карта и готовые меши после получения не меняются и не удаляются.
// Изменяется только потоком-потребителем.

use std::sync::Arc;

use ultraviolet::Vec2;

use crate::terrain::cache::{ChunkBounds, ChunkCoord};
use crate::terrain::generation::MapData;
use crate::terrain::mesh::MeshData;

#[derive(Clone, Debug)]
pub enum MapState {
    Awaiting,
    Ready(Arc<MapData>),
}

/// Состояние меша одной ступени LOD
#[derive(Clone, Debug, Default)]
pub enum LodMeshState {
    #[default]
    Idle,
    Requested,
    Ready(Arc<MeshData>),
}

impl LodMeshState {
    pub fn is_requested(&self) -> bool {
        !matches!(self, LodMeshState::Idle)
    }

    pub fn mesh(&self) -> Option<&Arc<MeshData>> {
        match self {
            LodMeshState::Ready(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Итог получения меша
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshArrival {
    Stored,
    Duplicate,
    /// Индекс вне лестницы LOD
    Unknown,
}

#[derive(Debug)]
pub struct TerrainChunk {
    coord: ChunkCoord,
    center: Vec2,
    bounds: ChunkBounds,
    map: MapState,
    lod_meshes: Vec<LodMeshState>,
    visible: bool,
    active_lod: Option<usize>,
    collider_installed: bool,
}

impl TerrainChunk {
    pub fn new(coord: ChunkCoord, chunk_size: f32, lod_count: usize) -> Self {
        Self {
            coord,
            center: coord.center(chunk_size),
            bounds: coord.bounds(chunk_size),
            map: MapState::Awaiting,
            lod_meshes: vec![LodMeshState::Idle; lod_count],
            visible: false,
            active_lod: None,
            collider_installed: false,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn bounds(&self) -> &ChunkBounds {
        &self.bounds
    }

    /// Расстояние от наблюдателя до края чанка
    pub fn distance_to(&self, viewer: Vec2) -> f32 {
        self.bounds.distance_to(viewer)
    }

    pub fn map_data(&self) -> Option<&Arc<MapData>> {
        match &self.map {
            MapState::Ready(data) => Some(data),
            MapState::Awaiting => None,
        }
    }

    pub fn has_map(&self) -> bool {
        matches!(self.map, MapState::Ready(_))
    }

    /// Принять карту. `false` - карта уже была (повтор отброшен).
    pub fn receive_map(&mut self, data: Arc<MapData>) -> bool {
        if self.has_map() {
            return false;
        }
        self.map = MapState::Ready(data);
        true
    }

    pub fn mesh_state(&self, index: usize) -> Option<&LodMeshState> {
        self.lod_meshes.get(index)
    }

    pub fn mesh(&self, index: usize) -> Option<&Arc<MeshData>> {
        self.lod_meshes.get(index).and_then(LodMeshState::mesh)
    }

    /// Отметить запрос меша. `true` только при переходе Idle -> Requested.
    pub fn mark_requested(&mut self, index: usize) -> bool {
        match self.lod_meshes.get_mut(index) {
            Some(slot) if matches!(slot, LodMeshState::Idle) => {
                *slot = LodMeshState::Requested;
                true
            }
            _ => false,
        }
    }

    pub fn receive_mesh(&mut self, index: usize, mesh: Arc<MeshData>) -> MeshArrival {
        match self.lod_meshes.get_mut(index) {
            None => MeshArrival::Unknown,
            Some(LodMeshState::Ready(_)) => MeshArrival::Duplicate,
            Some(slot) => {
                *slot = LodMeshState::Ready(mesh);
                MeshArrival::Stored
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Возвращает `true`, если видимость изменилась
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    pub fn active_lod(&self) -> Option<usize> {
        self.active_lod
    }

    pub fn set_active_lod(&mut self, index: usize) {
        self.active_lod = Some(index);
    }

    pub fn has_collider(&self) -> bool {
        self.collider_installed
    }

    /// Защёлка коллайдера: после установки не сбрасывается
    pub fn latch_collider(&mut self) -> bool {
        if self.collider_installed {
            return false;
        }
        self.collider_installed = true;
        true
    }

    /// Число ступеней с готовыми мешами
    pub fn ready_mesh_count(&self) -> usize {
        self.lod_meshes.iter().filter(|s| s.mesh().is_some()).count()
    }
}
