// ============================================
// Chunk Store - Стриминг чанков вокруг наблюдателя
// ============================================
//
// Владеет всеми чанками, лестницей LOD и планировщиком. Позиция наблюдателя
// приходит параметром каждого тика, глобального состояния нет.
//
// Порядок тика:
//   1. callbacks готовых задач (карты, меши)
//   2. коллайдеры видимых чанков - если наблюдатель сдвинулся
//   3. проход видимости - первый тик или сдвиг больше порога
//
// Чанки не удаляются: память растёт с исследованной площадью.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ultraviolet::Vec2;

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::terrain::cache::ChunkCoord;
use crate::terrain::generation::{MapData, MapGenerator};
use crate::terrain::lod::LodLadder;
use crate::terrain::mesh::MeshData;
use crate::texture::TerrainTexture;

use super::chunk::{LodMeshState, MeshArrival, TerrainChunk};
use super::scheduler::{GenerationScheduler, SchedulerStats};
use super::sinks::{CollisionSink, RenderSink};

/// Сводка для логов
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub chunks: usize,
    pub visible: usize,
    pub pending_jobs: usize,
    pub colliders: usize,
}

pub struct ChunkStore<R, S> {
    config: TerrainConfig,
    ladder: LodLadder,
    chunk_size: f32,
    chunk_radius: i32,
    collider_prefetch_distance: f32,
    chunks: HashMap<ChunkCoord, TerrainChunk>,
    /// Видимые после последнего прохода, в порядке появления
    visible: Vec<ChunkCoord>,
    scheduler: GenerationScheduler<ChunkStore<R, S>>,
    render: R,
    collision: S,
    viewer: Vec2,
    last_viewer: Option<Vec2>,
    last_sweep_viewer: Option<Vec2>,
    colliders: usize,
}

impl<R, S> ChunkStore<R, S>
where
    R: RenderSink + 'static,
    S: CollisionSink + 'static,
{
    pub fn new(config: TerrainConfig, render: R, collision: S) -> Result<Self, TerrainError> {
        config.validate()?;
        let ladder = config.lod_ladder()?;
        let regions = config.terrain_regions()?;

        let generator = MapGenerator::new(config.noise.clone(), regions, config.map_size(), config.use_falloff);
        let scheduler = GenerationScheduler::new(generator, config.mesh.clone(), config.worker_threads)?;

        let chunk_size = config.chunk_world_size();
        // Наблюдатель может быть у края своего чанка: берём запас в полчанка
        let chunk_radius = ((ladder.max_view_distance() + chunk_size * 0.5) / chunk_size).ceil() as i32;
        let collider_prefetch_distance = config.collision_prefetch_distance();
        log::info!(
            "Chunk store: chunk {} units, view {} units ({} chunks), {} LOD levels",
            chunk_size,
            ladder.max_view_distance(),
            chunk_radius,
            ladder.len()
        );

        Ok(Self {
            config,
            ladder,
            chunk_size,
            chunk_radius,
            collider_prefetch_distance,
            chunks: HashMap::new(),
            visible: Vec::new(),
            scheduler,
            render,
            collision,
            viewer: Vec2::zero(),
            last_viewer: None,
            last_sweep_viewer: None,
            colliders: 0,
        })
    }

    /// Один тик потока-потребителя
    pub fn tick(&mut self, viewer: Vec2) {
        self.viewer = viewer;

        for callback in self.scheduler.drain() {
            callback(self);
        }

        if self.last_viewer != Some(viewer) {
            self.last_viewer = Some(viewer);
            for coord in self.visible.clone() {
                self.update_collision(coord);
            }
        }

        let threshold = self.config.viewer_move_threshold;
        let need_sweep = match self.last_sweep_viewer {
            None => true,
            Some(last) => (viewer - last).mag_sq() > threshold * threshold,
        };
        if need_sweep {
            self.last_sweep_viewer = Some(viewer);
            self.update_visible_chunks();
        }
    }

    /// Полный проход видимости вокруг наблюдателя
    fn update_visible_chunks(&mut self) {
        let mut updated = HashSet::with_capacity(self.visible.len());

        // Сначала бывшие видимыми - так уходящие из зоны скрываются
        for coord in self.visible.clone() {
            updated.insert(coord);
            self.update_chunk(coord);
        }

        let current = ChunkCoord::from_world(self.viewer, self.chunk_size);
        let r = self.chunk_radius;
        for dy in -r..=r {
            for dx in -r..=r {
                let coord = current.offset(dx, dy);
                if updated.contains(&coord) {
                    continue;
                }
                if self.chunks.contains_key(&coord) {
                    self.update_chunk(coord);
                } else {
                    self.create_chunk(coord);
                }
            }
        }
    }

    fn create_chunk(&mut self, coord: ChunkCoord) {
        let chunk = TerrainChunk::new(coord, self.chunk_size, self.ladder.len());
        let center = chunk.center();
        self.chunks.insert(coord, chunk);
        log::debug!("Chunk {:?} created, requesting map data", coord);

        self.scheduler.request_map_data([center.x, center.y], move |store: &mut Self, data| {
            store.on_map_data(coord, data);
        });
    }

    /// Видимость и LOD одного чанка по текущей позиции наблюдателя
    fn update_chunk(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.chunks.get_mut(&coord) else { return };
        let Some(map) = chunk.map_data().cloned() else { return };

        let distance = chunk.distance_to(self.viewer);
        let selected = self.ladder.select(distance);
        let visible = selected.is_some();
        let mut install = None;
        let mut request = None;

        if let Some(index) = selected {
            if chunk.active_lod() != Some(index) {
                match chunk.mesh_state(index) {
                    Some(LodMeshState::Ready(mesh)) => install = Some((index, Arc::clone(mesh))),
                    Some(LodMeshState::Idle) => request = Some(index),
                    _ => {}
                }
            }
        }
        if let Some((index, mesh)) = install {
            chunk.set_active_lod(index);
            self.render.install_mesh(coord, mesh);
        }
        if let Some(index) = request {
            chunk.mark_requested(index);
        }

        if chunk.set_visible(visible) {
            if visible {
                self.visible.push(coord);
            } else {
                self.visible.retain(|c| *c != coord);
            }
            self.render.set_visible(coord, visible);
        }

        if let Some(index) = request {
            self.request_mesh(coord, map, index);
        }
    }

    /// Предзагрузка и установка коллайдера
    fn update_collision(&mut self, coord: ChunkCoord) {
        let index = self.config.collision.lod_index;
        let Some(chunk) = self.chunks.get_mut(&coord) else { return };
        if chunk.has_collider() {
            return;
        }
        let distance = chunk.distance_to(self.viewer);

        if distance <= self.collider_prefetch_distance {
            if let Some(map) = chunk.map_data().cloned() {
                if chunk.mark_requested(index) {
                    log::debug!("Chunk {:?}: prefetching collision mesh", coord);
                    self.request_mesh(coord, map, index);
                    return;
                }
            }
        }

        if distance <= self.config.collision.install_distance {
            if let Some(mesh) = chunk.mesh(index).cloned() {
                let center = chunk.center();
                chunk.latch_collider();
                self.colliders += 1;
                log::debug!("Chunk {:?}: collider installed ({} triangles)", coord, mesh.triangle_count());
                self.collision.install_collider(coord, center, mesh);
            }
        }
    }

    fn request_mesh(&mut self, coord: ChunkCoord, map: Arc<MapData>, index: usize) {
        let Some(lod) = self.ladder.get(index).map(|l| l.lod) else { return };
        self.scheduler.request_mesh(map, lod, move |store: &mut Self, mesh| {
            store.on_mesh_data(coord, index, mesh);
        });
    }

    fn on_map_data(&mut self, coord: ChunkCoord, data: Arc<MapData>) {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            log::warn!("Map data for unknown chunk {:?} dropped", coord);
            return;
        };
        if !chunk.receive_map(Arc::clone(&data)) {
            log::debug!("Chunk {:?}: duplicate map data dropped", coord);
            return;
        }
        log::debug!("Chunk {:?}: map data received", coord);

        self.render.install_texture(coord, TerrainTexture::from_map_data(&data));
        self.update_chunk(coord);
        // Наблюдатель может стоять на месте: коллизию проверяем сразу
        self.update_collision(coord);
    }

    fn on_mesh_data(&mut self, coord: ChunkCoord, index: usize, mesh: Arc<MeshData>) {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            log::warn!("Mesh for unknown chunk {:?} dropped", coord);
            return;
        };
        match chunk.receive_mesh(index, mesh) {
            MeshArrival::Stored => {}
            MeshArrival::Duplicate => {
                log::debug!("Chunk {:?}: duplicate mesh for LOD #{} dropped", coord, index);
                return;
            }
            MeshArrival::Unknown => {
                log::warn!("Chunk {:?}: mesh for unknown LOD #{} dropped", coord, index);
                return;
            }
        }
        if !chunk.is_visible() {
            log::debug!("Chunk {:?}: mesh LOD #{} cached for hidden chunk", coord, index);
        }

        // Скрытый чанк остаётся скрытым: меш только кэшируется
        self.update_chunk(coord);
        if index == self.config.collision.lod_index {
            self.update_collision(coord);
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn ladder(&self) -> &LodLadder {
        &self.ladder
    }

    pub fn chunk_world_size(&self) -> f32 {
        self.chunk_size
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&TerrainChunk> {
        self.chunks.get(&coord)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &TerrainChunk> {
        self.chunks.values()
    }

    pub fn visible_chunks(&self) -> &[ChunkCoord] {
        &self.visible
    }

    pub fn pending_jobs(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            chunks: self.chunks.len(),
            visible: self.visible.len(),
            pending_jobs: self.scheduler.pending(),
            colliders: self.colliders,
        }
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    pub fn collision(&self) -> &S {
        &self.collision
    }

    pub fn collision_mut(&mut self) -> &mut S {
        &mut self.collision
    }
}
