// ============================================
// Terrain Stream - Headless демо стриминга
// ============================================
//
// Использование: terrain_stream [config.json]
// Наблюдатель идёт по прямой, чанки генерируются в фоне.
// RUST_LOG=debug - подробный лог по каждому чанку.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use ultraviolet::Vec2;

use terrain_stream::{
    ChunkCoord, ChunkStore, MeshData, RapierColliderSink, RenderSink, TerrainConfig, TerrainTexture,
};

const TICKS: usize = 600;
const TICK: Duration = Duration::from_millis(16);
/// Скорость наблюдателя, единиц за тик
const VIEWER_SPEED: f32 = 2.0;

/// Рендер-заглушка: только считает установленные ресурсы
#[derive(Default)]
struct CountingRenderer {
    textures: usize,
    meshes: usize,
    triangles: usize,
    visible_changes: usize,
}

impl RenderSink for CountingRenderer {
    fn install_texture(&mut self, _coord: ChunkCoord, _texture: TerrainTexture) {
        self.textures += 1;
    }

    fn install_mesh(&mut self, _coord: ChunkCoord, mesh: Arc<MeshData>) {
        self.meshes += 1;
        self.triangles += mesh.triangle_count();
    }

    fn set_visible(&mut self, _coord: ChunkCoord, _visible: bool) {
        self.visible_changes += 1;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => TerrainConfig::from_file(&path).with_context(|| format!("loading {path}"))?,
        None => TerrainConfig::default(),
    };

    let mut store = ChunkStore::new(config, CountingRenderer::default(), RapierColliderSink::new())
        .context("creating chunk store")?;

    let start = Instant::now();
    let mut viewer = Vec2::zero();
    for tick in 0..TICKS {
        store.tick(viewer);
        viewer.x += VIEWER_SPEED;

        if tick % 60 == 0 {
            let stats = store.stats();
            log::info!(
                "tick {tick}: viewer ({:.0}, {:.0}), {} chunks, {} visible, {} pending, {} colliders",
                viewer.x,
                viewer.y,
                stats.chunks,
                stats.visible,
                stats.pending_jobs,
                stats.colliders
            );
        }
        std::thread::sleep(TICK);
    }

    // Дождаться хвоста фоновых задач
    while store.pending_jobs() > 0 {
        store.tick(viewer);
        std::thread::sleep(TICK);
    }

    let stats = store.stats();
    let render = store.render();
    log::info!(
        "Done in {:.1?}: {} chunks, {} visible, {} textures, {} meshes ({} triangles), {} visibility changes, {} colliders",
        start.elapsed(),
        stats.chunks,
        stats.visible,
        render.textures,
        render.meshes,
        render.triangles,
        render.visible_changes,
        store.collision().len()
    );
    Ok(())
}
