// ============================================
// Generation Scheduler - Фоновая генерация карт и мешей
// ============================================
//
// Запрос = (параметры, callback). Вычисление идёт в пуле rayon,
// готовый callback с результатом кладётся в канал. Потребитель забирает
// всё содержимое канала раз в тик и вызывает callbacks у себя:
// callbacks никогда не выполняются параллельно друг с другом.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::terrain::generation::{MapData, MapGenerator};
use crate::terrain::mesh::{build_terrain_mesh, MeshData, MeshSettings};

/// Готовый к вызову callback: результат уже связан внутри
pub type Callback<C> = Box<dyn FnOnce(&mut C) + Send>;

/// Счётчики запросов
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub map_requests: usize,
    pub mesh_requests: usize,
    pub delivered: usize,
}

pub struct GenerationScheduler<C> {
    pool: ThreadPool,
    generator: Arc<MapGenerator>,
    mesh_settings: Arc<MeshSettings>,
    result_tx: Sender<Callback<C>>,
    result_rx: Receiver<Callback<C>>,
    pending: usize,
    stats: SchedulerStats,
}

impl<C: 'static> GenerationScheduler<C> {
    /// `threads == 0` - размер пула по умолчанию (число ядер)
    pub fn new(
        generator: MapGenerator,
        mesh_settings: MeshSettings,
        threads: usize,
    ) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("terrain-gen-{i}"))
            .build()?;
        log::info!("Terrain worker pool: {} threads", pool.current_num_threads());

        let (result_tx, result_rx) = channel();
        Ok(Self {
            pool,
            generator: Arc::new(generator),
            mesh_settings: Arc::new(mesh_settings),
            result_tx,
            result_rx,
            pending: 0,
            stats: SchedulerStats::default(),
        })
    }

    /// Сгенерировать карту высот и цветов для центра `center`
    pub fn request_map_data<F>(&mut self, center: [f32; 2], on_complete: F)
    where
        F: FnOnce(&mut C, Arc<MapData>) + Send + 'static,
    {
        let generator = Arc::clone(&self.generator);
        let tx = self.result_tx.clone();
        self.pending += 1;
        self.stats.map_requests += 1;

        self.pool.spawn(move || {
            let data = Arc::new(generator.generate(center));
            let callback: Callback<C> = Box::new(move |ctx| on_complete(ctx, data));
            // Потребитель уже удалён - результат некому отдавать
            let _ = tx.send(callback);
        });
    }

    /// Построить меш уровня `lod` по готовой карте
    pub fn request_mesh<F>(&mut self, map_data: Arc<MapData>, lod: usize, on_complete: F)
    where
        F: FnOnce(&mut C, Arc<MeshData>) + Send + 'static,
    {
        let settings = Arc::clone(&self.mesh_settings);
        let tx = self.result_tx.clone();
        self.pending += 1;
        self.stats.mesh_requests += 1;

        self.pool.spawn(move || {
            let mesh = build_terrain_mesh(
                &map_data.height_map,
                settings.height_multiplier,
                &settings.height_curve,
                lod,
            );
            let mesh = Arc::new(mesh);
            let callback: Callback<C> = Box::new(move |ctx| on_complete(ctx, mesh));
            let _ = tx.send(callback);
        });
    }

    /// Забрать всё, что готово к этому моменту.
    ///
    /// Результаты, пришедшие после вызова, ждут следующего тика.
    pub fn drain(&mut self) -> Vec<Callback<C>> {
        let ready: Vec<Callback<C>> = self.result_rx.try_iter().collect();
        self.pending = self.pending.saturating_sub(ready.len());
        self.stats.delivered += ready.len();
        ready
    }

    /// Забрать готовые результаты и вызвать их callbacks
    pub fn dispatch(&mut self, ctx: &mut C) -> usize {
        let ready = self.drain();
        let count = ready.len();
        for callback in ready {
            callback(ctx);
        }
        count
    }

    /// Запросы, чьи callbacks ещё не вызваны
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn settings(&self) -> &MeshSettings {
        &self.mesh_settings
    }
}
