pub mod scheduler;
pub mod sinks;
pub mod chunk;
pub mod store;

pub use scheduler::{Callback, GenerationScheduler, SchedulerStats};
pub use sinks::{CollisionSink, RenderSink};
pub use chunk::{LodMeshState, MapState, MeshArrival, TerrainChunk};
pub use store::{ChunkStore, StoreStats};
