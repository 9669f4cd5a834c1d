pub mod noise;
pub mod falloff;
pub mod height_map;
pub mod color;
pub mod map_data;

pub use noise::{generate_noise_map, octave_offsets, perlin2d, NoiseParams, NormalizeMode};
pub use falloff::generate_falloff_map;
pub use height_map::HeightMap;
pub use color::{default_regions, TerrainRegion, TerrainRegions, FALLBACK_COLOR};
pub use map_data::{MapData, MapGenerator};
