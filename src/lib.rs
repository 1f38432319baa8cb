pub mod biome;
pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod moisture;
pub mod noise_field;
pub mod persist;
pub mod progress;
pub mod regions;
pub mod rivers;
pub mod sample_grid;
pub mod sampler;
pub mod tile;
pub mod topology;
pub mod world;

#[cfg(test)]
mod test_support;

pub use biome::BiomeType;
pub use config::{BasisKind, FractalKind, GeneratorSettings, MapType};
pub use error::{ConfigError, LoadError};
pub use generator::{WorldGenerator, WorldSummary, generate_world};
pub use noise_field::{ChannelNoise, ConstantNoise, FractalNoise, NoiseField};
pub use progress::{LogProgress, ProgressSink, SilentProgress};
pub use rivers::{River, RiverGroup};
pub use tile::{HeatType, HeightType, MoistureType, Tile};
pub use topology::Direction;
pub use world::{GenerationResult, TileGroup, TileGroupType};
