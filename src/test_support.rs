//! Общие заготовки карт для модульных тестов.

use crate::classify::classify_tiles;
use crate::config::{GeneratorSettings, MapType};
use crate::sample_grid::SampleGrid;
use crate::sampler::Channels;
use crate::world::GenerationResult;

/// Карта с заданной сырой высотой и ровными температурой и влажностью (0.5).
pub fn world_from_heights(
    map_type: MapType,
    width: u32,
    height: u32,
    heights: impl Fn(u32, u32) -> f32,
) -> GenerationResult {
    let settings = GeneratorSettings {
        width,
        height,
        map_type,
        ..GeneratorSettings::default()
    };
    let channels = Channels {
        height: SampleGrid::from_fn(width, height, heights),
        heat: SampleGrid::from_fn(width, height, |_, _| 0.5),
        moisture: SampleGrid::from_fn(width, height, |_, _| 0.5),
        clouds: None,
    };
    let tiles = classify_tiles(&settings, channels);
    GenerationResult::from_tiles(map_type, width, height, tiles)
}
