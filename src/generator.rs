//! Конвейер генерации мира.
//!
//! Стадии выполняются строго по очереди; параллельна только выборка шума:
//!
//! 1. выборка каналов шума;
//! 2. классификация тайлов;
//! 3. связывание соседей;
//! 4. реки (истоки, группы, русла);
//! 5. влажность от рек;
//! 6. маски высот, заливка регионов, биомы и маски биомов.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::biome::assign_biomes;
use crate::classify::classify_tiles;
use crate::config::{GeneratorSettings, MapType};
use crate::error::ConfigError;
use crate::moisture::diffuse_river_moisture;
use crate::noise_field::ChannelNoise;
use crate::progress::{LogProgress, ProgressSink};
use crate::regions::{flood_fill, update_biome_bitmasks, update_bitmasks};
use crate::rivers::{build_river_groups, dig_rivers, generate_rivers};
use crate::sampler::sample_channels;
use crate::world::GenerationResult;

/// Проверенные настройки вместе с полями шума.
pub struct WorldGenerator {
    settings: GeneratorSettings,
    noise: ChannelNoise,
}

impl WorldGenerator {
    /// Проверяет настройки и строит поля шума из их зерна.
    pub fn new(settings: GeneratorSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let noise = ChannelNoise::from_settings(&settings);
        Ok(Self { settings, noise })
    }

    /// Как `new`, но с готовыми полями шума (например, `ChannelNoise::constant`).
    pub fn with_noise(settings: GeneratorSettings, noise: ChannelNoise) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings, noise })
    }

    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Генерирует мир. Одинаковые настройки дают одинаковый результат.
    #[must_use]
    pub fn generate(&self, progress: &dyn ProgressSink) -> GenerationResult {
        let settings = &self.settings;

        progress.stage("Выборка шума");
        let channels = sample_channels(settings, &self.noise, progress);

        progress.stage("Классификация тайлов");
        let tiles = classify_tiles(settings, channels);

        progress.stage("Связывание соседей");
        let mut world =
            GenerationResult::from_tiles(settings.map_type, settings.width, settings.height, tiles);

        progress.stage("Реки");
        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
        generate_rivers(&mut world, settings, &mut rng);
        build_river_groups(&mut world);
        dig_rivers(&mut world, &mut rng);

        progress.stage("Влажность");
        diffuse_river_moisture(&mut world, settings);

        progress.stage("Регионы и биомы");
        update_bitmasks(&mut world);
        flood_fill(&mut world);
        assign_biomes(&mut world.tiles);
        update_biome_bitmasks(&mut world);

        let summary = WorldSummary::of(&world, settings.seed);
        log::info!(
            "Мир {}x{}: суша {} групп, вода {} групп, рек {}, групп рек {}",
            summary.width,
            summary.height,
            summary.land_groups,
            summary.water_groups,
            summary.rivers,
            summary.river_groups
        );
        world
    }
}

/// Генерирует мир с логированием стадий.
pub fn generate_world(settings: GeneratorSettings) -> Result<GenerationResult, ConfigError> {
    Ok(WorldGenerator::new(settings)?.generate(&LogProgress))
}

/// Краткая сводка по миру.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldSummary {
    pub seed: u64,
    pub map_type: MapType,
    pub width: u32,
    pub height: u32,
    pub land_tiles: usize,
    pub river_tiles: usize,
    pub land_groups: usize,
    pub water_groups: usize,
    pub rivers: usize,
    pub river_groups: usize,
}

impl WorldSummary {
    #[must_use]
    pub fn of(world: &GenerationResult, seed: u64) -> Self {
        Self {
            seed,
            map_type: world.map_type,
            width: world.width,
            height: world.height,
            land_tiles: world.tiles.iter().filter(|t| t.collidable).count(),
            river_tiles: world.tiles.iter().filter(|t| t.river_size > 0 || !t.rivers.is_empty()).count(),
            land_groups: world.lands.len(),
            water_groups: world.waters.len(),
            rivers: world.rivers.len(),
            river_groups: world.river_groups.len(),
        }
    }
}
