use serde::{Deserialize, Serialize};

use crate::tile::{HeatType, MoistureType, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BiomeType {
    /// Не суша: океан, мелководье, русла рек
    #[default]
    Water,
    Desert,
    Savanna,
    TropicalRainforest,
    Grassland,
    Woodland,
    SeasonalForest,
    TemperateRainforest,
    BorealForest,
    Tundra,
    Ice,
}

use BiomeType::{
    BorealForest, Desert, Grassland, Ice, Savanna, SeasonalForest, TemperateRainforest,
    TropicalRainforest, Tundra, Woodland,
};

/// Таблица биомов: строка: влажность (Dryest..Wettest), столбец: температура (Coldest..Warmest)
const BIOME_TABLE: [[BiomeType; 6]; 6] = [
    [Ice, Tundra, Grassland, Desert, Desert, Desert],
    [Ice, Tundra, Grassland, Desert, Desert, Desert],
    [Ice, Tundra, Woodland, Woodland, Savanna, Savanna],
    [Ice, Tundra, BorealForest, Woodland, Savanna, Savanna],
    [Ice, Tundra, BorealForest, SeasonalForest, TropicalRainforest, TropicalRainforest],
    [Ice, Tundra, BorealForest, TemperateRainforest, TropicalRainforest, TropicalRainforest],
];

/// Биом суши по полосам влажности и температуры
#[must_use]
pub fn land_biome(moisture: MoistureType, heat: HeatType) -> BiomeType {
    BIOME_TABLE[moisture as usize][heat as usize]
}

/// Биом тайла: суша берёт значение из таблицы, всё остальное: вода
#[must_use]
pub fn biome_of(tile: &Tile) -> BiomeType {
    if tile.collidable {
        land_biome(tile.moisture_type, tile.heat_type)
    } else {
        BiomeType::Water
    }
}

/// Назначает биомы всем тайлам
pub fn assign_biomes(tiles: &mut [Tile]) {
    for tile in tiles {
        tile.biome_type = biome_of(tile);
    }
}
