//! Классификация тайлов по нормализованным каналам.

use crate::config::GeneratorSettings;
use crate::sampler::Channels;
use crate::tile::{HeatType, HeightType, MoistureType, Tile};

/// Поправка к сырой влажности от полосы высоты: вода насыщает воздух.
fn moisture_bonus(height_type: HeightType, height_value: f32) -> f32 {
    match height_type {
        HeightType::DeepWater => 8.0 * height_value,
        HeightType::ShallowWater => 3.0 * height_value,
        HeightType::Shore => height_value,
        HeightType::Sand => 0.2 * height_value,
        _ => 0.0,
    }
}

/// Поправка к сырой температуре: чем выше, тем холоднее.
fn heat_bonus(height_type: HeightType, height_value: f32) -> f32 {
    match height_type {
        HeightType::Forest => -0.1 * height_value,
        HeightType::Rock => -0.25 * height_value,
        HeightType::Snow => -0.4 * height_value,
        _ => 0.01 * height_value,
    }
}

/// Строит сетку тайлов (построчно) из сырых каналов.
///
/// Сначала классифицируется высота, и по ней правятся сырые влажность и
/// температура. Только после этого их диапазоны пересчитываются и значения
/// нормализуются, так что итоговые значения остаются в [0, 1].
#[must_use]
pub fn classify_tiles(settings: &GeneratorSettings, mut channels: Channels) -> Vec<Tile> {
    let (width, height) = (settings.width, settings.height);
    let mut tiles = Vec::with_capacity((width * height) as usize);

    for y in 0..height {
        for x in 0..width {
            let height_value = channels.height.normalized(x, y);
            let height_type = HeightType::classify(height_value, settings);
            channels
                .moisture
                .add(x, y, moisture_bonus(height_type, height_value));
            channels.heat.add(x, y, heat_bonus(height_type, height_value));
            tiles.push(Tile::new(x, y, height_value, height_type));
        }
    }

    channels.moisture.recompute_extent();
    channels.heat.recompute_extent();
    if channels.height.extent.is_degenerate() {
        log::warn!("Канал высоты вырожден: все значения одинаковы");
    }

    for tile in &mut tiles {
        let (x, y) = (tile.x, tile.y);
        tile.moisture_value = channels.moisture.normalized(x, y);
        tile.moisture_type = MoistureType::classify(tile.moisture_value, settings);
        tile.heat_value = channels.heat.normalized(x, y);
        tile.heat_type = HeatType::classify(tile.heat_value, settings);
        if let Some((cloud1, cloud2)) = &channels.clouds {
            tile.cloud1_value = Some(cloud1.normalized(x, y));
            tile.cloud2_value = Some(cloud2.normalized(x, y));
        }
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_grid::SampleGrid;

    fn settings(width: u32, height: u32) -> GeneratorSettings {
        GeneratorSettings {
            width,
            height,
            ..GeneratorSettings::default()
        }
    }

    fn channels(height: SampleGrid, heat: SampleGrid, moisture: SampleGrid) -> Channels {
        Channels {
            height,
            heat,
            moisture,
            clouds: None,
        }
    }

    #[test]
    fn one_tile_per_cell_with_unique_coordinates() {
        let s = settings(6, 4);
        let ramp = |x: u32, y: u32| (x * 4 + y) as f32;
        let tiles = classify_tiles(
            &s,
            channels(
                SampleGrid::from_fn(6, 4, ramp),
                SampleGrid::from_fn(6, 4, ramp),
                SampleGrid::from_fn(6, 4, ramp),
            ),
        );
        assert_eq!(tiles.len(), 24);
        let mut seen = std::collections::HashSet::new();
        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!(i, (tile.y * 6 + tile.x) as usize);
            assert!(seen.insert((tile.x, tile.y)));
        }
    }

    #[test]
    fn normalized_values_stay_in_unit_range() {
        let s = settings(8, 8);
        let height = SampleGrid::from_fn(8, 8, |x, y| ((x * 31 + y * 17) % 11) as f32 - 5.0);
        let heat = SampleGrid::from_fn(8, 8, |x, _| x as f32);
        let moisture = SampleGrid::from_fn(8, 8, |_, y| y as f32 * 0.1);
        let tiles = classify_tiles(&s, channels(height, heat, moisture));

        let max_height = tiles.iter().map(|t| t.height_value).fold(0.0, f32::max);
        let min_height = tiles.iter().map(|t| t.height_value).fold(1.0, f32::min);
        assert_eq!(min_height, 0.0);
        assert_eq!(max_height, 1.0);
        for tile in &tiles {
            assert!((0.0..=1.0).contains(&tile.moisture_value));
            assert!((0.0..=1.0).contains(&tile.heat_value));
        }
    }

    #[test]
    fn reclassification_is_idempotent() {
        let s = settings(10, 10);
        let height = SampleGrid::from_fn(10, 10, |x, y| (x as f32 * 0.37 + y as f32 * 0.11).sin());
        let heat = SampleGrid::from_fn(10, 10, |x, y| (x as f32 * 0.7 - y as f32).cos());
        let moisture = SampleGrid::from_fn(10, 10, |x, y| (x * y) as f32);
        let tiles = classify_tiles(&s, channels(height, heat, moisture));
        for tile in &tiles {
            assert_eq!(HeightType::classify(tile.height_value, &s), tile.height_type);
            assert_eq!(HeatType::classify(tile.heat_value, &s), tile.heat_type);
            assert_eq!(
                MoistureType::classify(tile.moisture_value, &s),
                tile.moisture_type
            );
        }
    }

    #[test]
    fn deep_water_raises_moisture_before_normalization() {
        let s = settings(2, 1);
        // (0,0): глубокая вода с высотой 0, (1,0): снег с высотой 1
        let height = SampleGrid::from_fn(2, 1, |x, _| x as f32);
        let heat = SampleGrid::from_fn(2, 1, |_, _| 0.5);
        // Одинаковая сырая влажность: разницу даёт только поправка от высоты
        let moisture = SampleGrid::from_fn(2, 1, |x, _| if x == 0 { 0.0 } else { 1.0 });
        let tiles = classify_tiles(&s, channels(height, heat, moisture));
        assert_eq!(tiles[0].height_type, HeightType::DeepWater);
        assert_eq!(tiles[1].height_type, HeightType::Snow);
        // Высота глубокой воды 0 → бонус 0; снег получает только охлаждение
        assert_eq!(tiles[0].moisture_value, 0.0);
        assert_eq!(tiles[1].moisture_value, 1.0);
        assert!(tiles[1].heat_value < tiles[0].heat_value);
    }

    #[test]
    fn clouds_are_normalized_when_present() {
        let s = settings(3, 3);
        let flat = |_: u32, _: u32| 0.3;
        let mut ch = channels(
            SampleGrid::from_fn(3, 3, flat),
            SampleGrid::from_fn(3, 3, flat),
            SampleGrid::from_fn(3, 3, flat),
        );
        ch.clouds = Some((
            SampleGrid::from_fn(3, 3, |x, _| x as f32 * 2.0),
            SampleGrid::from_fn(3, 3, |_, y| -(y as f32)),
        ));
        let tiles = classify_tiles(&s, ch);
        assert_eq!(tiles[0].cloud1_value, Some(0.0));
        assert_eq!(tiles[2].cloud1_value, Some(1.0));
        assert_eq!(tiles[0].cloud2_value, Some(1.0));
        assert_eq!(tiles[6].cloud2_value, Some(0.0));
    }
}
