//! Увлажнение земель вокруг рек.

use crate::config::GeneratorSettings;
use crate::tile::HeightType;
use crate::world::GenerationResult;

/// Радиус влияния реки в тайлах.
pub const RIVER_MOISTURE_RADIUS: i32 = 60;

/// Прибавка на расстоянии 1; дальше убывает как 1/расстояние.
const RIVER_MOISTURE_AMOUNT: f32 = 0.025;

/// Добавляет влажность вокруг каждого тайла-русла.
///
/// Координаты заворачиваются по обеим осям независимо от топологии карты.
/// Русла собираются заранее, так что порядок обхода не влияет на результат.
pub fn diffuse_river_moisture(world: &mut GenerationResult, settings: &GeneratorSettings) {
    let sources: Vec<(u32, u32)> = world
        .tiles
        .iter()
        .filter(|t| t.height_type == HeightType::River)
        .map(|t| (t.x, t.y))
        .collect();

    for &(x, y) in &sources {
        spread_from(world, settings, x, y, RIVER_MOISTURE_RADIUS);
    }
    log::debug!("Влажность от рек: {} источников", sources.len());
}

fn spread_from(world: &mut GenerationResult, settings: &GeneratorSettings, x: u32, y: u32, radius: i32) {
    let (width, height) = (world.width as i32, world.height as i32);
    let (cx, cy) = (x as i32, y as i32);

    let mut moisten = |dx: i32, dy: i32| {
        let nx = (cx + dx).rem_euclid(width) as u32;
        let ny = (cy + dy).rem_euclid(height) as u32;
        let distance = ((dx * dx + dy * dy) as f32).sqrt();
        world
            .tile_mut(nx, ny)
            .add_moisture(RIVER_MOISTURE_AMOUNT / distance, settings);
    };

    for curr in (1..=radius).rev() {
        for dx in [-curr, curr] {
            moisten(dx, 0);
            for dy in 1..=curr {
                moisten(dx, dy);
                moisten(dx, -dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapType;
    use crate::test_support::world_from_heights;
    use crate::tile::MoistureType;

    fn grassland(size: u32) -> GenerationResult {
        world_from_heights(MapType::Wrapping, size, size, |_, _| 0.6)
    }

    #[test]
    fn nearby_tiles_gain_inverse_distance_moisture() {
        let settings = GeneratorSettings::default();
        let mut world = grassland(16);
        spread_from(&mut world, &settings, 8, 8, 2);

        assert!((world.tile(9, 8).moisture_value - 0.525).abs() < 1e-6);
        assert!((world.tile(6, 8).moisture_value - 0.5125).abs() < 1e-6);
        let diagonal = 0.5 + 0.025 / 2.0_f32.sqrt();
        assert!((world.tile(7, 9).moisture_value - diagonal).abs() < 1e-6);
        // Столбец самой реки не затрагивается
        assert_eq!(world.tile(8, 9).moisture_value, 0.5);
        assert_eq!(world.tile(8, 8).moisture_value, 0.5);
        // За радиусом ничего не меняется
        assert_eq!(world.tile(11, 8).moisture_value, 0.5);
    }

    #[test]
    fn offsets_wrap_around_both_axes() {
        let settings = GeneratorSettings::default();
        let mut world = grassland(16);
        spread_from(&mut world, &settings, 0, 0, 1);
        assert!(world.tile(15, 0).moisture_value > 0.5);
        assert!(world.tile(15, 15).moisture_value > 0.5);
        assert!(world.tile(1, 15).moisture_value > 0.5);
    }

    #[test]
    fn moisture_is_clamped_and_reclassified() {
        let settings = GeneratorSettings::default();
        let mut world = grassland(8);
        world.tile_mut(3, 3).make_river_channel();
        world.tile_mut(4, 3).make_river_channel();
        diffuse_river_moisture(&mut world, &settings);

        for tile in &world.tiles {
            assert!(tile.moisture_value <= 1.0);
            assert_eq!(
                MoistureType::classify(tile.moisture_value, &settings),
                tile.moisture_type
            );
        }
        assert_eq!(world.tile(0, 0).moisture_value, 1.0);
        assert_eq!(world.tile(0, 0).moisture_type, MoistureType::Wettest);
    }
}
