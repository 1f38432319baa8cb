use std::collections::HashSet;

use worldgen::{
    ChannelNoise, GenerationResult, GeneratorSettings, HeightType, MapType, SilentProgress,
    TileGroupType, WorldGenerator, persist,
};

fn settings(map_type: MapType, width: u32, height: u32) -> GeneratorSettings {
    GeneratorSettings {
        seed: 1337,
        map_type,
        width,
        height,
        river_count: 12,
        min_river_turns: 2,
        min_river_length: 4,
        ..GeneratorSettings::default()
    }
}

fn constant_world(height: f32) -> GenerationResult {
    let generator = WorldGenerator::with_noise(
        settings(MapType::Wrapping, 8, 8),
        ChannelNoise::constant(height, 0.5, 0.5),
    )
    .unwrap();
    generator.generate(&SilentProgress)
}

fn fractal_world(map_type: MapType) -> GenerationResult {
    WorldGenerator::new(settings(map_type, 64, 48))
        .unwrap()
        .generate(&SilentProgress)
}

#[test]
fn flat_grassland_is_one_land_region() {
    let world = constant_world(0.55);
    assert!(world.tiles.iter().all(|t| t.height_type == HeightType::Grass));
    assert_eq!(world.lands.len(), 1);
    assert_eq!(world.lands[0].tiles.len(), 64);
    assert!(world.waters.is_empty());
    assert!(world.tiles.iter().all(|t| t.bitmask == 15));
}

#[test]
fn flat_ocean_has_no_rivers() {
    let world = constant_world(0.1);
    assert!(world.tiles.iter().all(|t| t.height_type == HeightType::DeepWater));
    assert_eq!(world.waters.len(), 1);
    assert_eq!(world.waters[0].tiles.len(), 64);
    assert!(world.lands.is_empty());
    assert!(world.rivers.is_empty());
    assert!(world.river_groups.is_empty());
}

#[test]
fn regions_partition_the_world() {
    for map_type in [MapType::Wrapping, MapType::Spherical] {
        let world = fractal_world(map_type);
        let mut seen = vec![false; world.tiles.len()];
        for group in world.lands.iter().chain(&world.waters) {
            let land = group.kind == TileGroupType::Land;
            for &idx in &group.tiles {
                assert!(!seen[idx], "тайл {idx} в двух группах");
                seen[idx] = true;
                assert_eq!(world.tiles[idx].collidable, land);
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}

#[test]
fn rivers_respect_limits_and_are_carved() {
    let world = fractal_world(MapType::Wrapping);
    let s = settings(MapType::Wrapping, 64, 48);

    for (i, river) in world.rivers.iter().enumerate() {
        assert_eq!(river.id as usize, i);
        assert!(river.turn_count >= s.min_river_turns);
        assert!(river.tiles.len() >= s.min_river_length as usize);
        assert!(river.intersections <= s.max_river_intersections);
        assert_eq!(river.length, river.tiles.len());
        let unique: HashSet<usize> = river.tiles.iter().copied().collect();
        assert_eq!(unique.len(), river.tiles.len());
        for &idx in &river.tiles {
            assert_eq!(world.tiles[idx].height_type, HeightType::River);
        }
    }
}

#[test]
fn rivers_sharing_a_tile_share_a_group() {
    let world = fractal_world(MapType::Wrapping);
    let group_of = |id: u32| world.river_groups.iter().position(|g| g.rivers.contains(&id));

    for a in &world.rivers {
        let tiles: HashSet<usize> = a.tiles.iter().copied().collect();
        for b in world.rivers.iter().filter(|b| b.id > a.id) {
            if b.tiles.iter().any(|t| tiles.contains(t)) {
                assert!(group_of(a.id).is_some());
                assert_eq!(group_of(a.id), group_of(b.id));
            }
        }
    }
    for group in &world.river_groups {
        assert!(group.rivers.len() >= 2);
    }
}

#[test]
fn channel_values_stay_normalized() {
    for map_type in [MapType::Wrapping, MapType::Spherical] {
        let world = fractal_world(map_type);
        for tile in &world.tiles {
            assert!((0.0..=1.0).contains(&tile.height_value));
            assert!((0.0..=1.0).contains(&tile.heat_value));
            assert!((0.0..=1.0).contains(&tile.moisture_value));
            assert!(tile.bitmask <= 15 && tile.biome_bitmask <= 15);
        }
    }
}

#[test]
fn same_seed_same_world() {
    let a = fractal_world(MapType::Spherical);
    let b = fractal_world(MapType::Spherical);
    assert_eq!(a.tiles, b.tiles);
    assert_eq!(a.rivers, b.rivers);
    assert_eq!(a.river_groups, b.river_groups);
}

#[test]
fn sequential_and_parallel_sampling_agree() {
    let parallel = fractal_world(MapType::Wrapping);
    let sequential = WorldGenerator::new(GeneratorSettings {
        multithreaded: false,
        ..settings(MapType::Wrapping, 64, 48)
    })
    .unwrap()
    .generate(&SilentProgress);
    assert_eq!(parallel.tiles, sequential.tiles);
}

#[test]
fn spherical_poles_are_colder_than_the_equator() {
    let world = fractal_world(MapType::Spherical);
    let row_heat = |y: u32| -> f32 {
        (0..world.width).map(|x| world.tile(x, y).heat_value).sum::<f32>() / world.width as f32
    };
    let equator = row_heat(world.height / 2);
    assert!(row_heat(0) < equator);
    assert!(row_heat(world.height - 1) < equator);
    assert!(world.tiles.iter().all(|t| t.cloud1_value.is_some()));
}

#[test]
fn saved_world_loads_with_the_same_regions() {
    let world = fractal_world(MapType::Wrapping);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.bin");
    persist::save_to_file(&world, &path).unwrap();
    let loaded = persist::load_from_file(&path).unwrap();

    assert_eq!(loaded.lands, world.lands);
    assert_eq!(loaded.waters, world.waters);
    for (a, b) in world.tiles.iter().zip(&loaded.tiles) {
        assert_eq!(a.height_type, b.height_type);
        assert_eq!(a.biome_type, b.biome_type);
        assert_eq!(a.bitmask, b.bitmask);
        assert_eq!(a.biome_bitmask, b.biome_bitmask);
    }
}
