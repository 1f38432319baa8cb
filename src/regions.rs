//! Связные области суши и воды и битовые маски границ.

use crate::tile::Tile;
use crate::topology::Direction;
use crate::world::{GenerationResult, TileGroup, TileGroupType};

/// Бит маски для каждого направления.
const EDGE_BITS: [(Direction, u8); 4] = [
    (Direction::Top, 1),
    (Direction::Right, 2),
    (Direction::Bottom, 4),
    (Direction::Left, 8),
];

/// Разбивает карту на связные группы суши и воды.
///
/// Обход построчный, заливка через явный стек. Каждый тайл попадает ровно в
/// одну группу.
pub fn flood_fill(world: &mut GenerationResult) {
    world.lands.clear();
    world.waters.clear();
    for tile in &mut world.tiles {
        tile.flood_filled = false;
    }

    for start in 0..world.tiles.len() {
        if world.tiles[start].flood_filled {
            continue;
        }

        let collidable = world.tiles[start].collidable;
        let mut tiles = Vec::new();
        let mut stack = vec![start];
        world.tiles[start].flood_filled = true;

        while let Some(idx) = stack.pop() {
            tiles.push(idx);
            for dir in Direction::ALL {
                let Some(n) = world.neighbor(idx, dir) else {
                    continue;
                };
                let neighbor = &mut world.tiles[n];
                if !neighbor.flood_filled && neighbor.collidable == collidable {
                    neighbor.flood_filled = true;
                    stack.push(n);
                }
            }
        }

        if collidable {
            world.lands.push(TileGroup {
                kind: TileGroupType::Land,
                tiles,
            });
        } else {
            world.waters.push(TileGroup {
                kind: TileGroupType::Water,
                tiles,
            });
        }
    }

    log::debug!(
        "Заливка: {} групп суши, {} групп воды",
        world.lands.len(),
        world.waters.len()
    );
}

fn edge_mask(world: &GenerationResult, idx: usize, same: impl Fn(&Tile, &Tile) -> bool) -> u8 {
    let tile = &world.tiles[idx];
    EDGE_BITS
        .iter()
        .filter(|(dir, _)| {
            tile.neighbor(*dir)
                .is_some_and(|n| same(tile, &world.tiles[n]))
        })
        .fold(0, |mask, (_, bit)| mask | bit)
}

/// Маска совпадения полосы высоты с соседями. 15: внутренний тайл.
pub fn update_bitmasks(world: &mut GenerationResult) {
    let masks: Vec<u8> = (0..world.tiles.len())
        .map(|idx| edge_mask(world, idx, |a, b| a.height_type == b.height_type))
        .collect();
    for (tile, mask) in world.tiles.iter_mut().zip(masks) {
        tile.bitmask = mask;
    }
}

/// Маска совпадения биома с соседями.
pub fn update_biome_bitmasks(world: &mut GenerationResult) {
    let masks: Vec<u8> = (0..world.tiles.len())
        .map(|idx| edge_mask(world, idx, |a, b| a.biome_type == b.biome_type))
        .collect();
    for (tile, mask) in world.tiles.iter_mut().zip(masks) {
        tile.biome_bitmask = mask;
    }
}
