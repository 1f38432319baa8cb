// src/rivers/group.rs
use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use crate::rivers::RiverGroup;
use crate::world::GenerationResult;

/// Объединяет реки, делящие хотя бы один тайл, в группы.
///
/// Связность транзитивна: A∩B и B∩C дают одну группу {A, B, C}. Группы и
/// реки внутри них идут в порядке обнаружения при построчном обходе карты.
/// Реки без пересечений в группы не попадают.
pub fn build_river_groups(world: &mut GenerationResult) {
    let count = world.rivers.len();
    let mut sets = UnionFind::<usize>::new(count);
    let mut seen = vec![false; count];
    let mut discovered = Vec::new();

    for tile in world.tiles.iter().filter(|t| t.rivers.len() > 1) {
        let first = tile.rivers[0] as usize;
        for &id in &tile.rivers {
            let id = id as usize;
            if id >= count {
                continue;
            }
            if !seen[id] {
                seen[id] = true;
                discovered.push(id);
            }
            sets.union(first, id);
        }
    }

    let mut group_by_root: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<RiverGroup> = Vec::new();
    for id in discovered {
        let root = sets.find(id);
        let slot = *group_by_root.entry(root).or_insert_with(|| {
            groups.push(RiverGroup::default());
            groups.len() - 1
        });
        groups[slot].rivers.push(id as u32);
    }

    log::debug!("Групп рек: {}", groups.len());
    world.river_groups = groups;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapType;
    use crate::rivers::River;
    use crate::test_support::world_from_heights;
    use crate::topology::Direction;

    fn with_rivers(count: u32) -> GenerationResult {
        let mut world = world_from_heights(MapType::Wrapping, 6, 6, |_, _| 0.6);
        world.rivers = (0..count).map(|id| River::new(id, Direction::Bottom)).collect();
        world
    }

    #[test]
    fn chained_intersections_form_one_group() {
        let mut world = with_rivers(4);
        // 0∩1 на (1,1), 1∩2 на (4,3); река 3 одна
        world.tile_mut(1, 1).rivers = vec![1, 0];
        world.tile_mut(4, 3).rivers = vec![1, 2];
        world.tile_mut(2, 5).rivers = vec![3];
        build_river_groups(&mut world);

        assert_eq!(world.river_groups.len(), 1);
        assert_eq!(world.river_groups[0].rivers, vec![1, 0, 2]);
    }

    #[test]
    fn disjoint_intersections_form_separate_groups() {
        let mut world = with_rivers(4);
        world.tile_mut(0, 0).rivers = vec![2, 3];
        world.tile_mut(5, 5).rivers = vec![0, 1];
        build_river_groups(&mut world);

        let groups: Vec<Vec<u32>> = world.river_groups.iter().map(|g| g.rivers.clone()).collect();
        assert_eq!(groups, vec![vec![2, 3], vec![0, 1]]);
    }

    #[test]
    fn rivers_without_intersections_produce_no_groups() {
        let mut world = with_rivers(2);
        world.tile_mut(0, 0).rivers = vec![0];
        world.tile_mut(3, 3).rivers = vec![1];
        build_river_groups(&mut world);
        assert!(world.river_groups.is_empty());
    }
}
