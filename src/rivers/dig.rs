// src/rivers/dig.rs
use rand::Rng;

use crate::rivers::River;
use crate::tile::HeightType;
use crate::world::GenerationResult;

/// Самая широкая ступень русла.
const MAX_WIDTH: usize = 4;

/// Случайное число из `[min, max)`; пустой диапазон даёт `min`.
fn random_range(rng: &mut impl Rng, min: usize, max: usize) -> usize {
    if min >= max { min } else { rng.gen_range(min..max) }
}

/// Длины участков разной ширины, отсчитываемые от устья.
///
/// Счётчики накопительные: первые `widest` тайлов имеют ширину 4, до `wide`
/// ширину 3, до `narrow` ширину 2, до `narrowest` ширину 1, дальше русло не
/// расширяется.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WidthTiers {
    widest: usize,
    wide: usize,
    narrow: usize,
    narrowest: usize,
}

impl WidthTiers {
    fn random(length: usize, size: usize, rng: &mut impl Rng) -> Self {
        let two = length / 2;
        let three = two / 2;
        let four = three / 2;
        let five = four / 2;

        let mut tiers = Self::default();
        if size >= 4 {
            tiers.widest = random_range(rng, five / 3, five);
        }
        if size >= 3 {
            tiers.wide = tiers.widest + random_range(rng, four / 3, four);
        }
        if size >= 2 {
            tiers.narrow = tiers.wide + random_range(rng, three / 3, three);
        }
        tiers.narrowest = tiers.narrow + random_range(rng, two / 3, two);

        tiers.fit(length);
        tiers
    }

    /// Укорачивает самые широкие участки, пока сумма не влезет в реку.
    fn fit(&mut self, length: usize) {
        let extra = self.narrowest.saturating_sub(length);
        for _ in 0..extra {
            if self.widest > 0 {
                self.widest -= 1;
                self.wide -= 1;
                self.narrow -= 1;
            } else if self.wide > 0 {
                self.wide -= 1;
                self.narrow -= 1;
            } else if self.narrow > 0 {
                self.narrow -= 1;
            }
            self.narrowest -= 1;
        }
    }

    /// Приток до слияния не может быть шире главной реки в точке слияния.
    fn follow_parent(&mut self, parent_size: usize, merged_run: usize) {
        match parent_size {
            1 => {
                self.widest = 0;
                self.wide = 0;
                self.narrow = 0;
                self.narrowest = merged_run;
            }
            2 => {
                self.widest = 0;
                self.wide = 0;
                self.narrow = merged_run;
            }
            3 => {
                self.widest = 0;
                self.wide = merged_run;
            }
            4 => self.widest = merged_run,
            _ => *self = Self::default(),
        }
    }

    fn width_at(&self, from_mouth: usize) -> usize {
        if from_mouth < self.widest {
            4
        } else if from_mouth < self.wide {
            3
        } else if from_mouth < self.narrow {
            2
        } else if from_mouth < self.narrowest {
            1
        } else {
            0
        }
    }
}

/// Смещения квадрата расширения по каждой оси: ширина 1 даёт 2×2, 4 даёт 5×5.
fn widening(width: usize) -> Option<(i32, i32)> {
    match width {
        1 => Some((0, 1)),
        2 => Some((-1, 1)),
        3 => Some((-1, 2)),
        4 => Some((-2, 2)),
        _ => None,
    }
}

fn mark_channel(world: &mut GenerationResult, idx: usize, id: u32) {
    let tile = &mut world.tiles[idx];
    if tile.collidable && !tile.has_river(id) {
        tile.rivers.push(id);
    }
    tile.make_river_channel();
}

fn dig_tile(world: &mut GenerationResult, idx: usize, id: u32, width: usize) {
    mark_channel(world, idx, id);
    world.tiles[idx].river_size = width as u8;

    let Some((lo, hi)) = widening(width) else {
        return;
    };
    for dy in lo..=hi {
        for dx in lo..=hi {
            let Some(n) = world.walk(idx, dx, dy) else {
                continue;
            };
            let tile = &world.tiles[n];
            // Океан и мелководье не перекапываются
            if tile.height_type.is_land() || tile.height_type == HeightType::River {
                mark_channel(world, n, id);
            }
        }
    }
}

/// Прокапывает одну реку от устья к истоку.
fn dig_river(world: &mut GenerationResult, id: u32, parent: Option<u32>, rng: &mut impl Rng) {
    let tiles = world.rivers[id as usize].tiles.clone();
    let length = tiles.len();
    world.rivers[id as usize].length = length;

    let (size, merge) = match parent {
        None => (random_range(rng, 1, MAX_WIDTH + 1), None),
        Some(parent) => {
            let parent_tiles = &world.rivers[parent as usize].tiles;
            let mut merge_at = 0;
            let mut parent_size = 0;
            for (i, idx) in tiles.iter().enumerate() {
                if parent_tiles.contains(idx) {
                    merge_at = i;
                    parent_size = usize::from(world.tiles[*idx].river_size);
                }
            }
            (
                random_range(rng, parent_size, MAX_WIDTH + 1),
                Some((parent_size, length - merge_at)),
            )
        }
    };

    let mut tiers = WidthTiers::random(length, size, rng);
    if let Some((parent_size, merged_run)) = merge {
        tiers.follow_parent(parent_size, merged_run);
    }

    for (from_mouth, &idx) in tiles.iter().rev().enumerate() {
        dig_tile(world, idx, id, tiers.width_at(from_mouth));
    }
}

/// Прокапывает все реки: в каждой группе сначала самую длинную, потом её
/// притоки, затем реки без пересечений.
pub fn dig_rivers(world: &mut GenerationResult, rng: &mut impl Rng) {
    let groups = world.river_groups.clone();
    let mut grouped = vec![false; world.rivers.len()];

    for group in &groups {
        let mut longest: Option<&River> = None;
        for &id in &group.rivers {
            grouped[id as usize] = true;
            let river = &world.rivers[id as usize];
            if longest.is_none_or(|l| l.tiles.len() < river.tiles.len()) {
                longest = Some(river);
            }
        }
        let Some(parent) = longest.map(|r| r.id) else {
            continue;
        };

        dig_river(world, parent, None, rng);
        for &id in group.rivers.iter().filter(|&&id| id != parent) {
            dig_river(world, id, Some(parent), rng);
        }
    }

    for id in 0..world.rivers.len() {
        if !grouped[id] {
            dig_river(world, id as u32, None, rng);
        }
    }
}
