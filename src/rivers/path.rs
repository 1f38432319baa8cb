// src/rivers/path.rs
use crate::rivers::River;
use crate::topology::Direction;
use crate::world::GenerationResult;

/// Значение "соседа нет / сосед недоступен".
const BLOCKED: f32 = f32::MAX;

/// Порог, ниже которого разница высот вдоль оси течения считается шумом.
const FLOW_DAMPING: f32 = 0.1;

/// Порядок, в котором разрешаются равные минимумы.
const PICK_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Bottom,
    Direction::Top,
];

fn slot(dir: Direction) -> usize {
    match dir {
        Direction::Left => 0,
        Direction::Right => 1,
        Direction::Top => 2,
        Direction::Bottom => 3,
    }
}

fn height_or_blocked(world: &GenerationResult, idx: Option<usize>) -> f32 {
    idx.map_or(BLOCKED, |i| world.tiles[i].height_value)
}

/// Направление к строго самому низкому соседу; при ничьей: вниз.
#[must_use]
pub fn lowest_neighbor(world: &GenerationResult, idx: usize) -> Direction {
    let tile = &world.tiles[idx];
    let l = height_or_blocked(world, tile.left);
    let r = height_or_blocked(world, tile.right);
    let t = height_or_blocked(world, tile.top);
    let b = height_or_blocked(world, tile.bottom);

    if l < r && l < t && l < b {
        Direction::Left
    } else if r < l && r < t && r < b {
        Direction::Right
    } else if t < l && t < r && t < b {
        Direction::Top
    } else {
        Direction::Bottom
    }
}

/// Сколько соседей тайла уже несут реку `id`.
fn river_neighbor_count(world: &GenerationResult, idx: usize, id: u32) -> usize {
    Direction::ALL
        .iter()
        .filter_map(|&dir| world.neighbor(idx, dir))
        .filter(|&n| world.tiles[n].has_river(id))
        .count()
}

/// Прокладывает реку `id` от тайла `start`, регистрируя её на пройденных тайлах.
///
/// Путь заканчивается, когда не осталось допустимых соседей или когда самым
/// низким оказался тайл воды: вода в путь не входит.
pub fn trace_river(world: &mut GenerationResult, start: usize, id: u32) -> River {
    let flow = lowest_neighbor(world, start);
    let mut river = River::new(id, flow);
    let mut next = Some(start);

    while let Some(idx) = next.take() {
        if world.tiles[idx].has_river(id) {
            continue;
        }
        if !world.tiles[idx].rivers.is_empty() {
            river.intersections += 1;
        }
        if world.tiles[idx].collidable {
            world.tiles[idx].rivers.push(id);
        }
        river.tiles.push(idx);

        let mut values = [BLOCKED; 4];
        for dir in Direction::ALL {
            let Some(n) = world.neighbor(idx, dir) else {
                continue;
            };
            let neighbor = &world.tiles[n];
            if river_neighbor_count(world, n, id) < 2 && !river.tiles.contains(&n) {
                values[slot(dir)] = neighbor.height_value;
            }
            // Вода без реки притягивает сильнее любого склона
            if neighbor.rivers.is_empty() && !neighbor.collidable {
                values[slot(dir)] = 0.0;
            }
        }

        // Вдоль оси течения почти равные варианты не дают повернуть назад
        let (ahead, behind) = (slot(flow), slot(flow.opposite()));
        if (values[ahead] - values[behind]).abs() < FLOW_DAMPING {
            values[behind] = BLOCKED;
        }

        let min = values.iter().copied().fold(BLOCKED, f32::min);
        if min == BLOCKED {
            continue;
        }

        let Some(dir) = PICK_ORDER.into_iter().find(|&d| values[slot(d)] == min) else {
            continue;
        };
        let Some(n) = world.neighbor(idx, dir) else {
            continue;
        };
        if world.tiles[n].collidable {
            if river.current_direction != dir {
                river.turn_count += 1;
                river.current_direction = dir;
            }
            next = Some(n);
        }
    }

    river
}
