// src/rivers/mod.rs
//! Реки: выбор истоков, прокладка пути к воде, группировка пересекающихся
//! рек и прокапывание русел.
//!
//! ## Этапы
//!
//! 1. **Истоки**: случайный тайл суши выше `min_river_height`, на котором ещё
//!    нет реки. Лимит `max_river_attempts` считает все попытки, включая отказы.
//! 2. **Путь** (`path`): жадный спуск к самому низкому соседу с учётом
//!    начального направления течения; вода притягивает реку и завершает путь.
//! 3. **Проверка**: слишком короткие, прямые или запутанные реки отбрасываются
//!    и снимаются со всех тайлов.
//! 4. **Группы** (`group`): реки с общим тайлом объединяются транзитивно.
//! 5. **Русла** (`dig`): ширина уменьшается от устья к истоку; притоки
//!    наследуют ширину в точке слияния с главной рекой группы.

pub mod dig;
pub mod group;
pub mod path;

use rand::Rng;

use crate::config::GeneratorSettings;
use crate::topology::Direction;
use crate::world::GenerationResult;

pub use dig::dig_rivers;
pub use group::build_river_groups;

/// Одна река: путь от истока к устью.
#[derive(Debug, Clone, PartialEq)]
pub struct River {
    pub id: u32,
    /// Индексы тайлов от истока к устью, без повторов
    pub tiles: Vec<usize>,
    pub current_direction: Direction,
    pub turn_count: u32,
    /// Сколько тайлов пути уже принадлежали другой реке
    pub intersections: u32,
    /// Число тайлов на момент прокапывания
    pub length: usize,
}

impl River {
    #[must_use]
    pub fn new(id: u32, direction: Direction) -> Self {
        Self {
            id,
            tiles: Vec::new(),
            current_direction: direction,
            turn_count: 0,
            intersections: 0,
            length: 0,
        }
    }
}

/// Реки, связанные общими тайлами (напрямую или через другие реки группы).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiverGroup {
    pub rivers: Vec<u32>,
}

/// Ищет истоки и прокладывает реки, пока не наберётся `river_count` рек
/// или не кончатся попытки. Нехватка рек не ошибка.
pub fn generate_rivers(
    world: &mut GenerationResult,
    settings: &GeneratorSettings,
    rng: &mut impl Rng,
) {
    let mut remaining = settings.river_count;
    let mut attempts = 0;

    while remaining > 0 && attempts < settings.max_river_attempts {
        attempts += 1;

        let x = rng.gen_range(0..world.width);
        let y = rng.gen_range(0..world.height);
        let start = world.index(x, y);
        let tile = &world.tiles[start];
        if !tile.collidable || !tile.rivers.is_empty() || tile.height_value <= settings.min_river_height
        {
            continue;
        }

        let id = world.rivers.len() as u32;
        let river = path::trace_river(world, start, id);

        if river.turn_count < settings.min_river_turns
            || river.tiles.len() < settings.min_river_length as usize
            || river.intersections > settings.max_river_intersections
        {
            for &idx in &river.tiles {
                world.tiles[idx].rivers.retain(|&r| r != id);
            }
        } else {
            world.rivers.push(river);
            remaining -= 1;
        }
    }

    if remaining > 0 {
        log::warn!(
            "Проложено {} рек из {} за {} попыток",
            world.rivers.len(),
            settings.river_count,
            attempts
        );
    }
}
