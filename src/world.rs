//! Результат генерации: сетка тайлов, регионы суши/воды и реки.

use serde::{Deserialize, Serialize};

use crate::config::MapType;
use crate::rivers::{River, RiverGroup};
use crate::tile::Tile;
use crate::topology::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileGroupType {
    Water,
    Land,
}

/// Связная (по 4 соседям) область тайлов с одинаковым `collidable`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGroup {
    pub kind: TileGroupType,
    /// Индексы тайлов в порядке обхода заливки
    pub tiles: Vec<usize>,
}

/// Готовая карта. Тайлы лежат построчно: индекс = `y * width + x`.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub map_type: MapType,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Tile>,
    pub lands: Vec<TileGroup>,
    pub waters: Vec<TileGroup>,
    pub rivers: Vec<River>,
    pub river_groups: Vec<RiverGroup>,
}

impl GenerationResult {
    /// Оборачивает готовую сетку тайлов; соседи связываются сразу.
    #[must_use]
    pub fn from_tiles(map_type: MapType, width: u32, height: u32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        let mut result = Self {
            map_type,
            width,
            height,
            tiles,
            lands: Vec::new(),
            waters: Vec::new(),
            rivers: Vec::new(),
            river_groups: Vec::new(),
        };
        result.update_neighbors();
        result
    }

    #[must_use]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    #[must_use]
    pub fn tile(&self, x: u32, y: u32) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn tile_mut(&mut self, x: u32, y: u32) -> &mut Tile {
        let idx = self.index(x, y);
        &mut self.tiles[idx]
    }

    #[must_use]
    pub fn neighbor(&self, idx: usize, dir: Direction) -> Option<usize> {
        self.tiles[idx].neighbor(dir)
    }

    /// Связывает каждый тайл с соседями по правилу топологии.
    pub fn update_neighbors(&mut self) {
        let (map_type, width, height) = (self.map_type, self.width, self.height);
        for idx in 0..self.tiles.len() {
            let (x, y) = (self.tiles[idx].x, self.tiles[idx].y);
            for dir in Direction::ALL {
                let neighbor = map_type
                    .neighbor(x, y, dir, width, height)
                    .map(|(nx, ny)| (ny * width + nx) as usize);
                self.tiles[idx].set_neighbor(dir, neighbor);
            }
        }
    }

    /// Индекс тайла, смещённого на `(dx, dy)` шагами по связям соседства.
    /// `None`, если путь упирается в край карты.
    #[must_use]
    pub fn walk(&self, from: usize, dx: i32, dy: i32) -> Option<usize> {
        let horizontal = if dx < 0 { Direction::Left } else { Direction::Right };
        let vertical = if dy < 0 { Direction::Top } else { Direction::Bottom };
        let mut idx = from;
        for _ in 0..dx.unsigned_abs() {
            idx = self.neighbor(idx, horizontal)?;
        }
        for _ in 0..dy.unsigned_abs() {
            idx = self.neighbor(idx, vertical)?;
        }
        Some(idx)
    }
}
