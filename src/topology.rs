//! Топология карты: отображение тайла в пространство шума и правило соседства.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::MapType;

/// Размах области шума, на которую ложится окружность каждой оси тора.
const TORUS_SPAN: f64 = 2.0;

// Границы карты в градусах
const LAT_SOUTH: f64 = -180.0;
const LAT_NORTH: f64 = 180.0;
const LON_WEST: f64 = -90.0;
const LON_EAST: f64 = 90.0;

/// Направление шага между соседними тайлами.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }

    fn offset(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Top => (0, -1),
            Direction::Bottom => (0, 1),
        }
    }
}

/// Точка, в которой выбирается шум для тайла.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplePoint {
    /// 4D-координаты тора: (nx, ny, nz, nw)
    Torus([f64; 4]),
    /// Точка на единичной сфере и долгота тайла в градусах ([-90, 90])
    Sphere { point: [f64; 3], lon: f64 },
}

impl MapType {
    /// Отображает тайл `(x, y)` в координаты шума.
    #[must_use]
    pub fn sample_point(self, x: u32, y: u32, width: u32, height: u32) -> SamplePoint {
        match self {
            MapType::Wrapping => {
                let s = f64::from(x) / f64::from(width);
                let t = f64::from(y) / f64::from(height);
                let r = TORUS_SPAN / (2.0 * PI);
                SamplePoint::Torus([
                    (s * 2.0 * PI).cos() * r,
                    (t * 2.0 * PI).cos() * r,
                    (s * 2.0 * PI).sin() * r,
                    (t * 2.0 * PI).sin() * r,
                ])
            }
            MapType::Spherical => {
                let lat = LAT_SOUTH + (LAT_NORTH - LAT_SOUTH) * f64::from(x) / f64::from(width);
                let lon = LON_WEST + (LON_EAST - LON_WEST) * f64::from(y) / f64::from(height);
                SamplePoint::Sphere {
                    point: lat_lon_to_xyz(lat, lon),
                    lon,
                }
            }
        }
    }

    /// Координаты соседа в направлении `dir` или `None`, если соседа нет.
    ///
    /// Тор: обе оси по модулю. Сфера: X по модулю, по Y сверху соседа нет при
    /// `y - 1 <= 0`, снизу: при `y + 1 >= height`.
    #[must_use]
    pub fn neighbor(
        self,
        x: u32,
        y: u32,
        dir: Direction,
        width: u32,
        height: u32,
    ) -> Option<(u32, u32)> {
        let (dx, dy) = dir.offset();
        let nx = (i64::from(x) + dx).rem_euclid(i64::from(width)) as u32;
        let ny = i64::from(y) + dy;
        match self {
            MapType::Wrapping => Some((nx, ny.rem_euclid(i64::from(height)) as u32)),
            MapType::Spherical => match dir {
                Direction::Top if ny <= 0 => None,
                Direction::Bottom if ny >= i64::from(height) => None,
                _ => Some((nx, ny as u32)),
            },
        }
    }
}

/// Переводит широту/долготу (в градусах) в точку на единичной сфере.
#[must_use]
pub fn lat_lon_to_xyz(lat: f64, lon: f64) -> [f64; 3] {
    let (lat, lon) = (lat.to_radians(), lon.to_radians());
    let r = lon.cos();
    [r * lat.cos(), lon.sin(), r * lat.sin()]
}
