//! Плотная сетка сырых выборок шума с отслеживанием минимума и максимума.

use std::sync::atomic::{AtomicU32, Ordering};

/// Наблюдаемый диапазон значений канала.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f32,
    pub max: f32,
}

impl Extent {
    /// Пустой диапазон: первое наблюдение задаёт и минимум, и максимум.
    pub const EMPTY: Self = Self {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub fn observe(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Нормализует значение в [0, 1] как `(v - min) / (max - min)`.
    ///
    /// Вырожденный канал (`max == min`) не делит на ноль: постоянное значение,
    /// уже лежащее в [0, 1], сохраняется. Правило "весь канал равен 0"
    /// действует только для постоянных значений вне [0, 1].
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range > 0.0 && range.is_finite() {
            (value - self.min) / range
        } else if (0.0..=1.0).contains(&value) {
            value
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let range = self.max - self.min;
        range <= 0.0 || !range.is_finite()
    }
}

/// Атомарный минимум/максимум, общий для потоков выборки.
///
/// Хранит биты `f32` в `AtomicU32` и обновляет их циклом compare-and-swap.
#[derive(Debug)]
pub struct SharedExtent {
    min: AtomicU32,
    max: AtomicU32,
}

impl Default for SharedExtent {
    fn default() -> Self {
        Self {
            min: AtomicU32::new(f32::INFINITY.to_bits()),
            max: AtomicU32::new(f32::NEG_INFINITY.to_bits()),
        }
    }
}

impl SharedExtent {
    pub fn merge(&self, local: Extent) {
        // Ok/Err нам безразличны: Err значит, что текущее значение уже лучше
        let _ = self
            .min
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (local.min < f32::from_bits(bits)).then(|| local.min.to_bits())
            });
        let _ = self
            .max
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (local.max > f32::from_bits(bits)).then(|| local.max.to_bits())
            });
    }

    #[must_use]
    pub fn snapshot(&self) -> Extent {
        Extent {
            min: f32::from_bits(self.min.load(Ordering::Acquire)),
            max: f32::from_bits(self.max.load(Ordering::Acquire)),
        }
    }
}

/// Сетка `width × height` сырых значений в порядке колонок (`x * height + y`),
/// чтобы каждая колонка была непрерывным куском памяти.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
    pub extent: Extent,
}

impl SampleGrid {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize],
            extent: Extent::EMPTY,
        }
    }

    /// Заполняет сетку функцией координат; диапазон считается сразу.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut grid = Self::new(width, height);
        for x in 0..width {
            for y in 0..height {
                grid.set(x, y, f(x, y));
            }
        }
        grid
    }

    /// Собирает сетку из готовых колонок и уже посчитанного диапазона.
    #[must_use]
    pub fn from_columns(width: u32, height: u32, columns: Vec<Vec<f32>>, extent: Extent) -> Self {
        let mut data = Vec::with_capacity((width * height) as usize);
        for column in columns {
            debug_assert_eq!(column.len(), height as usize);
            data.extend(column);
        }
        Self {
            width,
            height,
            data,
            extent,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (x * self.height + y) as usize
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Записывает значение и расширяет диапазон.
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
        self.extent.observe(value);
    }

    /// Прибавляет к значению ячейки; диапазон нужно пересчитать через `recompute_extent`.
    pub fn add(&mut self, x: u32, y: u32, delta: f32) {
        let idx = self.index(x, y);
        self.data[idx] += delta;
    }

    pub fn recompute_extent(&mut self) {
        self.extent = self.data.iter().fold(Extent::EMPTY, |mut e, &v| {
            e.observe(v);
            e
        });
    }

    #[must_use]
    pub fn normalized(&self, x: u32, y: u32) -> f32 {
        self.extent.normalize(self.get(x, y))
    }
}
