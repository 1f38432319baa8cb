// src/config.rs
//! Конфигурация генерации мира
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией карты тайлов:
//! - Топологию карты (зацикленная по обеим осям или сферическая)
//! - Параметры шума для каналов высоты, температуры и влажности
//! - Пороговые "лестницы" для классификации тайлов по полосам
//! - Параметры генерации рек
//!
//! Настройки плоские (без вложенных секций) и поддерживают загрузку из TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Топология генерируемой карты
///
/// Определяет, как координаты тайла отображаются в пространство шума и
/// какие тайлы считаются соседними.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapType {
    /// Тор: карта бесшовно зациклена по X и по Y
    #[default]
    Wrapping,
    /// Проекция сферы: X зациклен, по Y карта ограничена полюсами
    Spherical,
}

impl MapType {
    /// Целочисленный код для бинарного формата сохранения.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            MapType::Wrapping => 0,
            MapType::Spherical => 1,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MapType::Wrapping),
            1 => Some(MapType::Spherical),
            _ => None,
        }
    }
}

/// Тип фрактала, складывающего октавы базового шума
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FractalKind {
    Fbm,
    Billow,
    /// Классический мультифрактал (значение по умолчанию для всех каналов)
    #[default]
    BasicMulti,
    HybridMulti,
    RidgedMulti,
}

/// Базовая функция шума
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BasisKind {
    Perlin,
    #[default]
    Simplex,
    OpenSimplex,
    Value,
}

/// Параметры генерации мира
///
/// Полная конфигурация одного запуска генератора. Неизменяема во время генерации.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Сид шума и генератора случайных чисел (детерминированная генерация)
    pub seed: u64,
    /// Топология карты
    pub map_type: MapType,
    /// Ширина карты в тайлах
    pub width: u32,
    /// Высота карты в тайлах
    pub height: u32,

    pub fractal: FractalKind,
    pub basis: BasisKind,

    pub terrain_octaves: u32,
    pub terrain_frequency: f64,
    // Лестница высот: DeepWater < ShallowWater < Sand < Grass < Forest < Rock < (Snow)
    pub deep_water: f32,
    pub shallow_water: f32,
    pub sand: f32,
    pub grass: f32,
    pub forest: f32,
    pub rock: f32,

    pub heat_octaves: u32,
    pub heat_frequency: f64,
    // Лестница температур: Coldest < Colder < Cold < Warm < Warmer < (Warmest)
    pub coldest_value: f32,
    pub colder_value: f32,
    pub cold_value: f32,
    pub warm_value: f32,
    pub warmer_value: f32,

    pub moisture_octaves: u32,
    pub moisture_frequency: f64,
    // Лестница влажности: Dryest < Dryer < Dry < Wet < Wetter < (Wettest)
    pub dryer_value: f32,
    pub dry_value: f32,
    pub wet_value: f32,
    pub wetter_value: f32,
    pub wettest_value: f32,

    /// Сколько рек пытаемся проложить
    pub river_count: u32,
    /// Минимальная нормализованная высота истока
    pub min_river_height: f32,
    /// Общий лимит попыток выбора истока (включая отклонённые тайлы)
    pub max_river_attempts: u32,
    pub min_river_turns: u32,
    pub min_river_length: u32,
    pub max_river_intersections: u32,

    /// Параллельная выборка шума по колонкам
    pub multithreaded: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            map_type: MapType::Wrapping,
            width: 512,
            height: 512,
            fractal: FractalKind::BasicMulti,
            basis: BasisKind::Simplex,

            terrain_octaves: 6,
            terrain_frequency: 1.25,
            deep_water: 0.2,
            shallow_water: 0.4,
            sand: 0.5,
            grass: 0.7,
            forest: 0.8,
            rock: 0.9,

            heat_octaves: 4,
            heat_frequency: 3.0,
            coldest_value: 0.05,
            colder_value: 0.18,
            cold_value: 0.4,
            warm_value: 0.6,
            warmer_value: 0.8,

            moisture_octaves: 4,
            moisture_frequency: 3.0,
            dryer_value: 0.27,
            dry_value: 0.4,
            wet_value: 0.6,
            wetter_value: 0.8,
            wettest_value: 0.9,

            river_count: 40,
            min_river_height: 0.6,
            max_river_attempts: 1000,
            min_river_turns: 18,
            min_river_length: 20,
            max_river_intersections: 2,

            multithreaded: true,
        }
    }
}

impl GeneratorSettings {
    /// Загружает параметры из TOML-файла и проверяет их
    ///
    /// # Пример
    /// ```toml
    /// # world.toml
    /// seed = 42
    /// width = 256
    /// height = 256
    /// map_type = "Spherical"
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    #[must_use]
    pub fn height_ladder(&self) -> [f32; 6] {
        [
            self.deep_water,
            self.shallow_water,
            self.sand,
            self.grass,
            self.forest,
            self.rock,
        ]
    }

    #[must_use]
    pub fn heat_ladder(&self) -> [f32; 5] {
        [
            self.coldest_value,
            self.colder_value,
            self.cold_value,
            self.warm_value,
            self.warmer_value,
        ]
    }

    #[must_use]
    pub fn moisture_ladder(&self) -> [f32; 5] {
        [
            self.dryer_value,
            self.dry_value,
            self.wet_value,
            self.wetter_value,
            self.wettest_value,
        ]
    }

    /// Проверяет настройки до начала выборки шума.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Число тайлов должно помещаться в u32
        if self.width == 0 || self.height == 0 || self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        check_ladder("height", &self.height_ladder())?;
        check_ladder("heat", &self.heat_ladder())?;
        check_ladder("moisture", &self.moisture_ladder())?;

        for (channel, octaves, frequency) in [
            ("terrain", self.terrain_octaves, self.terrain_frequency),
            ("heat", self.heat_octaves, self.heat_frequency),
            ("moisture", self.moisture_octaves, self.moisture_frequency),
        ] {
            if !(1..=32).contains(&octaves) {
                return Err(ConfigError::InvalidOctaves { channel, octaves });
            }
            if !frequency.is_finite() || frequency <= 0.0 {
                return Err(ConfigError::InvalidFrequency { channel, frequency });
            }
        }

        if !(0.0..=1.0).contains(&self.min_river_height) {
            return Err(ConfigError::InvalidRiverHeight(self.min_river_height));
        }

        Ok(())
    }
}

fn check_ladder(ladder: &'static str, thresholds: &[f32]) -> Result<(), ConfigError> {
    for &value in thresholds {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ThresholdOutOfRange { ladder, value });
        }
    }
    if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ConfigError::UnorderedLadder { ladder });
    }
    Ok(())
}
