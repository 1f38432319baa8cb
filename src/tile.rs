//! Тайл карты и дискретные полосы высоты, температуры и влажности.

use serde::{Deserialize, Serialize};

use crate::biome::BiomeType;
use crate::config::GeneratorSettings;
use crate::topology::Direction;

/// Полоса высоты. Коды совпадают с бинарным форматом сохранения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeightType {
    DeepWater = 1,
    ShallowWater = 2,
    Shore = 3,
    Sand = 4,
    Grass = 5,
    Forest = 6,
    Rock = 7,
    Snow = 8,
    River = 9,
}

impl HeightType {
    /// Классифицирует нормализованную высоту по лестнице порогов.
    /// Значение, равное порогу, относится к следующей полосе.
    #[must_use]
    pub fn classify(value: f32, settings: &GeneratorSettings) -> Self {
        const BANDS: [HeightType; 7] = [
            HeightType::DeepWater,
            HeightType::ShallowWater,
            HeightType::Sand,
            HeightType::Grass,
            HeightType::Forest,
            HeightType::Rock,
            HeightType::Snow,
        ];
        BANDS[band_index(value, &settings.height_ladder())]
    }

    /// Суша: от песка до снега. Русло реки сушей не считается.
    #[must_use]
    pub fn is_land(self) -> bool {
        matches!(
            self,
            HeightType::Sand
                | HeightType::Grass
                | HeightType::Forest
                | HeightType::Rock
                | HeightType::Snow
        )
    }

    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => HeightType::DeepWater,
            2 => HeightType::ShallowWater,
            3 => HeightType::Shore,
            4 => HeightType::Sand,
            5 => HeightType::Grass,
            6 => HeightType::Forest,
            7 => HeightType::Rock,
            8 => HeightType::Snow,
            9 => HeightType::River,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeatType {
    Coldest = 0,
    Colder = 1,
    Cold = 2,
    Warm = 3,
    Warmer = 4,
    Warmest = 5,
}

impl HeatType {
    const ALL: [HeatType; 6] = [
        HeatType::Coldest,
        HeatType::Colder,
        HeatType::Cold,
        HeatType::Warm,
        HeatType::Warmer,
        HeatType::Warmest,
    ];

    #[must_use]
    pub fn classify(value: f32, settings: &GeneratorSettings) -> Self {
        Self::ALL[band_index(value, &settings.heat_ladder())]
    }

    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoistureType {
    Dryest = 0,
    Dryer = 1,
    Dry = 2,
    Wet = 3,
    Wetter = 4,
    Wettest = 5,
}

impl MoistureType {
    const ALL: [MoistureType; 6] = [
        MoistureType::Dryest,
        MoistureType::Dryer,
        MoistureType::Dry,
        MoistureType::Wet,
        MoistureType::Wetter,
        MoistureType::Wettest,
    ];

    #[must_use]
    pub fn classify(value: f32, settings: &GeneratorSettings) -> Self {
        Self::ALL[band_index(value, &settings.moisture_ladder())]
    }

    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Номер первой полосы, порог которой строго больше значения.
fn band_index(value: f32, ladder: &[f32]) -> usize {
    ladder
        .iter()
        .position(|&threshold| value < threshold)
        .unwrap_or(ladder.len())
}

/// Один тайл карты.
///
/// Соседи хранятся как индексы в сетке результата, а не как ссылки: граф
/// соседства цикличен.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,

    pub height_value: f32,
    pub height_type: HeightType,
    pub heat_value: f32,
    pub heat_type: HeatType,
    pub moisture_value: f32,
    pub moisture_type: MoistureType,
    pub cloud1_value: Option<f32>,
    pub cloud2_value: Option<f32>,

    pub biome_type: BiomeType,
    /// Суша (по ней можно ходить и прокладывать реки)
    pub collidable: bool,
    /// Ширина выкопанного русла, 0: тайл не расширялся
    pub river_size: u8,

    /// Биты: верх = 1, право = 2, низ = 4, лево = 8. 15: внутренний тайл.
    pub bitmask: u8,
    pub biome_bitmask: u8,
    pub flood_filled: bool,

    /// ID рек, проходящих через тайл
    pub rivers: Vec<u32>,

    pub left: Option<usize>,
    pub right: Option<usize>,
    pub top: Option<usize>,
    pub bottom: Option<usize>,
}

impl Tile {
    /// Новый тайл с уже классифицированной высотой; остальные поля заполняет классификатор.
    #[must_use]
    pub fn new(x: u32, y: u32, height_value: f32, height_type: HeightType) -> Self {
        Self {
            x,
            y,
            height_value,
            height_type,
            heat_value: 0.0,
            heat_type: HeatType::Coldest,
            moisture_value: 0.0,
            moisture_type: MoistureType::Dryest,
            cloud1_value: None,
            cloud2_value: None,
            biome_type: BiomeType::Water,
            collidable: height_type.is_land(),
            river_size: 0,
            bitmask: 0,
            biome_bitmask: 0,
            flood_filled: false,
            rivers: Vec::new(),
            left: None,
            right: None,
            top: None,
            bottom: None,
        }
    }

    #[must_use]
    pub fn neighbor(&self, dir: Direction) -> Option<usize> {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Top => self.top,
            Direction::Bottom => self.bottom,
        }
    }

    pub fn set_neighbor(&mut self, dir: Direction, idx: Option<usize>) {
        match dir {
            Direction::Left => self.left = idx,
            Direction::Right => self.right = idx,
            Direction::Top => self.top = idx,
            Direction::Bottom => self.bottom = idx,
        }
    }

    #[must_use]
    pub fn has_river(&self, id: u32) -> bool {
        self.rivers.contains(&id)
    }

    /// Прибавляет влажность, обрезает её до 1 и переклассифицирует.
    pub fn add_moisture(&mut self, amount: f32, settings: &GeneratorSettings) {
        self.moisture_value = (self.moisture_value + amount).min(1.0);
        self.moisture_type = MoistureType::classify(self.moisture_value, settings);
    }

    /// Превращает тайл в русло реки.
    pub fn make_river_channel(&mut self) {
        self.height_type = HeightType::River;
        self.height_value = 0.0;
        self.collidable = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_the_upper_band() {
        let settings = GeneratorSettings::default();
        assert_eq!(HeightType::classify(0.0, &settings), HeightType::DeepWater);
        assert_eq!(HeightType::classify(0.2, &settings), HeightType::ShallowWater);
        assert_eq!(HeightType::classify(0.55, &settings), HeightType::Grass);
        assert_eq!(HeightType::classify(0.9, &settings), HeightType::Snow);
        assert_eq!(HeightType::classify(1.0, &settings), HeightType::Snow);
        assert_eq!(HeatType::classify(0.04, &settings), HeatType::Coldest);
        assert_eq!(HeatType::classify(0.5, &settings), HeatType::Warm);
        assert_eq!(MoistureType::classify(0.95, &settings), MoistureType::Wettest);
        assert_eq!(MoistureType::classify(0.3, &settings), MoistureType::Dryer);
    }

    #[test]
    fn land_starts_at_sand() {
        assert!(!HeightType::ShallowWater.is_land());
        assert!(!HeightType::Shore.is_land());
        assert!(HeightType::Sand.is_land());
        assert!(HeightType::Snow.is_land());
        assert!(!HeightType::River.is_land());
    }

    #[test]
    fn moisture_is_clamped_and_reclassified() {
        let settings = GeneratorSettings::default();
        let mut tile = Tile::new(0, 0, 0.6, HeightType::Grass);
        tile.moisture_value = 0.85;
        tile.moisture_type = MoistureType::Wetter;
        tile.add_moisture(0.5, &settings);
        assert_eq!(tile.moisture_value, 1.0);
        assert_eq!(tile.moisture_type, MoistureType::Wettest);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(HeightType::from_code(0), None);
        assert_eq!(HeightType::from_code(9), Some(HeightType::River));
        assert_eq!(HeatType::from_code(6), None);
        assert_eq!(MoistureType::from_code(-1), None);
        assert_eq!(MoistureType::from_code(3), Some(MoistureType::Wet));
    }
}
