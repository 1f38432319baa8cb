//! Ошибки конфигурации и загрузки сохранённых миров.

use thiserror::Error;

/// Ошибки конфигурации: обнаруживаются до начала выборки шума.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid map dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Threshold ladder '{ladder}' is not strictly ascending")]
    UnorderedLadder { ladder: &'static str },
    #[error("Threshold {value} in ladder '{ladder}' is outside [0, 1]")]
    ThresholdOutOfRange { ladder: &'static str, value: f32 },
    #[error("Channel '{channel}' has {octaves} octaves, expected 1..=32")]
    InvalidOctaves { channel: &'static str, octaves: u32 },
    #[error("Channel '{channel}' has invalid frequency {frequency}")]
    InvalidFrequency { channel: &'static str, frequency: f64 },
    #[error("Minimum river height {0} is outside [0, 1]")]
    InvalidRiverHeight(f32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Ошибки чтения сохранённого результата генерации.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected end of stream")]
    Truncated,
    #[error("Unknown map type code {0}")]
    UnknownMapType(i32),
    #[error("Invalid stored dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("Unknown {field} code {value} at tile ({x}, {y})")]
    UnknownVariant {
        field: &'static str,
        value: i32,
        x: u32,
        y: u32,
    },
    #[error("Non-finite {field} value at tile ({x}, {y})")]
    NonFiniteValue { field: &'static str, x: u32, y: u32 },
}
