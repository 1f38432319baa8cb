//! Бинарное сохранение и загрузка результата генерации.
//!
//! Формат (little-endian, 4 байта на поле):
//!
//! ```text
//! MapType  Width  Height
//! для x в 0..Width, для y в 0..Height:
//!     HeightType HeightValue HeatType HeatValue MoistureType MoistureValue
//! ```
//!
//! Соседи, биомы, маски и группы не сохраняются: `load` строит их заново.
//! Реки тоже не сохраняются, от них остаются только тайлы-русла.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::biome::assign_biomes;
use crate::config::MapType;
use crate::error::LoadError;
use crate::regions::{flood_fill, update_biome_bitmasks, update_bitmasks};
use crate::tile::{HeatType, HeightType, MoistureType, Tile};
use crate::world::GenerationResult;

/// Пишет результат в поток.
pub fn save(world: &GenerationResult, mut writer: impl Write) -> io::Result<()> {
    writer.write_all(&world.map_type.code().to_le_bytes())?;
    writer.write_all(&(world.width as i32).to_le_bytes())?;
    writer.write_all(&(world.height as i32).to_le_bytes())?;

    for x in 0..world.width {
        for y in 0..world.height {
            let tile = world.tile(x, y);
            writer.write_all(&tile.height_type.code().to_le_bytes())?;
            writer.write_all(&tile.height_value.to_le_bytes())?;
            writer.write_all(&tile.heat_type.code().to_le_bytes())?;
            writer.write_all(&tile.heat_value.to_le_bytes())?;
            writer.write_all(&tile.moisture_type.code().to_le_bytes())?;
            writer.write_all(&tile.moisture_value.to_le_bytes())?;
        }
    }
    writer.flush()
}

pub fn save_to_file(world: &GenerationResult, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    save(world, BufWriter::new(file))
}

fn truncated(err: io::Error) -> LoadError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        LoadError::Truncated
    } else {
        LoadError::Io(err)
    }
}

fn read_i32(reader: &mut impl Read) -> Result<i32, LoadError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(truncated)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_f32(reader: &mut impl Read) -> Result<f32, LoadError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(truncated)?;
    Ok(f32::from_le_bytes(buf))
}

fn read_value(reader: &mut impl Read, field: &'static str, x: u32, y: u32) -> Result<f32, LoadError> {
    let value = read_f32(reader)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LoadError::NonFiniteValue { field, x, y })
    }
}

fn read_variant<T>(
    reader: &mut impl Read,
    field: &'static str,
    x: u32,
    y: u32,
    decode: impl Fn(i32) -> Option<T>,
) -> Result<T, LoadError> {
    let value = read_i32(reader)?;
    decode(value).ok_or(LoadError::UnknownVariant { field, value, x, y })
}

fn read_tile(reader: &mut impl Read, x: u32, y: u32) -> Result<Tile, LoadError> {
    let height_type = read_variant(reader, "HeightType", x, y, HeightType::from_code)?;
    let height_value = read_value(reader, "HeightValue", x, y)?;
    let heat_type = read_variant(reader, "HeatType", x, y, HeatType::from_code)?;
    let heat_value = read_value(reader, "HeatValue", x, y)?;
    let moisture_type = read_variant(reader, "MoistureType", x, y, MoistureType::from_code)?;
    let moisture_value = read_value(reader, "MoistureValue", x, y)?;

    let mut tile = Tile::new(x, y, height_value, height_type);
    tile.heat_type = heat_type;
    tile.heat_value = heat_value;
    tile.moisture_type = moisture_type;
    tile.moisture_value = moisture_value;
    Ok(tile)
}

/// Читает результат из потока и восстанавливает всё, что не сохраняется.
pub fn load(mut reader: impl Read) -> Result<GenerationResult, LoadError> {
    let code = read_i32(&mut reader)?;
    let map_type = MapType::from_code(code).ok_or(LoadError::UnknownMapType(code))?;
    let stored_width = read_i32(&mut reader)?;
    let stored_height = read_i32(&mut reader)?;

    let too_large = i64::from(stored_width) * i64::from(stored_height) > i64::from(u32::MAX);
    if stored_width <= 0 || stored_height <= 0 || too_large {
        return Err(LoadError::InvalidDimensions {
            width: stored_width,
            height: stored_height,
        });
    }
    let (width, height) = (stored_width as u32, stored_height as u32);

    // В потоке тайлы идут по столбцам, а в результате по строкам
    let mut tiles = Vec::new();
    for x in 0..width {
        for y in 0..height {
            tiles.push(read_tile(&mut reader, x, y)?);
        }
    }
    tiles.sort_unstable_by_key(|t| (t.y, t.x));

    let mut world = GenerationResult::from_tiles(map_type, width, height, tiles);
    assign_biomes(&mut world.tiles);
    update_bitmasks(&mut world);
    flood_fill(&mut world);
    update_biome_bitmasks(&mut world);

    log::info!("Загружен мир {width}x{height} ({map_type:?})");
    Ok(world)
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GenerationResult, LoadError> {
    let file = File::open(path)?;
    load(BufReader::new(file))
}
