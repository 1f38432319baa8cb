//! Выборка шума по каналам карты.
//!
//! Работа делится по колонкам: каждая колонка (фиксированный `x`, все `y`)
//! заполняется одним потоком в собственный буфер. Общими остаются только
//! диапазоны каналов, которые сливаются атомарно после каждой колонки.

use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{GeneratorSettings, MapType};
use crate::noise_field::ChannelNoise;
use crate::progress::ProgressSink;
use crate::sample_grid::{Extent, SampleGrid, SharedExtent};
use crate::topology::SamplePoint;

/// Сырые каналы после выборки.
#[derive(Debug, Clone)]
pub struct Channels {
    pub height: SampleGrid,
    pub heat: SampleGrid,
    pub moisture: SampleGrid,
    /// Два слоя облаков, только для сферической карты
    pub clouds: Option<(SampleGrid, SampleGrid)>,
}

#[derive(Default)]
struct ChannelExtents {
    height: SharedExtent,
    heat: SharedExtent,
    moisture: SharedExtent,
    cloud1: SharedExtent,
    cloud2: SharedExtent,
}

struct Column {
    height: Vec<f32>,
    heat: Vec<f32>,
    moisture: Vec<f32>,
    cloud1: Vec<f32>,
    cloud2: Vec<f32>,
}

impl Column {
    fn with_capacity(len: usize, clouds: bool) -> Self {
        let cloud_len = if clouds { len } else { 0 };
        Self {
            height: Vec::with_capacity(len),
            heat: Vec::with_capacity(len),
            moisture: Vec::with_capacity(len),
            cloud1: Vec::with_capacity(cloud_len),
            cloud2: Vec::with_capacity(cloud_len),
        }
    }
}

/// Заполняет все каналы карты. Блокирует вызывающего до завершения всех колонок.
pub fn sample_channels(
    settings: &GeneratorSettings,
    noise: &ChannelNoise,
    progress: &dyn ProgressSink,
) -> Channels {
    let (width, height) = (settings.width, settings.height);
    let map_type = settings.map_type;
    let extents = ChannelExtents::default();
    let done = AtomicUsize::new(0);

    let process = |x: u32| {
        let column = sample_column(map_type, x, width, height, noise, &extents);
        let finished = done.fetch_add(1, Ordering::AcqRel) + 1;
        progress.progress(Some(finished as f32 / width as f32));
        column
    };

    let columns = run_columns(settings.multithreaded, width, process);
    progress.progress(None);

    let mut height_cols = Vec::with_capacity(columns.len());
    let mut heat_cols = Vec::with_capacity(columns.len());
    let mut moisture_cols = Vec::with_capacity(columns.len());
    let mut cloud1_cols = Vec::with_capacity(columns.len());
    let mut cloud2_cols = Vec::with_capacity(columns.len());
    for column in columns {
        height_cols.push(column.height);
        heat_cols.push(column.heat);
        moisture_cols.push(column.moisture);
        cloud1_cols.push(column.cloud1);
        cloud2_cols.push(column.cloud2);
    }

    let clouds = (map_type == MapType::Spherical).then(|| {
        (
            SampleGrid::from_columns(width, height, cloud1_cols, extents.cloud1.snapshot()),
            SampleGrid::from_columns(width, height, cloud2_cols, extents.cloud2.snapshot()),
        )
    });

    Channels {
        height: SampleGrid::from_columns(width, height, height_cols, extents.height.snapshot()),
        heat: SampleGrid::from_columns(width, height, heat_cols, extents.heat.snapshot()),
        moisture: SampleGrid::from_columns(
            width,
            height,
            moisture_cols,
            extents.moisture.snapshot(),
        ),
        clouds,
    }
}

#[cfg(feature = "parallel")]
fn run_columns<F>(parallel: bool, width: u32, process: F) -> Vec<Column>
where
    F: Fn(u32) -> Column + Sync + Send,
{
    if parallel {
        (0..width).into_par_iter().map(process).collect()
    } else {
        (0..width).map(process).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_columns<F>(_parallel: bool, width: u32, process: F) -> Vec<Column>
where
    F: Fn(u32) -> Column,
{
    (0..width).map(process).collect()
}

fn sample_column(
    map_type: MapType,
    x: u32,
    width: u32,
    height: u32,
    noise: &ChannelNoise,
    extents: &ChannelExtents,
) -> Column {
    let spherical = map_type == MapType::Spherical;
    let mut column = Column::with_capacity(height as usize, spherical);
    let mut local = [Extent::EMPTY; 5];

    for y in 0..height {
        let (h, heat, moisture) = match map_type.sample_point(x, y, width, height) {
            SamplePoint::Torus([nx, ny, nz, nw]) => {
                // Температура = фрактал × градиент вдоль оси ny, обрезанный до [0, 1]
                let gradient = ny.clamp(0.0, 1.0) as f32;
                (
                    noise.height.sample4(nx, ny, nz, nw),
                    noise.heat.sample4(nx, ny, nz, nw) * gradient,
                    noise.moisture.sample4(nx, ny, nz, nw),
                )
            }
            SamplePoint::Sphere {
                point: [px, py, pz],
                lon,
            } => {
                // Полюса холоднее независимо от шума
                let coldness = (lon.abs() / 90.0) as f32;
                let heat_bias = 1.0 - coldness;
                let c1 = noise.cloud1.sample3(px, py, pz);
                let c2 = noise.cloud2.sample3(px, py, pz);
                local[3].observe(c1);
                local[4].observe(c2);
                column.cloud1.push(c1);
                column.cloud2.push(c2);
                (
                    noise.height.sample3(px, py, pz),
                    noise.heat.sample3(px, py, pz) + heat_bias - coldness,
                    noise.moisture.sample3(px, py, pz),
                )
            }
        };

        local[0].observe(h);
        local[1].observe(heat);
        local[2].observe(moisture);
        column.height.push(h);
        column.heat.push(heat);
        column.moisture.push(moisture);
    }

    extents.height.merge(local[0]);
    extents.heat.merge(local[1]);
    extents.moisture.merge(local[2]);
    if spherical {
        extents.cloud1.merge(local[3]);
        extents.cloud2.merge(local[4]);
    }
    column
}
