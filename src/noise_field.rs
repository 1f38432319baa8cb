//! Источники когерентного шума для каналов карты.
//!
//! Генератор работает с шумом как с чёрным ящиком: функция координат → скаляр.
//! Для зацикленной карты нужны 4D-выборки (тор вложен в 4D), для сферической: 3D.

use noise::{
    BasicMulti, Billow, Fbm, HybridMulti, MultiFractal, NoiseFn, OpenSimplex, Perlin,
    RidgedMulti, Seedable, Simplex, Value,
};

use crate::config::{BasisKind, FractalKind, GeneratorSettings};

/// Скалярное поле шума. Должно быть чистой функцией конфигурации и координат.
pub trait NoiseField: Send + Sync {
    fn sample3(&self, x: f64, y: f64, z: f64) -> f32;
    fn sample4(&self, x: f64, y: f64, z: f64, w: f64) -> f32;
}

/// Поле, возвращающее одно и то же значение во всех точках.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseField for ConstantNoise {
    fn sample3(&self, _x: f64, _y: f64, _z: f64) -> f32 {
        self.0
    }

    fn sample4(&self, _x: f64, _y: f64, _z: f64, _w: f64) -> f32 {
        self.0
    }
}

trait FractalSource: NoiseFn<f64, 3> + NoiseFn<f64, 4> + Send + Sync {}

impl<T> FractalSource for T where T: NoiseFn<f64, 3> + NoiseFn<f64, 4> + Send + Sync {}

/// Фрактальный шум из крейта `noise`: тип фрактала × базис × октавы × частота × сид.
pub struct FractalNoise {
    source: Box<dyn FractalSource>,
}

impl FractalNoise {
    #[must_use]
    pub fn new(
        fractal: FractalKind,
        basis: BasisKind,
        octaves: u32,
        frequency: f64,
        seed: u32,
    ) -> Self {
        let octaves = octaves as usize;
        let source = match basis {
            BasisKind::Perlin => build::<Perlin>(fractal, octaves, frequency, seed),
            BasisKind::Simplex => build::<Simplex>(fractal, octaves, frequency, seed),
            BasisKind::OpenSimplex => build::<OpenSimplex>(fractal, octaves, frequency, seed),
            BasisKind::Value => build::<Value>(fractal, octaves, frequency, seed),
        };
        Self { source }
    }
}

fn build<T>(fractal: FractalKind, octaves: usize, frequency: f64, seed: u32) -> Box<dyn FractalSource>
where
    T: Default + Seedable + NoiseFn<f64, 3> + NoiseFn<f64, 4> + Send + Sync + 'static,
{
    match fractal {
        FractalKind::Fbm => Box::new(
            Fbm::<T>::new(seed)
                .set_octaves(octaves)
                .set_frequency(frequency),
        ),
        FractalKind::Billow => Box::new(
            Billow::<T>::new(seed)
                .set_octaves(octaves)
                .set_frequency(frequency),
        ),
        FractalKind::BasicMulti => Box::new(
            BasicMulti::<T>::new(seed)
                .set_octaves(octaves)
                .set_frequency(frequency),
        ),
        FractalKind::HybridMulti => Box::new(
            HybridMulti::<T>::new(seed)
                .set_octaves(octaves)
                .set_frequency(frequency),
        ),
        FractalKind::RidgedMulti => Box::new(
            RidgedMulti::<T>::new(seed)
                .set_octaves(octaves)
                .set_frequency(frequency),
        ),
    }
}

impl NoiseField for FractalNoise {
    fn sample3(&self, x: f64, y: f64, z: f64) -> f32 {
        NoiseFn::<f64, 3>::get(&*self.source, [x, y, z]) as f32
    }

    fn sample4(&self, x: f64, y: f64, z: f64, w: f64) -> f32 {
        NoiseFn::<f64, 4>::get(&*self.source, [x, y, z, w]) as f32
    }
}

/// Сворачивает 64-битный сид в 32 бита шума: старшая половина тоже влияет.
#[must_use]
pub fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Набор полей шума по каналам карты.
pub struct ChannelNoise {
    pub height: Box<dyn NoiseField>,
    pub heat: Box<dyn NoiseField>,
    pub moisture: Box<dyn NoiseField>,
    pub cloud1: Box<dyn NoiseField>,
    pub cloud2: Box<dyn NoiseField>,
}

impl ChannelNoise {
    /// Строит фрактальные поля по настройкам. Все каналы используют общий сид,
    /// облака: `Billow` с фиксированными параметрами.
    #[must_use]
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let seed = noise_seed(settings.seed);
        let channel = |octaves, frequency| -> Box<dyn NoiseField> {
            Box::new(FractalNoise::new(
                settings.fractal,
                settings.basis,
                octaves,
                frequency,
                seed,
            ))
        };
        Self {
            height: channel(settings.terrain_octaves, settings.terrain_frequency),
            heat: channel(settings.heat_octaves, settings.heat_frequency),
            moisture: channel(settings.moisture_octaves, settings.moisture_frequency),
            cloud1: Box::new(FractalNoise::new(
                FractalKind::Billow,
                settings.basis,
                4,
                1.55,
                seed,
            )),
            cloud2: Box::new(FractalNoise::new(
                FractalKind::Billow,
                settings.basis,
                5,
                1.75,
                seed,
            )),
        }
    }

    /// Постоянные поля: заглушка для тестов и отладки.
    #[must_use]
    pub fn constant(height: f32, heat: f32, moisture: f32) -> Self {
        Self {
            height: Box::new(ConstantNoise(height)),
            heat: Box::new(ConstantNoise(heat)),
            moisture: Box::new(ConstantNoise(moisture)),
            cloud1: Box::new(ConstantNoise(0.0)),
            cloud2: Box::new(ConstantNoise(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractal_noise_is_deterministic_for_a_seed() {
        let a = FractalNoise::new(FractalKind::BasicMulti, BasisKind::Simplex, 6, 1.25, 42);
        let b = FractalNoise::new(FractalKind::BasicMulti, BasisKind::Simplex, 6, 1.25, 42);
        for i in 0..16 {
            let t = f64::from(i) * 0.173;
            assert_eq!(a.sample4(t, -t, t * 0.5, 1.0 - t), b.sample4(t, -t, t * 0.5, 1.0 - t));
            assert_eq!(a.sample3(t, t * 2.0, -t), b.sample3(t, t * 2.0, -t));
        }
    }

    #[test]
    fn every_fractal_and_basis_produces_finite_samples() {
        let fractals = [
            FractalKind::Fbm,
            FractalKind::Billow,
            FractalKind::BasicMulti,
            FractalKind::HybridMulti,
            FractalKind::RidgedMulti,
        ];
        let bases = [
            BasisKind::Perlin,
            BasisKind::Simplex,
            BasisKind::OpenSimplex,
            BasisKind::Value,
        ];
        for fractal in fractals {
            for basis in bases {
                let field = FractalNoise::new(fractal, basis, 4, 3.0, 7);
                assert!(field.sample3(0.3, 0.1, -0.4).is_finite());
                assert!(field.sample4(0.3, 0.1, -0.4, 0.2).is_finite());
            }
        }
    }

    #[test]
    fn upper_seed_bits_change_the_noise() {
        assert_eq!(noise_seed(42), 42);
        let low = 7u64;
        let high = low | (1 << 40);
        assert_ne!(noise_seed(low), noise_seed(high));

        let a = ChannelNoise::from_settings(&GeneratorSettings {
            seed: low,
            ..GeneratorSettings::default()
        });
        let b = ChannelNoise::from_settings(&GeneratorSettings {
            seed: high,
            ..GeneratorSettings::default()
        });
        let differs = (0..16).any(|i| {
            let t = f64::from(i) * 0.173;
            a.height.sample4(t, -t, t * 0.5, 1.0 - t) != b.height.sample4(t, -t, t * 0.5, 1.0 - t)
        });
        assert!(differs);
    }

    #[test]
    fn constant_noise_ignores_coordinates() {
        let field = ConstantNoise(0.55);
        assert_eq!(field.sample3(1.0, 2.0, 3.0), 0.55);
        assert_eq!(field.sample4(-1.0, 0.0, 9.0, 4.0), 0.55);
    }
}
