use clap::Parser;
use std::path::PathBuf;
use worldgen::{GeneratorSettings, LogProgress, MapType, WorldGenerator, WorldSummary, persist};

/// Генератор тайловых миров: высоты, климат, реки, биомы
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (без него: настройки по умолчанию)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Переопределить зерно генерации
    #[arg(short, long)]
    seed: Option<u64>,

    /// Переопределить топологию карты
    #[arg(short, long, value_enum)]
    map_type: Option<MapTypeArg>,

    /// Путь для сохранения мира в бинарном формате (по умолчанию: ./world.bin)
    #[arg(short, long, default_value = "world.bin")]
    output: PathBuf,

    /// Путь для JSON-сводки по миру
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum MapTypeArg {
    Wrapping,
    Spherical,
}

impl From<MapTypeArg> for MapType {
    fn from(arg: MapTypeArg) -> Self {
        match arg {
            MapTypeArg::Wrapping => MapType::Wrapping,
            MapTypeArg::Spherical => MapType::Spherical,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!("🔍 Загрузка конфигурации...");
    let mut settings = match &cli.config {
        Some(path) => GeneratorSettings::from_toml_file(path)?,
        None => GeneratorSettings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(map_type) = cli.map_type {
        settings.map_type = map_type.into();
    }

    println!(
        "Генерация мира (размер: {}×{}, зерно: {})...",
        settings.width, settings.height, settings.seed
    );
    let seed = settings.seed;
    let generator = WorldGenerator::new(settings)?;
    let world = generator.generate(&LogProgress);

    println!("Сохранение в {}", cli.output.display());
    persist::save_to_file(&world, &cli.output)?;

    let summary = WorldSummary::of(&world, seed);
    if let Some(path) = &cli.summary {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        println!("Сводка записана в {}", path.display());
    }

    println!(
        "\nГотово! Суша: {} групп, вода: {} групп, рек: {}.",
        summary.land_groups, summary.water_groups, summary.rivers
    );
    Ok(())
}
