use clap::Parser;
use mapscan::{Color, ColorFormat, MapConfig};
use std::path::PathBuf;

/// Сканер провинций для карт Chronicles of Realms
///
/// Читает цветовую карту провинций, находит связные области одного цвета и
/// вычисляет их соседство; по желанию добавляет атрибуты из слоёв-оверлеев.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к файлу флагов по умолчанию в формате TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Каталог с растрами карт
    #[arg(long)]
    path: Option<PathBuf>,

    /// Расширение файлов карт, например png или jpg (пустая строка — без расширения)
    #[arg(long)]
    file_extension: Option<String>,

    /// Число рабочих потоков извлечения
    #[arg(short, long)]
    workers: Option<usize>,

    /// Максимальное расстояние между опорными пикселями кандидатов в соседи
    #[arg(long)]
    max_distance: Option<f64>,

    /// Цвет воды, например "#1A50FF"; по умолчанию — верхний левый пиксель карты
    #[arg(long)]
    water_color: Option<Color>,

    /// Считать соседей водных провинций
    #[arg(long)]
    include_water: bool,

    /// Не выводить цвет владельца провинции
    #[arg(long)]
    exclude_owner: bool,

    /// Выводить номер провинции первой колонкой
    #[arg(long)]
    numbering: bool,

    /// Включить слой субрегионов (subregions.<расширение>)
    #[arg(long)]
    subregions: bool,

    /// Включить слой регионов (regions.<расширение>)
    #[arg(long)]
    regions: bool,

    /// Включить слой стран (countries.<расширение>)
    #[arg(long)]
    countries: bool,

    /// Включить слой империй (empires.<расширение>)
    #[arg(long)]
    empires: bool,

    /// Включить слой континентов (continents.<расширение>)
    #[arg(long)]
    continents: bool,

    /// Выводить цвета тройками чисел вместо hex
    #[arg(long)]
    use_rgb: bool,

    /// Файл текстового результата (по умолчанию map_data.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Дополнительно выгрузить провинции в JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Подробный вывод хода работы
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Накладывает флаги командной строки поверх файла флагов по умолчанию.
    fn into_config(self) -> Result<MapConfig, mapscan::MapError> {
        let mut config = match &self.config {
            Some(path) => MapConfig::from_toml_file(path)?,
            None => MapConfig::default(),
        };
        if let Some(path) = self.path {
            config.path = path;
        }
        if let Some(ext) = self.file_extension {
            config.file_extension = ext;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(distance) = self.max_distance {
            config.max_distance = Some(distance);
        }
        if let Some(water) = self.water_color {
            config.water_color = Some(water);
        }
        if self.include_water {
            config.include_water = true;
        }
        if self.exclude_owner {
            config.include_owner = false;
        }
        if self.numbering {
            config.numbering = true;
        }
        config.layers.subregions |= self.subregions;
        config.layers.regions |= self.regions;
        config.layers.countries |= self.countries;
        config.layers.empires |= self.empires;
        config.layers.continents |= self.continents;
        if self.use_rgb {
            config.color_format = ColorFormat::Rgb;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(json) = self.json {
            config.json_output = Some(json);
        }
        if self.verbose {
            config.verbose = true;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;
    mapscan::run(&config)?;
    Ok(())
}
