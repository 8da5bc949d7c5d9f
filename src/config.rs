// src/config.rs
//! Конфигурация сканирования карты
//!
//! Этот модуль определяет все параметры, управляющие разбором карты:
//! - Расположение растров (каталог и расширение файлов)
//! - Цвет воды и участие водных провинций в соседстве
//! - Число рабочих потоков извлечения
//! - Состав выходных колонок и формат цветов
//!
//! Конфигурация неизменяема после построения и передаётся явно в каждый
//! компонент — глобального состояния нет. Все структуры поддерживают
//! сериализацию в TOML для файла флагов по умолчанию; флаги командной
//! строки перекрывают значения из файла по отдельности.

use crate::color::Color;
use crate::error::MapError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Формат цветов в текстовом выводе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#RRGGBB`
    #[default]
    Hex,
    /// Три числа `r g b`
    Rgb,
}

/// Включённые слои-оверлеи
///
/// Каждый слой — отдельный растр `<имя>.<расширение>` в каталоге карт,
/// совпадающий по размеру с основной картой.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayerToggles {
    #[serde(default)]
    pub subregions: bool,
    #[serde(default)]
    pub regions: bool,
    #[serde(default)]
    pub countries: bool,
    #[serde(default)]
    pub empires: bool,
    #[serde(default)]
    pub continents: bool,
}

/// Полная конфигурация одного запуска сканера
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Каталог с растрами карт (по умолчанию текущий)
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Расширение файлов карт без точки; пустая строка — файлы без расширения
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Число рабочих потоков извлечения (ограничивается 1..=254,
    /// поскольку метка компоненты должна помещаться в `u8`)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Максимальное расстояние между опорными пикселями кандидатов в соседи;
    /// `None` — без ограничения, соседство решает только геометрия
    #[serde(default)]
    pub max_distance: Option<f64>,

    /// Цвет воды; `None` — автоопределение по верхнему левому пикселю карты
    #[serde(default)]
    pub water_color: Option<Color>,

    /// Считать ли соседей водных провинций
    #[serde(default)]
    pub include_water: bool,

    /// Выводить ли цвет владельца провинции
    #[serde(default = "default_include_owner")]
    pub include_owner: bool,

    /// Выводить ли номер провинции первой колонкой
    #[serde(default)]
    pub numbering: bool,

    /// Слои-оверлеи (по умолчанию все выключены)
    #[serde(default)]
    pub layers: LayerToggles,

    /// Формат цветов в текстовом выводе
    #[serde(default)]
    pub color_format: ColorFormat,

    /// Файл текстового результата
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Необязательный экспорт провинций в JSON
    #[serde(default)]
    pub json_output: Option<PathBuf>,

    /// Подробный вывод хода работы
    #[serde(default)]
    pub verbose: bool,
}

fn default_path() -> PathBuf {
    PathBuf::from(".")
}
fn default_file_extension() -> String {
    "png".to_string()
}
fn default_workers() -> usize {
    8
}
fn default_include_owner() -> bool {
    true
}
fn default_output() -> PathBuf {
    PathBuf::from("map_data.txt")
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            file_extension: default_file_extension(),
            workers: default_workers(),
            max_distance: None,
            water_color: None,
            include_water: false,
            include_owner: true,
            numbering: false,
            layers: LayerToggles::default(),
            color_format: ColorFormat::Hex,
            output: default_output(),
            json_output: None,
            verbose: false,
        }
    }
}

impl MapConfig {
    /// Загружает конфигурацию из TOML-файла
    ///
    /// Отсутствующие поля получают значения по умолчанию.
    ///
    /// # Пример
    /// ```toml
    /// # mapscan.toml
    /// path = "maps"
    /// workers = 4
    /// water_color = "#1A50FF"
    ///
    /// [layers]
    /// regions = true
    /// ```
    pub fn from_toml_file(path: &Path) -> Result<Self, MapError> {
        let contents = fs::read_to_string(path).map_err(|e| MapError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| MapError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Путь растра с именем `stem` в каталоге карт.
    #[must_use]
    pub fn raster_path(&self, stem: &str) -> PathBuf {
        if self.file_extension.is_empty() {
            self.path.join(stem)
        } else {
            self.path.join(format!("{stem}.{}", self.file_extension))
        }
    }

    /// Путь основной карты (`map.<расширение>`).
    #[must_use]
    pub fn map_path(&self) -> PathBuf {
        self.raster_path("map")
    }

    /// Размер пула потоков с учётом ограничения меток.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.clamp(1, 254)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "path = \"maps\"\nworkers = 3\nwater_color = \"#0000FF\"\n\n[layers]\nregions = true\n"
        )
        .unwrap();
        let config = MapConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.path, PathBuf::from("maps"));
        assert_eq!(config.workers, 3);
        assert_eq!(config.water_color, Some(Color::new(0, 0, 255)));
        assert!(config.layers.regions);
        assert!(!config.layers.continents);
        assert!(config.include_owner);
        assert_eq!(config.color_format, ColorFormat::Hex);
        assert_eq!(config.output, PathBuf::from("map_data.txt"));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = MapConfig::from_toml_file(Path::new("no_such_dir/flags.toml")).unwrap_err();
        assert!(matches!(err, MapError::Config { .. }));
    }

    #[test]
    fn raster_paths_respect_extension() {
        let mut config = MapConfig {
            path: PathBuf::from("maps"),
            ..MapConfig::default()
        };
        assert_eq!(config.map_path(), PathBuf::from("maps/map.png"));
        config.file_extension = String::new();
        assert_eq!(config.raster_path("regions"), PathBuf::from("maps/regions"));
    }

    #[test]
    fn worker_count_is_clamped_to_label_range() {
        let mut config = MapConfig {
            workers: 0,
            ..MapConfig::default()
        };
        assert_eq!(config.worker_count(), 1);
        config.workers = 10_000;
        assert_eq!(config.worker_count(), 254);
    }
}
