// src/province/attributes.rs
//! Атрибуты провинций из слоёв-оверлеев
//!
//! Каждый включённый слой — отдельный растр того же размера, где цвет в
//! опорном пикселе провинции задаёт её атрибут (субрегион, регион, страну,
//! империю или континент). Сначала загружаются ВСЕ включённые слои: при
//! отсутствии любого из них ни один атрибут не присваивается, ошибка
//! называет конкретный слой. Сама выборка — чистая функция позиции и
//! содержимого растра, поэтому повторный прогон даёт тот же результат.

use image::RgbImage;

use crate::config::MapConfig;
use crate::error::MapError;
use crate::province::Province;
use crate::raster;

/// Слои-оверлеи с дополнительными цветовыми атрибутами.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Subregion,
    Region,
    Country,
    Empire,
    Continent,
}

impl Layer {
    pub const ALL: [Self; 5] = [
        Self::Subregion,
        Self::Region,
        Self::Country,
        Self::Empire,
        Self::Continent,
    ];

    /// Имя файла слоя в каталоге карт (без расширения).
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Subregion => "subregions",
            Self::Region => "regions",
            Self::Country => "countries",
            Self::Empire => "empires",
            Self::Continent => "continents",
        }
    }

    const fn enabled(self, config: &MapConfig) -> bool {
        match self {
            Self::Subregion => config.layers.subregions,
            Self::Region => config.layers.regions,
            Self::Country => config.layers.countries,
            Self::Empire => config.layers.empires,
            Self::Continent => config.layers.continents,
        }
    }
}

/// Присваивает атрибуты всех включённых слоёв всем провинциям.
///
/// `expected` — размер основной карты; слой другого размера отвергается.
pub fn sample_layers(
    provinces: &mut [Province],
    expected: (u32, u32),
    config: &MapConfig,
) -> Result<(), MapError> {
    // Сначала грузим всё: отсутствие слоя фатально до первого присваивания
    let mut loaded: Vec<(Layer, RgbImage)> = Vec::new();
    for layer in Layer::ALL {
        if !layer.enabled(config) {
            continue;
        }
        let path = config.raster_path(layer.file_stem());
        let img = raster::load_raster(&path, layer.file_stem())?;
        if img.dimensions() != expected {
            return Err(MapError::LayerSizeMismatch {
                layer: layer.file_stem(),
                expected_width: expected.0,
                expected_height: expected.1,
                actual_width: img.width(),
                actual_height: img.height(),
            });
        }
        loaded.push((layer, img));
    }

    for (layer, img) in &loaded {
        for province in provinces.iter_mut() {
            let color = Some(raster::sample(img, province.position));
            match layer {
                Layer::Subregion => province.subregion = color,
                Layer::Region => province.region = color,
                Layer::Country => province.country = color,
                Layer::Empire => province.empire = color,
                Layer::Continent => province.continent = color,
            }
        }
    }

    Ok(())
}
