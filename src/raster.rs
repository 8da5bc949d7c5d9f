// src/raster.rs
use crate::color::Color;
use crate::error::MapError;
use image::RgbImage;
use std::path::Path;

/// Загружает цветной растр; отсутствие файла — фатальная ошибка,
/// идентифицирующая слой (`map`, `regions`, ...).
pub fn load_raster(path: &Path, layer: &'static str) -> Result<RgbImage, MapError> {
    let img = image::open(path).map_err(|source| MapError::MissingInputFile {
        layer,
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Цвет растра в точке.
#[must_use]
pub fn sample(raster: &RgbImage, position: (u32, u32)) -> Color {
    Color::from_pixel(*raster.get_pixel(position.0, position.1))
}

/// Автоопределение цвета воды: верхний левый пиксель основной карты.
#[must_use]
pub fn top_left_color(raster: &RgbImage) -> Color {
    sample(raster, (0, 0))
}
