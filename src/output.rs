// src/output.rs
//! Запись результатов сканирования
//!
//! Текстовая таблица — по строке на провинцию: необязательный номер,
//! необязательный цвет владельца, позиция, цвета включённых слоёв и номера
//! соседей по возрастанию. Дополнительно провинции можно выгрузить в JSON
//! вместе с ограничивающими рамками.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::color::Color;
use crate::config::{ColorFormat, MapConfig};
use crate::error::MapError;
use crate::mask::Rect;
use crate::province::Province;

fn push_color(line: &mut String, color: Color, format: ColorFormat) {
    match format {
        ColorFormat::Hex => {
            let _ = write!(line, "{} ", color.to_hex());
        }
        ColorFormat::Rgb => {
            let _ = write!(line, "{} {} {} ", color.r, color.g, color.b);
        }
    }
}

/// Формирует текстовую таблицу провинций согласно конфигурации.
#[must_use]
pub fn format_provinces(provinces: &[Province], config: &MapConfig) -> String {
    let mut out = String::new();
    for province in provinces {
        if config.numbering {
            let _ = write!(out, "{} ", province.id);
        }
        if config.include_owner {
            push_color(&mut out, province.color, config.color_format);
        }
        let _ = write!(out, "{} {} ", province.position.0, province.position.1);
        for attribute in [
            province.subregion,
            province.region,
            province.country,
            province.empire,
            province.continent,
        ]
        .into_iter()
        .flatten()
        {
            push_color(&mut out, attribute, config.color_format);
        }
        for neighbour in &province.neighbours {
            let _ = write!(out, "{neighbour} ");
        }
        out.push('\n');
    }
    out
}

/// Записывает текстовую таблицу в файл из конфигурации.
pub fn write_map_data(provinces: &[Province], config: &MapConfig) -> Result<(), MapError> {
    fs::write(&config.output, format_provinces(provinces, config)).map_err(|source| {
        MapError::Output {
            path: config.output.clone(),
            source,
        }
    })
}

/// Запись провинции в JSON-экспорте.
#[derive(Serialize)]
struct ProvinceRecord<'a> {
    id: u32,
    color: Color,
    position: (u32, u32),
    area: usize,
    is_water: bool,
    bounding_box: Option<Rect>,
    neighbours: &'a std::collections::BTreeSet<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subregion: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    empire: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    continent: Option<Color>,
}

impl<'a> From<&'a Province> for ProvinceRecord<'a> {
    fn from(p: &'a Province) -> Self {
        Self {
            id: p.id,
            color: p.color,
            position: p.position,
            area: p.area,
            is_water: p.is_water,
            bounding_box: p.bounding_box(),
            neighbours: &p.neighbours,
            subregion: p.subregion,
            region: p.region,
            country: p.country,
            empire: p.empire,
            continent: p.continent,
        }
    }
}

/// Выгружает провинции в JSON.
pub fn write_json(provinces: &[Province], path: &Path) -> Result<(), MapError> {
    let records: Vec<ProvinceRecord<'_>> = provinces.iter().map(ProvinceRecord::from).collect();
    let text = serde_json::to_string_pretty(&records)?;
    fs::write(path, text).map_err(|source| MapError::Output {
        path: path.to_path_buf(),
        source,
    })
}
