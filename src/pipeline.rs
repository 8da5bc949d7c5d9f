// src/pipeline.rs
//! Полный конвейер сканирования карты
//!
//! Карта → бинаризация → пакетное извлечение провинций → сортировка по
//! номеру → поиск соседей → выборка атрибутов из слоёв. Любая отсутствующая
//! обязательная карта прерывает запуск до начала зависимой фазы; частичных
//! результатов не бывает.

use crate::config::MapConfig;
use crate::error::MapError;
use crate::mask;
use crate::output;
use crate::province::adjacency::link_neighbours;
use crate::province::attributes::sample_layers;
use crate::province::extract::extract_provinces;
use crate::province::graph::build_province_graph;
use crate::province::Province;
use crate::raster;

/// Сканирует карту и возвращает готовый список провинций.
pub fn process_map(config: &MapConfig) -> Result<Vec<Province>, MapError> {
    let map_path = config.map_path();
    if config.verbose {
        println!("🔍 Чтение карты {}...", map_path.display());
    }
    let raster_img = raster::load_raster(&map_path, "map")?;

    if config.verbose {
        println!("Бинаризация ({}×{})...", raster_img.width(), raster_img.height());
    }
    let mut shared_mask = mask::binarize(&raster_img);

    let mut provinces = extract_provinces(&raster_img, &mut shared_mask, config)?;

    if config.verbose {
        println!("Поиск соседей ({} провинций)...", provinces.len());
    }
    link_neighbours(&mut provinces, config.max_distance);

    sample_layers(&mut provinces, raster_img.dimensions(), config)?;

    Ok(provinces)
}

/// Полный запуск: сканирование и запись результатов.
pub fn run(config: &MapConfig) -> Result<(), MapError> {
    let provinces = process_map(config)?;

    if config.verbose {
        println!("Запись результата в {}...", config.output.display());
    }
    output::write_map_data(&provinces, config)?;

    if let Some(json_path) = &config.json_output {
        output::write_json(&provinces, json_path)?;
    }

    if config.verbose {
        let graph = build_province_graph(&provinces);
        println!(
            "Готово: {} провинций, {} связей.",
            graph.node_count(),
            graph.edge_count()
        );
    }

    Ok(())
}
