// src/province/extract.rs
//! Параллельное извлечение провинций
//!
//! Модель конкурентности — пакетно-синхронный пул фиксированного размера W:
//!
//! 1. Координатор последовательно занимает до W затравок: сканер владеет
//!    курсором и маской, каждая затравка тут же заливается меткой своего
//!    слота (slot + 1). Внутри пакета метки различны по построению, поэтому
//!    рабочие никогда не касаются одного пикселя.
//! 2. Пакет уходит в пул; каждый рабочий читает размеченную маску, строит
//!    сырую и дилатированную формы своей компоненты, берёт цвет в затравке
//!    и добавляет готовую запись в общий список под мьютексом.
//! 3. После присоединения всех рабочих координатор гасит пиксели пакета в
//!    фон — сканер не работает одновременно с пулом, так что это
//!    эквивалентно гашению внутри рабочего.
//!
//! Рабочие завершаются в произвольном порядке, поэтому после цикла список
//! сортируется по номеру: номера выданы при обходе и не зависят от W.

use std::io::Write as _;
use std::sync::Mutex;

use image::{GrayImage, RgbImage};
use rayon::prelude::*;

use crate::color::Color;
use crate::config::MapConfig;
use crate::error::MapError;
use crate::mask::{self, BitMask, Rect};
use crate::province::Province;
use crate::province::scan::MaskScanner;
use crate::raster;

/// Заявка на извлечение одной провинции внутри пакета.
struct SeedClaim {
    id: u32,
    position: (u32, u32),
    color: Color,
    label: u8,
    bounds: Rect,
}

/// Извлекает все провинции карты из бинаризованной маски.
///
/// Маска мутируется: к концу работы все пиксели погашены в фон.
/// Возвращённый список отсортирован по номеру; номера — непрерывный
/// диапазон 0..N-1.
pub fn extract_provinces(
    raster_img: &RgbImage,
    mask: &mut GrayImage,
    config: &MapConfig,
) -> Result<Vec<Province>, MapError> {
    let water_color = config
        .water_color
        .unwrap_or_else(|| raster::top_left_color(raster_img));
    let workers = config.worker_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let provinces = Mutex::new(Vec::new());
    let mut scanner = MaskScanner::new();
    let mut next_id = 0u32;

    loop {
        let mut batch = Vec::with_capacity(workers);
        for slot in 0..workers {
            let Some(position) = scanner.next_seed(mask) else {
                break;
            };
            let label = (slot + 1) as u8;
            let bounds = mask::flood_fill(mask, raster_img, position, label);
            batch.push(SeedClaim {
                id: next_id,
                position,
                color: raster::sample(raster_img, position),
                label,
                bounds,
            });
            next_id += 1;
        }
        if batch.is_empty() {
            break;
        }

        let shared: &GrayImage = mask;
        let raw_masks: Vec<BitMask> = pool.install(|| {
            batch
                .par_iter()
                .map(|claim| {
                    let raw = BitMask::from_labels(shared, claim.bounds, claim.label);
                    let province = finish_claim(shared, claim, &raw, water_color, config);
                    provinces.lock().unwrap().push(province);
                    raw
                })
                .collect()
        });

        for raw in &raw_masks {
            raw.clear_from(mask);
        }

        if config.verbose {
            print!("\rОбработка провинций ({next_id})");
            let _ = std::io::stdout().flush();
        }
    }

    if config.verbose && next_id > 0 {
        println!();
    }

    let mut provinces = provinces.into_inner().unwrap();
    provinces.sort_by_key(|p| p.id);
    debug_assert!(provinces.iter().enumerate().all(|(i, p)| p.id == i as u32));
    Ok(provinces)
}

/// Достраивает запись провинции по размеченной компоненте.
fn finish_claim(
    mask: &GrayImage,
    claim: &SeedClaim,
    raw: &BitMask,
    water_color: Color,
    config: &MapConfig,
) -> Province {
    let is_water = claim.color == water_color;
    // Исключённая вода остаётся в списке (номер и атрибуты ей нужны),
    // но без формы: она не проверяется ни против одной провинции
    let shape = if is_water && !config.include_water {
        None
    } else {
        Some(mask::dilate_component(mask, claim.bounds, claim.label))
    };

    Province {
        area: raw.count_ones(),
        is_water,
        shape,
        ..Province::new(claim.id, claim.color, claim.position)
    }
}
