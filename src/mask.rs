// src/mask.rs
//! Бинарная маска карты и формы провинций
//!
//! Этот модуль содержит всю пиксельную геометрию сканера:
//! - **Бинаризация**: цветная карта → маска переднего плана (255) и фона (0)
//! - **Заливка**: 8-связная BFS-разметка компоненты меткой 1..=254
//! - **Дилатация**: рост формы на один пиксель как допуск теста соседства
//! - **`BitMask`**: упакованная по битам форма, обрезанная по своему
//!   ограничивающему прямоугольнику
//!
//! Значение 255 зарезервировано за передним планом, 0 — за фоном, поэтому
//! меток для одновременной разметки внутри одного пакета не больше 254.

use bitvec::prelude::*;
use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Пиксель переднего плана в бинаризованной маске.
pub const FOREGROUND: u8 = 255;
/// Пиксель фона.
pub const BACKGROUND: u8 = 0;

/// 8-связная окрестность.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Минимальный ограничивающий прямоугольник в пиксельных координатах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Правая граница (исключительно).
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Нижняя граница (исключительно).
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Число пикселей; считается в `usize`, чтобы не переполниться на
    /// картах больше 4 гигапикселей.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Пересечение двух прямоугольников; `None`, если они не пересекаются.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if x < right && y < bottom {
            Some(Self::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Расширяет прямоугольник на `margin` пикселей в каждую сторону,
    /// обрезая по границам изображения `bounds_width × bounds_height`.
    #[must_use]
    pub fn pad(&self, margin: u32, bounds_width: u32, bounds_height: u32) -> Self {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        let right = (self.right() + margin).min(bounds_width);
        let bottom = (self.bottom() + margin).min(bounds_height);
        Self::new(x, y, right - x, bottom - y)
    }
}

/// Упакованная по битам форма провинции, обрезанная по `rect`
///
/// Хранит дилатированную форму только на время вычисления соседей;
/// координаты методов — абсолютные координаты исходной карты.
#[derive(Debug, Clone, PartialEq)]
pub struct BitMask {
    rect: Rect,
    bits: BitVec,
}

impl BitMask {
    /// Упаковывает пиксели `mask`, равные `label`, внутри `rect`.
    #[must_use]
    pub fn from_labels(mask: &GrayImage, rect: Rect, label: u8) -> Self {
        let mut bits = bitvec![0; rect.area()];
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if mask.get_pixel(x, y)[0] == label {
                    let idx = (y - rect.y) as usize * rect.width as usize + (x - rect.x) as usize;
                    bits.set(idx, true);
                }
            }
        }
        Self { rect, bits }
    }

    /// Упаковывает ненулевые пиксели фрагмента `sub` размером `rect.width × rect.height`,
    /// размещённого в абсолютных координатах `rect`.
    #[must_use]
    pub fn from_subimage(sub: &GrayImage, rect: Rect) -> Self {
        debug_assert_eq!(sub.dimensions(), (rect.width, rect.height));
        let mut bits = bitvec![0; rect.area()];
        for y in 0..rect.height {
            for x in 0..rect.width {
                if sub.get_pixel(x, y)[0] != BACKGROUND {
                    bits.set(y as usize * rect.width as usize + x as usize, true);
                }
            }
        }
        Self { rect, bits }
    }

    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Тест бита в абсолютных координатах карты; вне `rect` всегда `false`.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.rect.contains(x, y)
            && self.bits[(y - self.rect.y) as usize * self.rect.width as usize
                + (x - self.rect.x) as usize]
    }

    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Есть ли хотя бы один общий пиксель у двух форм.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.rect
            .intersect(&other.rect)
            .is_some_and(|window| self.overlaps_within(other, window))
    }

    /// Тест общего пикселя внутри заранее вычисленного окна пересечения.
    #[must_use]
    pub fn overlaps_within(&self, other: &Self, window: Rect) -> bool {
        for y in window.y..window.bottom() {
            for x in window.x..window.right() {
                if self.get(x, y) && other.get(x, y) {
                    return true;
                }
            }
        }
        false
    }

    /// Сбрасывает в фон все пиксели маски, отмеченные в форме.
    pub fn clear_from(&self, mask: &mut GrayImage) {
        for y in self.rect.y..self.rect.bottom() {
            for x in self.rect.x..self.rect.right() {
                if self.get(x, y) {
                    mask.put_pixel(x, y, Luma([BACKGROUND]));
                }
            }
        }
    }
}

/// Бинаризация основной карты: передний план там, где яркость ненулевая.
#[must_use]
pub fn binarize(raster: &RgbImage) -> GrayImage {
    let grey = image::imageops::grayscale(raster);
    imageproc::contrast::threshold(&grey, 0)
}

/// 8-связная заливка компоненты одного цвета от `seed`.
///
/// Заливаются пиксели переднего плана, чей цвет в `raster` совпадает с
/// цветом затравки: соприкасающиеся области разных цветов — разные
/// провинции. Все достижимые пиксели получают значение `label`;
/// возвращается ограничивающий прямоугольник залитой компоненты.
/// Вызывается только с затравкой на переднем плане — иное нарушение
/// инварианта сканера.
pub fn flood_fill(mask: &mut GrayImage, raster: &RgbImage, seed: (u32, u32), label: u8) -> Rect {
    let (width, height) = mask.dimensions();
    debug_assert_eq!(mask.dimensions(), raster.dimensions());
    debug_assert_eq!(mask.get_pixel(seed.0, seed.1)[0], FOREGROUND);
    debug_assert!(label != FOREGROUND && label != BACKGROUND);

    let seed_color = *raster.get_pixel(seed.0, seed.1);
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (seed.0, seed.1, seed.0, seed.1);
    let mut queue = VecDeque::new();
    mask.put_pixel(seed.0, seed.1, Luma([label]));
    queue.push_back((seed.0, seed.1));

    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in &NEIGHBOURS {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if mask.get_pixel(nx, ny)[0] == FOREGROUND && *raster.get_pixel(nx, ny) == seed_color {
                mask.put_pixel(nx, ny, Luma([label]));
                min_x = min_x.min(nx);
                min_y = min_y.min(ny);
                max_x = max_x.max(nx);
                max_y = max_y.max(ny);
                queue.push_back((nx, ny));
            }
        }
    }

    Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

/// Строит дилатированную форму компоненты с меткой `label`.
///
/// Сырая форма вычисляется по равенству метке внутри `bounds`, затем растёт
/// на один пиксель (допуск контакта для теста соседства) внутри рамки,
/// расширенной на пиксель и обрезанной по карте. Полученная рамка точно
/// ограничивает дилатированную форму: сырая форма по построению касается
/// всех сторон `bounds`.
#[must_use]
pub fn dilate_component(mask: &GrayImage, bounds: Rect, label: u8) -> BitMask {
    let (width, height) = mask.dimensions();
    let padded = bounds.pad(1, width, height);

    let mut sub = GrayImage::new(padded.width, padded.height);
    for y in bounds.y..bounds.bottom() {
        for x in bounds.x..bounds.right() {
            if mask.get_pixel(x, y)[0] == label {
                sub.put_pixel(x - padded.x, y - padded.y, Luma([FOREGROUND]));
            }
        }
    }

    let grown = imageproc::morphology::dilate(&sub, Norm::LInf, 1);
    BitMask::from_subimage(&grown, padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Сцена из текстовой схемы: `.` — чёрный фон, каждая буква — свой цвет.
    fn scene(rows: &[&str]) -> (GrayImage, RgbImage) {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let raster = RgbImage::from_fn(width, height, |x, y| {
            match rows[y as usize].as_bytes()[x as usize] {
                b'.' => Rgb([0, 0, 0]),
                cell => Rgb([cell, cell, 128]),
            }
        });
        let mask = binarize(&raster);
        (mask, raster)
    }

    #[test]
    fn binarize_keeps_any_nonblack_color() {
        let raster = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([0, 0, 0]),
            1 => Rgb([0, 0, 255]),
            _ => Rgb([40, 200, 10]),
        });
        let mask = binarize(&raster);
        assert_eq!(mask.get_pixel(0, 0)[0], BACKGROUND);
        assert_eq!(mask.get_pixel(1, 0)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(2, 0)[0], FOREGROUND);
    }

    #[test]
    fn flood_fill_is_eight_connected() {
        // Диагональная цепочка — одна компонента при 8-связности
        let (mut mask, raster) = scene(&["a..", ".a.", "..a"]);
        let bounds = flood_fill(&mut mask, &raster, (0, 0), 1);
        assert_eq!(bounds, Rect::new(0, 0, 3, 3));
        for (x, y) in [(0, 0), (1, 1), (2, 2)] {
            assert_eq!(mask.get_pixel(x, y)[0], 1);
        }
    }

    #[test]
    fn flood_fill_stops_at_background() {
        let (mut mask, raster) = scene(&["aa.aa", "aa.aa"]);
        let bounds = flood_fill(&mut mask, &raster, (0, 0), 7);
        assert_eq!(bounds, Rect::new(0, 0, 2, 2));
        // Правый блок не тронут
        assert_eq!(mask.get_pixel(3, 0)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(4, 1)[0], FOREGROUND);
    }

    #[test]
    fn flood_fill_respects_colour_boundaries() {
        // Соприкасающиеся области разных цветов — разные компоненты
        let (mut mask, raster) = scene(&["aab", "abb"]);
        let bounds = flood_fill(&mut mask, &raster, (0, 0), 1);
        assert_eq!(bounds, Rect::new(0, 0, 2, 2));
        assert_eq!(mask.get_pixel(0, 0)[0], 1);
        assert_eq!(mask.get_pixel(1, 0)[0], 1);
        assert_eq!(mask.get_pixel(0, 1)[0], 1);
        // Пиксель (1,1) цвета `b` касается залитой области, но не заливается
        assert_eq!(mask.get_pixel(1, 1)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(2, 0)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(2, 1)[0], FOREGROUND);
    }

    #[test]
    fn flood_fill_labels_are_disjoint() {
        let (mut mask, raster) = scene(&["aa.aa", "aa.aa"]);
        let left = flood_fill(&mut mask, &raster, (0, 0), 1);
        let right = flood_fill(&mut mask, &raster, (3, 0), 2);
        let a = BitMask::from_labels(&mask, left, 1);
        let b = BitMask::from_labels(&mask, right, 2);
        assert_eq!(a.count_ones(), 4);
        assert_eq!(b.count_ones(), 4);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn dilation_grows_one_pixel_and_clamps_to_image() {
        let (mut mask, raster) = scene(&["....", ".a..", "...."]);
        let bounds = flood_fill(&mut mask, &raster, (1, 1), 1);
        let shape = dilate_component(&mask, bounds, 1);
        assert_eq!(shape.rect(), Rect::new(0, 0, 3, 3));
        assert_eq!(shape.count_ones(), 9);
        assert!(shape.get(0, 0));
        assert!(shape.get(2, 2));
        assert!(!shape.get(3, 1));
    }

    #[test]
    fn overlap_requires_shared_pixel() {
        let (mut mask, raster) = scene(&["a.b"]);
        let left = flood_fill(&mut mask, &raster, (0, 0), 1);
        let right = flood_fill(&mut mask, &raster, (2, 0), 2);
        let a = BitMask::from_labels(&mask, left, 1);
        let b = BitMask::from_labels(&mask, right, 2);
        // Сырые формы разделены пикселем фона
        assert!(!a.overlaps(&b));
        // Дилатированные формы встречаются в зазоре
        let da = dilate_component(&mask, left, 1);
        let db = dilate_component(&mask, right, 2);
        assert!(da.overlaps(&db));
    }

    #[test]
    fn clear_from_resets_only_component_pixels() {
        let (mut mask, raster) = scene(&["aa.a"]);
        let bounds = flood_fill(&mut mask, &raster, (0, 0), 1);
        let raw = BitMask::from_labels(&mask, bounds, 1);
        raw.clear_from(&mut mask);
        assert_eq!(mask.get_pixel(0, 0)[0], BACKGROUND);
        assert_eq!(mask.get_pixel(1, 0)[0], BACKGROUND);
        assert_eq!(mask.get_pixel(3, 0)[0], FOREGROUND);
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 2, 4, 4);
        assert_eq!(a.intersect(&b), Some(Rect::new(2, 2, 2, 2)));
        let c = Rect::new(4, 0, 2, 2);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn rect_area_over_four_gigapixels() {
        // Произведение сторон не помещается в u32
        let huge = Rect::new(0, 0, u32::MAX, 2);
        assert_eq!(huge.area(), u32::MAX as usize * 2);
    }
}
