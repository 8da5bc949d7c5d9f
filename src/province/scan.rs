// src/province/scan.rs
use crate::mask::FOREGROUND;
use image::GrayImage;

/// Курсор построчного обхода общей маски
///
/// Выдаёт следующий пиксель переднего плана начиная с текущей позиции.
/// Продвигается только за выданный пиксель, а не за всю его компоненту:
/// гашение компоненты — дело извлекателя. Размеченные (1..=254) и уже
/// погашенные (0) пиксели никогда не выдаются, поэтому курсор безопасно
/// возобновляется между пакетами извлечения.
#[derive(Debug, Default)]
pub struct MaskScanner {
    cursor: usize,
}

impl MaskScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Следующий незанятый пиксель переднего плана или `None`, если их не осталось.
    pub fn next_seed(&mut self, mask: &GrayImage) -> Option<(u32, u32)> {
        let width = mask.width() as usize;
        let raw = mask.as_raw();
        while self.cursor < raw.len() {
            let index = self.cursor;
            self.cursor += 1;
            if raw[index] == FOREGROUND {
                return Some(((index % width) as u32, (index / width) as u32));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{binarize, flood_fill};
    use image::{Rgb, RgbImage};

    fn scene(rows: &[&str]) -> (GrayImage, RgbImage) {
        let raster = RgbImage::from_fn(rows[0].len() as u32, rows.len() as u32, |x, y| {
            match rows[y as usize].as_bytes()[x as usize] {
                b'.' => Rgb([0, 0, 0]),
                cell => Rgb([cell, cell, 128]),
            }
        });
        let mask = binarize(&raster);
        (mask, raster)
    }

    #[test]
    fn finds_seeds_in_row_major_order() {
        let (mask, _) = scene(&[".a.", "..a"]);
        let mut scanner = MaskScanner::new();
        assert_eq!(scanner.next_seed(&mask), Some((1, 0)));
        assert_eq!(scanner.next_seed(&mask), Some((2, 1)));
        assert_eq!(scanner.next_seed(&mask), None);
    }

    #[test]
    fn skips_labelled_pixels_after_interleaved_fill() {
        let (mut mask, raster) = scene(&["aa.a"]);
        let mut scanner = MaskScanner::new();
        let seed = scanner.next_seed(&mask).unwrap();
        assert_eq!(seed, (0, 0));
        // Разметка компоненты между вызовами сканера
        flood_fill(&mut mask, &raster, seed, 1);
        assert_eq!(scanner.next_seed(&mask), Some((3, 0)));
        assert_eq!(scanner.next_seed(&mask), None);
    }

    #[test]
    fn empty_mask_yields_nothing() {
        let (mask, _) = scene(&["...", "..."]);
        assert_eq!(MaskScanner::new().next_seed(&mask), None);
    }
}
