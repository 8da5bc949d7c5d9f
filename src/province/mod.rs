pub mod adjacency;
pub mod attributes;
pub mod extract;
pub mod graph;
pub mod scan;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::mask::{BitMask, Rect};

/// Одна максимальная связная область одного цвета на карте
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Province {
    /// Порядковый номер в порядке обхода карты; после финальной сортировки
    /// номера образуют непрерывный диапазон 0..N-1 и равны индексу в списке
    pub id: u32,
    /// Цвет-ключ, взятый в опорном пикселе
    pub color: Color,
    /// Опорный пиксель — первый пиксель компоненты в построчном обходе
    pub position: (u32, u32),
    /// Площадь сырой (недилатированной) компоненты в пикселях
    pub area: usize,
    /// Совпал ли цвет провинции с цветом воды
    pub is_water: bool,
    /// Дилатированная форма для теста соседства; `None` у исключённой воды —
    /// такая провинция не участвует в соседстве ни в одну сторону
    #[serde(skip)]
    pub shape: Option<BitMask>,
    /// Номера соседей; итерация всегда по возрастанию
    pub neighbours: BTreeSet<u32>,
    pub subregion: Option<Color>,
    pub region: Option<Color>,
    pub country: Option<Color>,
    pub empire: Option<Color>,
    pub continent: Option<Color>,
}

impl Province {
    #[must_use]
    pub fn new(id: u32, color: Color, position: (u32, u32)) -> Self {
        Self {
            id,
            color,
            position,
            area: 0,
            is_water: false,
            shape: None,
            neighbours: BTreeSet::new(),
            subregion: None,
            region: None,
            country: None,
            empire: None,
            continent: None,
        }
    }

    /// Рамка дилатированной формы; `None` у исключённой воды.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        self.shape.as_ref().map(BitMask::rect)
    }
}
