// src/province/adjacency.rs
//! Поиск соседей по пересечению дилатированных форм
//!
//! Для каждой неупорядоченной пары сначала дешёвые отсечения: необязательный
//! предел расстояния между опорными пикселями и непересечение рамок за O(1).
//! Только затем — попиксельный тест общего пикселя двух форм, совмещённых в
//! общей системе координат (итерация идёт по пересечению рамок: вне него
//! общих пикселей быть не может). Отношение симметрично и хранится
//! разреженно — упорядоченным множеством номеров у каждой провинции.

use crate::province::Province;

/// Заполняет множества соседей; провинции должны быть отсортированы по
/// номеру (id равен индексу — инвариант извлечения).
pub fn link_neighbours(provinces: &mut [Province], max_distance: Option<f64>) {
    let mut edges = Vec::new();

    for i in 0..provinces.len() {
        for j in 0..i {
            let a = &provinces[i];
            let b = &provinces[j];
            if let Some(limit) = max_distance {
                if seed_distance(a.position, b.position) > limit {
                    continue;
                }
            }
            // Исключённая вода (без формы) не участвует ни в одну сторону
            let (Some(shape_a), Some(shape_b)) = (&a.shape, &b.shape) else {
                continue;
            };
            let Some(window) = shape_a.rect().intersect(&shape_b.rect()) else {
                continue;
            };
            if shape_a.overlaps_within(shape_b, window) {
                edges.push((a.id, b.id));
            }
        }
    }

    for (a, b) in edges {
        provinces[a as usize].neighbours.insert(b);
        provinces[b as usize].neighbours.insert(a);
    }
}

fn seed_distance(a: (u32, u32), b: (u32, u32)) -> f64 {
    let dx = f64::from(a.0) - f64::from(b.0);
    let dy = f64::from(a.1) - f64::from(b.1);
    dx.hypot(dy)
}
