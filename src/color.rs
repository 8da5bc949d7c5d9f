// src/color.rs
//! Цвет-ключ в формате RGB
//!
//! Провинции и их атрибуты идентифицируются плоскими цветами ("#RRGGBB").
//! Сериализуется как hex-строка, чтобы конфигурационные и выходные файлы
//! оставались человекочитаемыми.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ошибка разбора hex-цвета
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("некорректный hex-цвет: `{0}` (ожидается формат #RRGGBB)")]
pub struct ParseColorError(pub String);

/// Цвет-ключ провинции или слоя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn from_pixel(pixel: image::Rgb<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// Разбирает строку вида `#RRGGBB` (регистр не важен, `#` необязателен).
    pub fn from_hex(text: &str) -> Result<Self, ParseColorError> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(text.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(text.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let color = Color::new(0x1a, 0x50, 0xff);
        assert_eq!(color.to_hex(), "#1A50FF");
        assert_eq!(Color::from_hex("#1A50FF").unwrap(), color);
        assert_eq!(Color::from_hex("1a50ff").unwrap(), color);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#12345G").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn serde_as_hex_string() {
        let color = Color::new(255, 0, 16);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#FF0010\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
