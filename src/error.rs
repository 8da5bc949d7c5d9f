// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Ошибки сканирования карты
///
/// Отсутствие любого обязательного растра (основной карты или включённого
/// слоя) фатально и прерывает запуск целиком: частичных результатов нет.
#[derive(Debug, Error)]
pub enum MapError {
    /// Обязательный растр не удалось загрузить; `layer` указывает, какой именно.
    #[error("не удалось загрузить карту `{}` (слой `{layer}`): {source}", .path.display())]
    MissingInputFile {
        layer: &'static str,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Слой-оверлей обязан совпадать по размеру с основной картой.
    #[error(
        "слой `{layer}` имеет размер {actual_width}×{actual_height}, \
         ожидалось {expected_width}×{expected_height}"
    )]
    LayerSizeMismatch {
        layer: &'static str,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("не удалось прочитать конфигурацию `{}`: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("не удалось записать результат в `{}`: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("не удалось сериализовать провинции: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("не удалось создать пул потоков: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
