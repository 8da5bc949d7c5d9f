pub mod color;
pub mod config;
pub mod error;
pub mod mask;
pub mod output;
pub mod pipeline;
pub mod province;
pub mod raster;

pub use color::Color;
pub use config::{ColorFormat, LayerToggles, MapConfig};
pub use error::MapError;
pub use pipeline::{process_map, run};
pub use province::Province;
