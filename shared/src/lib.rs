pub mod classify;
pub mod colors;
pub mod dataset;
pub mod kpi;
pub mod legend;
pub mod map_config;
pub mod province;
pub mod selection;
pub mod summary;

pub use classify::{ColorMode, MarkerColor, MarkerStyle};
pub use colors::Tone;
pub use dataset::Dataset;
pub use kpi::{KpiRecord, KpiStatus, StatusCounts};
pub use map_config::MapConfig;
pub use province::*;
pub use selection::{Camera, CameraCommand, CameraSink, InteractionController, MapEvent};
