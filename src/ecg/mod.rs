// src/ecg/mod.rs
// 心电条图的核心：导联重排 -> 比例尺 -> 网格/波形 -> 交互
pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod interaction;
pub mod leads;
pub mod plotter;
pub mod scale;
pub mod scene;
pub mod source;
pub mod synth;
pub mod transition;
// 公开导出常用类型，方便 GUI 调用
pub use chart::StripChart;
pub use config::ChartConfig;
pub use error::StripError;
pub use export::{render_scene_png, ExportStyle};
pub use interaction::{ChartEvent, ZoomState};
pub use scene::{RenderSurface, TextRole};
pub use source::{JsonFileSource, SyntheticSource, WaveformSource};
pub use synth::SyntheticEcg;
