// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod ecg;
mod gui;
use anyhow::Context;
use eframe::egui;
use ecg::{ChartConfig, JsonFileSource, StripChart, SyntheticEcg, SyntheticSource, WaveformSource};
// 配置文件路径从环境变量读取，缺省用内置参数
fn load_config() -> anyhow::Result<ChartConfig> {
    match std::env::var("ECG_STRIP_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading chart config {path}"))?;
            let config = ChartConfig::from_json(&text)
                .with_context(|| format!("parsing chart config {path}"))?;
            log::info!("chart config loaded from {path}");
            Ok(config)
        }
        Err(_) => Ok(ChartConfig::default()),
    }
}
// 命令行给了文件就读文件，否则生成一段 10 秒的合成心电
fn open_source() -> (Box<dyn WaveformSource>, String) {
    match std::env::args().nth(1) {
        Some(path) => {
            let name = format!("File: {path}");
            (Box::new(JsonFileSource::new(path)), name)
        }
        None => {
            let generator = SyntheticEcg::new(500.0, 72.0).with_noise(0.02, 7);
            (
                Box::new(SyntheticSource::new(generator, 10.0)),
                "Synthetic 12-lead, 72 bpm".to_owned(),
            )
        }
    }
}
fn build_chart() -> anyhow::Result<(StripChart, String)> {
    let config = load_config()?;
    let (mut source, name) = open_source();
    let chart = match StripChart::from_source(source.as_mut(), config.clone()) {
        Ok(chart) => chart,
        Err(e) => {
            // 数据坏了也要把窗口开起来，只是图是空的
            log::error!("failed to load waveform: {e}");
            StripChart::new(config)
        }
    };
    Ok((chart, name))
}
// 入口函数
fn main() -> eframe::Result<()> {
    env_logger::init();
    let (chart, name) = match build_chart() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{e:#}");
            (StripChart::new(ChartConfig::default()), "No data".to_owned())
        }
    };
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 860.0])
        .with_min_inner_size([640.0, 480.0])
        .with_title("ECG strip");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "ECG strip",
        options,
        Box::new(move |_cc| Box::new(gui::EcgViewerApp::new(chart, name))),
    )
}
