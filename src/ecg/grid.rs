use crate::ecg::config::{ChartConfig, LARGE_BOX_EVERY, X_BOX_SECS};
use crate::ecg::scale::Scales;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A full-height or full-width line across the chart box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gridline {
    pub orientation: Orientation,
    /// x for vertical lines, y for horizontal ones (chart pixels).
    pub position: f64,
    pub index: i64,
    pub stroke_width: f64,
}

impl Gridline {
    /// Edge of a large box.
    pub fn is_major(&self) -> bool {
        self.index.rem_euclid(LARGE_BOX_EVERY) == 0
    }
}

/// Small boxes currently in view; fractional once the user has zoomed.
pub fn visible_boxes((d0, d1): (f64, f64)) -> f64 {
    (d1 - d0) / X_BOX_SECS
}

/// One line per multiple of a small box inside the time domain.
/// Indices count from t = 0 so large boxes stay on 0.2 s marks when zoomed.
pub fn vertical_lines(scales: &Scales, config: &ChartConfig) -> Vec<Gridline> {
    let (d0, d1) = scales.time.domain();
    if !(d1 > d0) {
        return Vec::new();
    }
    let first = (d0 / X_BOX_SECS - 1e-9).ceil() as i64;
    let last = (d1 / X_BOX_SECS + 1e-9).floor() as i64;
    (first..=last)
        .map(|k| Gridline {
            orientation: Orientation::Vertical,
            position: scales.time.apply(k as f64 * X_BOX_SECS),
            index: k,
            stroke_width: config.stroke_for(k),
        })
        .collect()
}

pub fn horizontal_lines(scales: &Scales, config: &ChartConfig) -> Vec<Gridline> {
    let count = scales.geometry.num_y_grids;
    if count == 0 {
        return Vec::new();
    }
    let (v0, v1) = scales.voltage.domain();
    let step = (v1 - v0) / count as f64;
    (0..=count as i64)
        .map(|j| Gridline {
            orientation: Orientation::Horizontal,
            position: scales.voltage.apply(v0 + j as f64 * step),
            index: j,
            stroke_width: config.stroke_for(j),
        })
        .collect()
}

/// Whole grid for the current domains. Call again after every rescale.
pub fn gridlines(scales: &Scales, config: &ChartConfig) -> Vec<Gridline> {
    let mut lines = vertical_lines(scales, config);
    lines.extend(horizontal_lines(scales, config));
    lines
}
