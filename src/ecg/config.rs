use serde::{Deserialize, Serialize};

/// One small box along the time axis, in seconds.
pub const X_BOX_SECS: f64 = 0.04;
/// One small box along the voltage axis, in millivolts.
pub const Y_BOX_MV: f64 = 0.1;
/// Lower edge of a single lead's band.
pub const MIN_MV: f64 = -0.5;
/// Upper edge of a single lead's band.
pub const MAX_MV: f64 = 2.5;
/// Every n-th gridline closes a large box.
pub const LARGE_BOX_EVERY: i64 = 5;
/// Narrowest time window a zoom may reach, in seconds.
pub const MIN_WINDOW_SECS: f64 = 1e-4;

/// Height of one lead's band: 3.0 mV, i.e. 30 small boxes.
pub fn lead_span_mv() -> f64 {
    MIN_MV.abs() + MAX_MV
}

/// Presentation settings. Clinical units stay fixed; only their pixel
/// rendering is configurable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Pixels per small box, both axes.
    pub box_px: f64,
    pub margin_px: f64,
    pub minor_stroke_px: f64,
    pub major_stroke_px: f64,
    pub transition_ms: u64,
    /// Label baseline, in mV above the lead's own zero line.
    pub label_offset_mv: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            box_px: 8.0,
            margin_px: 5.0,
            minor_stroke_px: 0.3,
            major_stroke_px: 0.8,
            transition_ms: 1000,
            label_offset_mv: 1.5,
        }
    }
}

impl ChartConfig {
    pub fn from_json(text: &str) -> Result<Self, crate::ecg::StripError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn stroke_for(&self, index: i64) -> f64 {
        if index.rem_euclid(LARGE_BOX_EVERY) == 0 {
            self.major_stroke_px
        } else {
            self.minor_stroke_px
        }
    }
}
