use crate::ecg::config::{LARGE_BOX_EVERY, X_BOX_SECS};
use crate::ecg::scale::Scales;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub x: f64,
    pub label: String,
}

/// Time-axis ticks: one per large box, or one per small box once fewer
/// than two large boxes remain in view.
pub fn time_ticks(scales: &Scales) -> Vec<AxisTick> {
    let (d0, d1) = scales.time.domain();
    if !(d1 > d0) {
        return Vec::new();
    }
    let large = X_BOX_SECS * LARGE_BOX_EVERY as f64;
    let (step, decimals) = if (d1 - d0) / large >= 2.0 {
        (large, 1)
    } else {
        (X_BOX_SECS, 2)
    };
    let first = (d0 / step - 1e-9).ceil() as i64;
    let last = (d1 / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|k| {
            let seconds = k as f64 * step;
            AxisTick {
                x: scales.time.apply(seconds),
                label: format!("{seconds:.decimals$}s"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecg::config::ChartConfig;
    use crate::ecg::leads::{RearrangedLead, RearrangedLeadSet};

    fn scales() -> Scales {
        let set = RearrangedLeadSet {
            leads: vec![RearrangedLead {
                name: "II".into(),
                sample_rate_hz: 250.0,
                samples: vec![0.0; 1000],
            }],
        };
        Scales::build(&set, &ChartConfig::default()).unwrap()
    }

    #[test]
    fn overview_ticks_every_large_box() {
        let ticks = time_ticks(&scales());
        assert_eq!(ticks.len(), 21);
        assert_eq!(ticks[0].label, "0.0s");
        assert_eq!(ticks[5].label, "1.0s");
        assert!((ticks[20].x - 800.0).abs() < 1e-9);
    }

    #[test]
    fn narrow_zoom_falls_back_to_small_boxes() {
        let mut s = scales();
        s.set_time_domain((1.0, 1.3));
        let ticks = time_ticks(&s);
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("1.00s"));
        assert_eq!(ticks.len(), 8);
    }
}
