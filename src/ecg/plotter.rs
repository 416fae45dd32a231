use crate::ecg::config::ChartConfig;
use crate::ecg::leads::RearrangedLeadSet;
use crate::ecg::scale::{vertical_offset, Scales};

/// Polyline of one lead in chart pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct LeadPath {
    pub lead: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeadLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Index range of `times` inside `[d0, d1]`, widened by one sample on each
/// side so the trace runs into the chart edge.
fn visible_span(times: &[f64], (d0, d1): (f64, f64)) -> std::ops::Range<usize> {
    let start = times.partition_point(|&t| t < d0).saturating_sub(1);
    let end = (times.partition_point(|&t| t <= d1) + 1).min(times.len());
    start..end.max(start)
}

fn edge_crossing(a: (f64, f64), b: (f64, f64), x: f64) -> (f64, f64) {
    (x, a.1 + (b.1 - a.1) * (x - a.0) / (b.0 - a.0))
}

/// Cut the outermost segments at the chart's left and right edges.
fn clip_ends(points: &mut [(f64, f64)], width: f64) {
    let n = points.len();
    if n < 2 {
        return;
    }
    if points[0].0 < 0.0 && points[1].0 > points[0].0 {
        points[0] = edge_crossing(points[0], points[1], 0.0);
    }
    if points[n - 1].0 > width && points[n - 1].0 > points[n - 2].0 {
        points[n - 1] = edge_crossing(points[n - 2], points[n - 1], width);
    }
}

/// Rebuilds every trace from the current time scale.
pub fn lead_paths(leads: &RearrangedLeadSet, scales: &Scales) -> Vec<LeadPath> {
    let count = leads.len();
    let domain = scales.time.domain();
    leads
        .leads
        .iter()
        .zip(scales.lead_times.iter())
        .enumerate()
        .map(|(index, (lead, times))| {
            let offset = vertical_offset(count, index);
            let mut points: Vec<(f64, f64)> = visible_span(times, domain)
                .map(|i| {
                    (
                        scales.time.apply(times[i]),
                        scales.voltage.apply(lead.samples[i] + offset),
                    )
                })
                .collect();
            clip_ends(&mut points, scales.geometry.chart_width);
            LeadPath {
                lead: lead.name.clone(),
                points,
            }
        })
        .collect()
}

pub fn lead_labels(leads: &RearrangedLeadSet, scales: &Scales, config: &ChartConfig) -> Vec<LeadLabel> {
    let count = leads.len();
    leads
        .leads
        .iter()
        .enumerate()
        .map(|(index, lead)| LeadLabel {
            text: format!("Lead {}", lead.name),
            x: config.margin_px,
            y: scales
                .voltage
                .apply(vertical_offset(count, index) + config.label_offset_mv),
        })
        .collect()
}
