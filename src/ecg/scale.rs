use std::sync::Arc;
use crate::ecg::config::{lead_span_mv, ChartConfig, MAX_MV, MIN_MV, X_BOX_SECS, Y_BOX_MV};
use crate::ecg::leads::RearrangedLeadSet;

/// Affine map from a value domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Pixel size of the chart box, fixed for the lifetime of one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartGeometry {
    pub num_x_grids: usize,
    pub num_y_grids: usize,
    pub chart_width: f64,
    pub chart_height: f64,
    pub margin: f64,
}

impl ChartGeometry {
    pub fn total_width(&self) -> f64 {
        self.chart_width + 2.0 * self.margin
    }
    pub fn total_height(&self) -> f64 {
        self.chart_height + 2.0 * self.margin
    }
}

/// Smallest multiple of one small box that covers `max_time`.
pub fn time_domain_upper(max_time: f64) -> f64 {
    let boxes = max_time / X_BOX_SECS;
    // quotients such as 1.0 / 0.04 are not exact
    let snapped = if (boxes - boxes.round()).abs() < 1e-9 {
        boxes.round()
    } else {
        boxes.ceil()
    };
    X_BOX_SECS * snapped.max(1.0)
}

/// Voltage window holding `num_leads` stacked bands.
pub fn voltage_domain(num_leads: usize) -> (f64, f64) {
    (MIN_MV, MAX_MV + lead_span_mv() * num_leads as f64)
}

/// Baseline shift that lifts lead `index` into its own band.
pub fn vertical_offset(num_leads: usize, index: usize) -> f64 {
    num_leads.saturating_sub(index) as f64 * lead_span_mv()
}

fn boxes_in(span: f64, unit: f64) -> usize {
    (span / unit).round().max(0.0) as usize
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scales {
    pub time: LinearScale,
    pub voltage: LinearScale,
    pub geometry: ChartGeometry,
    /// `lead_times[lead][i]`: seconds since the first sample. Shared between
    /// copies that only differ in their time window.
    pub lead_times: Arc<Vec<Vec<f64>>>,
    full_time_domain: (f64, f64),
}

impl Scales {
    /// `None` when there is no lead to lay out.
    pub fn build(leads: &RearrangedLeadSet, config: &ChartConfig) -> Option<Self> {
        if leads.is_empty() {
            return None;
        }
        let lead_times: Vec<Vec<f64>> = leads
            .leads
            .iter()
            .map(|lead| {
                (0..lead.samples.len())
                    .map(|i| i as f64 / lead.sample_rate_hz)
                    .collect()
            })
            .collect();
        let max_time = lead_times
            .iter()
            .filter_map(|t| t.last().copied())
            .fold(0.0f64, f64::max);

        let time_domain = (0.0, time_domain_upper(max_time));
        let voltage_domain = voltage_domain(leads.len());
        let num_x_grids = boxes_in(time_domain.1 - time_domain.0, X_BOX_SECS);
        let num_y_grids = leads.len() * boxes_in(lead_span_mv(), Y_BOX_MV);
        let geometry = ChartGeometry {
            num_x_grids,
            num_y_grids,
            chart_width: num_x_grids as f64 * config.box_px,
            chart_height: num_y_grids as f64 * config.box_px,
            margin: config.margin_px,
        };
        log::debug!(
            "scales: {} leads, time {:?} s, voltage {:?} mV, {}x{} boxes",
            leads.len(),
            time_domain,
            voltage_domain,
            num_x_grids,
            num_y_grids
        );
        Some(Self {
            time: LinearScale::new(time_domain, (0.0, geometry.chart_width)),
            voltage: LinearScale::new(voltage_domain, (geometry.chart_height, 0.0)),
            geometry,
            lead_times: Arc::new(lead_times),
            full_time_domain: time_domain,
        })
    }

    pub fn full_time_domain(&self) -> (f64, f64) {
        self.full_time_domain
    }

    pub fn set_time_domain(&mut self, domain: (f64, f64)) {
        self.time.set_domain(domain);
    }

    /// Copy of these scales looking at a different time window.
    pub fn with_time_domain(&self, domain: (f64, f64)) -> Self {
        let mut scales = self.clone();
        scales.set_time_domain(domain);
        scales
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecg::leads::RearrangedLead;

    fn lead_set(count: usize, samples: usize, rate: f64) -> RearrangedLeadSet {
        RearrangedLeadSet {
            leads: (0..count)
                .map(|i| RearrangedLead {
                    name: format!("L{i}"),
                    sample_rate_hz: rate,
                    samples: vec![0.0; samples],
                })
                .collect(),
        }
    }

    #[test]
    fn time_domain_rounds_up_to_a_whole_box() {
        let scales = Scales::build(&lead_set(1, 1000, 250.0), &ChartConfig::default()).unwrap();
        assert_eq!(scales.time.domain(), (0.0, 4.0));
        assert_eq!(scales.geometry.num_x_grids, 100);
        assert_eq!(scales.geometry.chart_width, 800.0);
    }

    #[test]
    fn time_domain_upper_is_a_box_multiple() {
        for max_time in [0.001, 0.039, 0.041, 1.0, 2.5, 3.996, 9.98] {
            let upper = time_domain_upper(max_time);
            let boxes = upper / X_BOX_SECS;
            assert!((boxes - boxes.round()).abs() < 1e-9, "{max_time} -> {upper}");
            assert!(upper >= max_time);
            assert!(upper - max_time < X_BOX_SECS + 1e-12);
        }
        assert_eq!(time_domain_upper(0.0), X_BOX_SECS);
    }

    #[test]
    fn longest_lead_sets_the_time_domain() {
        let mut set = lead_set(2, 100, 250.0);
        set.leads[1].samples = vec![0.0; 1001];
        set.leads[1].sample_rate_hz = 500.0;
        let scales = Scales::build(&set, &ChartConfig::default()).unwrap();
        assert_eq!(scales.time.domain().1, 2.0);
        assert_eq!(scales.lead_times[1][1000], 2.0);
        assert_eq!(scales.lead_times[0][99], 99.0 / 250.0);
    }

    #[test]
    fn voltage_domain_grows_one_band_per_lead() {
        assert_eq!(voltage_domain(3), (-0.5, 11.5));
        let scales = Scales::build(&lead_set(3, 10, 250.0), &ChartConfig::default()).unwrap();
        assert_eq!(scales.voltage.domain(), (-0.5, 11.5));
        assert_eq!(scales.geometry.num_y_grids, 90);
        assert_eq!(scales.geometry.chart_height, 720.0);
        assert_eq!(scales.geometry.total_height(), 730.0);
    }

    #[test]
    fn voltage_axis_points_up() {
        let scales = Scales::build(&lead_set(1, 10, 250.0), &ChartConfig::default()).unwrap();
        let (bottom, top) = scales.voltage.domain();
        assert_eq!(scales.voltage.apply(bottom), scales.geometry.chart_height);
        assert_eq!(scales.voltage.apply(top), 0.0);
    }

    #[test]
    fn offsets_give_each_lead_its_own_band() {
        assert_eq!(vertical_offset(3, 0), 9.0);
        assert_eq!(vertical_offset(3, 1), 6.0);
        assert_eq!(vertical_offset(3, 2), 3.0);
    }

    #[test]
    fn invert_undoes_apply() {
        let scale = LinearScale::new((0.0, 4.0), (0.0, 800.0));
        assert_eq!(scale.apply(1.0), 200.0);
        assert_eq!(scale.invert(200.0), 1.0);
        assert_eq!(scale.invert(400.0), 2.0);
    }

    #[test]
    fn no_leads_no_scales() {
        assert!(Scales::build(&RearrangedLeadSet::default(), &ChartConfig::default()).is_none());
    }

    #[test]
    fn full_domain_survives_zooming() {
        let mut scales = Scales::build(&lead_set(1, 1000, 250.0), &ChartConfig::default()).unwrap();
        let full = scales.time.domain();
        scales.set_time_domain((1.0, 2.0));
        assert_eq!(scales.time.domain(), (1.0, 2.0));
        assert_eq!(scales.full_time_domain(), full);
        assert_eq!(scales.with_time_domain(full).time.domain(), full);
    }

    #[test]
    fn windowed_copies_share_sample_times() {
        let scales = Scales::build(&lead_set(2, 1000, 250.0), &ChartConfig::default()).unwrap();
        let zoomed = scales.with_time_domain((1.0, 2.0));
        assert!(Arc::ptr_eq(&scales.lead_times, &zoomed.lead_times));
        assert_eq!(zoomed.time.domain(), (1.0, 2.0));
        assert_eq!(scales.time.domain(), (0.0, 4.0));
    }
}
