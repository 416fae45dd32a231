use crate::ecg::config::MIN_WINDOW_SECS;
use crate::ecg::scale::Scales;
use crate::ecg::StripError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZoomState {
    /// Whole recording in view.
    #[default]
    Overview,
    Zoomed,
}

/// Gestures and toolbar actions the host forwards to the chart.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
    /// Horizontal brush released; pixel extent along the chart box, `None`
    /// when the brush was cleared without a selection.
    BrushEnd(Option<(f64, f64)>),
    DoubleClick,
    /// Toolbar zoom with a decimal multiplier, e.g. `"2"` or `"1.5"`.
    ZoomIn(String),
    ZoomOut(String),
}

/// The time domain moved from `from` to `to`; the host animates between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainChange {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

pub fn parse_zoom_factor(raw: &str) -> Result<f64, StripError> {
    let factor: f64 = raw
        .trim()
        .parse()
        .map_err(|_| StripError::InvalidZoomFactor(raw.to_owned()))?;
    if !factor.is_finite() || factor <= 1.0 {
        return Err(StripError::InvalidZoomFactor(raw.to_owned()));
    }
    Ok(factor)
}

/// Overview/Zoomed state machine. Every transition rewrites the time scale
/// it is handed; nothing else is touched.
///
/// Brushes invert through the *current* scale, so brushing while zoomed
/// narrows the view further instead of starting over from the overview.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: ZoomState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    pub fn handle(
        &mut self,
        scales: &mut Scales,
        event: ChartEvent,
    ) -> Result<Option<DomainChange>, StripError> {
        match event {
            ChartEvent::BrushEnd(selection) => Ok(self.brush(scales, selection)),
            ChartEvent::DoubleClick => Ok(Some(self.reset(scales))),
            ChartEvent::ZoomIn(factor) => {
                let factor = parse_zoom_factor(&factor)?;
                Ok(Some(self.zoom_in(scales, factor)))
            }
            ChartEvent::ZoomOut(factor) => {
                let factor = parse_zoom_factor(&factor)?;
                Ok(Some(self.zoom_out(scales, factor)))
            }
        }
    }

    fn brush(&mut self, scales: &mut Scales, selection: Option<(f64, f64)>) -> Option<DomainChange> {
        let (x0, x1) = selection?;
        if !x0.is_finite() || !x1.is_finite() {
            log::warn!("ignoring brush with non-finite extent ({x0}, {x1})");
            return None;
        }
        let width = scales.geometry.chart_width;
        let left = x0.min(x1).clamp(0.0, width);
        let right = x0.max(x1).clamp(0.0, width);
        if right <= left {
            log::debug!("ignoring empty brush at {left}px");
            return None;
        }
        let from = scales.time.domain();
        let to = (scales.time.invert(left), scales.time.invert(right));
        if !(to.1 - to.0 >= MIN_WINDOW_SECS) {
            log::debug!("ignoring brush narrower than {MIN_WINDOW_SECS}s: {to:?}");
            return None;
        }
        Some(self.apply(scales, from, to, ZoomState::Zoomed))
    }

    fn reset(&mut self, scales: &mut Scales) -> DomainChange {
        let from = scales.time.domain();
        let to = scales.full_time_domain();
        self.apply(scales, from, to, ZoomState::Overview)
    }

    fn zoom_in(&mut self, scales: &mut Scales, factor: f64) -> DomainChange {
        let from = scales.time.domain();
        let center = (from.0 + from.1) / 2.0;
        let half = ((from.1 - from.0) / 2.0 / factor).max(MIN_WINDOW_SECS / 2.0);
        self.apply(scales, from, (center - half, center + half), ZoomState::Zoomed)
    }

    fn zoom_out(&mut self, scales: &mut Scales, factor: f64) -> DomainChange {
        let from = scales.time.domain();
        let full = scales.full_time_domain();
        let half = ((from.1 - from.0) / 2.0 * factor).max(MIN_WINDOW_SECS / 2.0);
        if 2.0 * half >= full.1 - full.0 {
            return self.apply(scales, from, full, ZoomState::Overview);
        }
        let center = (from.0 + from.1) / 2.0;
        let (mut lo, mut hi) = (center - half, center + half);
        if lo < full.0 {
            hi += full.0 - lo;
            lo = full.0;
        }
        if hi > full.1 {
            lo -= hi - full.1;
            hi = full.1;
        }
        self.apply(scales, from, (lo, hi), ZoomState::Zoomed)
    }

    fn apply(
        &mut self,
        scales: &mut Scales,
        from: (f64, f64),
        to: (f64, f64),
        state: ZoomState,
    ) -> DomainChange {
        scales.set_time_domain(to);
        if self.state != state {
            log::info!("{:?} -> {:?}", self.state, state);
        }
        self.state = state;
        log::debug!("time domain {:?} -> {:?}", from, to);
        DomainChange { from, to }
    }
}
