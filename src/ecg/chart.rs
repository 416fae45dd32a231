use std::time::Duration;
use crate::ecg::config::ChartConfig;
use crate::ecg::grid::visible_boxes;
use crate::ecg::interaction::{ChartEvent, InteractionController, ZoomState};
use crate::ecg::leads::{rearrange, RearrangedLeadSet};
use crate::ecg::scale::{ChartGeometry, Scales};
use crate::ecg::scene::{RenderSurface, Scene};
use crate::ecg::source::{WaveformBuffer, WaveformSource};
use crate::ecg::transition::Transition;
use crate::ecg::StripError;

/// One mounted strip chart: the reordered leads, their scales, the zoom
/// state machine and the transition currently on screen.
pub struct StripChart {
    config: ChartConfig,
    leads: RearrangedLeadSet,
    scales: Option<Scales>,
    controller: InteractionController,
    transition: Option<Transition>,
}

impl StripChart {
    /// Chart with nothing to show.
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            leads: RearrangedLeadSet::default(),
            scales: None,
            controller: InteractionController::new(),
            transition: None,
        }
    }

    pub fn from_source<S: WaveformSource + ?Sized>(
        source: &mut S,
        config: ChartConfig,
    ) -> Result<Self, StripError> {
        let waveform = source.load()?;
        let mut chart = Self::new(config);
        chart.load(waveform.as_ref())?;
        Ok(chart)
    }

    /// Full re-render from a new recording. `None` leaves an empty chart.
    /// Malformed input is rejected and also leaves the chart empty.
    pub fn load(&mut self, waveform: Option<&WaveformBuffer>) -> Result<(), StripError> {
        self.leads = RearrangedLeadSet::default();
        self.scales = None;
        self.controller = InteractionController::new();
        self.transition = None;
        let Some(waveform) = waveform else {
            log::info!("no waveform supplied, chart left empty");
            return Ok(());
        };
        waveform.validate()?;
        self.leads = rearrange(waveform);
        self.scales = Scales::build(&self.leads, &self.config);
        log::info!("mounted leads {:?}", self.leads.names());
        Ok(())
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn lead_names(&self) -> Vec<&str> {
        self.leads.names()
    }

    pub fn geometry(&self) -> Option<ChartGeometry> {
        self.scales.as_ref().map(|s| s.geometry)
    }

    pub fn state(&self) -> ZoomState {
        self.controller.state()
    }

    pub fn time_domain(&self) -> Option<(f64, f64)> {
        self.scales.as_ref().map(|s| s.time.domain())
    }

    /// Where the animation currently is; equals `time_domain` once settled.
    pub fn displayed_time_domain(&self) -> Option<(f64, f64)> {
        match &self.transition {
            Some(t) => Some(t.current()),
            None => self.time_domain(),
        }
    }

    /// Small boxes across the displayed window.
    pub fn visible_boxes(&self) -> Option<f64> {
        self.displayed_time_domain().map(visible_boxes)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Feed one gesture. Returns whether anything needs redrawing.
    /// An empty chart ignores gestures.
    pub fn handle(&mut self, event: ChartEvent) -> Result<bool, StripError> {
        let displayed = self.displayed_time_domain();
        let Some(scales) = self.scales.as_mut() else {
            return Ok(false);
        };
        let Some(change) = self.controller.handle(scales, event)? else {
            return Ok(false);
        };
        // a new target supersedes whatever was still animating
        let from = displayed.unwrap_or(change.from);
        let duration = Duration::from_millis(self.config.transition_ms);
        let transition = Transition::new(from, change.to, duration);
        self.transition = (!transition.is_finished()).then_some(transition);
        Ok(true)
    }

    pub fn advance(&mut self, dt: Duration) {
        if let Some(t) = self.transition.as_mut() {
            t.advance(dt);
            if t.is_finished() {
                self.transition = None;
            }
        }
    }

    /// All drawable primitives for what is on screen right now.
    pub fn scene(&self) -> Scene {
        let Some(scales) = self.scales.as_ref() else {
            return Scene::empty();
        };
        match self.displayed_time_domain() {
            Some(domain) if domain != scales.time.domain() => {
                Scene::build(&self.leads, &scales.with_time_domain(domain), &self.config)
            }
            _ => Scene::build(&self.leads, scales, &self.config),
        }
    }

    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<(), StripError> {
        self.scene().paint(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecg::scene::SceneRecorder;
    use crate::ecg::source::{Channel, ManualSource};
    fn waveform(labels: &[&str], samples: usize) -> WaveformBuffer {
        WaveformBuffer {
            channels: labels
                .iter()
                .map(|l| Channel {
                    label: (*l).into(),
                    sample_rate: 250.0,
                })
                .collect(),
            buffer: labels
                .iter()
                .enumerate()
                .map(|(k, _)| (0..samples).map(|i| ((i + k) as f64 * 0.03).sin()).collect())
                .collect(),
        }
    }

    fn chart(labels: &[&str]) -> StripChart {
        let mut source = ManualSource::new(vec![waveform(labels, 1000)]);
        StripChart::from_source(&mut source, ChartConfig::default()).unwrap()
    }

    #[test]
    fn rendering_twice_gives_one_identical_root() {
        let chart = chart(&["V1", "II", "I"]);
        let mut surface = SceneRecorder::default();
        chart.render(&mut surface).unwrap();
        let first = surface.commands.clone();
        chart.render(&mut surface).unwrap();
        assert_eq!(surface.commands, first);
        assert_eq!(surface.polylines(), 3);
    }

    #[test]
    fn missing_input_renders_an_empty_root() {
        let mut source = ManualSource::new(Vec::new());
        let chart = StripChart::from_source(&mut source, ChartConfig::default()).unwrap();
        let mut surface = SceneRecorder::default();
        chart.render(&mut surface).unwrap();
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.polylines(), 0);
        assert!(chart.scene().is_empty());
    }

    #[test]
    fn unmatched_channels_render_nothing_and_ignore_gestures() {
        let mut chart = chart(&["Resp", "Pleth"]);
        assert!(chart.lead_names().is_empty());
        assert!(chart.scene().is_empty());
        assert!(!chart.handle(ChartEvent::DoubleClick).unwrap());
        assert!(!chart.handle(ChartEvent::BrushEnd(Some((0.0, 10.0)))).unwrap());
    }

    #[test]
    fn malformed_input_is_rejected() {
        let mut bad = waveform(&["I", "II"], 10);
        bad.buffer.pop();
        let mut chart = chart(&["I"]);
        let err = chart.load(Some(&bad)).unwrap_err();
        assert!(matches!(err, StripError::ChannelMismatch { .. }));
        assert!(chart.scene().is_empty());
    }

    #[test]
    fn leads_are_mounted_in_clinical_order() {
        let chart = chart(&["v2", "AVF", "i"]);
        assert_eq!(chart.lead_names(), vec!["I", "AVF", "V2"]);
        let scene = chart.scene();
        let names: Vec<&str> = scene.paths.iter().map(|p| p.lead.as_str()).collect();
        assert_eq!(names, vec!["I", "AVF", "V2"]);
    }

    #[test]
    fn brush_animates_then_double_click_restores() {
        let mut chart = chart(&["I", "II"]);
        let original = chart.time_domain().unwrap();
        assert!(chart.handle(ChartEvent::BrushEnd(Some((200.0, 400.0)))).unwrap());
        assert_eq!(chart.time_domain(), Some((1.0, 2.0)));
        assert_eq!(chart.displayed_time_domain(), Some(original));
        assert!(chart.is_animating());
        chart.advance(Duration::from_millis(1000));
        assert!(!chart.is_animating());
        assert_eq!(chart.displayed_time_domain(), Some((1.0, 2.0)));
        assert!(chart.handle(ChartEvent::DoubleClick).unwrap());
        chart.advance(Duration::from_millis(1000));
        assert_eq!(chart.time_domain(), Some(original));
        assert_eq!(chart.displayed_time_domain(), Some(original));
        assert_eq!(chart.state(), ZoomState::Overview);
    }

    #[test]
    fn degenerate_brush_keeps_paths_untouched() {
        let mut chart = chart(&["I", "II"]);
        chart.handle(ChartEvent::BrushEnd(Some((200.0, 400.0)))).unwrap();
        chart.advance(Duration::from_secs(2));
        let before = chart.scene();
        assert!(!chart.handle(ChartEvent::BrushEnd(None)).unwrap());
        assert!(!chart.handle(ChartEvent::BrushEnd(Some((50.0, 50.0)))).unwrap());
        assert_eq!(chart.scene(), before);
        assert_eq!(chart.time_domain(), Some((1.0, 2.0)));
    }

    #[test]
    fn new_gesture_starts_from_the_displayed_window() {
        let mut chart = chart(&["I"]);
        chart.handle(ChartEvent::BrushEnd(Some((200.0, 400.0)))).unwrap();
        chart.advance(Duration::from_millis(500));
        let midway = chart.displayed_time_domain().unwrap();
        chart.handle(ChartEvent::DoubleClick).unwrap();
        assert_eq!(chart.displayed_time_domain(), Some(midway));
        chart.advance(Duration::from_millis(1000));
        assert_eq!(chart.displayed_time_domain(), chart.time_domain());
    }

    #[test]
    fn geometry_does_not_change_while_zoomed() {
        let mut chart = chart(&["I", "II", "III"]);
        let before = chart.geometry();
        chart.handle(ChartEvent::ZoomIn("4".into())).unwrap();
        chart.advance(Duration::from_millis(300));
        assert_eq!(chart.geometry(), before);
        let scene = chart.scene();
        assert_eq!(scene.chart_width, before.unwrap().chart_width);
    }
}
