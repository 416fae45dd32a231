//! Everything one frame of the strip chart needs, as plain data.
//!
//! A [`Scene`] is rebuilt from scratch whenever the time domain changes and is
//! handed to a [`RenderSurface`], the only thing that knows about pixels on a
//! real screen or bitmap. Painting always starts with `clear`, so painting the
//! same scene twice leaves exactly one copy on the surface.
use crate::ecg::axis::{time_ticks, AxisTick};
use crate::ecg::config::ChartConfig;
use crate::ecg::grid::{gridlines, Gridline, Orientation};
use crate::ecg::leads::RearrangedLeadSet;
use crate::ecg::plotter::{lead_labels, lead_paths, LeadLabel, LeadPath};
use crate::ecg::scale::Scales;
use crate::ecg::StripError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    LeadLabel,
    AxisTick,
}

/// Drawing capabilities the chart needs from its host. Coordinates are
/// absolute surface pixels, margins already applied.
pub trait RenderSurface {
    /// Drop whatever was drawn before and resize the root.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), StripError>;
    fn draw_gridline(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        stroke_width: f64,
        major: bool,
    ) -> Result<(), StripError>;
    fn draw_polyline(&mut self, points: &[(f64, f64)]) -> Result<(), StripError>;
    fn draw_text(&mut self, text: &str, at: (f64, f64), role: TextRole) -> Result<(), StripError>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub chart_width: f64,
    pub chart_height: f64,
    pub gridlines: Vec<Gridline>,
    pub paths: Vec<LeadPath>,
    pub labels: Vec<LeadLabel>,
    pub ticks: Vec<AxisTick>,
}

impl Scene {
    /// Root with nothing on it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(leads: &RearrangedLeadSet, scales: &Scales, config: &ChartConfig) -> Self {
        let geometry = scales.geometry;
        Self {
            width: geometry.total_width(),
            height: geometry.total_height(),
            margin: geometry.margin,
            chart_width: geometry.chart_width,
            chart_height: geometry.chart_height,
            gridlines: gridlines(scales, config),
            paths: lead_paths(leads, scales),
            labels: lead_labels(leads, scales, config),
            ticks: time_ticks(scales),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn to_surface(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x + self.margin, y + self.margin)
    }

    pub fn paint<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<(), StripError> {
        surface.clear(self.width, self.height)?;
        for line in &self.gridlines {
            let (from, to) = match line.orientation {
                Orientation::Vertical => ((line.position, 0.0), (line.position, self.chart_height)),
                Orientation::Horizontal => ((0.0, line.position), (self.chart_width, line.position)),
            };
            surface.draw_gridline(
                self.to_surface(from),
                self.to_surface(to),
                line.stroke_width,
                line.is_major(),
            )?;
        }
        for path in &self.paths {
            if path.points.len() < 2 {
                continue;
            }
            let points: Vec<(f64, f64)> = path.points.iter().map(|&p| self.to_surface(p)).collect();
            surface.draw_polyline(&points)?;
        }
        for label in &self.labels {
            surface.draw_text(&label.text, self.to_surface((label.x, label.y)), TextRole::LeadLabel)?;
        }
        for tick in &self.ticks {
            surface.draw_text(
                &tick.label,
                self.to_surface((tick.x, self.chart_height)),
                TextRole::AxisTick,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Gridline { from: (f64, f64), to: (f64, f64), stroke_width: f64 },
    Polyline(Vec<(f64, f64)>),
    Text { text: String, at: (f64, f64), role: TextRole },
}

/// Surface that remembers what it was asked to draw.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct SceneRecorder {
    pub size: (f64, f64),
    pub commands: Vec<DrawCommand>,
    pub clears: usize,
}

#[cfg(test)]
impl SceneRecorder {
    pub fn polylines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline(_)))
            .count()
    }
}

#[cfg(test)]
impl RenderSurface for SceneRecorder {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), StripError> {
        self.size = (width, height);
        self.commands.clear();
        self.clears += 1;
        Ok(())
    }
    fn draw_gridline(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        stroke_width: f64,
        _major: bool,
    ) -> Result<(), StripError> {
        self.commands.push(DrawCommand::Gridline { from, to, stroke_width });
        Ok(())
    }
    fn draw_polyline(&mut self, points: &[(f64, f64)]) -> Result<(), StripError> {
        self.commands.push(DrawCommand::Polyline(points.to_vec()));
        Ok(())
    }
    fn draw_text(&mut self, text: &str, at: (f64, f64), role: TextRole) -> Result<(), StripError> {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            role,
        });
        Ok(())
    }
}
