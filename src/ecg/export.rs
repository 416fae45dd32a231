use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::ecg::scene::{RenderSurface, Scene, TextRole};
use crate::ecg::StripError;

#[derive(Clone, Debug)]
pub struct ExportStyle {
    pub background: RGBColor,
    pub minor_grid: RGBColor,
    pub major_grid: RGBColor,
    pub trace: RGBColor,
    pub text: RGBColor,
    pub trace_width: u32,
    /// Bitmap lines are whole pixels, so the sub-pixel grid strokes are
    /// replaced by these widths.
    pub minor_grid_width: u32,
    pub major_grid_width: u32,
    /// Text needs system fonts; switch off for headless runs.
    pub draw_labels: bool,
}

impl Default for ExportStyle {
    fn default() -> Self {
        Self {
            background: RGBColor(255, 250, 250),
            minor_grid: RGBColor(250, 200, 200),
            major_grid: RGBColor(230, 110, 110),
            trace: RGBColor(20, 20, 20),
            text: RGBColor(60, 60, 60),
            trace_width: 1,
            minor_grid_width: 1,
            major_grid_width: 2,
            draw_labels: true,
        }
    }
}

struct BitmapSurface<'a, 'b> {
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    style: &'a ExportStyle,
}

fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

impl RenderSurface for BitmapSurface<'_, '_> {
    fn clear(&mut self, _width: f64, _height: f64) -> Result<(), StripError> {
        self.root.fill(&self.style.background)?;
        Ok(())
    }

    fn draw_gridline(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        _stroke_width: f64,
        major: bool,
    ) -> Result<(), StripError> {
        let (color, width) = if major {
            (self.style.major_grid, self.style.major_grid_width)
        } else {
            (self.style.minor_grid, self.style.minor_grid_width)
        };
        let style = color.stroke_width(width);
        self.root.draw(&PathElement::new(vec![px(from), px(to)], style))?;
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)]) -> Result<(), StripError> {
        let points: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
        let style = self.style.trace.stroke_width(self.style.trace_width);
        self.root.draw(&PathElement::new(points, style))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: (f64, f64), role: TextRole) -> Result<(), StripError> {
        if !self.style.draw_labels {
            return Ok(());
        }
        let (size, at) = match role {
            TextRole::LeadLabel => (14, at),
            TextRole::AxisTick => (10, (at.0 + 2.0, at.1 - 12.0)),
        };
        let font = ("sans-serif", size).into_font().color(&self.style.text);
        self.root.draw(&Text::new(text.to_owned(), px(at), font))?;
        Ok(())
    }
}

/// Paint a scene into an in-memory PNG sized to the scene's root.
pub fn render_scene_png(scene: &Scene, style: &ExportStyle) -> Result<Vec<u8>, StripError> {
    if scene.is_empty() {
        return Err(StripError::Plot("scene has no leads to export".into()));
    }

    let width = scene.width.ceil().max(1.0) as u32;
    let height = scene.height.ceil().max(1.0) as u32;
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let mut surface = BitmapSurface { root: &root, style };
        scene.paint(&mut surface)?;
        root.present()?;
    }

    log::info!("exported {width}x{height} png");
    encode_png(&buffer, width, height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, StripError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| StripError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecg::config::ChartConfig;
    use crate::ecg::synth::SyntheticEcg;
    use crate::ecg::StripChart;
    #[test]
    fn exported_chart_is_a_png_of_the_root_size() {
        let mut chart = StripChart::new(ChartConfig::default());
        chart
            .load(Some(&SyntheticEcg::new(250.0, 75.0).twelve_lead(1.0)))
            .unwrap();
        let style = ExportStyle {
            draw_labels: false,
            ..ExportStyle::default()
        };
        let png = render_scene_png(&chart.scene(), &style).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
        let decoded = image::load_from_memory(&png).unwrap();
        let geometry = chart.geometry().unwrap();
        assert_eq!(decoded.width() as f64, geometry.total_width());
        assert_eq!(decoded.height() as f64, geometry.total_height());
    }

    #[test]
    fn large_boxes_are_drawn_heavier_than_small_ones() {
        let mut chart = StripChart::new(ChartConfig::default());
        chart
            .load(Some(&SyntheticEcg::new(250.0, 75.0).twelve_lead(1.0)))
            .unwrap();
        let major_pixels = |major_grid_width: u32| {
            let style = ExportStyle {
                draw_labels: false,
                major_grid_width,
                ..ExportStyle::default()
            };
            let png = render_scene_png(&chart.scene(), &style).unwrap();
            let RGBColor(r, g, b) = style.major_grid;
            image::load_from_memory(&png)
                .unwrap()
                .to_rgb8()
                .pixels()
                .filter(|p| p.0 == [r, g, b])
                .count()
        };
        assert!(major_pixels(2) > major_pixels(1));
    }

    #[test]
    fn empty_chart_cannot_be_exported() {
        let chart = StripChart::new(ChartConfig::default());
        assert!(matches!(
            render_scene_png(&chart.scene(), &ExportStyle::default()),
            Err(StripError::Plot(_))
        ));
    }
}
