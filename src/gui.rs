// src/gui.rs
use std::time::Duration;
use eframe::egui;
use egui::{Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use crate::ecg::{
    render_scene_png, ChartEvent, ExportStyle, RenderSurface, StripChart, StripError, TextRole,
    ZoomState,
};

const PAPER: Color32 = Color32::from_rgb(255, 250, 250);
const MINOR_GRID: Color32 = Color32::from_rgb(250, 200, 200);
const MAJOR_GRID: Color32 = Color32::from_rgb(230, 110, 110);
const TRACE: Color32 = Color32::from_rgb(20, 20, 20);
const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
const BRUSH: Color32 = Color32::from_rgba_premultiplied(40, 60, 120, 50);

/// egui 画布适配：坐标以图表根节点左上角为原点
struct EguiSurface<'a> {
    painter: &'a Painter,
    origin: Pos2,
}

impl EguiSurface<'_> {
    fn pos(&self, (x, y): (f64, f64)) -> Pos2 {
        self.origin + Vec2::new(x as f32, y as f32)
    }
}

impl RenderSurface for EguiSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), StripError> {
        // egui 每帧重画，这里只铺底色
        let rect = Rect::from_min_size(self.origin, Vec2::new(width as f32, height as f32));
        self.painter.rect_filled(rect, 0.0, PAPER);
        Ok(())
    }
    fn draw_gridline(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        stroke_width: f64,
        major: bool,
    ) -> Result<(), StripError> {
        let color = if major { MAJOR_GRID } else { MINOR_GRID };
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            Stroke::new(stroke_width as f32, color),
        );
        Ok(())
    }
    fn draw_polyline(&mut self, points: &[(f64, f64)]) -> Result<(), StripError> {
        let points: Vec<Pos2> = points.iter().map(|&p| self.pos(p)).collect();
        self.painter
            .add(egui::Shape::line(points, Stroke::new(1.2, TRACE)));
        Ok(())
    }
    fn draw_text(&mut self, text: &str, at: (f64, f64), role: TextRole) -> Result<(), StripError> {
        let (align, size, offset) = match role {
            TextRole::LeadLabel => (egui::Align2::LEFT_BOTTOM, 13.0, Vec2::ZERO),
            TextRole::AxisTick => (egui::Align2::LEFT_BOTTOM, 10.0, Vec2::new(2.0, -2.0)),
        };
        self.painter
            .text(self.pos(at) + offset, align, text, FontId::proportional(size), TEXT);
        Ok(())
    }
}

pub struct EcgViewerApp {
    chart: StripChart,
    source_name: String,
    // 工具栏
    zoom_factor: String,
    export_path: String,
    // 框选中的像素区间（图表坐标）
    brush: Option<(f64, f64)>,
    // 界面日志
    log_messages: Vec<String>,
}

impl EcgViewerApp {
    pub fn new(chart: StripChart, source_name: String) -> Self {
        let leads = chart.lead_names().join(", ");
        let mut app = Self {
            chart,
            source_name,
            zoom_factor: "2".to_owned(),
            export_path: "ecg_strip.png".to_owned(),
            brush: None,
            log_messages: vec!["ECG strip viewer ready.".to_owned()],
        };
        if leads.is_empty() {
            app.log("No clinical leads to display.");
        } else {
            app.log(&format!("Leads: {leads}"));
        }
        app
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }

    fn dispatch(&mut self, event: ChartEvent) {
        match self.chart.handle(event) {
            Ok(true) => {
                if let Some((d0, d1)) = self.chart.time_domain() {
                    self.log(&format!("View {:.3}s - {:.3}s", d0, d1));
                }
            }
            Ok(false) => {}
            Err(e) => {
                log::warn!("{e}");
                self.log(&e.to_string());
            }
        }
    }

    fn export_png(&mut self) {
        let result = render_scene_png(&self.chart.scene(), &ExportStyle::default())
            .and_then(|png| std::fs::write(&self.export_path, png).map_err(StripError::from));
        match result {
            Ok(()) => {
                let msg = format!("Saved {}", self.export_path);
                self.log(&msg);
            }
            Err(e) => {
                log::error!("export failed: {e}");
                self.log(&format!("Export failed: {e}"));
            }
        }
    }

    /// 画图表并把鼠标手势翻译成 ChartEvent
    fn draw_chart(&mut self, ui: &mut egui::Ui) -> Vec<ChartEvent> {
        let mut events = Vec::new();
        let Some(geometry) = self.chart.geometry() else {
            ui.centered_and_justified(|ui| ui.label("No clinical leads to display."));
            return events;
        };
        let size = Vec2::new(geometry.total_width() as f32, geometry.total_height() as f32);
        let margin = geometry.margin;
        let chart_height = geometry.chart_height;

        egui::ScrollArea::both().auto_shrink([false; 2]).show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
            let origin = response.rect.min;
            let mut surface = EguiSurface {
                painter: &painter,
                origin,
            };
            if let Err(e) = self.chart.render(&mut surface) {
                log::error!("paint failed: {e}");
            }

            let chart_x = |pos: Pos2| (pos.x - origin.x) as f64 - margin;
            if response.double_clicked() {
                self.brush = None;
                events.push(ChartEvent::DoubleClick);
            } else {
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let x = chart_x(pos);
                        self.brush = Some((x, x));
                    }
                }
                if response.dragged() {
                    if let (Some(pos), Some((start, _))) = (response.interact_pointer_pos(), self.brush) {
                        self.brush = Some((start, chart_x(pos)));
                    }
                }
                if response.drag_released() {
                    // 松开后清掉框选，空框由核心忽略
                    events.push(ChartEvent::BrushEnd(self.brush.take()));
                }
            }

            if let Some((a, b)) = self.brush {
                let top = origin.y + margin as f32;
                let rect = Rect::from_min_max(
                    Pos2::new(origin.x + (a.min(b) + margin) as f32, top),
                    Pos2::new(origin.x + (a.max(b) + margin) as f32, top + chart_height as f32),
                );
                painter.rect_filled(rect, 0.0, BRUSH);
            }
        });
        events
    }
}

impl eframe::App for EcgViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 推进缩放动画
        let dt = ctx.input(|i| i.stable_dt);
        self.chart.advance(Duration::from_secs_f32(dt.max(0.0)));

        ctx.set_visuals(egui::Visuals::light());

        // 2. 工具栏
        let mut events = Vec::new();
        egui::SidePanel::left("toolbar").min_width(240.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("ECG Strip");
            ui.label(self.source_name.as_str());
            ui.separator();

            let state = match self.chart.state() {
                ZoomState::Overview => "Overview",
                ZoomState::Zoomed => "Zoomed",
            };
            ui.label(format!("View: {state}"));
            if let (Some(boxes), Some(geometry)) = (self.chart.visible_boxes(), self.chart.geometry()) {
                ui.label(format!(
                    "{boxes:.1} of {} small boxes in view",
                    geometry.num_x_grids
                ));
            }
            let config = self.chart.config();
            ui.label(format!(
                "{} px per box, 0.04 s x 0.1 mV",
                config.box_px
            ));

            ui.add_space(10.0);
            ui.label("ZOOM FACTOR");
            ui.text_edit_singleline(&mut self.zoom_factor);
            ui.horizontal(|ui| {
                if ui.button("➕ Zoom In").clicked() {
                    events.push(ChartEvent::ZoomIn(self.zoom_factor.clone()));
                }
                if ui.button("➖ Zoom Out").clicked() {
                    events.push(ChartEvent::ZoomOut(self.zoom_factor.clone()));
                }
            });
            if ui.button("🔄 RESET VIEW").clicked() {
                events.push(ChartEvent::DoubleClick);
            }
            ui.label(
                egui::RichText::new("Drag across the chart to zoom, double-click to reset.")
                    .small(),
            );

            ui.add_space(10.0);
            ui.separator();
            ui.label("EXPORT");
            ui.text_edit_singleline(&mut self.export_path);
            let mut export = false;
            if ui.button("💾 Save PNG").clicked() {
                export = true;
            }

            ui.add_space(10.0);
            egui::ScrollArea::vertical().max_height(140.0).show(ui, |ui| {
                for m in &self.log_messages {
                    ui.monospace(m);
                }
            });
            if export {
                self.export_png();
            }
        });

        // 3. 图表
        egui::CentralPanel::default().show(ctx, |ui| {
            events.extend(self.draw_chart(ui));
        });

        for event in events {
            self.dispatch(event);
        }
        if self.chart.is_animating() || self.brush.is_some() {
            ctx.request_repaint();
        }
    }
}
