use eframe::egui::epaint::Mesh;
use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui, pos2};

use crate::chart::geometry::Point;
use crate::chart::plan::{Anchor, Surface};
use crate::chart::scale::Layout;
use crate::color::{AreaStyle, LineStyle, TextStyle, to_color32};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Painter surface – draws plan primitives with egui
// ---------------------------------------------------------------------------

/// Maps canvas coordinates onto `rect` and paints with `painter`.
pub struct PainterSurface<'p> {
    painter: &'p Painter,
    rect: Rect,
    scale_x: f32,
    scale_y: f32,
}

impl<'p> PainterSurface<'p> {
    pub fn new(painter: &'p Painter, rect: Rect, layout: &Layout) -> Self {
        Self {
            painter,
            rect,
            scale_x: rect.width() / layout.width as f32,
            scale_y: rect.height() / layout.height as f32,
        }
    }

    fn pos(&self, p: Point) -> Pos2 {
        pos2(
            self.rect.min.x + p.x as f32 * self.scale_x,
            self.rect.min.y + p.y as f32 * self.scale_y,
        )
    }
}

impl Surface for PainterSurface<'_> {
    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle) {
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            Stroke::new(style.width, to_color32(style.color)),
        );
    }

    /// The polygon is an area whose first and last points sit on the
    /// baseline; egui fills only convex shapes, so the area is filled as
    /// one trapezoid per pair of neighbouring data points.
    fn draw_polygon(&mut self, points: &[Point], style: &AreaStyle) {
        let pts: Vec<Pos2> = points.iter().map(|&p| self.pos(p)).collect();
        if pts.len() < 3 {
            return;
        }
        let base_y = pts[0].y;
        let fill = to_color32(style.fill);

        let mut mesh = Mesh::default();
        for pair in pts[1..pts.len() - 1].windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let i = mesh.vertices.len() as u32;
            mesh.colored_vertex(pos2(a.x, base_y), fill);
            mesh.colored_vertex(a, fill);
            mesh.colored_vertex(b, fill);
            mesh.colored_vertex(pos2(b.x, base_y), fill);
            mesh.add_triangle(i, i + 1, i + 2);
            mesh.add_triangle(i, i + 2, i + 3);
        }
        self.painter.add(Shape::mesh(mesh));
        self.painter.add(Shape::line(
            pts,
            Stroke::new(style.width, to_color32(style.stroke)),
        ));
    }

    fn draw_text(&mut self, at: Point, text: &str, anchor: Anchor, style: &TextStyle) {
        let align = match anchor {
            Anchor::Start => Align2::LEFT_BOTTOM,
            Anchor::End => Align2::RIGHT_BOTTOM,
        };
        self.painter.text(
            self.pos(at),
            align,
            text,
            FontId::proportional(style.size),
            to_color32(style.color),
        );
    }
}

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current plan in the central panel.
pub fn chart_plot(ui: &mut Ui, state: &AppState) {
    let plan = match &state.plan {
        Some(plan) => plan,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.dataset.is_some() {
                    ui.heading("Nothing to draw for this selection");
                } else {
                    ui.heading("Open a death-rate CSV to view the chart  (File → Open…)");
                }
            });
            return;
        }
    };

    ui.heading(format!("Death rates from air pollution: {}", plan.title));
    ui.horizontal(|ui: &mut Ui| {
        for (measure, _) in &plan.series {
            if let Some(style) = state.theme.area(*measure) {
                ui.label(RichText::new(measure.to_string()).color(to_color32(style.stroke)));
            }
        }
    });

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    painter.rect_filled(response.rect, 0.0, Color32::WHITE);

    let mut surface = PainterSurface::new(&painter, response.rect, &state.config.layout);
    plan.render(&mut surface);
}
