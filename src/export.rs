use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::geometry::Point;
use crate::chart::plan::{Anchor, RenderPlan, Surface};
use crate::chart::scale::Layout;
use crate::color::{AreaStyle, LineStyle, TextStyle, to_svg};

// ---------------------------------------------------------------------------
// SVG surface – headless rendering of a plan
// ---------------------------------------------------------------------------

/// Collects SVG elements; writing into a `String` cannot fail.
#[derive(Debug, Default)]
pub struct SvgSurface {
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the collected elements in an `<svg>` document.
    pub fn finish(self, layout: &Layout, title: &str) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="Arial">
  <title>{}</title>
  <rect width="100%" height="100%" fill="white"/>
{}</svg>
"#,
            layout.width,
            layout.height,
            escape(title),
            self.body
        )
    }
}

impl Surface for SvgSurface {
    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle) {
        let (color, opacity) = to_svg(style.color);
        let _ = writeln!(
            self.body,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}" stroke-opacity="{opacity:.3}" stroke-width="{}"/>"#,
            from.x, from.y, to.x, to.y, style.width
        );
    }

    fn draw_polygon(&mut self, points: &[Point], style: &AreaStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut d = format!("M{:.2} {:.2}", first.x, first.y);
        for p in rest {
            let _ = write!(d, " L{:.2} {:.2}", p.x, p.y);
        }
        let (fill, fill_opacity) = to_svg(style.fill);
        let (stroke, stroke_opacity) = to_svg(style.stroke);
        let _ = writeln!(
            self.body,
            r#"  <path d="{d}" fill="{fill}" fill-opacity="{fill_opacity:.3}" stroke="{stroke}" stroke-opacity="{stroke_opacity:.3}" stroke-width="{}"/>"#,
            style.width
        );
    }

    fn draw_text(&mut self, at: Point, text: &str, anchor: Anchor, style: &TextStyle) {
        let (color, _) = to_svg(style.color);
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::End => "end",
        };
        let _ = writeln!(
            self.body,
            r#"  <text x="{:.2}" y="{:.2}" font-size="{}" fill="{color}" text-anchor="{anchor}">{}</text>"#,
            at.x,
            at.y,
            style.size,
            escape(text)
        );
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn render_svg(plan: &RenderPlan, layout: &Layout) -> String {
    let mut surface = SvgSurface::new();
    plan.render(&mut surface);
    surface.finish(layout, &plan.title)
}

pub fn write_svg(path: &Path, plan: &RenderPlan, layout: &Layout) -> Result<()> {
    std::fs::write(path, render_svg(plan, layout))
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} chart to {}", plan.title, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::plan::Chart;
    use crate::config::ChartConfig;
    use crate::data::loader::parse_text;
    use crate::data::model::RowPolicy;

    #[test]
    fn svg_contains_every_primitive() {
        let dataset = parse_text(
            "h\n\"Bonaire, Sint Eustatius & Saba\",BES,1995,1,2,3\n\"Bonaire, Sint Eustatius & Saba\",BES,1996,2,2,3\n",
            RowPolicy::Propagate,
        )
        .unwrap();
        let config = ChartConfig::default();
        let theme = config.theme().unwrap();
        let chart = Chart::new(&dataset, &config.layout, &theme);
        let plan = chart
            .set_country_filter("Bonaire, Sint Eustatius & Saba")
            .unwrap();

        let svg = render_svg(&plan, &config.layout);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<title>Bonaire, Sint Eustatius &amp; Saba</title>"));
        assert_eq!(svg.matches("<path ").count(), 3);
        assert_eq!(svg.matches("<text ").count(), plan.ticks.values().len() + 1 + 2);
        assert!(svg.contains(r##"fill="#ea961a" fill-opacity="0.800""##));
        assert!(svg.contains(r#"text-anchor="end">0</text>"#));
    }

    #[test]
    fn empty_polygon_writes_nothing() {
        let mut surface = SvgSurface::new();
        let style = ChartConfig::default().theme().unwrap().total;
        surface.draw_polygon(&[], &style);
        assert!(surface.body.is_empty());
    }
}
